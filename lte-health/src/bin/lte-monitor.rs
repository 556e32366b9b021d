use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;

use orb_lte_health::{
    config::{
        DEFAULT_CHECK_INTERVAL, DEFAULT_LTE_BANDS, DEFAULT_MAX_LATENCY_MS,
        DEFAULT_MIN_RSSI, DEFAULT_MODEM_PORT, DEFAULT_MONITOR_PING_COUNT,
        DEFAULT_PING_TARGET,
    },
    telemetry, ModemConfig, Monitor, MonitorConfig, SystemPing, ThreadSleep,
    Thresholds,
};

const SYSLOG_IDENTIFIER: &str = "lte-monitor";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Monitor LTE signal and latency, power cycling the modem and switching bands when the link degrades"
)]
struct Cli {
    #[arg(
        short = 'm',
        long = "modem",
        env = "LTE_MODEM",
        default_value = DEFAULT_MODEM_PORT,
        help = "Path to the modem's AT command port"
    )]
    modem: String,

    #[arg(
        short = 't',
        long = "target",
        env = "LTE_PING_TARGET",
        default_value = DEFAULT_PING_TARGET,
        help = "Host or IP address to ping"
    )]
    ping_target: String,

    #[arg(
        short = 'c',
        long = "count",
        env = "LTE_PING_COUNT",
        default_value_t = DEFAULT_MONITOR_PING_COUNT,
        help = "Number of echo requests per check"
    )]
    ping_count: u32,

    #[arg(
        short = 'i',
        long = "interval",
        env = "LTE_CHECK_INTERVAL",
        default_value_t = DEFAULT_CHECK_INTERVAL.as_secs(),
        help = "Seconds to wait between checks"
    )]
    interval_secs: u64,

    #[arg(
        long = "min-rssi",
        env = "LTE_MIN_RSSI",
        default_value_t = DEFAULT_MIN_RSSI,
        value_parser = clap::value_parser!(u8).range(0..=31),
        help = "Lowest RSSI index (0-31) considered healthy"
    )]
    min_rssi: u8,

    #[arg(
        long = "max-latency",
        env = "LTE_MAX_LATENCY_MS",
        default_value_t = DEFAULT_MAX_LATENCY_MS,
        help = "Highest average latency in milliseconds considered healthy"
    )]
    max_latency_ms: f64,

    #[arg(
        short = 'b',
        long = "bands",
        env = "LTE_BANDS",
        value_delimiter = ',',
        default_values_t = DEFAULT_LTE_BANDS,
        help = "LTE bands to try in order during recovery, comma separated"
    )]
    bands: Vec<u16>,
}

impl Cli {
    fn into_config(self) -> MonitorConfig {
        MonitorConfig::builder()
            .modem(ModemConfig::builder().port(self.modem).build())
            .ping_target(self.ping_target)
            .ping_count(self.ping_count)
            .check_interval(Duration::from_secs(self.interval_secs))
            .thresholds(
                Thresholds::builder()
                    .min_rssi(self.min_rssi)
                    .max_latency_ms(self.max_latency_ms)
                    .build(),
            )
            .bands(self.bands)
            .build()
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    telemetry::init(SYSLOG_IDENTIFIER).wrap_err("failed to initialize logging")?;

    let config = cli.into_config();
    debug!(?config, "starting monitor");
    let port = config.modem.serial_port();

    Monitor::new(config, port, SystemPing, ThreadSleep).run()
}
