use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;

use orb_lte_health::{
    check_status,
    config::{DEFAULT_MODEM_PORT, DEFAULT_PING_TARGET, DEFAULT_STATUS_PING_COUNT},
    telemetry, ModemConfig, StatusConfig, SystemPing,
};

const SYSLOG_IDENTIFIER: &str = "lte-status";

#[derive(Parser)]
#[command(author, version, about = "Check LTE signal strength and latency once")]
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
        default_value_t = DEFAULT_STATUS_PING_COUNT,
        help = "Number of echo requests to send"
    )]
    ping_count: u32,
}

impl Cli {
    fn into_config(self) -> StatusConfig {
        StatusConfig::builder()
            .modem(ModemConfig::builder().port(self.modem).build())
            .ping_target(self.ping_target)
            .ping_count(self.ping_count)
            .build()
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    telemetry::init(SYSLOG_IDENTIFIER).wrap_err("failed to initialize logging")?;

    let config = cli.into_config();
    debug!(?config, "running status check");
    check_status(&config, config.modem.serial_port(), SystemPing);

    Ok(())
}
