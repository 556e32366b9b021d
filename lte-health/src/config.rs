use std::time::Duration;

use crate::at::{SerialAtPort, DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT};

pub const DEFAULT_MODEM_PORT: &str = "/dev/ttyUSB2";
pub const DEFAULT_PING_TARGET: &str = "8.8.8.8";
pub const DEFAULT_STATUS_PING_COUNT: u32 = 5;
pub const DEFAULT_MONITOR_PING_COUNT: u32 = 3;
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);
pub const DEFAULT_MIN_RSSI: u8 = 15;
pub const DEFAULT_MAX_LATENCY_MS: f64 = 120.0;
/// Commonly deployed bands in India. Adjust for the provider.
pub const DEFAULT_LTE_BANDS: [u16; 3] = [40, 3, 5];

/// Serial settings for the modem's AT port.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct ModemConfig {
    #[builder(into, default = DEFAULT_MODEM_PORT.to_owned())]
    pub port: String,
    #[builder(default = DEFAULT_BAUD_RATE)]
    pub baud_rate: u32,
    #[builder(default = DEFAULT_READ_TIMEOUT)]
    pub read_timeout: Duration,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ModemConfig {
    pub fn serial_port(&self) -> SerialAtPort {
        SerialAtPort::new(self.port.clone())
            .with_baud_rate(self.baud_rate)
            .with_timeout(self.read_timeout)
    }
}

/// Limits below which the link counts as unhealthy.
#[derive(Debug, Clone, Copy, PartialEq, bon::Builder)]
pub struct Thresholds {
    #[builder(default = DEFAULT_MIN_RSSI)]
    pub min_rssi: u8,
    #[builder(default = DEFAULT_MAX_LATENCY_MS)]
    pub max_latency_ms: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Settings for the one-shot status check.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct StatusConfig {
    #[builder(default)]
    pub modem: ModemConfig,
    #[builder(into, default = DEFAULT_PING_TARGET.to_owned())]
    pub ping_target: String,
    #[builder(default = DEFAULT_STATUS_PING_COUNT)]
    pub ping_count: u32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Settings for the monitor loop, fixed for the lifetime of a [`crate::Monitor`].
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct MonitorConfig {
    #[builder(default)]
    pub modem: ModemConfig,
    #[builder(into, default = DEFAULT_PING_TARGET.to_owned())]
    pub ping_target: String,
    #[builder(default = DEFAULT_MONITOR_PING_COUNT)]
    pub ping_count: u32,
    #[builder(default = DEFAULT_CHECK_INTERVAL)]
    pub check_interval: Duration,
    #[builder(default)]
    pub thresholds: Thresholds,
    /// Bands tried in order during recovery.
    #[builder(into, default = DEFAULT_LTE_BANDS.to_vec())]
    pub bands: Vec<u16>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
