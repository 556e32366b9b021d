//! Health checks for a cellular (LTE) modem link.
//!
//! [`check_status`] measures signal and latency once. [`Monitor`] keeps
//! measuring on an interval and runs a [`Recovery`] whenever the link looks
//! unhealthy.

pub mod assess;
pub mod at;
pub mod config;
pub mod error;
pub mod latency;
pub mod modem;
pub mod monitor;
pub mod recovery;
pub mod report;
pub mod signal;
pub mod sleep;
pub mod status;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use assess::{assess_latency, assess_signal, LatencyLabel, QualityLabel};
pub use at::{AtCommand, AtPort, SerialAtPort};
pub use config::{ModemConfig, MonitorConfig, StatusConfig, Thresholds};
pub use error::{ParseError, ProcessError, TransportError};
pub use latency::{LatencyReader, LatencySample, Pinger, SystemPing};
pub use modem::Modem;
pub use monitor::{needs_recovery, Monitor, Poll};
pub use recovery::{first_restoring_band, Recovery, RecoveryOutcome, RecoveryState};
pub use signal::SignalSample;
pub use sleep::{Sleep, ThreadSleep};
pub use status::{check_status, StatusReport};
