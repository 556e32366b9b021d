use crate::at::AtPort;
use crate::config::StatusConfig;
use crate::latency::{LatencyReader, LatencySample, Pinger};
use crate::modem::Modem;
use crate::report;
use crate::signal::SignalSample;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub signal: SignalSample,
    pub latency: LatencySample,
}

/// Reads signal once, pings once and prints an assessment of both.
pub fn check_status<P: AtPort, G: Pinger>(
    config: &StatusConfig,
    port: P,
    pinger: G,
) -> StatusReport {
    println!("Checking 4G signal strength...");
    let signal = Modem::new(port).read_signal();
    for line in report::status_signal_lines(&signal) {
        println!("{line}");
    }

    let reader = LatencyReader::new(pinger, config.ping_target.clone(), config.ping_count);
    println!("\nPinging {} to check latency...", reader.target());
    let latency = reader.read();
    for line in report::status_latency_lines(&latency) {
        println!("{line}");
    }

    StatusReport { signal, latency }
}
