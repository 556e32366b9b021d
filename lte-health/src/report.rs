//! Human readable console lines. Machine readable output is not provided.

use std::fmt::Display;

use crate::assess::{assess_latency, assess_signal};
use crate::latency::LatencySample;
use crate::signal::SignalSample;

fn or_unknown<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "unknown".to_owned(), |v| v.to_string())
}

pub fn status_signal_lines(signal: &SignalSample) -> [String; 2] {
    [
        format!(
            "RSSI: {}, BER: {}",
            or_unknown(signal.rssi),
            or_unknown(signal.bit_error_rate)
        ),
        format!("Signal Quality: {}", assess_signal(signal.rssi)),
    ]
}

pub fn status_latency_lines(latency: &LatencySample) -> [String; 2] {
    let measured = match latency.average_ms {
        Some(ms) => format!("Average Latency: {ms:.1} ms"),
        None => "Ping failed.".to_owned(),
    };

    [
        measured,
        format!("Latency Assessment: {}", assess_latency(latency.average_ms)),
    ]
}

pub fn monitor_signal_line(signal: &SignalSample) -> String {
    format!(
        "Signal: RSSI={}, BER={}, Quality={}",
        or_unknown(signal.rssi),
        or_unknown(signal.bit_error_rate),
        assess_signal(signal.rssi)
    )
}

pub fn monitor_latency_line(latency: &LatencySample) -> String {
    let measured = match latency.average_ms {
        Some(ms) => format!("{ms:.1} ms"),
        None => "unknown".to_owned(),
    };

    format!(
        "Latency: {measured}, Assessment={}",
        assess_latency(latency.average_ms)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_formats_status_lines() {
        let signal = SignalSample {
            rssi: Some(18),
            bit_error_rate: Some(2),
        };
        let latency = LatencySample {
            average_ms: Some(45.64),
        };

        assert_eq!(
            status_signal_lines(&signal),
            ["RSSI: 18, BER: 2", "Signal Quality: Good"]
        );
        assert_eq!(
            status_latency_lines(&latency),
            [
                "Average Latency: 45.6 ms",
                "Latency Assessment: Excellent for remote desktop"
            ]
        );
    }

    #[test]
    fn it_formats_missing_samples() {
        assert_eq!(
            status_signal_lines(&SignalSample::UNAVAILABLE),
            ["RSSI: unknown, BER: unknown", "Signal Quality: Unknown"]
        );
        assert_eq!(
            status_latency_lines(&LatencySample::UNAVAILABLE),
            ["Ping failed.", "Latency Assessment: Unknown"]
        );
        assert_eq!(
            monitor_latency_line(&LatencySample::UNAVAILABLE),
            "Latency: unknown, Assessment=Unknown"
        );
    }

    #[test]
    fn it_formats_monitor_lines() {
        let signal = SignalSample {
            rssi: Some(9),
            bit_error_rate: Some(99),
        };

        assert_eq!(
            monitor_signal_line(&signal),
            "Signal: RSSI=9, BER=99, Quality=Poor"
        );
        assert_eq!(
            monitor_latency_line(&LatencySample {
                average_ms: Some(150.0)
            }),
            "Latency: 150.0 ms, Assessment=Usable, noticeable lag"
        );
    }
}
