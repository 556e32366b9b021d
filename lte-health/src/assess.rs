//! Qualitative labels for signal and latency readings.
//!
//! Buckets are half-open: a value on a boundary belongs to the upper bucket.

use derive_more::Display;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QualityLabel {
    Unknown,
    Poor,
    Fair,
    Good,
    Excellent,
}

/// How usable the link is for interactive remote desktop sessions.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum LatencyLabel {
    #[display("Unknown")]
    Unknown,
    #[display("Excellent for remote desktop")]
    Excellent,
    #[display("Good, slight lag possible")]
    Good,
    #[display("Usable, noticeable lag")]
    Usable,
    #[display("Poor, not recommended")]
    Poor,
}

pub fn assess_signal(rssi: Option<u8>) -> QualityLabel {
    match rssi {
        None => QualityLabel::Unknown,
        Some(r) if r < 10 => QualityLabel::Poor,
        Some(r) if r < 15 => QualityLabel::Fair,
        Some(r) if r < 20 => QualityLabel::Good,
        Some(_) => QualityLabel::Excellent,
    }
}

pub fn assess_latency(average_ms: Option<f64>) -> LatencyLabel {
    match average_ms {
        None => LatencyLabel::Unknown,
        Some(ms) if ms < 60.0 => LatencyLabel::Excellent,
        Some(ms) if ms < 120.0 => LatencyLabel::Good,
        Some(ms) if ms < 200.0 => LatencyLabel::Usable,
        Some(_) => LatencyLabel::Poor,
    }
}
