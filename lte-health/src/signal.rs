use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParseError;

static CSQ_REPLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+CSQ: (\d+),(\d+)").expect("valid regex"));

/// One reading of the modem's `AT+CSQ` signal quality report.
///
/// Both fields are `None` when the modem could not be queried or the
/// reply could not be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalSample {
    /// RSSI index, 0..=31 (99 means "not known" to the modem).
    pub rssi: Option<u8>,
    /// Bit error rate index.
    pub bit_error_rate: Option<u8>,
}

impl SignalSample {
    pub const UNAVAILABLE: Self = Self {
        rssi: None,
        bit_error_rate: None,
    };

    /// Parses the first `+CSQ: <rssi>,<ber>` line found in a raw modem reply.
    pub fn parse(reply: &str) -> Result<Self, ParseError> {
        let caps = CSQ_REPLY
            .captures(reply)
            .ok_or_else(|| ParseError::MissingSignalReply(reply.to_owned()))?;

        Ok(Self {
            rssi: Some(caps[1].parse()?),
            bit_error_rate: Some(caps[2].parse()?),
        })
    }

    /// Like [`SignalSample::parse`], but maps any failure to an empty sample.
    pub fn parse_or_unavailable(reply: &str) -> Self {
        Self::parse(reply).unwrap_or(Self::UNAVAILABLE)
    }
}
