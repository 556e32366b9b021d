//! AT command transport to the modem's serial control port.

use std::io::{self, Read, Write};
use std::time::Duration;

use derive_more::Display;
use tracing::{debug, warn};

use crate::error::TransportError;

pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(2);
/// Upper bound on the number of reply bytes read per command.
pub const READ_BUDGET: usize = 200;

/// The AT commands these tools issue.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum AtCommand {
    #[display("AT+CSQ")]
    SignalQuality,
    #[display("AT+CFUN=0")]
    Disable,
    #[display("AT+CFUN=1")]
    Enable,
    #[display("AT+CBAND={_0}")]
    SelectBand(u16),
}

/// Something that can deliver a single AT command and return the modem's raw reply.
pub trait AtPort {
    fn send(&mut self, command: AtCommand) -> Result<String, TransportError>;
}

/// AT port backed by a serial character device.
///
/// The device is opened for each command and closed when the reply has
/// been read, so the handle is never held across polls.
#[derive(Debug, Clone)]
pub struct SerialAtPort {
    device: String,
    baud_rate: u32,
    timeout: Duration,
}

impl SerialAtPort {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    pub fn with_baud_rate(self, baud_rate: u32) -> Self {
        Self { baud_rate, ..self }
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn device(&self) -> &str {
        &self.device
    }
}

impl AtPort for SerialAtPort {
    fn send(&mut self, command: AtCommand) -> Result<String, TransportError> {
        debug!(device = %self.device, "Sending AT command: {command}");
        let mut port = serialport::new(&self.device, self.baud_rate)
            .timeout(self.timeout)
            .open()
            .map_err(|source| TransportError::Open {
                device: self.device.clone(),
                source,
            })?;

        port.write_all(format!("{command}\r").as_bytes())
            .map_err(|source| TransportError::Write {
                device: self.device.clone(),
                command: command.to_string(),
                source,
            })?;

        let raw = read_reply(&mut port).map_err(|source| TransportError::Read {
            device: self.device.clone(),
            command: command.to_string(),
            source,
        })?;

        let response = decode_reply(&raw).ok_or_else(|| TransportError::Decode {
            device: self.device.clone(),
            command: command.to_string(),
        })?;

        if response.contains("ERROR") {
            warn!("AT command returned error: {response:?}");
        } else {
            debug!("AT command response: {response:?}");
        }

        Ok(response)
    }
}

/// Reads until the byte budget is used up, the port times out, or a final
/// result code has arrived.
fn read_reply(port: &mut impl Read) -> io::Result<Vec<u8>> {
    let mut reply = Vec::with_capacity(READ_BUDGET);
    let mut buf = [0u8; READ_BUDGET];

    while reply.len() < READ_BUDGET {
        let remaining = READ_BUDGET - reply.len();
        match port.read(&mut buf[..remaining]) {
            Ok(0) => break,
            Ok(n) => {
                reply.extend_from_slice(&buf[..n]);
                if has_final_result(&reply) {
                    break;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut && !reply.is_empty() => {
                break;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(reply)
}

fn has_final_result(reply: &[u8]) -> bool {
    let text = String::from_utf8_lossy(reply);
    text.contains("OK") || text.contains("ERROR")
}

/// Lossy decode that drops invalid bytes. `None` when nothing readable is left.
fn decode_reply(raw: &[u8]) -> Option<String> {
    let text: String = String::from_utf8_lossy(raw)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect();

    if !raw.is_empty() && text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out pre-recorded chunks, then times out.
    struct ChunkedReader {
        chunks: Vec<Vec<u8>>,
    }

    impl Read for ChunkedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                return Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"));
            }
            let chunk = self.chunks.remove(0);
            let n = chunk.len().min(buf.len());
            buf[..n].copy_from_slice(&chunk[..n]);
            Ok(n)
        }
    }

    #[test]
    fn it_renders_wire_commands() {
        assert_eq!(AtCommand::SignalQuality.to_string(), "AT+CSQ");
        assert_eq!(AtCommand::Disable.to_string(), "AT+CFUN=0");
        assert_eq!(AtCommand::Enable.to_string(), "AT+CFUN=1");
        assert_eq!(AtCommand::SelectBand(40).to_string(), "AT+CBAND=40");
    }

    #[test]
    fn it_stops_reading_at_final_result_code() {
        let mut reader = ChunkedReader {
            chunks: vec![
                b"\r\n+CSQ: 18,2".to_vec(),
                b"\r\n\r\nOK\r\n".to_vec(),
                b"unsolicited".to_vec(),
            ],
        };

        let reply = read_reply(&mut reader).unwrap();

        assert_eq!(reply, b"\r\n+CSQ: 18,2\r\n\r\nOK\r\n");
        assert_eq!(reader.chunks.len(), 1);
    }

    #[test]
    fn it_returns_partial_reply_on_timeout() {
        let mut reader = ChunkedReader {
            chunks: vec![b"+CSQ: 7,99".to_vec()],
        };

        let reply = read_reply(&mut reader).unwrap();

        assert_eq!(reply, b"+CSQ: 7,99");
    }

    #[test]
    fn it_fails_when_nothing_arrives_before_timeout() {
        let mut reader = ChunkedReader { chunks: Vec::new() };

        let err = read_reply(&mut reader).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }

    #[test]
    fn it_respects_the_read_budget() {
        let mut reader = ChunkedReader {
            chunks: vec![vec![b'x'; 150], vec![b'y'; 150]],
        };

        let reply = read_reply(&mut reader).unwrap();

        assert_eq!(reply.len(), READ_BUDGET);
    }

    #[test]
    fn it_drops_invalid_utf8_when_decoding() {
        assert_eq!(
            decode_reply(b"+CSQ: \xff18,2\r\nOK").as_deref(),
            Some("+CSQ: 18,2\r\nOK")
        );
        assert_eq!(decode_reply(b"\xff\xfe"), None);
    }
}
