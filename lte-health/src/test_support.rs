use std::collections::HashMap;
use std::time::Duration;

use crate::at::{AtCommand, AtPort};
use crate::error::TransportError;
use crate::sleep::Sleep;

/// Fake modem whose reported RSSI changes when a band is selected.
#[derive(Debug, Default)]
pub struct ScriptedPort {
    pub sent: Vec<AtCommand>,
    /// RSSI reported by `AT+CSQ`. `None` makes the query fail.
    pub rssi: Option<u8>,
    /// RSSI reported after switching to a given band.
    pub band_rssi: HashMap<u16, Option<u8>>,
}

impl ScriptedPort {
    pub fn with_rssi(rssi: Option<u8>) -> Self {
        Self {
            rssi,
            ..Default::default()
        }
    }

    pub fn on_band(mut self, band: u16, rssi: Option<u8>) -> Self {
        self.band_rssi.insert(band, rssi);
        self
    }

    pub fn selected_bands(&self) -> Vec<u16> {
        self.sent
            .iter()
            .filter_map(|cmd| match cmd {
                AtCommand::SelectBand(b) => Some(*b),
                _ => None,
            })
            .collect()
    }
}

impl AtPort for ScriptedPort {
    fn send(&mut self, command: AtCommand) -> Result<String, TransportError> {
        self.sent.push(command);
        match command {
            AtCommand::SignalQuality => match self.rssi {
                Some(rssi) => Ok(format!("\r\n+CSQ: {rssi},0\r\n\r\nOK\r\n")),
                None => Err(TransportError::Decode {
                    device: "scripted".to_owned(),
                    command: command.to_string(),
                }),
            },
            AtCommand::SelectBand(band) => {
                if let Some(rssi) = self.band_rssi.get(&band) {
                    self.rssi = *rssi;
                }
                Ok("\r\nOK\r\n".to_owned())
            }
            AtCommand::Disable | AtCommand::Enable => Ok("\r\nOK\r\n".to_owned()),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingSleep {
    pub slept: Vec<Duration>,
}

impl RecordingSleep {
    pub fn total(&self) -> Duration {
        self.slept.iter().sum()
    }
}

impl Sleep for RecordingSleep {
    fn sleep(&mut self, duration: Duration) {
        self.slept.push(duration);
    }
}
