use tracing::{debug, warn};

use crate::at::{AtCommand, AtPort};
use crate::error::TransportError;
use crate::signal::SignalSample;

/// High level modem operations on top of a raw AT port.
#[derive(Debug)]
pub struct Modem<P> {
    port: P,
}

impl<P: AtPort> Modem<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }

    /// Issues `AT+CSQ`. Transport or parse failures yield an empty sample.
    pub fn read_signal(&mut self) -> SignalSample {
        let reply = match self.port.send(AtCommand::SignalQuality) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Error reading modem: {e}");
                return SignalSample::UNAVAILABLE;
            }
        };

        match SignalSample::parse(&reply) {
            Ok(sample) => {
                debug!(?sample, "Parsed signal quality");
                sample
            }
            Err(e) => {
                warn!("Error reading modem: {e}");
                SignalSample::UNAVAILABLE
            }
        }
    }

    pub fn power_down(&mut self) -> Result<(), TransportError> {
        self.port.send(AtCommand::Disable).map(drop)
    }

    pub fn power_up(&mut self) -> Result<(), TransportError> {
        self.port.send(AtCommand::Enable).map(drop)
    }

    pub fn select_band(&mut self, band: u16) -> Result<(), TransportError> {
        self.port.send(AtCommand::SelectBand(band)).map(drop)
    }
}
