//! Modem power cycle followed by an ordered LTE band sweep.
//!
//! Every invocation starts over from the power cycle. Nothing is remembered
//! about which band restored signal last time.

use std::time::Duration;

use derive_more::Display;
use tracing::{error, info, warn};

use crate::at::AtPort;
use crate::modem::Modem;
use crate::sleep::Sleep;

pub const POWER_DOWN_SETTLE: Duration = Duration::from_secs(3);
pub const POWER_UP_SETTLE: Duration = Duration::from_secs(5);
pub const BAND_SWITCH_SETTLE: Duration = Duration::from_secs(5);
/// Extra wait after a band switch before signal is measured again.
pub const BAND_RECHECK_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryState {
    Idle,
    PoweringDown,
    PoweringUp,
    /// Index into the band list.
    #[display("TryingBand({_0})")]
    TryingBand(usize),
    Restored,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryOutcome {
    Restored { band: u16 },
    Exhausted,
}

/// Returns the first band whose re-read RSSI is present and at least `min_rssi`.
///
/// `reread` is called once per band, in order, and never again after a band
/// succeeds.
pub fn first_restoring_band(
    bands: &[u16],
    min_rssi: u8,
    mut reread: impl FnMut(u16) -> Option<u8>,
) -> Option<u16> {
    bands
        .iter()
        .copied()
        .find(|&band| reread(band).is_some_and(|rssi| rssi >= min_rssi))
}

#[derive(Debug)]
pub struct Recovery {
    state: RecoveryState,
}

impl Default for Recovery {
    fn default() -> Self {
        Self::new()
    }
}

impl Recovery {
    pub fn new() -> Self {
        Self {
            state: RecoveryState::Idle,
        }
    }

    pub fn state(&self) -> RecoveryState {
        self.state
    }

    fn enter(&mut self, next: RecoveryState) {
        info!(from = %self.state, to = %next, "recovery state change");
        self.state = next;
    }

    /// Runs the whole procedure, blocking through every settle delay.
    ///
    /// Failed AT commands are logged and the sequence carries on.
    pub fn run<P: AtPort, S: Sleep>(
        &mut self,
        modem: &mut Modem<P>,
        sleep: &mut S,
        bands: &[u16],
        min_rssi: u8,
    ) -> RecoveryOutcome {
        println!("Attempting to reconnect modem...");

        self.enter(RecoveryState::PoweringDown);
        if let Err(e) = modem.power_down() {
            warn!("failed to disable modem: {e}");
        }
        sleep.sleep(POWER_DOWN_SETTLE);

        self.enter(RecoveryState::PoweringUp);
        if let Err(e) = modem.power_up() {
            warn!("failed to enable modem: {e}");
        }
        sleep.sleep(POWER_UP_SETTLE);
        println!("Modem reconnected.");

        let mut index = 0;
        let restored = first_restoring_band(bands, min_rssi, |band| {
            self.enter(RecoveryState::TryingBand(index));
            index += 1;

            println!("Switching LTE band to {band}...");
            if let Err(e) = modem.select_band(band) {
                warn!(band, "failed to switch LTE band: {e}");
            }
            sleep.sleep(BAND_SWITCH_SETTLE);
            sleep.sleep(BAND_RECHECK_DELAY);

            modem.read_signal().rssi
        });

        match restored {
            Some(band) => {
                self.enter(RecoveryState::Restored);
                println!("Signal restored on band {band}.");
                RecoveryOutcome::Restored { band }
            }
            None => {
                self.enter(RecoveryState::Exhausted);
                error!(?bands, "no band restored signal above {min_rssi}");
                println!("Unable to restore strong signal. Will retry in next interval.");
                RecoveryOutcome::Exhausted
            }
        }
    }
}
