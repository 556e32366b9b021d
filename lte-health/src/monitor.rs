use tracing::{debug, info};

use crate::at::AtPort;
use crate::config::{MonitorConfig, Thresholds};
use crate::latency::{LatencyReader, LatencySample, Pinger};
use crate::modem::Modem;
use crate::recovery::{Recovery, RecoveryOutcome};
use crate::report;
use crate::signal::SignalSample;
use crate::sleep::Sleep;

/// Whether a poll's measurements call for recovery.
///
/// Missing RSSI always does. Missing latency alone never does, only a
/// measured latency above the limit.
pub fn needs_recovery(
    signal: &SignalSample,
    latency: &LatencySample,
    thresholds: &Thresholds,
) -> bool {
    let weak_signal = signal.rssi.is_none_or(|rssi| rssi < thresholds.min_rssi);
    let slow_link = latency
        .average_ms
        .is_some_and(|ms| ms > thresholds.max_latency_ms);

    weak_signal || slow_link
}

/// What a single monitor iteration observed and did.
#[derive(Debug, Clone, PartialEq)]
pub struct Poll {
    pub signal: SignalSample,
    pub latency: LatencySample,
    pub recovery: Option<RecoveryOutcome>,
}

/// Periodic signal/latency polling with automatic recovery.
pub struct Monitor<P, G, S> {
    config: MonitorConfig,
    modem: Modem<P>,
    latency: LatencyReader<G>,
    sleep: S,
}

impl<P: AtPort, G: Pinger, S: Sleep> Monitor<P, G, S> {
    pub fn new(config: MonitorConfig, port: P, pinger: G, sleep: S) -> Self {
        let latency =
            LatencyReader::new(pinger, config.ping_target.clone(), config.ping_count);

        Self {
            modem: Modem::new(port),
            latency,
            sleep,
            config,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn modem(&self) -> &Modem<P> {
        &self.modem
    }

    pub fn sleeper(&self) -> &S {
        &self.sleep
    }

    /// Measures, reports and recovers if needed, without the trailing interval sleep.
    pub fn poll(&mut self) -> Poll {
        let signal = self.modem.read_signal();
        let latency = self.latency.read();

        println!();
        println!("{}", report::monitor_signal_line(&signal));
        println!("{}", report::monitor_latency_line(&latency));

        let recovery = needs_recovery(&signal, &latency, &self.config.thresholds)
            .then(|| {
                println!("Signal or latency below threshold. Attempting recovery...");
                Recovery::new().run(
                    &mut self.modem,
                    &mut self.sleep,
                    &self.config.bands,
                    self.config.thresholds.min_rssi,
                )
            });

        debug!(?signal, ?latency, ?recovery, "poll complete");

        Poll {
            signal,
            latency,
            recovery,
        }
    }

    /// One full iteration: [`Monitor::poll`] followed by the check interval.
    pub fn tick(&mut self) -> Poll {
        let poll = self.poll();
        self.sleep.sleep(self.config.check_interval);

        poll
    }

    /// Ticks for as long as `keep_going` returns true, checked before each iteration.
    pub fn run_while(&mut self, mut keep_going: impl FnMut(&Self) -> bool) {
        while keep_going(self) {
            self.tick();
        }
    }

    /// Polls forever. Only external termination stops it.
    pub fn run(&mut self) -> ! {
        info!(
            interval = ?self.config.check_interval,
            bands = ?self.config.bands,
            "starting monitor loop"
        );
        println!("Starting 4G monitor... Press Ctrl+C to stop.");

        loop {
            self.tick();
        }
    }
}
