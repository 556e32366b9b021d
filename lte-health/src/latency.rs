//! Round-trip latency measured with the system `ping` utility.

use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{ParseError, ProcessError};

/// iputils: `rtt min/avg/max/mdev = 10.1/45.6/90.3/12.0 ms`
static IPUTILS_SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rtt min/avg/max/mdev = [\d.]+/([\d.]+)/").expect("valid regex")
});

/// BusyBox and BSD: `round-trip min/avg/max = 10.1/45.6/90.3 ms`
static ROUND_TRIP_SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"round-trip min/avg/max(?:/stddev)? = [\d.]+/([\d.]+)/")
        .expect("valid regex")
});

/// Average round-trip time of one ping run. `None` when ping failed or got no reply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LatencySample {
    pub average_ms: Option<f64>,
}

impl LatencySample {
    pub const UNAVAILABLE: Self = Self { average_ms: None };

    /// Extracts the average from ping's statistics summary line.
    pub fn parse(output: &str) -> Result<Self, ParseError> {
        let caps = IPUTILS_SUMMARY
            .captures(output)
            .or_else(|| ROUND_TRIP_SUMMARY.captures(output))
            .ok_or(ParseError::MissingPingSummary)?;

        Ok(Self {
            average_ms: Some(caps[1].parse()?),
        })
    }
}

/// Runs a ping and hands back its stdout.
#[cfg_attr(test, mockall::automock)]
pub trait Pinger {
    fn ping(&self, target: &str, count: u32) -> Result<String, ProcessError>;
}

/// Spawns the `ping` binary found on `PATH` and blocks until it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPing;

impl SystemPing {
    const PROGRAM: &'static str = "ping";
}

impl Pinger for SystemPing {
    fn ping(&self, target: &str, count: u32) -> Result<String, ProcessError> {
        let output = Command::new(Self::PROGRAM)
            .args(["-c", &count.to_string(), target])
            .output()
            .map_err(|source| ProcessError::Spawn {
                program: Self::PROGRAM.to_owned(),
                source,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(ProcessError::Exit {
                program: Self::PROGRAM.to_owned(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            })
        }
    }
}

/// Measures latency against a fixed target with a fixed packet count.
#[derive(Debug, Clone)]
pub struct LatencyReader<P> {
    pinger: P,
    target: String,
    count: u32,
}

impl<P: Pinger> LatencyReader<P> {
    pub fn new(pinger: P, target: impl Into<String>, count: u32) -> Self {
        Self {
            pinger,
            target: target.into(),
            count,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Never fails: errors are logged and reported as an unavailable sample.
    pub fn read(&self) -> LatencySample {
        let output = match self.pinger.ping(&self.target, self.count) {
            Ok(output) => output,
            Err(e) => {
                warn!("Error pinging {}: {e}", self.target);
                return LatencySample::UNAVAILABLE;
            }
        };

        match LatencySample::parse(&output) {
            Ok(sample) => {
                debug!(host = %self.target, ?sample, "Parsed ping summary");
                sample
            }
            Err(e) => {
                warn!("Error pinging {}: {e}", self.target);
                LatencySample::UNAVAILABLE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPUTILS_OUTPUT: &str = "PING 8.8.8.8 (8.8.8.8) 56(84) bytes of data.
64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=10.1 ms
64 bytes from 8.8.8.8: icmp_seq=2 ttl=117 time=90.3 ms
64 bytes from 8.8.8.8: icmp_seq=3 ttl=117 time=36.4 ms

--- 8.8.8.8 ping statistics ---
3 packets transmitted, 3 received, 0% packet loss, time 2003ms
rtt min/avg/max/mdev = 10.1/45.6/90.3/12.0 ms
";

    const BUSYBOX_OUTPUT: &str = "PING 8.8.8.8 (8.8.8.8): 56 data bytes
64 bytes from 8.8.8.8: seq=0 ttl=117 time=31.207 ms

--- 8.8.8.8 ping statistics ---
1 packets transmitted, 1 packets received, 0% packet loss
round-trip min/avg/max = 31.207/31.207/31.207 ms
";

    #[test]
    fn it_parses_iputils_summary() {
        let sample = LatencySample::parse(IPUTILS_OUTPUT).unwrap();

        assert_eq!(sample.average_ms, Some(45.6));
    }

    #[test]
    fn it_parses_bare_summary_line() {
        let sample =
            LatencySample::parse("rtt min/avg/max/mdev = 10.1/45.6/90.3/12.0 ms")
                .unwrap();

        assert_eq!(sample.average_ms, Some(45.6));
    }

    #[test]
    fn it_falls_back_to_round_trip_summary() {
        let sample = LatencySample::parse(BUSYBOX_OUTPUT).unwrap();

        assert_eq!(sample.average_ms, Some(31.207));
    }

    #[test]
    fn it_ignores_legacy_avg_equals_format() {
        assert!(matches!(
            LatencySample::parse("avg = 10.0/20.5/30.0 ms"),
            Err(ParseError::MissingPingSummary)
        ));
    }

    #[test]
    fn it_reports_no_summary_when_all_packets_lost() {
        let output = "--- 10.0.0.1 ping statistics ---
3 packets transmitted, 0 received, 100% packet loss, time 2055ms
";

        assert!(LatencySample::parse(output).is_err());
    }

    #[test]
    fn it_reads_latency_through_pinger() {
        let mut pinger = MockPinger::new();
        pinger
            .expect_ping()
            .withf(|target, count| target == "8.8.8.8" && *count == 3)
            .times(1)
            .returning(|_, _| Ok(IPUTILS_OUTPUT.to_owned()));

        let reader = LatencyReader::new(pinger, "8.8.8.8", 3);

        assert_eq!(reader.read().average_ms, Some(45.6));
    }

    #[test]
    fn it_maps_process_failure_to_unavailable() {
        let mut pinger = MockPinger::new();
        pinger.expect_ping().returning(|target, _| {
            Err(ProcessError::Spawn {
                program: format!("ping {target}"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });

        let reader = LatencyReader::new(pinger, "8.8.8.8", 5);

        assert_eq!(reader.read(), LatencySample::UNAVAILABLE);
    }

    #[test]
    fn it_maps_unparsable_output_to_unavailable() {
        let mut pinger = MockPinger::new();
        pinger
            .expect_ping()
            .returning(|_, _| Ok("ping: unknown host".to_owned()));

        let reader = LatencyReader::new(pinger, "nowhere.invalid", 5);

        assert_eq!(reader.read(), LatencySample::UNAVAILABLE);
    }
}
