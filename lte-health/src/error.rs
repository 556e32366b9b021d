use std::process::ExitStatus;

/// Failure talking to the modem over its AT serial port.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to open serial port '{device}'")]
    Open {
        device: String,
        #[source]
        source: serialport::Error,
    },
    #[error("failed to write `{command}` to '{device}'")]
    Write {
        device: String,
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read reply to `{command}` from '{device}'")]
    Read {
        device: String,
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("reply to `{command}` from '{device}' was empty after decoding")]
    Decode { device: String, command: String },
}

/// A reply or ping output was present but did not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("no `+CSQ: <rssi>,<ber>` line in modem reply {0:?}")]
    MissingSignalReply(String),
    #[error("no round-trip summary line in ping output")]
    MissingPingSummary,
    #[error("invalid integer field in modem reply")]
    Integer(#[from] std::num::ParseIntError),
    #[error("invalid latency value in ping summary")]
    Float(#[from] std::num::ParseFloatError),
}

/// Failure running the external `ping` utility.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to spawn `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}
