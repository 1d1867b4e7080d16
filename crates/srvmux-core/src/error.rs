//! Error types shared across the srvmux crates.

use std::time::Duration;

use thiserror::Error;

/// External multiplexer process exited non-zero (or could not be spawned,
/// reported as exit code -1).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport command {args:?} exited with code {exit_code}: {output}")]
pub struct TransportError {
    pub exit_code: i32,
    pub args: Vec<String>,
    pub output: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Both session-creation strategies failed. Wraps the second failure —
    /// the fallback attempt — not the first.
    #[error("failed to start server: {0}")]
    ServerStart(#[source] TransportError),

    /// The selected interface variant can only send into an existing
    /// session.
    #[error("interface `{0}` cannot launch the server itself")]
    StartUnsupported(String),

    #[error("`{name}` is not a registered interface (available: {available})")]
    UnknownInterface { name: String, available: String },

    #[error("no server log is configured; log acknowledgment is unavailable")]
    WatcherUnavailable,

    /// A failure pattern matched in the log after the command was issued.
    #[error("server reported failure for `{command}`: {line}")]
    CommandFailed { command: String, line: String },

    /// The deadline elapsed, or the system clock jumped backwards, before
    /// any acknowledgment appeared.
    #[error("timed out after {elapsed:?} waiting for acknowledgment of `{command}`")]
    CommandTimeout { command: String, elapsed: Duration },

    #[error("invalid acknowledgment pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for a command failure and for its timeout specialization.
    pub fn is_command_error(&self) -> bool {
        matches!(
            self,
            Error::CommandFailed { .. } | Error::CommandTimeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_display_carries_context() {
        let err = TransportError {
            exit_code: 1,
            args: vec!["send-keys".to_string(), "-t".to_string(), "mc:0".to_string()],
            output: "no server running".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("send-keys"));
        assert!(msg.contains("exited with code 1"));
        assert!(msg.contains("no server running"));
    }

    #[test]
    fn timeout_is_a_command_error() {
        let timeout = Error::CommandTimeout {
            command: "save-all".to_string(),
            elapsed: Duration::from_secs(30),
        };
        let failed = Error::CommandFailed {
            command: "save-all".to_string(),
            line: "Saving failed".to_string(),
        };
        assert!(timeout.is_command_error());
        assert!(failed.is_command_error());
        assert!(!Error::WatcherUnavailable.is_command_error());
    }
}
