//! Transport trait and the real tmux subprocess executor.

use std::process::Command;

use srvmux_core::TransportError;

/// Executes one external multiplexer command per call. Mock-injectable for
/// testing.
pub trait Transport {
    /// Run `args` against the multiplexer binary, capturing combined
    /// stdout and stderr. Fails when the process exits non-zero. No
    /// retries at this layer; retry policy belongs to callers.
    fn execute(&self, args: &[&str]) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, args: &[&str]) -> Result<Vec<u8>, TransportError> {
        (**self).execute(args)
    }
}

/// Real tmux transport using `std::process::Command`.
pub struct TmuxTransport {
    tmux_bin: String,
    socket_path: Option<String>,
}

impl TmuxTransport {
    pub fn new(tmux_bin: impl Into<String>) -> Self {
        Self {
            tmux_bin: tmux_bin.into(),
            socket_path: None,
        }
    }

    /// Connect through a custom socket: `-S <path>` is prepended before
    /// the subcommand on every invocation.
    #[must_use]
    pub fn with_socket_path(mut self, path: impl Into<String>) -> Self {
        self.socket_path = Some(path.into());
        self
    }
}

impl Default for TmuxTransport {
    fn default() -> Self {
        Self::new("tmux")
    }
}

impl Transport for TmuxTransport {
    fn execute(&self, args: &[&str]) -> Result<Vec<u8>, TransportError> {
        let mut cmd = Command::new(&self.tmux_bin);
        if let Some(path) = &self.socket_path {
            cmd.args(["-S", path]);
        }
        cmd.args(args);
        tracing::debug!(bin = %self.tmux_bin, ?args, "executing tmux command");

        let output = cmd.output().map_err(|err| TransportError {
            exit_code: -1,
            args: args.iter().map(|s| s.to_string()).collect(),
            output: err.to_string(),
        })?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        if !output.status.success() {
            return Err(TransportError {
                exit_code: output.status.code().unwrap_or(-1),
                args: args.iter().map(|s| s.to_string()).collect(),
                output: String::from_utf8_lossy(&combined).trim().to_string(),
            });
        }
        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_transport() {
        let transport = TmuxTransport::default();
        assert_eq!(transport.tmux_bin, "tmux");
        assert!(transport.socket_path.is_none());
    }

    #[test]
    fn with_socket_path() {
        let transport = TmuxTransport::default().with_socket_path("/tmp/mc.sock");
        assert_eq!(transport.socket_path, Some("/tmp/mc.sock".to_string()));
    }

    #[test]
    fn captures_output_of_successful_command() {
        let transport = TmuxTransport::new("echo");
        let output = transport.execute(&["hello"]).expect("echo succeeds");
        assert_eq!(String::from_utf8_lossy(&output), "hello\n");
    }

    #[test]
    fn socket_path_precedes_the_subcommand() {
        let transport = TmuxTransport::new("echo").with_socket_path("/tmp/mc.sock");
        let output = transport.execute(&["send-keys"]).expect("echo succeeds");
        assert_eq!(String::from_utf8_lossy(&output), "-S /tmp/mc.sock send-keys\n");
    }

    #[test]
    fn nonzero_exit_reports_code_and_args() {
        let transport = TmuxTransport::new("false");
        let err = transport
            .execute(&["kill-server"])
            .expect_err("false exits 1");
        assert_eq!(err.exit_code, 1);
        assert_eq!(err.args, vec!["kill-server".to_string()]);
    }

    #[test]
    fn missing_binary_reports_spawn_failure() {
        let transport = TmuxTransport::new("/nonexistent/tmux");
        let err = transport.execute(&["ls"]).expect_err("spawn fails");
        assert_eq!(err.exit_code, -1);
        assert!(!err.output.is_empty());
    }

    #[test]
    fn blanket_ref_impl() {
        struct Mock;
        impl Transport for Mock {
            fn execute(&self, _args: &[&str]) -> Result<Vec<u8>, TransportError> {
                Ok(b"ok".to_vec())
            }
        }
        let mock = Mock;
        let by_ref: &Mock = &mock;
        assert_eq!(by_ref.execute(&[]).expect("ok"), b"ok");
    }
}
