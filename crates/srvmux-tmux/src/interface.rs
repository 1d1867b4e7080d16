//! Window- and pane-addressed tmux console interfaces.

use srvmux_core::{ConsoleInterface, Error, InterfaceConstructor, InterfaceOptions, Target};

use crate::transport::{TmuxTransport, Transport};

const TARGET_OPT: &str = "-t";

/// tmux parses positionally: the `-t` flag must come immediately after the
/// subcommand token.
fn send_keys(transport: &dyn Transport, target: &Target, text: &str) -> Result<(), Error> {
    let rendered = target.to_string();
    tracing::debug!(target = %rendered, len = text.len(), "sending keys");
    transport.execute(&["send-keys", TARGET_OPT, &rendered, text])?;
    Ok(())
}

/// Sends keystrokes to a named window of a tmux session, and can create
/// the hosting session itself.
pub struct WindowInterface {
    transport: Box<dyn Transport>,
    target: Target,
}

impl WindowInterface {
    pub fn new(
        transport: Box<dyn Transport>,
        session: impl Into<String>,
        window: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            target: Target::new(session, window),
        }
    }
}

impl ConsoleInterface for WindowInterface {
    fn send(&self, text: &str) -> Result<(), Error> {
        send_keys(self.transport.as_ref(), &self.target, text)
    }

    /// Two-step start: create a detached session named after the target;
    /// if that fails (typically because the session already exists), fall
    /// back to creating a window inside it. The second failure is the one
    /// reported.
    fn invoke_interface(&self, command: &str) -> Result<(), Error> {
        let session = self.target.session();
        let window = self.target.sub();

        let create = ["new-session", "-d", "-s", session, "-n", window, command];
        let first = match self.transport.execute(&create) {
            Ok(_) => return Ok(()),
            Err(err) => err,
        };
        tracing::debug!(
            error = %first,
            "new-session failed; retrying as new-window in the existing session"
        );

        let anchor = format!("{session}:0");
        let fallback = ["new-window", "-a", "-n", window, TARGET_OPT, &anchor, command];
        match self.transport.execute(&fallback) {
            Ok(_) => Ok(()),
            Err(second) => Err(Error::ServerStart(second)),
        }
    }

    fn target(&self) -> &Target {
        &self.target
    }
}

/// Sends keystrokes to a pane (`window.pane` spec) of an existing tmux
/// session. Cannot create the hosting session.
pub struct PaneInterface {
    transport: Box<dyn Transport>,
    target: Target,
}

impl PaneInterface {
    pub fn new(
        transport: Box<dyn Transport>,
        session: impl Into<String>,
        pane: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            target: Target::new(session, pane),
        }
    }
}

impl ConsoleInterface for PaneInterface {
    fn send(&self, text: &str) -> Result<(), Error> {
        send_keys(self.transport.as_ref(), &self.target, text)
    }

    fn invoke_interface(&self, _command: &str) -> Result<(), Error> {
        Err(Error::StartUnsupported("tmux-pane".to_string()))
    }

    fn target(&self) -> &Target {
        &self.target
    }
}

fn transport_from_options(options: &InterfaceOptions) -> TmuxTransport {
    let mut transport = TmuxTransport::new(options.tmux_path.clone());
    if let Some(socket) = &options.socket_path {
        transport = transport.with_socket_path(socket.clone());
    }
    transport
}

fn window_from_options(options: &InterfaceOptions) -> Result<Box<dyn ConsoleInterface>, Error> {
    Ok(Box::new(WindowInterface::new(
        Box::new(transport_from_options(options)),
        options.session.clone(),
        options.window.clone(),
    )))
}

fn pane_from_options(options: &InterfaceOptions) -> Result<Box<dyn ConsoleInterface>, Error> {
    let pane = options.pane.clone().unwrap_or_else(|| "0.0".to_string());
    Ok(Box::new(PaneInterface::new(
        Box::new(transport_from_options(options)),
        options.session.clone(),
        pane,
    )))
}

/// Builtin `(name, constructor)` pairs for registry initialization.
pub fn builtin_interfaces() -> Vec<(&'static str, InterfaceConstructor)> {
    vec![
        ("tmux", window_from_options as InterfaceConstructor),
        ("tmux-pane", pane_from_options as InterfaceConstructor),
    ]
}
