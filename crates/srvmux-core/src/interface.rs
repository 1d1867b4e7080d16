//! Capability set for an addressable console target.

use std::fmt;

use crate::error::Error;

/// DEL character, delivered by the multiplexer as a backspace keystroke.
pub const BACKSPACE: char = '\x7F';

/// How many backspaces `clear_input` sends. Comfortably larger than any
/// realistic single line of console input.
pub const CLEAR_INPUT_BACKSPACES: usize = 500;

/// Addressable location inside the multiplexer: a session plus a window
/// name/index or pane index, depending on the interface variant.
/// Immutable after interface construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    session: String,
    sub: String,
}

impl Target {
    pub fn new(session: impl Into<String>, sub: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            sub: sub.into(),
        }
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn sub(&self) -> &str {
        &self.sub
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.session, self.sub)
    }
}

/// Delivers keystrokes to a console application hosted in a terminal
/// multiplexer. Variants differ in how the target is addressed and in
/// whether they can create the hosting session themselves.
pub trait ConsoleInterface {
    /// Deliver `text` verbatim as keystrokes. No escaping is performed;
    /// callers append the trailing newline when command submission is
    /// desired.
    fn send(&self, text: &str) -> Result<(), Error>;

    /// Best-effort erase of whatever partial input may be sitting in the
    /// target's input buffer.
    fn clear_input(&self) -> Result<(), Error> {
        self.send(&BACKSPACE.to_string().repeat(CLEAR_INPUT_BACKSPACES))
    }

    /// Bring the hosting session/window into existence, running `command`
    /// as its initial process.
    fn invoke_interface(&self, command: &str) -> Result<(), Error>;

    /// The location commands are delivered to.
    fn target(&self) -> &Target;
}
