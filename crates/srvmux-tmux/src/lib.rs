//! srvmux-tmux: tmux IO boundary.
//! Subprocess transport plus the window- and pane-addressed console
//! interface variants. No protocol logic — the command-acknowledgment
//! state machine lives in srvmux-core.

pub mod interface;
pub mod transport;

pub use interface::{PaneInterface, WindowInterface, builtin_interfaces};
pub use transport::{TmuxTransport, Transport};
