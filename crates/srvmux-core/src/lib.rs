//! srvmux-core: domain logic for remote-controlling a game-server console.
//! Provides the console interface abstraction, the interface registry, the
//! offset-tracking log watcher, and the command-acknowledgment protocol.
//! No subprocess IO here — concrete transports live in srvmux-tmux.

pub mod clock;
pub mod config;
pub mod error;
pub mod interface;
pub mod manager;
pub mod pattern;
pub mod registry;
pub mod watch;

pub use clock::{Clock, SystemClock};
pub use config::{InterfaceOptions, ServerSettings};
pub use error::{Error, TransportError};
pub use interface::{BACKSPACE, ConsoleInterface, Target};
pub use manager::{DEFAULT_ACK_TIMEOUT, LOG_POLL_INTERVAL, ServerManager};
pub use pattern::ack_pattern;
pub use registry::{InterfaceConstructor, InterfaceRegistry};
pub use watch::LogWatcher;
