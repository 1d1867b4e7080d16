//! Configuration values consumed by the core. Locating and parsing the
//! config file itself belongs to the CLI; the core only sees the decoded
//! section fields.

use std::path::{Path, PathBuf};

use serde::Deserialize;

fn default_session() -> String {
    "0".to_string()
}

fn default_window() -> String {
    "0".to_string()
}

fn default_tmux_path() -> String {
    "tmux".to_string()
}

fn default_java_path() -> String {
    "java".to_string()
}

fn default_java_options() -> String {
    "-Xmx2G -Xms2G".to_string()
}

fn default_server_args() -> String {
    "nogui".to_string()
}

/// Interface-specific fields of a config section, resolved positionally by
/// the constructor the registry returns.
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceOptions {
    /// Multiplexer session hosting (or to host) the server console.
    #[serde(default = "default_session")]
    pub session: String,
    /// Window name or index inside the session.
    #[serde(default = "default_window")]
    pub window: String,
    /// Pane spec relative to a window (`window.pane`), for the pane variant.
    #[serde(default)]
    pub pane: Option<String>,
    #[serde(default = "default_tmux_path")]
    pub tmux_path: String,
    /// Custom multiplexer connection endpoint, prepended to every
    /// invocation when present.
    #[serde(default)]
    pub socket_path: Option<String>,
}

impl Default for InterfaceOptions {
    fn default() -> Self {
        Self {
            session: default_session(),
            window: default_window(),
            pane: None,
            tmux_path: default_tmux_path(),
            socket_path: None,
        }
    }
}

/// Manager fields of a config section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// The server's executable artifact; the launch command runs from its
    /// parent directory.
    pub server_jar: PathBuf,
    /// Account the server runs as. Informational today.
    #[serde(default)]
    pub user: Option<String>,
    /// Server log location; defaults to a `server.log` sibling of
    /// `server_jar`.
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    #[serde(default = "default_java_path")]
    pub java_path: String,
    #[serde(default = "default_java_options")]
    pub java_options: String,
    #[serde(default = "default_server_args")]
    pub server_args: String,
}

impl ServerSettings {
    pub fn new(server_jar: impl Into<PathBuf>) -> Self {
        Self {
            server_jar: server_jar.into(),
            user: None,
            log_path: None,
            java_path: default_java_path(),
            java_options: default_java_options(),
            server_args: default_server_args(),
        }
    }

    /// Directory containing the server artifact.
    pub fn server_dir(&self) -> &Path {
        self.server_jar.parent().unwrap_or(Path::new("."))
    }

    /// Configured log path, or the default `server.log` sibling.
    pub fn log_file(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| self.server_dir().join("server.log"))
    }

    /// Full command line for the managed process.
    pub fn launch_command(&self) -> String {
        format!(
            "{} {} -jar {} {}",
            self.java_path,
            self.java_options,
            self.server_jar.display(),
            self.server_args
        )
    }
}
