//! CLI definition using clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "srvmux", about = "game-server console control through tmux")]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, short = 'c', global = true, default_value = "srvmux.toml")]
    pub config: PathBuf,

    /// Config section to use (defaults to the file's only section)
    #[arg(long, global = true)]
    pub section: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Launch the server inside the multiplexer
    Start,
    /// Stop the server
    Stop(StopOpts),
    /// Turn world auto-saving on
    SaveOn,
    /// Turn world auto-saving off
    SaveOff,
    /// Force a world save and wait for the acknowledgment
    ForceSave,
    /// Send a raw console command without awaiting acknowledgment
    Send {
        /// Console command text, submitted with a trailing newline
        command: String,
    },
}

#[derive(clap::Args)]
pub struct StopOpts {
    /// Disable auto-saving and force a save before stopping
    #[arg(long)]
    pub save: bool,
}
