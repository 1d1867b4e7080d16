//! srvmux: drive a game-server console hosted in a terminal multiplexer.

use clap::Parser;

mod cli;
mod config;

use srvmux_core::{InterfaceRegistry, LogWatcher, ServerManager};
use srvmux_tmux::builtin_interfaces;

fn main() -> anyhow::Result<()> {
    let filter = std::env::var("SRVMUX_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let args = cli::Cli::parse();
    let section = config::load_section(&args.config, args.section.as_deref())?;

    let registry = InterfaceRegistry::from_entries(builtin_interfaces());
    let constructor = registry.resolve(&section.interface)?;
    let interface = constructor(&section.interface_options)?;

    let log_path = section.server.log_file();
    let watcher = match LogWatcher::open(&log_path) {
        Ok(watcher) => Some(watcher),
        Err(err) => {
            tracing::warn!(
                path = %log_path.display(),
                "server log unavailable, acknowledgment disabled: {err}"
            );
            None
        }
    };

    let mut manager = ServerManager::new(interface, watcher, section.server);

    match args.command {
        cli::Command::Start => manager.start()?,
        cli::Command::Stop(opts) => manager.stop(opts.save)?,
        cli::Command::SaveOn => manager.save_on()?,
        cli::Command::SaveOff => manager.save_off()?,
        cli::Command::ForceSave => manager.force_save()?,
        cli::Command::Send { command } => manager.send_raw(&command)?,
    }

    Ok(())
}
