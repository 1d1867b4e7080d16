//! Server lifecycle operations built on the command-acknowledgment
//! protocol: issue a console command, then correlate it with a success or
//! failure line appearing in the server log under a deadline.

use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;

use crate::clock::{Clock, SystemClock};
use crate::config::ServerSettings;
use crate::error::Error;
use crate::interface::ConsoleInterface;
use crate::pattern::ack_pattern;
use crate::watch::LogWatcher;

/// Pause between drain attempts while waiting for an acknowledgment.
pub const LOG_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default deadline for commands that await a log acknowledgment.
pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(30);

const SAVE_SUCCESS: &[&str] = &["Saved the world", "Save complete", "Saved the game"];
const SAVE_FAILURE: &[&str] = &["Saving failed"];
const SAVE_ON_SUCCESS: &[&str] = &[
    "Turned on world auto-saving",
    "Saving is already turned on",
    "Enabled level saving",
];
const SAVE_OFF_SUCCESS: &[&str] = &[
    "Turned off world auto-saving",
    "Saving is already turned off",
    "Disabled level saving",
];

/// Drives one game-server console through a [`ConsoleInterface`], with an
/// optional [`LogWatcher`] for acknowledgment. Without a watcher, any
/// operation that awaits the log reports [`Error::WatcherUnavailable`].
///
/// Synchronous and single-threaded: at most one command is in flight at a
/// time, enforced by the `&mut self` receiver on the acknowledgment path.
pub struct ServerManager<C = SystemClock> {
    interface: Box<dyn ConsoleInterface>,
    watcher: Option<LogWatcher>,
    settings: ServerSettings,
    clock: C,
    poll_interval: Duration,
}

impl ServerManager<SystemClock> {
    pub fn new(
        interface: Box<dyn ConsoleInterface>,
        watcher: Option<LogWatcher>,
        settings: ServerSettings,
    ) -> Self {
        Self::with_clock(interface, watcher, settings, SystemClock)
    }
}

impl<C: Clock> ServerManager<C> {
    pub fn with_clock(
        interface: Box<dyn ConsoleInterface>,
        watcher: Option<LogWatcher>,
        settings: ServerSettings,
        clock: C,
    ) -> Self {
        Self {
            interface,
            watcher,
            settings,
            clock,
            poll_interval: LOG_POLL_INTERVAL,
        }
    }

    pub fn interface(&self) -> &dyn ConsoleInterface {
        self.interface.as_ref()
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Clear any partial input sitting in the console, then submit
    /// `command` with a trailing newline.
    pub fn exec_cmd(&self, command: &str) -> Result<(), Error> {
        self.interface.clear_input()?;
        self.interface.send(&format!("{command}\n"))
    }

    /// Issue `command` and poll the log for an acknowledgment matching
    /// `success` (Ok) or `failure` (`CommandFailed`) until `timeout`
    /// elapses. The watcher is armed before the command is sent so a fast
    /// acknowledgment cannot land ahead of the baseline and be missed.
    ///
    /// `timeout` of `None` polls indefinitely; `failure` of `None` makes
    /// success and timeout the only possible outcomes.
    pub fn exec_check_log(
        &mut self,
        command: &str,
        success: &Regex,
        failure: Option<&Regex>,
        timeout: Option<Duration>,
    ) -> Result<(), Error> {
        match self.watcher.as_mut() {
            Some(watcher) => watcher.arm()?,
            None => return Err(Error::WatcherUnavailable),
        }
        self.exec_cmd(command)?;
        self.check_log(command, success, failure, timeout)
    }

    fn check_log(
        &mut self,
        command: &str,
        success: &Regex,
        failure: Option<&Regex>,
        timeout: Option<Duration>,
    ) -> Result<(), Error> {
        let watcher = self.watcher.as_mut().ok_or(Error::WatcherUnavailable)?;
        let start = self.clock.now();
        let deadline = timeout.map(|t| start + t);
        loop {
            let now = self.clock.now();
            if let Some(deadline) = deadline {
                // A clock that moved backwards would make the deadline
                // meaningless; bail rather than wait an unbounded time.
                if now < start || now > deadline {
                    return Err(Error::CommandTimeout {
                        command: command.to_string(),
                        elapsed: now.duration_since(start).unwrap_or_default(),
                    });
                }
            }
            while let Some(line) = watcher.drain_line()? {
                if success.is_match(&line) {
                    tracing::debug!(command, line = %line, "success acknowledgment matched");
                    return Ok(());
                }
                if let Some(failure) = failure {
                    if failure.is_match(&line) {
                        return Err(Error::CommandFailed {
                            command: command.to_string(),
                            line,
                        });
                    }
                }
            }
            self.clock.sleep(self.poll_interval);
        }
    }

    /// `save-all`, awaiting the world-save acknowledgment.
    pub fn force_save(&mut self) -> Result<(), Error> {
        let success = ack_pattern(SAVE_SUCCESS)?;
        let failure = ack_pattern(SAVE_FAILURE)?;
        self.exec_check_log(
            "save-all",
            &success,
            Some(&failure),
            Some(DEFAULT_ACK_TIMEOUT),
        )
    }

    /// Turn world auto-saving on.
    pub fn save_on(&mut self) -> Result<(), Error> {
        self.set_save("on", SAVE_ON_SUCCESS)
    }

    /// Turn world auto-saving off.
    pub fn save_off(&mut self) -> Result<(), Error> {
        self.set_save("off", SAVE_OFF_SUCCESS)
    }

    fn set_save(&mut self, state: &str, phrases: &[&str]) -> Result<(), Error> {
        let success = ack_pattern(phrases)?;
        // Re-issuing a toggle already in the desired state still
        // acknowledges as success, so save toggles have no failure pattern.
        self.exec_check_log(
            &format!("save-{state}"),
            &success,
            None,
            Some(DEFAULT_ACK_TIMEOUT),
        )
    }

    /// Launch the server inside the multiplexer, running from the
    /// directory holding the server artifact. The working directory is
    /// restored whether or not the launch succeeds.
    pub fn start(&self) -> Result<(), Error> {
        let launch = self.settings.launch_command();
        tracing::info!(
            command = %launch,
            user = self.settings.user.as_deref(),
            "starting server"
        );
        let _cwd = CwdGuard::enter(self.settings.server_dir())?;
        self.interface.invoke_interface(&launch)
    }

    /// Stop the server. With `do_save`, auto-saving is disabled and a
    /// final save forced first, so the shutdown cannot race an in-flight
    /// save. The `stop` command itself is not awaited in the log: shutdown
    /// may end the log stream before an acknowledgment line appears.
    pub fn stop(&mut self, do_save: bool) -> Result<(), Error> {
        if do_save {
            self.save_off()?;
            self.force_save()?;
        }
        self.exec_cmd("stop")
    }

    /// Submit a raw console command without awaiting acknowledgment.
    pub fn send_raw(&self, command: &str) -> Result<(), Error> {
        self.exec_cmd(command)
    }
}

/// Scoped working-directory change; restores the previous directory when
/// dropped.
struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    fn enter(dir: &Path) -> Result<Self, Error> {
        let original = std::env::current_dir()?;
        std::env::set_current_dir(dir)?;
        Ok(Self { original })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        if let Err(err) = std::env::set_current_dir(&self.original) {
            tracing::warn!(
                dir = %self.original.display(),
                "failed to restore working directory: {err}"
            );
        }
    }
}
