//! Offset-tracking reader over a continuously-appended log file.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Tails a text log from a remembered offset. `arm` pins the baseline at
/// the current end of file; `drain_line` only ever returns lines appended
/// after the most recent arm, and never re-delivers a drained line.
pub struct LogWatcher {
    reader: BufReader<File>,
    path: PathBuf,
    armed: bool,
}

impl LogWatcher {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        Ok(Self {
            reader: BufReader::new(file),
            path,
            armed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reposition the read cursor at the current end of the log. Must run
    /// strictly before the command whose acknowledgment will be awaited is
    /// sent, otherwise a fast acknowledgment could land before the baseline
    /// and be missed.
    pub fn arm(&mut self) -> Result<(), Error> {
        let offset = self.reader.seek(SeekFrom::End(0))?;
        self.armed = true;
        tracing::debug!(path = %self.path.display(), offset, "log watcher armed");
        Ok(())
    }

    /// Next line appended since the last arm, or `None` when nothing
    /// further is currently available. Non-blocking, single read attempt.
    /// Before the first arm this always returns `None`.
    pub fn drain_line(&mut self) -> Result<Option<String>, Error> {
        if !self.armed {
            return Ok(None);
        }
        let mut buf = Vec::new();
        let read = self.reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}
