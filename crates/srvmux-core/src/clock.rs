//! Time source injection for the acknowledgment poll loop.

use std::time::{Duration, SystemTime};

/// Clock and sleep strategy used while polling for acknowledgments.
/// Deliberately `SystemTime` rather than `Instant`: a backward jump of the
/// system clock must be observable so the poll loop can bail on it.
pub trait Clock {
    fn now(&self) -> SystemTime;
    fn sleep(&self, duration: Duration);
}

/// Real wall clock; `sleep` blocks the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
