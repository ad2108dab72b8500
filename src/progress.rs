//! Rate-limited progress reporting
//!
//! Long scans over multi-hundred-megabyte dumps need a sign of life, but
//! one line per row would drown the terminal. The reporter prints to
//! stderr at most once per configured interval, independent of row volume.

use std::time::{Duration, Instant};

pub struct ProgressReporter {
    enabled: bool,
    interval: Duration,
    last: Instant,
}

impl ProgressReporter {
    pub fn new(enabled: bool, interval: Duration) -> Self {
        ProgressReporter {
            enabled,
            interval,
            last: Instant::now(),
        }
    }

    /// A reporter that never prints. Used by tests and library callers
    /// that don't want the observability channel.
    pub fn disabled() -> Self {
        Self::new(false, Duration::from_secs(2))
    }

    /// Emit one status line if the interval has elapsed (or `force` is
    /// set). The line is built lazily so suppressed calls cost nothing
    /// beyond the clock read.
    pub fn report<F: FnOnce() -> String>(&mut self, force: bool, line: F) {
        if !self.enabled {
            return;
        }
        let now = Instant::now();
        if !force && now.duration_since(self.last) < self.interval {
            return;
        }
        self.last = now;
        eprintln!("{}", line());
    }
}
