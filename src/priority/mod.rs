//! Process priority accessor.
//!
//! Every operation targets the calling process and is a single round-trip to
//! the OS. Nothing is cached, so a value read here always reflects changes
//! made from outside the process (e.g. `renice` run by another tool).

pub mod class;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

#[cfg(not(any(unix, windows)))]
pub mod unsupported;

use crate::common::error::{Error, Result};
use log::debug;
use std::ops::RangeInclusive;

pub use class::{PriorityClass, ThreadPriority};

/// Highest scheduling priority a niceness can express.
pub const NICE_MIN: i32 = -20;
/// Lowest scheduling priority a niceness can express.
pub const NICE_MAX: i32 = 19;

#[cfg(unix)]
pub type NativeBackend = unix::Nice;

#[cfg(windows)]
pub type NativeBackend = windows::PriorityClassBackend;

#[cfg(not(any(unix, windows)))]
pub type NativeBackend = unsupported::Unsupported;

/// Platform capability behind the accessor.
#[cfg_attr(test, mockall::automock)]
pub trait PriorityBackend {
    /// Short platform identifier used in logs and reports.
    fn platform(&self) -> &'static str;

    /// Deltas the backend accepts.
    fn delta_range(&self) -> RangeInclusive<i32>;

    /// Adjust the calling process by `delta` and return the resulting priority.
    fn adjust(&self, delta: i32) -> Result<i32>;

    /// Query the calling process priority.
    fn current(&self) -> Result<i32>;
}

#[derive(Debug, Clone, Default)]
pub struct ProcessPriority<B = NativeBackend> {
    backend: B,
}

impl ProcessPriority<NativeBackend> {
    pub fn native() -> Self {
        Self::default()
    }
}

impl<B: PriorityBackend> ProcessPriority<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn platform(&self) -> &'static str {
        self.backend.platform()
    }

    /// Adjust the niceness of the calling process by `delta`.
    ///
    /// The OS may clamp the result, so the granted priority is not guaranteed
    /// to be exactly `current + delta`.
    pub fn set_niceness(&self, delta: i32) -> Result<()> {
        self.nice(Some(delta)).map(|_| ())
    }

    /// Adjust by `incr` (zero when absent) and return the resulting priority.
    pub fn nice(&self, incr: Option<i32>) -> Result<i32> {
        let delta = incr.unwrap_or(0);
        let range = self.backend.delta_range();
        if !range.contains(&delta) {
            return Err(Error::out_of_range(delta, *range.start(), *range.end()));
        }

        let priority = self.backend.adjust(delta)?;
        debug!(
            "Adjusted niceness by {} on {}, priority is now {}",
            delta,
            self.backend.platform(),
            priority
        );
        Ok(priority)
    }

    /// Current scheduling priority, queried live from the OS.
    pub fn current_priority(&self) -> Result<i32> {
        self.backend.current()
    }
}

/// Adjust the calling process niceness by `delta`.
pub fn set_niceness(delta: i32) -> Result<()> {
    ProcessPriority::native().set_niceness(delta)
}

/// Adjust by `incr` (zero when absent) and return the resulting priority.
pub fn nice(incr: Option<i32>) -> Result<i32> {
    ProcessPriority::native().nice(incr)
}

/// Current scheduling priority of the calling process.
pub fn get_current_priority() -> Result<i32> {
    ProcessPriority::native().current_priority()
}
