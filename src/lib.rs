//! Minimal cross-platform accessor for the calling process's scheduling
//! priority.
//!
//! ```no_run
//! let before = procprio::get_current_priority()?;
//! procprio::set_niceness(1)?;
//! assert!(procprio::get_current_priority()? >= before);
//! # Ok::<(), procprio::Error>(())
//! ```
//!
//! On Linux the niceness belongs to the calling thread, and threads spawned
//! afterwards inherit it.

pub mod common;
pub mod priority;
pub mod runner;

pub use common::error::{Error, Result};
pub use priority::{
    NICE_MAX, NICE_MIN, NativeBackend, PriorityBackend, PriorityClass, ProcessPriority,
    ThreadPriority, get_current_priority, nice, set_niceness,
};

#[cfg(unix)]
pub use priority::unix::lowest_permitted_niceness;

#[cfg(windows)]
pub use priority::windows::{current_thread_priority, set_current_thread_priority};
