//! Windows-style priority tiers described without any OS bindings, so the
//! mapping between tiers and niceness can be exercised on every host.

use crate::common::error::{Error, Result};
use crate::priority::{NICE_MAX, NICE_MIN};

/// Process priority class, ordered from lowest to highest scheduling priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriorityClass {
    Idle,
    BelowNormal,
    Normal,
    AboveNormal,
    High,
    Realtime,
}

impl PriorityClass {
    pub const ALL: [PriorityClass; 6] = [
        PriorityClass::Idle,
        PriorityClass::BelowNormal,
        PriorityClass::Normal,
        PriorityClass::AboveNormal,
        PriorityClass::High,
        PriorityClass::Realtime,
    ];

    /// Value accepted by `SetPriorityClass`.
    pub const fn raw(self) -> u32 {
        match self {
            PriorityClass::Idle => 0x0000_0040,
            PriorityClass::BelowNormal => 0x0000_4000,
            PriorityClass::Normal => 0x0000_0020,
            PriorityClass::AboveNormal => 0x0000_8000,
            PriorityClass::High => 0x0000_0080,
            PriorityClass::Realtime => 0x0000_0100,
        }
    }

    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.raw() == raw)
    }

    /// Niceness a POSIX process would need to sit in the same tier.
    pub const fn niceness(self) -> i32 {
        match self {
            PriorityClass::Idle => 19,
            PriorityClass::BelowNormal => 10,
            PriorityClass::Normal => 0,
            PriorityClass::AboveNormal => -5,
            PriorityClass::High => -10,
            PriorityClass::Realtime => NICE_MIN,
        }
    }

    /// Nearest class for a niceness value. Ties resolve toward the lower
    /// priority class.
    pub fn from_niceness(nice: i32) -> Self {
        let nice = nice.clamp(NICE_MIN, NICE_MAX);
        Self::ALL
            .into_iter()
            .min_by_key(|class| (class.niceness().abs_diff(nice), *class))
            .unwrap_or(PriorityClass::Normal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityClass::Idle => "idle",
            PriorityClass::BelowNormal => "below_normal",
            PriorityClass::Normal => "normal",
            PriorityClass::AboveNormal => "above_normal",
            PriorityClass::High => "high",
            PriorityClass::Realtime => "realtime",
        }
    }
}

/// Per-thread priority levels understood by `SetThreadPriority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ThreadPriority {
    ModeBackgroundBegin = 0x0001_0000,
    ModeBackgroundEnd = 0x0002_0000,
    AboveNormal = 1,
    BelowNormal = -1,
    Highest = 2,
    Idle = -15,
    Lowest = -2,
    Normal = 0,
    TimeCritical = 15,
}

impl TryFrom<i32> for ThreadPriority {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0x0001_0000 => Ok(ThreadPriority::ModeBackgroundBegin),
            0x0002_0000 => Ok(ThreadPriority::ModeBackgroundEnd),
            1 => Ok(ThreadPriority::AboveNormal),
            -1 => Ok(ThreadPriority::BelowNormal),
            2 => Ok(ThreadPriority::Highest),
            -15 => Ok(ThreadPriority::Idle),
            -2 => Ok(ThreadPriority::Lowest),
            0 => Ok(ThreadPriority::Normal),
            15 => Ok(ThreadPriority::TimeCritical),
            _ => Err(Error::InvalidArgument {
                value,
                reason: "not a valid thread priority level".to_string(),
            }),
        }
    }
}

impl From<ThreadPriority> for i32 {
    fn from(priority: ThreadPriority) -> Self {
        priority as i32
    }
}
