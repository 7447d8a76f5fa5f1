use crate::common::error::{Error, Result};
use crate::priority::{NICE_MAX, NICE_MIN, PriorityBackend};
use std::ops::RangeInclusive;

/// Fallback for targets without a scheduling API.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl PriorityBackend for Unsupported {
    fn platform(&self) -> &'static str {
        std::env::consts::OS
    }

    fn delta_range(&self) -> RangeInclusive<i32> {
        NICE_MIN..=NICE_MAX
    }

    fn adjust(&self, _delta: i32) -> Result<i32> {
        Err(Error::Unsupported(self.platform()))
    }

    fn current(&self) -> Result<i32> {
        Err(Error::Unsupported(self.platform()))
    }
}
