use crate::common::error::{Error, Result};
use crate::priority::{NICE_MAX, NICE_MIN, PriorityBackend};
use log::trace;
use nix::errno::Errno;
use std::io;
use std::ops::RangeInclusive;

/// POSIX backend built on `nice(3)` and `getpriority(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nice;

impl PriorityBackend for Nice {
    fn platform(&self) -> &'static str {
        std::env::consts::OS
    }

    fn delta_range(&self) -> RangeInclusive<i32> {
        NICE_MIN..=NICE_MAX
    }

    fn adjust(&self, delta: i32) -> Result<i32> {
        // -1 is a valid niceness, so errno is the only failure signal
        Errno::clear();
        let ret = unsafe { libc::nice(delta) };
        let errno = Errno::last_raw();
        if ret == -1 && errno != 0 {
            return Err(Error::from_adjust(
                delta,
                io::Error::from(Errno::from_raw(errno)),
            ));
        }

        trace!("nice({}) returned {}", delta, ret);
        // Some libcs return 0 instead of the new value, so read it back
        self.current()
    }

    fn current(&self) -> Result<i32> {
        Errno::clear();
        let ret = unsafe { libc::getpriority(libc::PRIO_PROCESS, 0) };
        let errno = Errno::last_raw();
        if ret == -1 && errno != 0 {
            return Err(Error::QueryFailed(io::Error::from(Errno::from_raw(errno))));
        }

        trace!("getpriority(PRIO_PROCESS, 0) returned {}", ret);
        Ok(ret)
    }
}

/// Lowest niceness the calling process may request without failing.
pub fn lowest_permitted_niceness() -> Result<i32> {
    if may_raise_priority() {
        return Ok(NICE_MIN);
    }

    let current = Nice.current()?;
    Ok(rlimit_floor().map_or(current, |floor| floor.min(current)))
}

/// Whether the process may pick any niceness regardless of its limits.
#[cfg(target_os = "linux")]
fn may_raise_priority() -> bool {
    use caps::{CapSet, Capability, has_cap};

    // Granted by CAP_SYS_NICE, not by uid 0
    has_cap(None, CapSet::Effective, Capability::CAP_SYS_NICE).unwrap_or(false)
}

#[cfg(not(target_os = "linux"))]
fn may_raise_priority() -> bool {
    nix::unistd::Uid::effective().is_root()
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn rlimit_floor() -> Option<i32> {
    use nix::sys::resource::{Resource, getrlimit};

    // RLIMIT_NICE encodes the ceiling as 20 - nice
    let (soft, _hard) = getrlimit(Resource::RLIMIT_NICE).ok()?;
    let soft = i32::try_from(soft.min(40)).ok()?;
    Some((20 - soft).max(NICE_MIN))
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn rlimit_floor() -> Option<i32> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_current_is_within_range() {
        let priority = Nice.current().unwrap();
        assert!((NICE_MIN..=NICE_MAX).contains(&priority));
    }

    #[test]
    #[serial]
    fn test_current_is_stable_without_adjustment() {
        let first = Nice.current().unwrap();
        let second = Nice.current().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    #[serial]
    fn test_adjust_zero_is_noop() {
        let before = Nice.current().unwrap();
        assert_eq!(Nice.adjust(0).unwrap(), before);
        assert_eq!(Nice.current().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_adjust_lowers_priority() {
        let before = Nice.current().unwrap();
        let after = Nice.adjust(1).unwrap();
        assert_eq!(after, (before + 1).min(NICE_MAX));
    }

    #[test]
    #[serial]
    fn test_lowest_permitted_is_granted_by_kernel() {
        let current = Nice.current().unwrap();
        let floor = lowest_permitted_niceness().unwrap();

        if floor < current {
            assert_eq!(Nice.adjust(floor - current).unwrap(), floor);
            assert_eq!(Nice.adjust(current - floor).unwrap(), current);
        } else if current > NICE_MIN {
            let err = Nice.adjust(-1).unwrap_err();
            assert!(err.is_permission_denied(), "unexpected error: {:?}", err);
            assert_eq!(Nice.current().unwrap(), current);
        } else {
            assert_eq!(floor, NICE_MIN);
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_floor_follows_cap_sys_nice() {
        let privileged =
            caps::has_cap(None, caps::CapSet::Effective, caps::Capability::CAP_SYS_NICE)
                .unwrap();
        assert_eq!(may_raise_priority(), privileged);
        if privileged {
            assert_eq!(lowest_permitted_niceness().unwrap(), NICE_MIN);
        }
    }

    #[test]
    #[serial]
    fn test_lowest_permitted_not_above_current() {
        let current = Nice.current().unwrap();
        let floor = lowest_permitted_niceness().unwrap();
        assert!(floor <= current);
        assert!(floor >= NICE_MIN);
    }
}
