use crate::common::error::{Error, Result};
use crate::priority::{NICE_MAX, NICE_MIN, PriorityBackend, PriorityClass, ThreadPriority};
use log::trace;
use std::io;
use std::ops::RangeInclusive;
use winapi::um::processthreadsapi::{
    GetCurrentProcess, GetCurrentThread, GetPriorityClass, GetThreadPriority, SetPriorityClass,
    SetThreadPriority,
};
use winapi::um::winbase::THREAD_PRIORITY_ERROR_RETURN;

/// Maps niceness deltas onto the nearest process priority class.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityClassBackend;

impl PriorityClassBackend {
    fn current_class(&self) -> Result<PriorityClass> {
        let raw = unsafe { GetPriorityClass(GetCurrentProcess()) };
        if raw == 0 {
            return Err(Error::QueryFailed(io::Error::last_os_error()));
        }

        PriorityClass::from_raw(raw).ok_or_else(|| {
            Error::QueryFailed(io::Error::other(format!(
                "unknown priority class {:#x}",
                raw
            )))
        })
    }
}

impl PriorityBackend for PriorityClassBackend {
    fn platform(&self) -> &'static str {
        "windows"
    }

    fn delta_range(&self) -> RangeInclusive<i32> {
        NICE_MIN..=NICE_MAX
    }

    fn adjust(&self, delta: i32) -> Result<i32> {
        let current = self.current_class()?;
        let target = PriorityClass::from_niceness(current.niceness() + delta);
        trace!("Mapping {:?} {:+} onto {:?}", current, delta, target);

        if target != current {
            let ok = unsafe { SetPriorityClass(GetCurrentProcess(), target.raw()) };
            if ok == 0 {
                return Err(Error::from_adjust(delta, io::Error::last_os_error()));
            }
        }

        // Realtime silently degrades to High without privilege
        self.current()
    }

    fn current(&self) -> Result<i32> {
        self.current_class().map(PriorityClass::niceness)
    }
}

pub fn set_current_thread_priority(priority: ThreadPriority) -> Result<()> {
    let ok = unsafe { SetThreadPriority(GetCurrentThread(), priority.into()) };
    if ok == 0 {
        return Err(Error::from_adjust(
            priority.into(),
            io::Error::last_os_error(),
        ));
    }
    Ok(())
}

pub fn current_thread_priority() -> Result<i32> {
    let ret = unsafe { GetThreadPriority(GetCurrentThread()) };
    if ret == THREAD_PRIORITY_ERROR_RETURN as i32 {
        return Err(Error::QueryFailed(io::Error::last_os_error()));
    }
    Ok(ret)
}
