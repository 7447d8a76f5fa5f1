use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the priority accessor.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument {value}: {reason}")]
    InvalidArgument { value: i32, reason: String },

    #[error("permission denied while adjusting niceness by {delta}")]
    PermissionDenied {
        delta: i32,
        #[source]
        source: io::Error,
    },

    #[error("failed to query the current process priority")]
    QueryFailed(#[source] io::Error),

    #[error("failed to adjust the process priority")]
    Os(#[source] io::Error),

    #[error("process priority control is not supported on {0}")]
    Unsupported(&'static str),
}

impl Error {
    pub(crate) fn out_of_range(value: i32, min: i32, max: i32) -> Self {
        Error::InvalidArgument {
            value,
            reason: format!("expected a value within {}..={}", min, max),
        }
    }

    /// Classify an OS error raised by an adjustment call.
    pub(crate) fn from_adjust(delta: i32, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => Error::PermissionDenied { delta, source },
            io::ErrorKind::InvalidInput => Error::InvalidArgument {
                value: delta,
                reason: source.to_string(),
            },
            _ => Error::Os(source),
        }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Error::PermissionDenied { .. })
    }
}
