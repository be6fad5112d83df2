//! Error taxonomy for the native surface.
//!
//! Handle and type errors abort the operation before any mutation; they are
//! values here, never panics. Structural rejections (wrong container type,
//! out-of-range index) are boolean results on the operations themselves, and
//! decode failures travel as [`crate::ParseFailure`] data.

use std::fmt;

use thiserror::Error;

use crate::handles::RawHandle;

/// Why a handle failed to resolve or free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleFault {
    /// Never minted, already freed, or recycled since.
    Stale,
    /// Live, but bound to the other target kind.
    WrongType,
    /// Live, but the caller may not perform this operation on it.
    AccessDenied,
}

impl fmt::Display for HandleFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            HandleFault::Stale => "stale",
            HandleFault::WrongType => "wrong type",
            HandleFault::AccessDenied => "access denied",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeError {
    /// The handle failed the presence/type/access check. Raised before any
    /// mutation is attempted, so the operation left no trace.
    #[error("invalid handle {handle} ({kind})")]
    InvalidHandle { handle: RawHandle, kind: HandleFault },

    /// The handle table is exhausted. Any freshly built node has already
    /// been released by the time this propagates.
    #[error("could not create <{0}> handle")]
    AllocationFailure(&'static str),

    /// A consuming mutation inserted its value but could not free the
    /// caller's handle afterwards; the ownership transfer is broken.
    #[error("could not free handle {handle} ({kind})")]
    FreeFailure { handle: RawHandle, kind: HandleFault },
}

pub type NativeResult<T> = Result<T, NativeError>;
