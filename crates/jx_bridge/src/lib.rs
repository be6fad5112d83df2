//! Handle-mediated JSON bridge for embedded scripting hosts.
//!
//! Scripting callers never see a node pointer: every value and every object
//! cursor is reached through an opaque [`RawHandle`], type- and
//! access-checked on each use. The bridge owns the reference-count
//! bookkeeping so a caller can neither corrupt nor leak the underlying tree.

#![allow(clippy::new_without_default)]

pub mod codec;
pub mod errors;
pub mod handles;

mod bridge;
mod cursor;
mod natives;

pub use bridge::JsonBridge;
pub use codec::{DUMP_FAILED, DumpFlags, LoadOutcome, ParseFailure};
pub use errors::{HandleFault, NativeError, NativeResult};
pub use handles::{HandleKind, Ident, RawHandle};

// Re-exports from jx_core for hosts that only depend on the bridge.
pub use jx_core::{JsonType, Node, NodeId, NodeStore};
