//! Codec boundary: decoding leans on `serde_json` (order-preserving),
//! encoding is our own writer so the flag set and number formatting stay
//! under our control.

mod decode;
mod encode;
mod flags;

pub use decode::{LoadOutcome, ParseFailure};
pub use flags::{DumpFlags, MAX_INDENT};

pub(crate) use decode::parse_text;
pub(crate) use encode::dump_to_string;

/// Failure result of the fixed-buffer dump: the encode failed or the
/// buffer was too small. Nothing has been written in either case.
pub const DUMP_FAILED: i64 = -1;
