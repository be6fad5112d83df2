//! The native operation surface, grouped by receiver the way the script
//! side groups its natives. Every operation is a method on
//! [`crate::JsonBridge`] taking the calling identity first.

mod array;
mod codec;
mod common;
mod iter;
mod object;
mod scalar;
mod value;
