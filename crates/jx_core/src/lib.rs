//! Core value model for the jx JSON bridge.
//!
//! This crate contains the types that are independent of the handle layer:
//! - `Node` - the closed JSON value variant
//! - `NodeId` - handle to a slot in the node store
//! - `NodeStore` - reference-counted slot arena holding every live node

pub mod node;
pub mod store;

pub use node::{JsonType, Node, ObjectMap, object_map_new, object_map_with_capacity};
pub use store::{NodeId, NodeStore};
