//! Decoding: parse with `serde_json` (its map type preserves key order
//! under the `preserve_order` feature) and import the parsed tree into
//! the node store.

use jx_core::{Node, NodeId, NodeStore, object_map_with_capacity};
use serde_json::Value;

use crate::handles::RawHandle;

/// Structured decode failure, reported as data by the `_ex` load variants.
/// `line` and `column` are 1-based for syntax errors; both are 0 when the
/// input could not be read at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub text: String,
    pub line: u32,
    pub column: u32,
}

/// Result of a diagnostic load: either a minted handle or the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(RawHandle),
    Invalid(ParseFailure),
}

pub(crate) fn parse_text(store: &mut NodeStore, text: &str) -> Result<NodeId, ParseFailure> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => Ok(import(store, value)),
        Err(err) => Err(ParseFailure {
            text: err.to_string(),
            line: err.line() as u32,
            column: err.column() as u32,
        }),
    }
}

/// Move a parsed tree into the store. Every allocated node starts with one
/// reference owned by its container (or, for the root, by the caller).
/// Integers that fit i64 stay integers; wider u64 values degrade to reals.
fn import(store: &mut NodeStore, value: Value) -> NodeId {
    match value {
        Value::Null => store.alloc(Node::Null),
        Value::Bool(flag) => store.alloc(Node::Bool(flag)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => store.alloc(Node::Integer(i)),
            None => store.alloc(Node::Real(n.as_f64().unwrap_or(0.0))),
        },
        Value::String(s) => store.alloc(Node::String(s)),
        Value::Array(items) => {
            let children: Vec<NodeId> =
                items.into_iter().map(|item| import(store, item)).collect();
            store.alloc(Node::Array(children))
        }
        Value::Object(entries) => {
            let mut map = object_map_with_capacity(entries.len());
            for (key, entry) in entries {
                let child = import(store, entry);
                map.insert(key, child);
            }
            store.alloc(Node::Object(map))
        }
    }
}
