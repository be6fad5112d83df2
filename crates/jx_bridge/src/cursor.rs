//! Object cursors.
//!
//! A cursor is a position inside one object's insertion-ordered key
//! sequence. It holds no reference count on its object: the object must
//! outlive the cursor, and structural mutation of the object between cursor
//! creation and use is the caller's responsibility (a removed key makes the
//! cursor report end-of-sequence, never crash).
//!
//! The advance step lives on the handle layer, which frees the old cursor
//! handle before computing the next position; each position is single-use
//! by construction.

use jx_core::{Node, NodeId, NodeStore};

#[derive(Debug, Clone)]
pub(crate) struct ObjectCursor {
    pub object: NodeId,
    pub key: String,
}

pub(crate) fn first_key(store: &NodeStore, object: NodeId) -> Option<String> {
    match store.get(object) {
        Node::Object(map) => map.keys().next().cloned(),
        _ => None,
    }
}

pub(crate) fn key_after(store: &NodeStore, object: NodeId, key: &str) -> Option<String> {
    match store.get(object) {
        Node::Object(map) => {
            let idx = map.get_index_of(key)?;
            map.get_index(idx + 1).map(|(k, _)| k.clone())
        }
        _ => None,
    }
}
