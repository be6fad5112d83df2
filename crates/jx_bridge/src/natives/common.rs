//! Store-level mutation primitives shared by the object, array, and
//! iterator operations. All of them return `false` for structural
//! rejections (wrong container type, out-of-range index, self-insertion)
//! and leave the reference counts balanced on every path.

use jx_core::{Node, NodeId, NodeStore};

pub(crate) fn is_object(store: &NodeStore, id: NodeId) -> bool {
    matches!(store.get(id), Node::Object(_))
}

/// Bind `key` to `value` in `object`, replacing any previous binding. The
/// container takes its own reference; a replaced value loses the
/// container's. Inserting a container into itself is rejected.
pub(crate) fn insert_key(
    store: &mut NodeStore,
    object: NodeId,
    key: &str,
    value: NodeId,
) -> bool {
    if object == value || !is_object(store, object) {
        return false;
    }
    store.incref(value);
    let old = match store.get_mut(object) {
        Node::Object(map) => map.insert(key.to_string(), value),
        _ => unreachable!("type checked above"),
    };
    if let Some(old) = old {
        store.decref(old);
    }
    true
}

/// Replace the element at `index`. Fails on non-arrays, out-of-range
/// indices, and self-insertion.
pub(crate) fn replace_index(
    store: &mut NodeStore,
    array: NodeId,
    index: usize,
    value: NodeId,
) -> bool {
    if array == value {
        return false;
    }
    let in_range = match store.get(array) {
        Node::Array(items) => index < items.len(),
        _ => false,
    };
    if !in_range {
        return false;
    }
    store.incref(value);
    let old = match store.get_mut(array) {
        Node::Array(items) => std::mem::replace(&mut items[index], value),
        _ => unreachable!("type checked above"),
    };
    store.decref(old);
    true
}

pub(crate) fn push_value(store: &mut NodeStore, array: NodeId, value: NodeId) -> bool {
    if array == value || !matches!(store.get(array), Node::Array(_)) {
        return false;
    }
    store.incref(value);
    match store.get_mut(array) {
        Node::Array(items) => items.push(value),
        _ => unreachable!("type checked above"),
    }
    true
}

/// Insert before `index`; `index == len` appends, beyond that fails.
pub(crate) fn insert_index(
    store: &mut NodeStore,
    array: NodeId,
    index: usize,
    value: NodeId,
) -> bool {
    if array == value {
        return false;
    }
    let in_range = match store.get(array) {
        Node::Array(items) => index <= items.len(),
        _ => false,
    };
    if !in_range {
        return false;
    }
    store.incref(value);
    match store.get_mut(array) {
        Node::Array(items) => items.insert(index, value),
        _ => unreachable!("type checked above"),
    }
    true
}
