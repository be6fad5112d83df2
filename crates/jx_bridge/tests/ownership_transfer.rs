//! The consuming vs non-consuming duality: `_new` operations absorb the
//! caller's handle on success and must leave it untouched on failure.

use jx_bridge::{Ident, JsonBridge, JsonType};

const P: Ident = Ident(1);

#[test]
fn plain_set_leaves_the_caller_handle_alive() {
    let mut bridge = JsonBridge::new();
    let obj = bridge.object(P).unwrap();
    let val = bridge.integer(P, 5).unwrap();
    assert!(bridge.object_set(P, obj, "k", val).unwrap());

    // Caller still owns its handle; closing it must not kill the value
    // inside the container.
    assert_eq!(bridge.integer_value(P, val).unwrap(), 5);
    bridge.close(P, val).unwrap();
    let got = bridge.object_get(P, obj, "k").unwrap();
    assert_eq!(bridge.integer_value(P, got).unwrap(), 5);
}

#[test]
fn set_new_consumes_the_caller_handle() {
    let mut bridge = JsonBridge::new();
    let obj = bridge.object(P).unwrap();
    let val = bridge.integer(P, 5).unwrap();
    assert!(bridge.object_set_new(P, obj, "k", val).unwrap());

    // The handle is gone; the value lives on through the container.
    assert!(bridge.type_of(P, val).is_err());
    let got = bridge.object_get(P, obj, "k").unwrap();
    assert_eq!(bridge.integer_value(P, got).unwrap(), 5);
}

#[test]
fn failed_set_new_keeps_the_caller_handle_valid() {
    let mut bridge = JsonBridge::new();
    let not_an_object = bridge.array(P).unwrap();
    let val = bridge.integer(P, 5).unwrap();
    assert!(!bridge.object_set_new(P, not_an_object, "k", val).unwrap());
    assert_eq!(bridge.integer_value(P, val).unwrap(), 5);
}

#[test]
fn append_new_consumes_and_failure_does_not() {
    let mut bridge = JsonBridge::new();
    let arr = bridge.array(P).unwrap();
    let obj = bridge.object(P).unwrap();

    let a = bridge.string(P, "taken").unwrap();
    assert!(bridge.array_append_new(P, arr, a).unwrap());
    assert!(bridge.type_of(P, a).is_err());

    let b = bridge.string(P, "kept").unwrap();
    assert!(!bridge.array_append_new(P, obj, b).unwrap());
    assert_eq!(bridge.string_value(P, b).unwrap(), Some("kept"));
}

#[test]
fn set_new_transfer_keeps_counts_balanced() {
    let mut bridge = JsonBridge::new();
    let obj = bridge.object(P).unwrap();
    let val = bridge.null(P).unwrap();
    assert_eq!(bridge.node_count(), 2);
    assert_eq!(bridge.handle_count(), 2);

    assert!(bridge.object_set_new(P, obj, "k", val).unwrap());
    assert_eq!(bridge.node_count(), 2);
    assert_eq!(bridge.handle_count(), 1);

    // Tearing down the container takes the transferred value with it.
    bridge.close(P, obj).unwrap();
    assert_eq!(bridge.node_count(), 0);
    assert_eq!(bridge.handle_count(), 0);
}

#[test]
fn iter_set_new_follows_the_same_contract() {
    let mut bridge = JsonBridge::new();
    let obj = bridge.object(P).unwrap();
    let seed = bridge.integer(P, 1).unwrap();
    assert!(bridge.object_set_new(P, obj, "k", seed).unwrap());

    let cursor = bridge.iter(P, obj).unwrap();
    let replacement = bridge.integer(P, 2).unwrap();
    assert!(bridge.iter_set_new(P, obj, cursor, replacement).unwrap());
    assert!(bridge.type_of(P, replacement).is_err());

    // A failing iter_set_new (cursor for another object) keeps the handle.
    let other = bridge.object(P).unwrap();
    let kept = bridge.integer(P, 3).unwrap();
    assert!(!bridge.iter_set_new(P, other, cursor, kept).unwrap());
    assert_eq!(bridge.integer_value(P, kept).unwrap(), 3);
    assert_eq!(bridge.type_of(P, obj).unwrap(), JsonType::Object);
}
