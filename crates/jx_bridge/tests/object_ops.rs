use jx_bridge::{Ident, JsonBridge, JsonType, RawHandle};

const P: Ident = Ident(1);

#[test]
fn set_get_del_roundtrip() {
    let mut bridge = JsonBridge::new();
    let obj = bridge.object(P).unwrap();
    let val = bridge.integer(P, 7).unwrap();

    assert!(bridge.object_set(P, obj, "answer", val).unwrap());
    assert_eq!(bridge.object_size(P, obj).unwrap(), 1);

    let got = bridge.object_get(P, obj, "answer").unwrap();
    assert!(!got.is_bad());
    assert_eq!(bridge.integer_value(P, got).unwrap(), 7);

    assert!(bridge.object_del(P, obj, "answer").unwrap());
    assert_eq!(bridge.object_size(P, obj).unwrap(), 0);
    assert!(!bridge.object_del(P, obj, "answer").unwrap());
}

#[test]
fn absent_key_is_the_bad_sentinel() {
    let mut bridge = JsonBridge::new();
    let obj = bridge.object(P).unwrap();
    assert_eq!(bridge.object_get(P, obj, "missing").unwrap(), RawHandle::BAD);
}

#[test]
fn get_returns_an_independent_borrowed_handle() {
    let mut bridge = JsonBridge::new();
    let obj = bridge.object(P).unwrap();
    let val = bridge.string(P, "kept alive").unwrap();
    assert!(bridge.object_set_new(P, obj, "k", val).unwrap());

    let borrowed = bridge.object_get(P, obj, "k").unwrap();
    assert!(bridge.object_del(P, obj, "k").unwrap());
    // The container's reference is gone; the borrowed handle still works.
    assert_eq!(bridge.string_value(P, borrowed).unwrap(), Some("kept alive"));
}

#[test]
fn replacing_a_binding_releases_the_old_value() {
    let mut bridge = JsonBridge::new();
    let obj = bridge.object(P).unwrap();
    let first = bridge.integer(P, 1).unwrap();
    let second = bridge.integer(P, 2).unwrap();
    assert!(bridge.object_set_new(P, obj, "k", first).unwrap());
    let before = bridge.node_count();
    assert!(bridge.object_set_new(P, obj, "k", second).unwrap());
    // The displaced value loses its last reference and is released.
    assert_eq!(bridge.node_count(), before - 1);
    let got = bridge.object_get(P, obj, "k").unwrap();
    assert_eq!(bridge.integer_value(P, got).unwrap(), 2);
}

#[test]
fn object_ops_on_non_objects_are_structural_rejections() {
    let mut bridge = JsonBridge::new();
    let arr = bridge.array(P).unwrap();
    let val = bridge.null(P).unwrap();
    assert!(!bridge.object_set(P, arr, "k", val).unwrap());
    assert_eq!(bridge.object_size(P, arr).unwrap(), 0);
    assert_eq!(bridge.object_get(P, arr, "k").unwrap(), RawHandle::BAD);
    assert!(!bridge.object_del(P, arr, "k").unwrap());
    assert!(!bridge.object_clear(P, arr).unwrap());
}

#[test]
fn inserting_an_object_into_itself_is_rejected() {
    let mut bridge = JsonBridge::new();
    let obj = bridge.object(P).unwrap();
    assert!(!bridge.object_set(P, obj, "self", obj).unwrap());
    assert_eq!(bridge.object_size(P, obj).unwrap(), 0);
    // The failed consuming variant must keep the handle valid too.
    assert!(!bridge.object_set_new(P, obj, "self", obj).unwrap());
    assert_eq!(bridge.type_of(P, obj).unwrap(), JsonType::Object);
}

#[test]
fn clear_releases_every_child() {
    let mut bridge = JsonBridge::new();
    let obj = bridge.object(P).unwrap();
    for (key, n) in [("a", 1), ("b", 2), ("c", 3)] {
        let v = bridge.integer(P, n).unwrap();
        assert!(bridge.object_set_new(P, obj, key, v).unwrap());
    }
    assert_eq!(bridge.node_count(), 4);
    assert!(bridge.object_clear(P, obj).unwrap());
    assert_eq!(bridge.object_size(P, obj).unwrap(), 0);
    assert_eq!(bridge.node_count(), 1);
}

fn sample_pair(bridge: &mut JsonBridge) -> (RawHandle, RawHandle) {
    let dst = bridge.object(P).unwrap();
    let src = bridge.object(P).unwrap();
    for (key, n) in [("a", 1), ("b", 2)] {
        let v = bridge.integer(P, n).unwrap();
        assert!(bridge.object_set_new(P, dst, key, v).unwrap());
    }
    for (key, n) in [("b", 20), ("c", 30)] {
        let v = bridge.integer(P, n).unwrap();
        assert!(bridge.object_set_new(P, src, key, v).unwrap());
    }
    (dst, src)
}

fn int_at(bridge: &mut JsonBridge, obj: RawHandle, key: &str) -> Option<i64> {
    let h = bridge.object_get(P, obj, key).unwrap();
    if h.is_bad() {
        return None;
    }
    let n = bridge.integer_value(P, h).unwrap();
    bridge.close(P, h).unwrap();
    Some(n)
}

#[test]
fn update_merges_everything() {
    let mut bridge = JsonBridge::new();
    let (dst, src) = sample_pair(&mut bridge);
    assert!(bridge.object_update(P, dst, src).unwrap());
    assert_eq!(int_at(&mut bridge, dst, "a"), Some(1));
    assert_eq!(int_at(&mut bridge, dst, "b"), Some(20));
    assert_eq!(int_at(&mut bridge, dst, "c"), Some(30));
}

#[test]
fn update_existing_touches_only_present_keys() {
    let mut bridge = JsonBridge::new();
    let (dst, src) = sample_pair(&mut bridge);
    assert!(bridge.object_update_existing(P, dst, src).unwrap());
    assert_eq!(int_at(&mut bridge, dst, "b"), Some(20));
    assert_eq!(int_at(&mut bridge, dst, "c"), None);
}

#[test]
fn update_missing_never_overwrites() {
    let mut bridge = JsonBridge::new();
    let (dst, src) = sample_pair(&mut bridge);
    assert!(bridge.object_update_missing(P, dst, src).unwrap());
    assert_eq!(int_at(&mut bridge, dst, "b"), Some(2));
    assert_eq!(int_at(&mut bridge, dst, "c"), Some(30));
}

#[test]
fn update_with_a_non_object_is_rejected() {
    let mut bridge = JsonBridge::new();
    let obj = bridge.object(P).unwrap();
    let arr = bridge.array(P).unwrap();
    assert!(!bridge.object_update(P, obj, arr).unwrap());
    assert!(!bridge.object_update(P, arr, obj).unwrap());
}
