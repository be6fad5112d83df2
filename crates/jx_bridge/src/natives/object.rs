//! Object natives: construction, key access, binding, and the three
//! merge variants.

use jx_core::{Node, NodeId, object_map_new};

use crate::bridge::JsonBridge;
use crate::errors::NativeResult;
use crate::handles::{Ident, RawHandle};
use crate::natives::common;

#[derive(Clone, Copy)]
enum MergeMode {
    All,
    ExistingOnly,
    MissingOnly,
}

impl JsonBridge {
    /// Fresh empty object; the handle owns its reference.
    pub fn object(&mut self, caller: Ident) -> NativeResult<RawHandle> {
        let id = self.store.alloc(Node::Object(object_map_new()));
        self.mint_owned(id, caller, "Object")
    }

    /// Key count, 0 for anything that is not an object.
    pub fn object_size(&self, caller: Ident, hobj: RawHandle) -> NativeResult<usize> {
        let object = self.node(caller, hobj)?;
        Ok(match self.store.get(object) {
            Node::Object(map) => map.len(),
            _ => 0,
        })
    }

    /// Borrowed lookup: the returned handle takes its own reference, and
    /// absence is the BAD sentinel rather than an error.
    pub fn object_get(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        key: &str,
    ) -> NativeResult<RawHandle> {
        let object = self.node(caller, hobj)?;
        let found = match self.store.get(object) {
            Node::Object(map) => map.get(key).copied(),
            _ => None,
        };
        match found {
            Some(id) => self.mint_incref(id, caller, "Object"),
            None => Ok(RawHandle::BAD),
        }
    }

    pub fn object_set(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        key: &str,
        hvalue: RawHandle,
    ) -> NativeResult<bool> {
        let object = self.node(caller, hobj)?;
        let value = self.node(caller, hvalue)?;
        Ok(common::insert_key(&mut self.store, object, key, value))
    }

    /// Consuming variant: on success the caller's value handle is freed,
    /// completing the ownership transfer. Failure leaves it untouched.
    pub fn object_set_new(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        key: &str,
        hvalue: RawHandle,
    ) -> NativeResult<bool> {
        let ok = self.object_set(caller, hobj, key, hvalue)?;
        if ok {
            self.consume_value_handle(caller, hvalue)?;
        }
        Ok(ok)
    }

    /// Remove a binding; `false` when the key is absent.
    pub fn object_del(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        key: &str,
    ) -> NativeResult<bool> {
        let object = self.node(caller, hobj)?;
        let removed = match self.store.get_mut(object) {
            Node::Object(map) => map.shift_remove(key),
            _ => None,
        };
        match removed {
            Some(old) => {
                self.store.decref(old);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn object_clear(&mut self, caller: Ident, hobj: RawHandle) -> NativeResult<bool> {
        let object = self.node(caller, hobj)?;
        let children: Vec<NodeId> = match self.store.get_mut(object) {
            Node::Object(map) => map.drain(..).map(|(_, id)| id).collect(),
            _ => return Ok(false),
        };
        for child in children {
            self.store.decref(child);
        }
        Ok(true)
    }

    /// Merge every binding of `hother` into `hobj`.
    pub fn object_update(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        hother: RawHandle,
    ) -> NativeResult<bool> {
        self.merge(caller, hobj, hother, MergeMode::All)
    }

    /// Merge only keys `hobj` already has.
    pub fn object_update_existing(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        hother: RawHandle,
    ) -> NativeResult<bool> {
        self.merge(caller, hobj, hother, MergeMode::ExistingOnly)
    }

    /// Merge only keys `hobj` does not have yet.
    pub fn object_update_missing(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        hother: RawHandle,
    ) -> NativeResult<bool> {
        self.merge(caller, hobj, hother, MergeMode::MissingOnly)
    }

    fn merge(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        hother: RawHandle,
        mode: MergeMode,
    ) -> NativeResult<bool> {
        let object = self.node(caller, hobj)?;
        let other = self.node(caller, hother)?;
        if !common::is_object(&self.store, object) || !common::is_object(&self.store, other) {
            return Ok(false);
        }
        // Snapshot the source entries so merging an object into itself
        // cannot walk its own mutations.
        let entries: Vec<(String, NodeId)> = match self.store.get(other) {
            Node::Object(map) => map.iter().map(|(k, &v)| (k.clone(), v)).collect(),
            _ => unreachable!("type checked above"),
        };
        for (key, value) in entries {
            let present = match self.store.get(object) {
                Node::Object(map) => map.contains_key(&key),
                _ => unreachable!("type checked above"),
            };
            let wanted = match mode {
                MergeMode::All => true,
                MergeMode::ExistingOnly => present,
                MergeMode::MissingOnly => !present,
            };
            if wanted && !common::insert_key(&mut self.store, object, &key, value) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
