//! Iterator natives.
//!
//! Cursors are single-use: `iter_next` frees the cursor it was given
//! before minting the next one, so a consumed position can never be
//! resolved again. A cursor whose key has been removed from the object
//! behaves as end-of-sequence.

use jx_core::Node;

use crate::bridge::JsonBridge;
use crate::cursor::{self, ObjectCursor};
use crate::errors::NativeResult;
use crate::handles::{Ident, RawHandle};
use crate::natives::common;

impl JsonBridge {
    /// Cursor at the object's first key, or BAD for an empty object.
    pub fn iter(&mut self, caller: Ident, hobj: RawHandle) -> NativeResult<RawHandle> {
        let object = self.node(caller, hobj)?;
        match cursor::first_key(&self.store, object) {
            Some(key) => self.mint_cursor(ObjectCursor { object, key }, caller),
            None => Ok(RawHandle::BAD),
        }
    }

    /// Cursor at `key`, or BAD if the object has no such key.
    pub fn iter_at(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        key: &str,
    ) -> NativeResult<RawHandle> {
        let object = self.node(caller, hobj)?;
        let present = match self.store.get(object) {
            Node::Object(map) => map.contains_key(key),
            _ => false,
        };
        if present {
            self.mint_cursor(
                ObjectCursor {
                    object,
                    key: key.to_string(),
                },
                caller,
            )
        } else {
            Ok(RawHandle::BAD)
        }
    }

    /// Consume `hiter` and return a cursor on the next key, or BAD at the
    /// end. The old cursor handle is freed even when iteration ends, and
    /// also when the cursor does not belong to `hobj`.
    pub fn iter_next(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        hiter: RawHandle,
    ) -> NativeResult<RawHandle> {
        let object = self.node(caller, hobj)?;
        let cursor = self.cursor(caller, hiter)?.clone();
        self.close(caller, hiter)?;
        if cursor.object != object {
            return Ok(RawHandle::BAD);
        }
        match cursor::key_after(&self.store, object, &cursor.key) {
            Some(key) => self.mint_cursor(ObjectCursor { object, key }, caller),
            None => Ok(RawHandle::BAD),
        }
    }

    /// The key text at the cursor. Does not consume the cursor.
    pub fn iter_key(&self, caller: Ident, hiter: RawHandle) -> NativeResult<&str> {
        Ok(self.cursor(caller, hiter)?.key.as_str())
    }

    /// Borrowed handle on the value at the cursor, or BAD if the key has
    /// been removed since the cursor was minted. Does not consume.
    pub fn iter_value(&mut self, caller: Ident, hiter: RawHandle) -> NativeResult<RawHandle> {
        let (object, key) = {
            let cursor = self.cursor(caller, hiter)?;
            (cursor.object, cursor.key.clone())
        };
        let found = match self.store.get(object) {
            Node::Object(map) => map.get(&key).copied(),
            _ => None,
        };
        match found {
            Some(id) => self.mint_incref(id, caller, "Object"),
            None => Ok(RawHandle::BAD),
        }
    }

    /// Replace the value at the cursor's key. Fails if the cursor belongs
    /// to a different object or its key has been removed.
    pub fn iter_set(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        hiter: RawHandle,
        hvalue: RawHandle,
    ) -> NativeResult<bool> {
        let object = self.node(caller, hobj)?;
        let value = self.node(caller, hvalue)?;
        let key = {
            let cursor = self.cursor(caller, hiter)?;
            if cursor.object != object {
                return Ok(false);
            }
            cursor.key.clone()
        };
        let present = match self.store.get(object) {
            Node::Object(map) => map.contains_key(&key),
            _ => false,
        };
        if !present {
            return Ok(false);
        }
        Ok(common::insert_key(&mut self.store, object, &key, value))
    }

    pub fn iter_set_new(
        &mut self,
        caller: Ident,
        hobj: RawHandle,
        hiter: RawHandle,
        hvalue: RawHandle,
    ) -> NativeResult<bool> {
        let ok = self.iter_set(caller, hobj, hiter, hvalue)?;
        if ok {
            self.consume_value_handle(caller, hvalue)?;
        }
        Ok(ok)
    }
}
