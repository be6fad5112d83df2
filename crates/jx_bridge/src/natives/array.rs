//! Array natives.

use jx_core::{Node, NodeId};

use crate::bridge::JsonBridge;
use crate::errors::NativeResult;
use crate::handles::{Ident, RawHandle};
use crate::natives::common;

impl JsonBridge {
    /// Fresh empty array; the handle owns its reference.
    pub fn array(&mut self, caller: Ident) -> NativeResult<RawHandle> {
        let id = self.store.alloc(Node::Array(Vec::new()));
        self.mint_owned(id, caller, "Array")
    }

    /// Element count, 0 for anything that is not an array.
    pub fn array_size(&self, caller: Ident, harr: RawHandle) -> NativeResult<usize> {
        let array = self.node(caller, harr)?;
        Ok(match self.store.get(array) {
            Node::Array(items) => items.len(),
            _ => 0,
        })
    }

    /// Borrowed lookup; out-of-range is the BAD sentinel.
    pub fn array_get(
        &mut self,
        caller: Ident,
        harr: RawHandle,
        index: usize,
    ) -> NativeResult<RawHandle> {
        let array = self.node(caller, harr)?;
        let found = match self.store.get(array) {
            Node::Array(items) => items.get(index).copied(),
            _ => None,
        };
        match found {
            Some(id) => self.mint_incref(id, caller, "Array"),
            None => Ok(RawHandle::BAD),
        }
    }

    pub fn array_set(
        &mut self,
        caller: Ident,
        harr: RawHandle,
        index: usize,
        hvalue: RawHandle,
    ) -> NativeResult<bool> {
        let array = self.node(caller, harr)?;
        let value = self.node(caller, hvalue)?;
        Ok(common::replace_index(&mut self.store, array, index, value))
    }

    pub fn array_set_new(
        &mut self,
        caller: Ident,
        harr: RawHandle,
        index: usize,
        hvalue: RawHandle,
    ) -> NativeResult<bool> {
        let ok = self.array_set(caller, harr, index, hvalue)?;
        if ok {
            self.consume_value_handle(caller, hvalue)?;
        }
        Ok(ok)
    }

    pub fn array_append(
        &mut self,
        caller: Ident,
        harr: RawHandle,
        hvalue: RawHandle,
    ) -> NativeResult<bool> {
        let array = self.node(caller, harr)?;
        let value = self.node(caller, hvalue)?;
        Ok(common::push_value(&mut self.store, array, value))
    }

    pub fn array_append_new(
        &mut self,
        caller: Ident,
        harr: RawHandle,
        hvalue: RawHandle,
    ) -> NativeResult<bool> {
        let ok = self.array_append(caller, harr, hvalue)?;
        if ok {
            self.consume_value_handle(caller, hvalue)?;
        }
        Ok(ok)
    }

    /// Insert before `index`; `index == len` appends.
    pub fn array_insert(
        &mut self,
        caller: Ident,
        harr: RawHandle,
        index: usize,
        hvalue: RawHandle,
    ) -> NativeResult<bool> {
        let array = self.node(caller, harr)?;
        let value = self.node(caller, hvalue)?;
        Ok(common::insert_index(&mut self.store, array, index, value))
    }

    pub fn array_insert_new(
        &mut self,
        caller: Ident,
        harr: RawHandle,
        index: usize,
        hvalue: RawHandle,
    ) -> NativeResult<bool> {
        let ok = self.array_insert(caller, harr, index, hvalue)?;
        if ok {
            self.consume_value_handle(caller, hvalue)?;
        }
        Ok(ok)
    }

    pub fn array_remove(
        &mut self,
        caller: Ident,
        harr: RawHandle,
        index: usize,
    ) -> NativeResult<bool> {
        let array = self.node(caller, harr)?;
        let removed = match self.store.get_mut(array) {
            Node::Array(items) if index < items.len() => Some(items.remove(index)),
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

    pub fn array_clear(&mut self, caller: Ident, harr: RawHandle) -> NativeResult<bool> {
        let array = self.node(caller, harr)?;
        let children: Vec<NodeId> = match self.store.get_mut(array) {
            Node::Array(items) => items.drain(..).collect(),
            _ => return Ok(false),
        };
        for child in children {
            self.store.decref(child);
        }
        Ok(true)
    }

    /// Append every element of `hother` to `harr`. Extending an array with
    /// itself appends a snapshot of its original elements.
    pub fn array_extend(
        &mut self,
        caller: Ident,
        harr: RawHandle,
        hother: RawHandle,
    ) -> NativeResult<bool> {
        let array = self.node(caller, harr)?;
        let other = self.node(caller, hother)?;
        let incoming: Vec<NodeId> = match (self.store.get(array), self.store.get(other)) {
            (Node::Array(_), Node::Array(items)) => items.clone(),
            _ => return Ok(false),
        };
        for child in &incoming {
            self.store.incref(*child);
        }
        match self.store.get_mut(array) {
            Node::Array(items) => items.extend(incoming),
            _ => unreachable!("type checked above"),
        }
        Ok(true)
    }
}
