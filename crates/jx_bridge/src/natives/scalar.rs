//! Scalar natives: constructors, reads, and in-place sets.
//!
//! Reads on the wrong node type yield the neutral defaults (`None`, 0,
//! 0.0) rather than errors; sets on the wrong type return `false`. Both
//! match the original scripting surface, where a scalar mismatch is a
//! caller mistake but never fatal.

use jx_core::Node;

use crate::bridge::JsonBridge;
use crate::errors::NativeResult;
use crate::handles::{Ident, RawHandle};

impl JsonBridge {
    pub fn string(&mut self, caller: Ident, text: &str) -> NativeResult<RawHandle> {
        let id = self.store.alloc(Node::String(text.to_string()));
        self.mint_owned(id, caller, "String")
    }

    pub fn integer(&mut self, caller: Ident, n: i64) -> NativeResult<RawHandle> {
        let id = self.store.alloc(Node::Integer(n));
        self.mint_owned(id, caller, "Integer")
    }

    pub fn real(&mut self, caller: Ident, x: f64) -> NativeResult<RawHandle> {
        let id = self.store.alloc(Node::Real(x));
        self.mint_owned(id, caller, "Real")
    }

    pub fn boolean(&mut self, caller: Ident, flag: bool) -> NativeResult<RawHandle> {
        let id = self.store.alloc(Node::Bool(flag));
        self.mint_owned(id, caller, "Boolean")
    }

    pub fn true_(&mut self, caller: Ident) -> NativeResult<RawHandle> {
        self.boolean(caller, true)
    }

    pub fn false_(&mut self, caller: Ident) -> NativeResult<RawHandle> {
        self.boolean(caller, false)
    }

    pub fn null(&mut self, caller: Ident) -> NativeResult<RawHandle> {
        let id = self.store.alloc(Node::Null);
        self.mint_owned(id, caller, "Null")
    }

    pub fn string_value(&self, caller: Ident, h: RawHandle) -> NativeResult<Option<&str>> {
        let id = self.node(caller, h)?;
        Ok(match self.store.get(id) {
            Node::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn string_set(&mut self, caller: Ident, h: RawHandle, text: &str) -> NativeResult<bool> {
        let id = self.node(caller, h)?;
        match self.store.get_mut(id) {
            Node::String(s) => {
                s.clear();
                s.push_str(text);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn integer_value(&self, caller: Ident, h: RawHandle) -> NativeResult<i64> {
        let id = self.node(caller, h)?;
        Ok(match self.store.get(id) {
            Node::Integer(n) => *n,
            _ => 0,
        })
    }

    pub fn integer_set(&mut self, caller: Ident, h: RawHandle, n: i64) -> NativeResult<bool> {
        let id = self.node(caller, h)?;
        match self.store.get_mut(id) {
            Node::Integer(slot) => {
                *slot = n;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn real_value(&self, caller: Ident, h: RawHandle) -> NativeResult<f64> {
        let id = self.node(caller, h)?;
        Ok(match self.store.get(id) {
            Node::Real(x) => *x,
            _ => 0.0,
        })
    }

    pub fn real_set(&mut self, caller: Ident, h: RawHandle, x: f64) -> NativeResult<bool> {
        let id = self.node(caller, h)?;
        match self.store.get_mut(id) {
            Node::Real(slot) => {
                *slot = x;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Integer or real as f64; anything else is 0.0.
    pub fn number_value(&self, caller: Ident, h: RawHandle) -> NativeResult<f64> {
        let id = self.node(caller, h)?;
        Ok(match self.store.get(id) {
            Node::Integer(n) => *n as f64,
            Node::Real(x) => *x,
            _ => 0.0,
        })
    }
}
