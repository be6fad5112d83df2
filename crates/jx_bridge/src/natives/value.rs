//! Whole-value natives: type inspection, structural equality, copies.

use jx_core::JsonType;

use crate::bridge::JsonBridge;
use crate::errors::NativeResult;
use crate::handles::{Ident, RawHandle};

impl JsonBridge {
    pub fn type_of(&self, caller: Ident, h: RawHandle) -> NativeResult<JsonType> {
        let id = self.node(caller, h)?;
        Ok(self.store.get(id).json_type())
    }

    /// Structural equality. Integers and reals never compare equal, even
    /// for the same mathematical value.
    pub fn equal(&self, caller: Ident, ha: RawHandle, hb: RawHandle) -> NativeResult<bool> {
        let a = self.node(caller, ha)?;
        let b = self.node(caller, hb)?;
        Ok(self.store.deep_equal(a, b))
    }

    /// Shallow copy: a new top node sharing the original's children.
    pub fn copy(&mut self, caller: Ident, h: RawHandle) -> NativeResult<RawHandle> {
        let id = self.node(caller, h)?;
        let copied = self.store.copy(id);
        self.mint_owned(copied, caller, "Object")
    }

    /// Full clone of the reachable tree, sharing nothing.
    pub fn deep_copy(&mut self, caller: Ident, h: RawHandle) -> NativeResult<RawHandle> {
        let id = self.node(caller, h)?;
        let copied = self.store.deep_copy(id);
        self.mint_owned(copied, caller, "Object")
    }
}
