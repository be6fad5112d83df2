//! The injected service object tying the node store to the handle table.

use jx_core::{NodeId, NodeStore};

use crate::cursor::ObjectCursor;
use crate::errors::{NativeError, NativeResult};
use crate::handles::{HandleKind, HandleTable, HandleTarget, Ident, RawHandle};

/// One JSON bridge instance: a node store plus the handle table in front of
/// it. The embedding host creates one per runtime (or per test) instead of
/// going through process globals; teardown of a caller context is
/// [`JsonBridge::close_all`].
pub struct JsonBridge {
    pub(crate) store: NodeStore,
    pub(crate) handles: HandleTable,
}

impl JsonBridge {
    pub fn new() -> Self {
        Self {
            store: NodeStore::new(),
            handles: HandleTable::new(),
        }
    }

    /// Cap the handle table, mainly for exhaustion tests.
    pub fn with_handle_limit(limit: usize) -> Self {
        Self {
            store: NodeStore::new(),
            handles: HandleTable::with_limit(limit),
        }
    }

    /// Number of live handles.
    pub fn handle_count(&self) -> usize {
        self.handles.live()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.store.live()
    }

    /// Mint a handle for an owned reference (constructors, decode, copies).
    /// The handle absorbs the creator's count. If the table is full the
    /// reference is released first so the fresh node cannot leak.
    pub(crate) fn mint_owned(
        &mut self,
        id: NodeId,
        owner: Ident,
        what: &'static str,
    ) -> NativeResult<RawHandle> {
        match self.handles.create(HandleTarget::Node(id), owner) {
            Some(handle) => Ok(handle),
            None => {
                self.store.decref(id);
                Err(NativeError::AllocationFailure(what))
            }
        }
    }

    /// Mint a handle for a borrowed reference (container getters, iterator
    /// values). Increments the count first so the new handle cannot outlive
    /// the node once the container mutates.
    pub(crate) fn mint_incref(
        &mut self,
        id: NodeId,
        owner: Ident,
        what: &'static str,
    ) -> NativeResult<RawHandle> {
        self.store.incref(id);
        self.mint_owned(id, owner, what)
    }

    pub(crate) fn mint_cursor(
        &mut self,
        cursor: ObjectCursor,
        owner: Ident,
    ) -> NativeResult<RawHandle> {
        self.handles
            .create(HandleTarget::Iter(cursor), owner)
            .ok_or(NativeError::AllocationFailure("Iterator"))
    }

    pub(crate) fn node(&self, caller: Ident, handle: RawHandle) -> NativeResult<NodeId> {
        match self.handles.read(handle, HandleKind::Node, caller) {
            Ok(HandleTarget::Node(id)) => Ok(*id),
            Ok(_) => unreachable!("kind verified by read"),
            Err(kind) => Err(NativeError::InvalidHandle { handle, kind }),
        }
    }

    pub(crate) fn cursor(&self, caller: Ident, handle: RawHandle) -> NativeResult<&ObjectCursor> {
        match self.handles.read(handle, HandleKind::Iter, caller) {
            Ok(HandleTarget::Iter(cursor)) => Ok(cursor),
            Ok(_) => unreachable!("kind verified by read"),
            Err(kind) => Err(NativeError::InvalidHandle { handle, kind }),
        }
    }

    /// Release a handle the caller owns. A node handle drops one reference;
    /// a cursor handle just disappears. Double-release is an error.
    pub fn close(&mut self, caller: Ident, handle: RawHandle) -> NativeResult<()> {
        self.handles
            .free(handle, caller, &mut self.store)
            .map_err(|kind| NativeError::InvalidHandle { handle, kind })
    }

    /// Free every handle still owned by `owner`. The backstop the host runs
    /// when a caller context is torn down; returns how many were reclaimed.
    pub fn close_all(&mut self, owner: Ident) -> usize {
        self.handles.free_owned_by(owner, &mut self.store)
    }

    /// Free path for the consuming (`_new`) mutators, reported as a broken
    /// ownership transfer rather than a plain invalid handle.
    pub(crate) fn consume_value_handle(
        &mut self,
        caller: Ident,
        handle: RawHandle,
    ) -> NativeResult<()> {
        self.handles
            .free(handle, caller, &mut self.store)
            .map_err(|kind| NativeError::FreeFailure { handle, kind })
    }
}
