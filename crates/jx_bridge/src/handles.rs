//! The handle table: opaque caller-visible tokens for nodes and cursors.
//!
//! Slot vec plus free list, with a serial number baked into each handle so a
//! recycled slot never resolves an old token. Node handles hold exactly one
//! reference on their node; iterator handles are transient views and hold
//! none.

use std::fmt;

use jx_core::{NodeId, NodeStore};

use crate::cursor::ObjectCursor;
use crate::errors::HandleFault;

/// Identity of the context a handle was created under. Used for access
/// checks and for bulk teardown when that context goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ident(pub u32);

impl Ident {
    /// The embedding host itself; may free handles it does not own.
    pub const HOST: Ident = Ident(0);
}

/// Opaque handle value given to callers. Packs a slot index and a serial;
/// zero is the "no handle" sentinel returned for absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHandle(pub u32);

impl RawHandle {
    pub const BAD: RawHandle = RawHandle(0);

    pub fn is_bad(self) -> bool {
        self.0 == 0
    }

    fn pack(index: usize, serial: u16) -> RawHandle {
        RawHandle(((serial as u32) << 16) | (index as u32 + 1))
    }

    fn index(self) -> usize {
        (self.0 & 0xffff) as usize - 1
    }

    fn serial(self) -> u16 {
        (self.0 >> 16) as u16
    }
}

impl fmt::Display for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Handle type discriminator, checked on every resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Node,
    Iter,
}

pub(crate) enum HandleTarget {
    Node(NodeId),
    Iter(ObjectCursor),
}

impl HandleTarget {
    fn kind(&self) -> HandleKind {
        match self {
            HandleTarget::Node(_) => HandleKind::Node,
            HandleTarget::Iter(_) => HandleKind::Iter,
        }
    }
}

struct Entry {
    target: HandleTarget,
    owner: Ident,
    serial: u16,
}

/// Handle index space is 16 bits; index zero is reserved for the sentinel.
pub(crate) const HANDLE_LIMIT: usize = 0xfffe;

pub(crate) struct HandleTable {
    entries: Vec<Option<Entry>>,
    free_list: Vec<usize>,
    next_serial: u16,
    limit: usize,
    live: usize,
}

impl HandleTable {
    pub fn new() -> Self {
        Self::with_limit(HANDLE_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            free_list: Vec::new(),
            next_serial: 1,
            limit: limit.min(HANDLE_LIMIT),
            live: 0,
        }
    }

    pub fn live(&self) -> usize {
        self.live
    }

    // The serial is 16 bits and wraps: a stale handle retained across
    // 65536 reuses of its slot resolves again. The packed layout keeps a
    // handle inside one 32-bit cell on the script side, so the window is
    // part of the contract rather than widened away.
    fn bump_serial(&mut self) -> u16 {
        let serial = self.next_serial;
        self.next_serial = self.next_serial.wrapping_add(1);
        if self.next_serial == 0 {
            self.next_serial = 1;
        }
        serial
    }

    /// Mint a handle for `target`. `None` on table exhaustion; the caller
    /// decides what to do with the reference it was about to hand over.
    pub fn create(&mut self, target: HandleTarget, owner: Ident) -> Option<RawHandle> {
        if self.live >= self.limit {
            return None;
        }
        let serial = self.bump_serial();
        self.live += 1;
        if let Some(idx) = self.free_list.pop() {
            self.entries[idx] = Some(Entry { target, owner, serial });
            Some(RawHandle::pack(idx, serial))
        } else {
            let idx = self.entries.len();
            self.entries.push(Some(Entry { target, owner, serial }));
            Some(RawHandle::pack(idx, serial))
        }
    }

    fn entry(&self, handle: RawHandle) -> Result<&Entry, HandleFault> {
        if handle.is_bad() {
            return Err(HandleFault::Stale);
        }
        let entry = self
            .entries
            .get(handle.index())
            .and_then(|e| e.as_ref())
            .ok_or(HandleFault::Stale)?;
        if entry.serial != handle.serial() {
            return Err(HandleFault::Stale);
        }
        Ok(entry)
    }

    /// Resolve a handle: presence, serial, and kind tag are all verified.
    /// Reads never consume a reference and are open to any caller.
    pub fn read(
        &self,
        handle: RawHandle,
        kind: HandleKind,
        _caller: Ident,
    ) -> Result<&HandleTarget, HandleFault> {
        let entry = self.entry(handle)?;
        if entry.target.kind() != kind {
            return Err(HandleFault::WrongType);
        }
        Ok(&entry.target)
    }

    /// Free a handle. A node handle drops exactly one reference on its node;
    /// an iterator handle touches no counts. Freeing a handle that is not
    /// live is an error, never a silent no-op. Only the owner (or the host)
    /// may free.
    pub fn free(
        &mut self,
        handle: RawHandle,
        caller: Ident,
        store: &mut NodeStore,
    ) -> Result<(), HandleFault> {
        {
            let entry = self.entry(handle)?;
            if caller != entry.owner && caller != Ident::HOST {
                return Err(HandleFault::AccessDenied);
            }
        }
        let entry = self.entries[handle.index()]
            .take()
            .expect("entry verified above");
        self.free_list.push(handle.index());
        self.live -= 1;
        if let HandleTarget::Node(id) = entry.target {
            store.decref(id);
        }
        Ok(())
    }

    /// Teardown backstop: free every handle the given identity still owns.
    /// Returns how many entries were reclaimed.
    pub fn free_owned_by(&mut self, owner: Ident, store: &mut NodeStore) -> usize {
        let mut freed = 0;
        for idx in 0..self.entries.len() {
            let owned = self.entries[idx].as_ref().is_some_and(|e| e.owner == owner);
            if !owned {
                continue;
            }
            let entry = self.entries[idx].take().expect("presence checked above");
            self.free_list.push(idx);
            self.live -= 1;
            freed += 1;
            if let HandleTarget::Node(id) = entry.target {
                store.decref(id);
            }
        }
        freed
    }
}
