//! Update chains and transaction visibility
//!
//! Pending modifications to a page live in chains of updates, newest
//! first. Which update a reading transaction may see is decided entirely
//! by the engine's transaction layer through the [`VisibilityResolver`]
//! trait; this crate only asks for "the one visible update, if any" and
//! inspects its tag.
//!
//! Updates are stored in an arena and referenced by stable indices so a
//! cursor can never hold a dangling reference into a reclaimed chain.

use crate::error::Result;

/// Stable handle to an update in an [`UpdateArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpdateId(u32);

impl UpdateId {
    /// Arena index of this update
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Payload of an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateData {
    /// A normal value
    Standard(Vec<u8>),
    /// A tombstone: the key is logically deleted
    Tombstone,
}

/// A node in an update chain
#[derive(Debug, Clone)]
pub struct Update {
    /// Transaction that wrote this update
    pub txn_id: u64,
    /// Next (older) update in the chain
    pub next: Option<UpdateId>,
    /// Value or tombstone
    pub data: UpdateData,
}

impl Update {
    /// Whether this update marks the key as logically deleted
    pub fn is_tombstone(&self) -> bool {
        matches!(self.data, UpdateData::Tombstone)
    }

    /// The value carried by a standard update, `None` for a tombstone
    pub fn value(&self) -> Option<&[u8]> {
        match &self.data {
            UpdateData::Standard(v) => Some(v.as_slice()),
            UpdateData::Tombstone => None,
        }
    }
}

/// Arena holding all updates for a page's lifetime
///
/// Chains are threaded through the arena by `next` handles; the head of a
/// chain is always the newest update.
#[derive(Debug, Default)]
pub struct UpdateArena {
    updates: Vec<Update>,
}

impl UpdateArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an update as the new head of a chain
    ///
    /// Returns the handle of the new head; `older` is the previous head,
    /// if any.
    pub fn push_front(&mut self, txn_id: u64, data: UpdateData, older: Option<UpdateId>) -> UpdateId {
        let id = UpdateId(self.updates.len() as u32);
        self.updates.push(Update { txn_id, next: older, data });
        id
    }

    /// Look up an update by handle
    pub fn get(&self, id: UpdateId) -> &Update {
        &self.updates[id.index()]
    }

    /// Number of updates in the arena
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

/// Transaction-visibility resolver
///
/// Implemented by the engine's transaction layer. Given the head of an
/// update chain, returns the single update visible to the reading
/// transaction, or `None` if no update in the chain is visible (in which
/// case the on-page value applies). May fail only if the underlying read
/// transaction machinery fails; the failure is propagated unmodified.
pub trait VisibilityResolver {
    /// Resolve the visible update on a chain, if any
    fn visible_update(&self, arena: &UpdateArena, head: UpdateId) -> Result<Option<UpdateId>>;
}

/// Simple snapshot resolver: an update is visible if its writer committed
/// at or before the reader's transaction id
///
/// Suitable for tests and single-writer embeddings; real engines supply
/// their own resolver.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotResolver {
    /// Newest transaction id visible to this reader
    pub read_txn: u64,
}

impl VisibilityResolver for SnapshotResolver {
    fn visible_update(&self, arena: &UpdateArena, head: UpdateId) -> Result<Option<UpdateId>> {
        let mut next = Some(head);
        while let Some(id) = next {
            let upd = arena.get(id);
            if upd.txn_id <= self.read_txn {
                return Ok(Some(id));
            }
            next = upd.next;
        }
        Ok(None)
    }
}
