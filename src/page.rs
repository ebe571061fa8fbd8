//! In-memory page model for the three table layouts
//!
//! A page is an immutable snapshot while a cursor references it. This
//! crate never mutates a page; the accessors here are the read-only
//! surface the validity resolver and iteration setup consult. Pending
//! records that do not exist on the page live in insert lists layered
//! over it: one smallest-key list ahead of all slots (row-store), one
//! append list behind all records (column-store), and one list per slot
//! (row-store).

use crate::cursor::RECNO_NONE;
use crate::layout::PageLayout;
use crate::update::UpdateId;

/// Key of an insert-list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertKey {
    /// Record number (column layouts)
    RecNo(u64),
    /// Row-store key bytes
    Row(Vec<u8>),
}

/// One pending record in an insert list
#[derive(Debug, Clone)]
pub struct InsertEntry {
    /// Key of the pending record
    pub key: InsertKey,
    /// Head of the record's update chain
    pub update: UpdateId,
}

/// Ordered overlay of pending records not present in the on-page layout
#[derive(Debug, Clone, Default)]
pub struct InsertList {
    entries: Vec<InsertEntry>,
}

impl InsertList {
    /// Create an empty insert list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; the caller maintains key order
    pub fn push(&mut self, key: InsertKey, update: UpdateId) {
        self.entries.push(InsertEntry { key, update });
    }

    /// Entries in key order
    pub fn entries(&self) -> &[InsertEntry] {
        &self.entries
    }

    /// Whether the list holds no pending records
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// On-disk cell payload of a variable-length column-store slot
///
/// Deletes of variable-length records are written into the backing
/// store, so a cell can itself encode "deleted".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellData {
    /// A live value
    Value(Vec<u8>),
    /// A delete marker: the record was deleted and the deletion is
    /// globally visible on disk
    Deleted,
}

/// A variable-length column-store cell with its run length
#[derive(Debug, Clone)]
pub struct VarCell {
    /// Number of consecutive records this cell represents (RLE), >= 1
    pub rle: u64,
    /// Cell payload
    pub data: CellData,
}

impl VarCell {
    /// A single-record cell holding a value
    pub fn value(data: &[u8]) -> Self {
        Self { rle: 1, data: CellData::Value(data.to_vec()) }
    }

    /// A single-record delete marker
    pub fn deleted() -> Self {
        Self { rle: 1, data: CellData::Deleted }
    }

    /// Whether this cell is a delete marker
    pub fn is_deleted(&self) -> bool {
        matches!(self.data, CellData::Deleted)
    }
}

/// Fixed-length column-store page
///
/// Records map one-to-one to bit-packed entries; there are no slots and
/// no per-record keys. Deletion is represented purely via the update
/// overlay, handled elsewhere.
#[derive(Debug, Clone)]
pub struct FixedColumnPage {
    /// Record number of the page's first record
    pub base_recno: u64,
    /// Number of records on the page
    pub entries: u32,
    /// Records appended past the page's original range
    pub append: InsertList,
}

impl FixedColumnPage {
    /// Create a page covering `entries` records starting at `base_recno`
    pub fn new(base_recno: u64, entries: u32) -> Self {
        Self { base_recno, entries, append: InsertList::new() }
    }

    /// Largest record number on the page, [`RECNO_NONE`] if empty
    pub fn last_recno(&self) -> u64 {
        if self.entries == 0 {
            RECNO_NONE
        } else {
            self.base_recno + u64::from(self.entries) - 1
        }
    }
}

/// Variable-length column-store page
#[derive(Debug, Clone, Default)]
pub struct VariableColumnPage {
    /// Record number of the page's first record
    pub base_recno: u64,
    cells: Vec<VarCell>,
    /// Records appended past the page's original range
    pub append: InsertList,
}

impl VariableColumnPage {
    /// Create an empty page starting at `base_recno`
    pub fn new(base_recno: u64) -> Self {
        Self { base_recno, cells: Vec::new(), append: InsertList::new() }
    }

    /// Append a cell to the page
    pub fn push_cell(&mut self, cell: VarCell) {
        self.cells.push(cell);
    }

    /// Number of slots on the page
    pub fn entries(&self) -> u32 {
        self.cells.len() as u32
    }

    /// Cell at a slot
    pub fn cell(&self, slot: u32) -> &VarCell {
        &self.cells[slot as usize]
    }

    /// First record number covered by a slot
    ///
    /// Each cell covers `rle` consecutive record numbers, so the mapping
    /// walks the preceding run lengths.
    pub fn slot_recno(&self, slot: u32) -> u64 {
        let preceding: u64 = self.cells[..slot as usize].iter().map(|c| c.rle).sum();
        self.base_recno + preceding
    }

    /// Largest record number on the page, [`RECNO_NONE`] if empty
    pub fn last_recno(&self) -> u64 {
        match self.cells.last() {
            None => RECNO_NONE,
            Some(last) => self.slot_recno(self.entries() - 1) + last.rle - 1,
        }
    }
}

/// One on-page record of a row-store page
#[derive(Debug, Clone)]
pub struct RowSlot {
    /// On-page key
    pub key: Vec<u8>,
    /// On-page value
    pub value: Vec<u8>,
    /// Head of the slot's update chain, if any update exists
    pub update: Option<UpdateId>,
}

/// Row-store leaf page
///
/// Insert-list keys never duplicate on-page keys: an update to an
/// existing key goes on the slot's update chain, a new key goes into the
/// insert list following the nearest smaller slot (or the smallest-key
/// list if it precedes every slot).
#[derive(Debug, Clone, Default)]
pub struct RowPage {
    slots: Vec<RowSlot>,
    /// Pending records smaller than every on-page key
    pub smallest: InsertList,
    inserts: Vec<InsertList>,
}

impl RowPage {
    /// Create an empty row page
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot; the caller maintains key order
    pub fn push_slot(&mut self, key: &[u8], value: &[u8], update: Option<UpdateId>) {
        self.slots.push(RowSlot { key: key.to_vec(), value: value.to_vec(), update });
        self.inserts.push(InsertList::new());
    }

    /// Number of slots on the page
    pub fn entries(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Slot by index
    pub fn slot(&self, slot: u32) -> &RowSlot {
        &self.slots[slot as usize]
    }

    /// Head of the update chain attached to a slot
    pub fn update_chain(&self, slot: u32) -> Option<UpdateId> {
        self.slots[slot as usize].update
    }

    /// Insert list holding keys between slot `slot` and the next slot
    pub fn insert_list(&self, slot: u32) -> &InsertList {
        &self.inserts[slot as usize]
    }

    /// Mutable access to the insert list following a slot
    pub fn insert_list_mut(&mut self, slot: u32) -> &mut InsertList {
        &mut self.inserts[slot as usize]
    }
}

/// A page of any layout
///
/// The layouts form a closed set; per-layout logic dispatches over this
/// tag rather than through open-ended dynamic dispatch.
#[derive(Debug, Clone)]
pub enum Page {
    /// Fixed-length column-store page
    FixedColumn(FixedColumnPage),
    /// Variable-length column-store page
    VariableColumn(VariableColumnPage),
    /// Row-store leaf page
    Row(RowPage),
}

impl Page {
    /// Layout tag of this page
    pub fn layout(&self) -> PageLayout {
        match self {
            Page::FixedColumn(_) => PageLayout::FixedColumn,
            Page::VariableColumn(_) => PageLayout::VariableColumn,
            Page::Row(_) => PageLayout::Row,
        }
    }

    /// Number of on-page entries
    pub fn entries(&self) -> u32 {
        match self {
            Page::FixedColumn(p) => p.entries,
            Page::VariableColumn(p) => p.entries(),
            Page::Row(p) => p.entries(),
        }
    }
}
