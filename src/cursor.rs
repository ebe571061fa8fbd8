//! Cursor position state
//!
//! A cursor carries a [`CursorPosition`] between calls: where on the page
//! it stands, which insert list (if any) it is walking, and the memory
//! the diagnostic ordering guard keeps about the last returned key. The
//! state is private to one cursor and accessed by one thread at a time;
//! no synchronization is needed across calls.

use bitflags::bitflags;
use static_assertions::const_assert;
use std::fmt;

/// Sentinel slot index: the cursor is not on an on-page slot
pub const SLOT_NONE: u32 = u32::MAX;

/// Out-of-band record number; records are numbered from 1
pub const RECNO_NONE: u64 = 0;

/// Namespace position of the smallest-key insert list (row-store)
pub const ROW_SLOT_SMALLEST: usize = 1;

// Insert lists occupy odd namespace positions, on-page slots even ones.
const_assert!(ROW_SLOT_SMALLEST % 2 == 1);
const_assert!(RECNO_NONE == 0);

bitflags! {
    /// Layout-specific cursor state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CursorFlags: u32 {
        /// Column-store: currently walking the page's append list; there
        /// is no further on-page data past this point
        const ITERATE_APPEND = 0x01;
        /// Variable-length column-store: search confirmed the on-page
        /// slot aliased by the cursor's insert position matches
        const VAR_ONPAGE_MATCH = 0x02;
    }
}

/// Which insert list a cursor position refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertHead {
    /// The smallest-key list preceding all on-page slots (row-store)
    Smallest,
    /// The list following on-page slot `i` (row-store)
    Slot(u32),
    /// The append list following all on-page records (column-store)
    Append,
}

/// Direction of a cursor step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterDirection {
    /// Forward step: keys must strictly increase
    Next,
    /// Backward step: keys must strictly decrease
    Prev,
}

impl fmt::Display for IterDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterDirection::Next => write!(f, "next"),
            IterDirection::Prev => write!(f, "prev"),
        }
    }
}

/// Mutable per-cursor position state
///
/// Repopulated on every search or reposition, consulted and selectively
/// updated on every iteration step, and cleared when the cursor moves to
/// an unrelated point (which also resets the ordering guard's memory).
#[derive(Debug, Clone)]
pub struct CursorPosition {
    /// On-page slot index, [`SLOT_NONE`] when the position is insert-list only
    pub slot: u32,
    /// Insert list the cursor is inside, `None` when on the page proper
    pub ins_head: Option<InsertHead>,
    /// Logical record number (column layouts)
    pub recno: u64,
    /// Unified iteration slot (row-store); see [`crate::iterate`]
    pub row_iteration_slot: usize,
    /// Largest valid record number on the page, cached by iteration setup
    pub last_standard_recno: u64,
    /// Layout-specific flags
    pub flags: CursorFlags,
    /// Key most recently returned through this cursor (row-store)
    pub key: Vec<u8>,
    /// Ordering guard memory: last returned key (row-store); empty means
    /// the guard is not yet armed
    pub last_key: Vec<u8>,
    /// Ordering guard memory: last returned record number (column
    /// layouts); [`RECNO_NONE`] means the guard is not yet armed
    pub last_recno: u64,
}

impl CursorPosition {
    /// Create cleared position state for a newly allocated cursor
    pub fn new() -> Self {
        Self {
            slot: SLOT_NONE,
            ins_head: None,
            recno: RECNO_NONE,
            row_iteration_slot: 0,
            last_standard_recno: RECNO_NONE,
            flags: CursorFlags::empty(),
            key: Vec::new(),
            last_key: Vec::new(),
            last_recno: RECNO_NONE,
        }
    }

    /// Clear all position state, including the ordering guard's memory
    ///
    /// Called when the cursor is closed or repositioned to an unrelated
    /// point.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for CursorPosition {
    fn default() -> Self {
        Self::new()
    }
}

/// Namespace position of on-page slot `slot` (row-store)
///
/// On-page slots occupy even positions >= 2; the insert list following a
/// slot occupies the next odd position. Position 1 is reserved for the
/// smallest-key insert list. Parity alone therefore decides "slot or
/// insert list", and increment/decrement decides "what follows/precedes".
#[inline]
pub fn row_slot_position(slot: u32) -> usize {
    (slot as usize + 1) * 2
}

/// Whether a row iteration-namespace position addresses an insert list
#[inline]
pub fn is_insert_position(pos: usize) -> bool {
    pos % 2 == 1
}
