//! Cursor validity resolution
//!
//! Given a fully positioned cursor (post-search or mid-iteration), decide
//! whether the position is a live, visible record. Row-store positions
//! additionally surface the update whose value should be returned in
//! place of the on-page value. A validity decision never mutates the
//! page; it reads the cursor and the page only.

use crate::cursor::{CursorFlags, CursorPosition, SLOT_NONE};
use crate::error::Result;
use crate::page::{FixedColumnPage, Page, RowPage, VariableColumnPage};
use crate::update::{UpdateArena, UpdateId, VisibilityResolver};

/// Outcome of a validity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    /// Whether the position is a live, visible record
    pub is_valid: bool,
    /// Row-store: the visible update whose value applies, if any; when
    /// `None` and the position is valid, the on-page value applies
    pub update: Option<UpdateId>,
}

impl Validity {
    fn invalid() -> Self {
        Self { is_valid: false, update: None }
    }

    fn valid(update: Option<UpdateId>) -> Self {
        Self { is_valid: true, update }
    }
}

/// Check whether the cursor's current position is a live, visible record
///
/// Dispatches to the layout-specific resolver for the page the cursor is
/// positioned on. The only propagated failure is the visibility
/// resolver's own, forwarded unmodified.
pub fn check_validity(
    cbt: &CursorPosition,
    page: &Page,
    arena: &UpdateArena,
    resolver: &dyn VisibilityResolver,
) -> Result<Validity> {
    match page {
        Page::FixedColumn(p) => Ok(col_fix_valid(cbt, p)),
        Page::VariableColumn(p) => Ok(col_var_valid(cbt, p)),
        Page::Row(p) => row_valid(cbt, p, arena, resolver),
    }
}

/// Fixed-length column-store validity
///
/// Fixed-length pages don't have slots, records map one-to-one to
/// entries; the only check is retrieval past the end of the page. There
/// is no per-slot tombstone at this layer, deletion lives entirely in the
/// update overlay.
fn col_fix_valid(cbt: &CursorPosition, page: &FixedColumnPage) -> Validity {
    if cbt.recno >= page.base_recno + u64::from(page.entries) {
        return Validity::invalid();
    }
    Validity::valid(None)
}

/// Variable-length column-store validity
fn col_var_valid(cbt: &CursorPosition, page: &VariableColumnPage) -> Validity {
    // The search function doesn't check for empty pages.
    if page.entries() == 0 {
        return Validity::invalid();
    }

    // On a prepare conflict the slot might not have a valid value yet, if
    // the update in the insert list of a newly scanned page is still in
    // prepared state.
    debug_assert!(cbt.slot == SLOT_NONE || cbt.slot < page.entries());

    // Column-store updates are stored as insert objects. If search
    // returned an insert object we can't return it from here; the on-page
    // object must have been confirmed to match.
    if cbt.ins_head.is_some() && !cbt.flags.contains(CursorFlags::VAR_ONPAGE_MATCH) {
        return Validity::invalid();
    }

    // Variable-length column-store deletes are written into the backing
    // store; check the cell for a record already deleted when read.
    if page.cell(cbt.slot).is_deleted() {
        return Validity::invalid();
    }
    Validity::valid(None)
}

/// Row-store validity
fn row_valid(
    cbt: &CursorPosition,
    page: &RowPage,
    arena: &UpdateArena,
    resolver: &dyn VisibilityResolver,
) -> Result<Validity> {
    // The search function doesn't check for empty pages.
    if page.entries() == 0 {
        return Ok(Validity::invalid());
    }

    // See col_var_valid: the slot may be transiently unset during an
    // in-progress prepared commit.
    debug_assert!(cbt.slot == SLOT_NONE || cbt.slot < page.entries());

    // No row-store insert object can have the same key as an on-page
    // object; insert positions belong to the insert-list logic, not here.
    if cbt.ins_head.is_some() {
        return Ok(Validity::invalid());
    }

    // Check for an update.
    if let Some(chain) = page.update_chain(cbt.slot) {
        if let Some(id) = resolver.visible_update(arena, chain)? {
            if arena.get(id).is_tombstone() {
                return Ok(Validity::invalid());
            }
            return Ok(Validity::valid(Some(id)));
        }
    }
    Ok(Validity::valid(None))
}
