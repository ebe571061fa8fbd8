//! Iteration setup
//!
//! Prepares a freshly positioned cursor for symmetric forward/backward
//! traversal. Invoked once per traversal direction change by the tree
//! walk; the validity resolver is then consulted for every candidate
//! position.

use crate::cursor::{row_slot_position, CursorFlags, CursorPosition, InsertHead, ROW_SLOT_SMALLEST};
use crate::page::Page;

/// Set up a cursor for iteration over its current page
pub fn setup_iteration(cbt: &mut CursorPosition, page: &Page) {
    match page {
        Page::FixedColumn(_) | Page::VariableColumn(_) => col_iterate_setup(cbt, page),
        Page::Row(_) => row_iterate_setup(cbt),
    }
}

/// Column-store setup: cache the largest record on the page
fn col_iterate_setup(cbt: &mut CursorPosition, page: &Page) {
    cbt.last_standard_recno = match page {
        Page::FixedColumn(p) => p.last_recno(),
        Page::VariableColumn(p) => p.last_recno(),
        Page::Row(_) => unreachable!("column setup on a row page"),
    };

    // If we're traversing the append list, set the reference: next/prev
    // know there is no further on-page data past this point.
    if cbt.ins_head == Some(InsertHead::Append) {
        cbt.flags |= CursorFlags::ITERATE_APPEND;
    }
}

/// Row-store setup: map the position into the unified iteration namespace
///
/// Tracking "current slot" and "current insert list" as two independent
/// cursors makes switching between next and prev too complicated, so the
/// on-page slots and the insert lists share one namespace: position 1 is
/// the smallest-key insert list, slot 0 is position 2, the insert list
/// after slot 0 is position 3, and so on. Insert lists are odd-numbered
/// positions and on-page slots even-numbered positions, so stepping in
/// either direction is a single increment or decrement.
fn row_iterate_setup(cbt: &mut CursorPosition) {
    // A smallest-key position may carry no on-page slot at all; don't
    // derive a slot position from the sentinel.
    cbt.row_iteration_slot = match cbt.ins_head {
        Some(InsertHead::Smallest) => ROW_SLOT_SMALLEST,
        Some(_) => row_slot_position(cbt.slot) + 1,
        None => row_slot_position(cbt.slot),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::RECNO_NONE;
    use crate::page::{FixedColumnPage, RowPage, VarCell, VariableColumnPage};

    #[test]
    fn test_fix_setup_caches_last_recno() {
        let page = Page::FixedColumn(FixedColumnPage::new(50, 20));
        let mut cbt = CursorPosition::new();
        setup_iteration(&mut cbt, &page);
        assert_eq!(cbt.last_standard_recno, 69);
        assert!(!cbt.flags.contains(CursorFlags::ITERATE_APPEND));
    }

    #[test]
    fn test_var_setup_accounts_for_rle() {
        let mut var = VariableColumnPage::new(1);
        var.push_cell(VarCell::value(b"a"));
        var.push_cell(VarCell { rle: 4, data: crate::page::CellData::Value(b"b".to_vec()) });
        let page = Page::VariableColumn(var);

        let mut cbt = CursorPosition::new();
        setup_iteration(&mut cbt, &page);
        assert_eq!(cbt.last_standard_recno, 5);
    }

    #[test]
    fn test_empty_column_page_has_no_last_recno() {
        let page = Page::VariableColumn(VariableColumnPage::new(1));
        let mut cbt = CursorPosition::new();
        setup_iteration(&mut cbt, &page);
        assert_eq!(cbt.last_standard_recno, RECNO_NONE);
    }

    #[test]
    fn test_append_list_sets_flag() {
        let page = Page::FixedColumn(FixedColumnPage::new(1, 3));
        let mut cbt = CursorPosition::new();
        cbt.ins_head = Some(InsertHead::Append);
        setup_iteration(&mut cbt, &page);
        assert!(cbt.flags.contains(CursorFlags::ITERATE_APPEND));
    }

    #[test]
    fn test_row_setup_on_page_slot() {
        let mut row = RowPage::new();
        row.push_slot(b"a", b"1", None);
        row.push_slot(b"b", b"2", None);
        let page = Page::Row(row);

        let mut cbt = CursorPosition::new();
        cbt.slot = 0;
        setup_iteration(&mut cbt, &page);
        assert_eq!(cbt.row_iteration_slot, 2);

        cbt.slot = 1;
        setup_iteration(&mut cbt, &page);
        assert_eq!(cbt.row_iteration_slot, 4);
    }

    #[test]
    fn test_row_setup_insert_positions() {
        let mut row = RowPage::new();
        row.push_slot(b"a", b"1", None);
        let page = Page::Row(row);

        // Smallest-key list is position 1 regardless of slot.
        let mut cbt = CursorPosition::new();
        cbt.slot = 0;
        cbt.ins_head = Some(InsertHead::Smallest);
        setup_iteration(&mut cbt, &page);
        assert_eq!(cbt.row_iteration_slot, ROW_SLOT_SMALLEST);

        // The list after slot 0 is the odd position following it.
        cbt.ins_head = Some(InsertHead::Slot(0));
        setup_iteration(&mut cbt, &page);
        assert_eq!(cbt.row_iteration_slot, 3);
    }

    #[test]
    fn test_row_setup_smallest_without_slot() {
        let mut row = RowPage::new();
        row.push_slot(b"a", b"1", None);
        let page = Page::Row(row);

        // A cursor inside the smallest-key list needs no on-page slot;
        // the sentinel must not feed the slot-position arithmetic.
        let mut cbt = CursorPosition::new();
        assert_eq!(cbt.slot, crate::cursor::SLOT_NONE);
        cbt.ins_head = Some(InsertHead::Smallest);
        setup_iteration(&mut cbt, &page);
        assert_eq!(cbt.row_iteration_slot, ROW_SLOT_SMALLEST);
    }
}
