//! Cursor-position resolution and ordering checks for a multi-layout
//! B-tree storage engine
//!
//! This crate implements the per-position decision logic a B-tree cursor
//! needs once the search/descent code has landed it on a candidate
//! position: is the position a live, visible record, and which value or
//! update applies? Three physical page layouts are supported over the
//! same decision surface: fixed-length column-store, variable-length
//! column-store, and row-store. Diagnostic builds additionally verify
//! that successive cursor movements return strictly ordered keys.

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod comparator;
pub mod cursor;
pub mod error;
pub mod iterate;
pub mod layout;
pub mod order;
pub mod page;
pub mod update;
pub mod valid;

// Re-exports
pub use comparator::{Comparator, LexicographicComparator};
pub use cursor::{CursorFlags, CursorPosition, InsertHead, IterDirection, RECNO_NONE, SLOT_NONE};
pub use error::{Error, Result};
pub use iterate::setup_iteration;
pub use layout::{check_key_compression, PageLayout};
pub use order::{CheckedOrder, NoopOrder, OrderCheck, OrderGuard};
pub use page::{
    CellData, FixedColumnPage, InsertEntry, InsertKey, InsertList, Page, RowPage, RowSlot, VarCell,
    VariableColumnPage,
};
pub use update::{
    SnapshotResolver, Update, UpdateArena, UpdateData, UpdateId, VisibilityResolver,
};
pub use valid::{check_validity, Validity};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
