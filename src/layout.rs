//! Page layouts and per-layout configuration policy
//!
//! A table is stored in one of three physical layouts. The layouts share
//! the cursor-resolution surface but differ in what may be configured for
//! them; in particular, whether keys and values may be compressed.

use crate::error::{Error, Result};

/// Physical layout of a page's records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLayout {
    /// Fixed-length column-store: records addressed by number, no per-record key
    FixedColumn,
    /// Variable-length column-store: records addressed by number, variable cells
    VariableColumn,
    /// Row-store: records addressed by key
    Row,
}

/// Check whether a key-compression request is legal for a layout
///
/// Runs once at table-configuration time, not on the cursor hot path.
/// Fixed-length column-store files have no per-record key at all, so any
/// compression request is rejected. Variable-length column-store values
/// may be compressed freely (signaled elsewhere) but keys may not.
/// Row-store accepts compression of both keys and values.
pub fn check_key_compression(layout: PageLayout, requested_len: usize) -> Result<()> {
    match layout {
        PageLayout::FixedColumn => Err(Error::InvalidConfig(
            "fixed-size column-store files may not be compressed".into(),
        )),
        PageLayout::VariableColumn => {
            if requested_len != 0 {
                return Err(Error::InvalidConfig(
                    "the keys of variable-length column-store files may not be compressed".into(),
                ));
            }
            Ok(())
        }
        PageLayout::Row => Ok(()),
    }
}
