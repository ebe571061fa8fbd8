//! Ordering guard for cursor movements
//!
//! Diagnostic builds track the last key or record number a cursor
//! returned and verify that every forward step returns a strictly larger
//! key and every backward step a strictly smaller one. A violation means
//! the engine returned keys out of order; it is reported as an
//! unrecoverable [`Error::IntegrityFault`] the harness must treat as
//! fatal. Production builds use [`NoopOrder`], which satisfies the same
//! interface at zero cost.

use tracing::{error, trace};

use crate::comparator::{Comparator, LexicographicComparator};
use crate::cursor::{CursorPosition, IterDirection, RECNO_NONE};
use crate::error::{Error, Result};
use crate::page::Page;

/// Longest rendered prefix of a key in a fault message
pub const KEY_RENDER_MAX: usize = 64;

/// Ordering check interface shared by the checked and no-op guards
pub trait OrderCheck {
    /// Seed the guard's baseline from the cursor's current position,
    /// typically after a successful search
    fn init(&self, cbt: &mut CursorPosition, page: &Page);

    /// Verify the cursor's current key/recno against the last returned
    /// one and advance the baseline
    fn check(&self, cbt: &mut CursorPosition, page: &Page, direction: IterDirection)
        -> Result<()>;

    /// Turn the check off until the next return; the next returned key is
    /// accepted unconditionally and becomes the new baseline
    fn reset(&self, cbt: &mut CursorPosition);
}

/// Full ordering enforcement
///
/// Column-store pages compare record numbers; row-store pages compare
/// keys through the configured collator (byte ordering by default).
pub struct CheckedOrder {
    collator: Box<dyn Comparator>,
}

impl CheckedOrder {
    /// Guard using the default byte-wise key ordering
    pub fn new() -> Self {
        Self { collator: Box::new(LexicographicComparator) }
    }

    /// Guard using a custom collator for row-store key comparison
    pub fn with_collator(collator: Box<dyn Comparator>) -> Self {
        Self { collator }
    }

    fn check_col(&self, cbt: &mut CursorPosition, direction: IterDirection) -> Result<()> {
        let armed = cbt.last_recno != RECNO_NONE;
        let ok = !armed
            || match direction {
                IterDirection::Next => cbt.last_recno < cbt.recno,
                IterDirection::Prev => cbt.last_recno > cbt.recno,
            };
        if ok {
            cbt.last_recno = cbt.recno;
            return Ok(());
        }
        let fault = Error::IntegrityFault {
            direction,
            previous: cbt.last_recno.to_string(),
            current: cbt.recno.to_string(),
        };
        error!(
            %direction,
            previous = cbt.last_recno,
            current = cbt.recno,
            "cursor out-of-order return"
        );
        Err(fault)
    }

    fn check_row(&self, cbt: &mut CursorPosition, direction: IterDirection) -> Result<()> {
        let armed = !cbt.last_key.is_empty();
        let ok = !armed
            || match direction {
                IterDirection::Next => {
                    self.collator.compare(&cbt.last_key, &cbt.key) == std::cmp::Ordering::Less
                }
                IterDirection::Prev => {
                    self.collator.compare(&cbt.last_key, &cbt.key) == std::cmp::Ordering::Greater
                }
            };
        if ok {
            cbt.last_key = cbt.key.clone();
            return Ok(());
        }
        let previous = printable_key(&cbt.last_key);
        let current = printable_key(&cbt.key);
        error!(%direction, previous, current, "cursor out-of-order return");
        Err(Error::IntegrityFault { direction, previous, current })
    }
}

impl Default for CheckedOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderCheck for CheckedOrder {
    fn init(&self, cbt: &mut CursorPosition, page: &Page) {
        match page {
            Page::FixedColumn(_) | Page::VariableColumn(_) => cbt.last_recno = cbt.recno,
            Page::Row(_) => cbt.last_key = cbt.key.clone(),
        }
    }

    fn check(
        &self,
        cbt: &mut CursorPosition,
        page: &Page,
        direction: IterDirection,
    ) -> Result<()> {
        match page {
            Page::FixedColumn(_) | Page::VariableColumn(_) => self.check_col(cbt, direction),
            Page::Row(_) => self.check_row(cbt, direction),
        }
    }

    fn reset(&self, cbt: &mut CursorPosition) {
        // Clear the last key returned, it doesn't apply.
        cbt.last_key.clear();
        cbt.last_recno = RECNO_NONE;
        trace!("ordering check re-armed");
    }
}

/// Zero-cost guard for production builds
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOrder;

impl OrderCheck for NoopOrder {
    #[inline(always)]
    fn init(&self, _cbt: &mut CursorPosition, _page: &Page) {}

    #[inline(always)]
    fn check(
        &self,
        _cbt: &mut CursorPosition,
        _page: &Page,
        _direction: IterDirection,
    ) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn reset(&self, _cbt: &mut CursorPosition) {}
}

/// The guard type selected by the build configuration
#[cfg(feature = "diagnostics")]
pub type OrderGuard = CheckedOrder;

/// The guard type selected by the build configuration
#[cfg(not(feature = "diagnostics"))]
pub type OrderGuard = NoopOrder;

/// Render a key printable and length-capped for a fault message
fn printable_key(key: &[u8]) -> String {
    let capped = &key[..key.len().min(KEY_RENDER_MAX)];
    let mut out = String::with_capacity(capped.len());
    for &b in capped {
        if (0x20..0x7f).contains(&b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("\\x{:02x}", b));
        }
    }
    if key.len() > KEY_RENDER_MAX {
        out.push_str("...");
    }
    out
}
