//! Custom key comparator support
//!
//! Row-store tables may be configured with a custom key ordering
//! (collator). By default keys are compared lexicographically. The
//! ordering guard is the only consumer in this crate, but the trait is
//! the same seam the broader engine plugs its collators into.

use std::cmp::Ordering;

/// Trait for custom key comparators
pub trait Comparator: Send + Sync {
    /// Compare two keys and return their ordering
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;

    /// Optional: Return a name for this comparator (for debugging)
    fn name(&self) -> &'static str {
        "CustomComparator"
    }
}

/// Default lexicographic comparator (byte-wise comparison)
#[derive(Debug, Default, Clone, Copy)]
pub struct LexicographicComparator;

impl Comparator for LexicographicComparator {
    #[inline(always)]
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        a.cmp(b)
    }

    fn name(&self) -> &'static str {
        "LexicographicComparator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_comparator() {
        let cmp = LexicographicComparator;
        assert_eq!(cmp.compare(b"abc", b"def"), Ordering::Less);
        assert_eq!(cmp.compare(b"def", b"abc"), Ordering::Greater);
        assert_eq!(cmp.compare(b"abc", b"abc"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_orders_before_extension() {
        let cmp = LexicographicComparator;
        assert_eq!(cmp.compare(b"abc", b"abcd"), Ordering::Less);
    }

    #[test]
    fn test_custom_comparator_through_trait_object() {
        struct Reverse;
        impl Comparator for Reverse {
            fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
                b.cmp(a)
            }
        }
        let cmp: &dyn Comparator = &Reverse;
        assert_eq!(cmp.compare(b"abc", b"def"), Ordering::Greater);
    }
}
