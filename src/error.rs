//! Error types for btcursor

use std::borrow::Cow;
use thiserror::Error;

use crate::cursor::IterDirection;

/// The main error type for cursor-resolution operations
///
/// Two disjoint classes: configuration errors are recoverable and carry a
/// human-readable reason; an [`Error::IntegrityFault`] signals detected
/// data corruption (out-of-order cursor returns) and must never be
/// downgraded or swallowed by callers.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Invalid table configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(Cow<'static, str>),

    /// Cursor returned keys out of order
    ///
    /// The surrounding engine returned keys that violate the iteration
    /// order, which is a correctness bug rather than a runtime condition.
    /// The harness is expected to halt the session or process.
    #[error(
        "cursor.{direction} out-of-order returns: returned key {previous} then key {current}"
    )]
    IntegrityFault {
        /// Direction of the step that detected the violation
        direction: IterDirection,
        /// Previously returned key or record number, rendered printable
        previous: String,
        /// Currently returned key or record number, rendered printable
        current: String,
    },

    /// Transaction-visibility resolution failed
    ///
    /// Forwarded from the visibility resolver unmodified; this layer does
    /// not interpret the failure.
    #[error("visibility resolution failed: {0}")]
    Visibility(Cow<'static, str>),
}

impl Error {
    /// Whether this error is fatal by contract
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::IntegrityFault { .. })
    }
}

/// Result type alias for btcursor operations
pub type Result<T> = std::result::Result<T, Error>;
