//! Domain error types.
//!
//! These errors represent validation failures of raw input values. They are
//! distinct from timetable consistency and I/O errors.

use super::{InvalidId, TimeError};

/// Domain-level errors for validating identifiers and times.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// An identifier failed validation
    #[error(transparent)]
    InvalidId(#[from] InvalidId),

    /// A time string failed validation
    #[error(transparent)]
    InvalidTime(#[from] TimeError),
}
