//! Lookup-time selection errors.

use super::error_code::{self, HeadcountErrorCode};
use crate::hierarchy::HierarchyLevel;

/// Errors raised when a selection does not fit the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The value is not among the options valid under the current prefix.
    #[error("'{value}' is not a valid {level} for the current selection")]
    InvalidSelection { level: HierarchyLevel, value: String },

    /// A constraint was supplied at or after the level being queried.
    #[error("constraint on {constraint} cannot filter {queried}")]
    ConstraintOrderViolation {
        queried: HierarchyLevel,
        constraint: HierarchyLevel,
    },
}

impl HeadcountErrorCode for SelectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSelection { .. } => error_code::INVALID_SELECTION,
            Self::ConstraintOrderViolation { .. } => error_code::CONSTRAINT_ORDER_VIOLATION,
        }
    }
}
