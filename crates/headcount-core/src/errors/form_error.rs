//! Form validation errors.

use super::error_code::{self, HeadcountErrorCode};
use super::SelectionError;

/// The first problem found while validating a draft. `field` is the
/// human-facing field label, e.g. "Cost center (exit)".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("The field '{field}' is required")]
    FieldRequired { field: String },

    #[error("Check the field '{field}': {source}. Pick the full value from the list")]
    NotInOptions {
        field: String,
        #[source]
        source: SelectionError,
    },

    #[error("'{name}' is not a known requester")]
    UnknownRequester { field: String, name: String },

    #[error("Quantity for '{field}' must be at least {min}, got {value}")]
    InvalidQuantity { field: String, value: u32, min: u32 },
}

impl FormError {
    /// Label of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::FieldRequired { field }
            | Self::NotInOptions { field, .. }
            | Self::UnknownRequester { field, .. }
            | Self::InvalidQuantity { field, .. } => field,
        }
    }
}

impl HeadcountErrorCode for FormError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FieldRequired { .. } => error_code::FIELD_REQUIRED,
            Self::NotInOptions { source, .. } => source.error_code(),
            Self::UnknownRequester { .. } => error_code::INVALID_SELECTION,
            Self::InvalidQuantity { .. } => error_code::INVALID_QUANTITY,
        }
    }
}
