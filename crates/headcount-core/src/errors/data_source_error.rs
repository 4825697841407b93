//! Reference table errors.

use std::path::PathBuf;

use super::error_code::{self, HeadcountErrorCode};

/// Errors raised while locating or decoding the reference table.
///
/// None of these are fatal: callers fall back to an empty engine and show
/// the message as a warning.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("Reference table not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Cannot read reference table {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed reference table {path} at line {line}: {message}")]
    Malformed {
        path: PathBuf,
        line: u64,
        message: String,
    },
}

impl HeadcountErrorCode for DataSourceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::DATA_SOURCE_NOT_FOUND,
            _ => error_code::DATA_SOURCE_ERROR,
        }
    }
}
