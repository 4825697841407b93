//! Storage-layer errors for the record store.

use super::error_code::{self, HeadcountErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("Database busy")]
    DbBusy,

    #[error("Migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Stored row {id} is invalid: {message}")]
    InvalidRow { id: i64, message: String },
}

impl HeadcountErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DbBusy => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
