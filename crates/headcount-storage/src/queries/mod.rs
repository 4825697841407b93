//! Query modules. Plain functions over a `&Connection`; callers pick the
//! writer or a reader through `DatabaseManager`.

pub mod movements;
pub mod post_requests;

use chrono::{DateTime, Utc};
use headcount_core::errors::StorageError;

/// Map a rusqlite error, surfacing lock contention as `DbBusy`.
pub(crate) fn sqlite_error(e: rusqlite::Error) -> StorageError {
    match e.sqlite_error_code() {
        Some(rusqlite::ErrorCode::DatabaseBusy) | Some(rusqlite::ErrorCode::DatabaseLocked) => {
            StorageError::DbBusy
        }
        _ => StorageError::SqliteError {
            message: e.to_string(),
        },
    }
}

/// Timestamps are stored as whole epoch seconds.
pub(crate) fn to_epoch(at: &DateTime<Utc>) -> i64 {
    at.timestamp()
}

pub(crate) fn from_epoch(id: i64, secs: i64) -> Result<DateTime<Utc>, StorageError> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| StorageError::InvalidRow {
        id,
        message: format!("timestamp {secs} out of range"),
    })
}
