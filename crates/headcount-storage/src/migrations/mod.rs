//! Schema migrations using PRAGMA user_version.

pub mod v001_movements;
pub mod v002_post_requests;

use headcount_core::errors::StorageError;
use rusqlite::Connection;

use crate::queries::sqlite_error;

/// Highest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Run all pending migrations. Already-applied versions are skipped.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    let current_version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StorageError::MigrationFailed {
            version: 0,
            message: e.to_string(),
        })?;

    let migrations: &[(&str, u32)] = &[
        (v001_movements::MIGRATION_SQL, 1),
        (v002_post_requests::MIGRATION_SQL, 2),
    ];

    for (sql, version) in migrations {
        if current_version < *version {
            conn.execute_batch(sql).map_err(|e| StorageError::MigrationFailed {
                version: *version,
                message: e.to_string(),
            })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StorageError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            tracing::info!(version = version, "applied migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> Result<u32, StorageError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(sqlite_error)
}
