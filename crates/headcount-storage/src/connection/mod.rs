//! Connection management: one serialized writer, read-only connections
//! for file-backed databases.

pub mod pragmas;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use headcount_core::errors::StorageError;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use self::pragmas::{apply_pragmas, apply_read_pragmas};
use crate::migrations;
use crate::queries::sqlite_error;

/// Read-only connections opened next to the writer of a file database.
/// History and post request listings are the only reads, so two suffice.
const READ_CONNECTIONS: usize = 2;

/// Owns the write connection and the read connections of one database.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    /// Empty for in-memory databases: a second in-memory connection would
    /// be a separate, empty database, so reads go through the writer.
    readers: Vec<Mutex<Connection>>,
    next_reader: AtomicUsize,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let writer = Connection::open(path).map_err(sqlite_error)?;
        apply_pragmas(&writer)?;
        migrations::run_migrations(&writer)?;

        // Readers open after migrations so they never see a half-built schema.
        let readers = (0..READ_CONNECTIONS)
            .map(|_| open_reader(path).map(Mutex::new))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(path = %path.display(), readers = readers.len(), "database opened");

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            next_reader: AtomicUsize::new(0),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(sqlite_error)?;
        apply_pragmas(&writer)?;
        migrations::run_migrations(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Vec::new(),
            next_reader: AtomicUsize::new(0),
            path: None,
        })
    }

    /// Execute a write operation with the serialized writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "write lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Execute a read operation. Readers are taken in turn; in-memory
    /// databases read through the writer.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        if self.readers.is_empty() {
            return self.with_writer(f);
        }
        let idx = self.next_reader.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let guard = self.readers[idx]
            .lock()
            .map_err(|_| StorageError::SqliteError {
                message: "read lock poisoned".to_string(),
            })?;
        f(&guard)
    }

    /// Number of dedicated read connections (0 for in-memory).
    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    /// Run a WAL checkpoint (TRUNCATE mode).
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(sqlite_error)
        })
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

fn open_reader(path: &Path) -> Result<Connection, StorageError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(sqlite_error)?;
    apply_read_pragmas(&conn)?;
    Ok(conn)
}
