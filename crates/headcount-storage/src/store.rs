//! SqliteRecordStore: `RecordStore` over a `DatabaseManager`.

use std::path::Path;

use headcount_core::errors::StorageError;
use headcount_core::hierarchy::{
    HistorySummary, MovementRecord, PostRequest, StoredMovement, StoredPostRequest,
};
use headcount_core::traits::RecordStore;
use tracing::info;

use crate::connection::DatabaseManager;
use crate::queries::{movements, post_requests};

pub struct SqliteRecordStore {
    db: DatabaseManager,
}

impl SqliteRecordStore {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    pub fn from_manager(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }

    /// Movements across all users.
    pub fn movement_count(&self) -> Result<u64, StorageError> {
        self.db.with_reader(movements::count_movements)
    }
}

impl RecordStore for SqliteRecordStore {
    fn append_movement(&self, movement: &MovementRecord) -> Result<i64, StorageError> {
        let id = self
            .db
            .with_writer(|conn| movements::insert_movement(conn, movement))?;
        info!(id, user = %movement.system_user, "movement recorded");
        Ok(id)
    }

    fn append_post_request(&self, request: &PostRequest) -> Result<i64, StorageError> {
        let id = self
            .db
            .with_writer(|conn| post_requests::insert_post_request(conn, request))?;
        info!(id, user = %request.submitted_by, "post request recorded");
        Ok(id)
    }

    fn movements_by_user(&self, user: &str) -> Result<Vec<StoredMovement>, StorageError> {
        self.db
            .with_reader(|conn| movements::movements_by_user(conn, user))
    }

    fn history_summary(&self, user: &str) -> Result<HistorySummary, StorageError> {
        self.db
            .with_reader(|conn| movements::history_summary(conn, user))
    }

    fn recent_post_requests(&self, limit: usize) -> Result<Vec<StoredPostRequest>, StorageError> {
        self.db
            .with_reader(|conn| post_requests::recent_post_requests(conn, limit))
    }
}
