use crate::errors::StorageError;
use crate::hierarchy::{
    HistorySummary, MovementRecord, PostRequest, StoredMovement, StoredPostRequest,
};

/// Append-only persistence for confirmed movements and post requests.
/// Stored records are never updated or deleted.
pub trait RecordStore: Send + Sync {
    /// Append a movement, returning its store-assigned id.
    fn append_movement(&self, movement: &MovementRecord) -> Result<i64, StorageError>;

    /// Append a post request, returning its store-assigned id.
    fn append_post_request(&self, request: &PostRequest) -> Result<i64, StorageError>;

    /// Movements submitted by `user`, newest first.
    fn movements_by_user(&self, user: &str) -> Result<Vec<StoredMovement>, StorageError>;

    fn history_summary(&self, user: &str) -> Result<HistorySummary, StorageError>;

    /// Most recent post requests, newest first.
    fn recent_post_requests(&self, limit: usize) -> Result<Vec<StoredPostRequest>, StorageError>;
}
