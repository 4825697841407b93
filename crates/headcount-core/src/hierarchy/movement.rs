//! Records handed to the record store. Immutable once built; the store
//! only ever appends them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::HierarchyLevel;

/// One side of a movement: a full hierarchy path plus a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementLeg {
    pub unit: String,
    pub cost_center: String,
    pub subprocess: String,
    pub manager: String,
    pub post: String,
    pub role: String,
    pub quantity: u32,
}

impl MovementLeg {
    pub fn field(&self, level: HierarchyLevel) -> &str {
        match level {
            HierarchyLevel::Unit => &self.unit,
            HierarchyLevel::CostCenter => &self.cost_center,
            HierarchyLevel::Subprocess => &self.subprocess,
            HierarchyLevel::Manager => &self.manager,
            HierarchyLevel::Post => &self.post,
            HierarchyLevel::Role => &self.role,
        }
    }
}

/// A confirmed exit/entry pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub system_user: String,
    pub submitted_at: DateTime<Utc>,
    pub requester: String,
    pub exit: MovementLeg,
    pub entry: MovementLeg,
}

/// A movement as read back from the store, with its append-ordered id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMovement {
    pub id: i64,
    pub record: MovementRecord,
}

/// Request for a post that does not exist yet under the given path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRequest {
    pub unit: String,
    pub cost_center: String,
    pub subprocess: String,
    pub manager: String,
    pub role: String,
    pub requested_at: DateTime<Utc>,
    pub submitted_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPostRequest {
    pub id: i64,
    pub request: PostRequest,
}

/// Per-user totals for the history view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total: u64,
    pub last_submitted_at: Option<DateTime<Utc>>,
}
