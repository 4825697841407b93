//! Hierarchy types: the six ordered levels, position rows, constraint
//! prefixes, and the records persisted by the record store.

pub mod constraints;
pub mod level;
pub mod movement;
pub mod record;

pub use constraints::Constraints;
pub use level::HierarchyLevel;
pub use movement::{
    HistorySummary, MovementLeg, MovementRecord, PostRequest, StoredMovement, StoredPostRequest,
};
pub use record::{PositionRecord, RawRow};
