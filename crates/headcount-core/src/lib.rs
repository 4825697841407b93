//! # headcount-core
//!
//! Foundation crate for headcount movements.
//! Hierarchy types, the cascading lookup engine, the headless form model,
//! session state, errors, config, and tracing. The storage crate and the
//! CLI depend on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod form;
pub mod hierarchy;
pub mod lookup;
pub mod session;
pub mod traits;
pub mod tracing;

pub use config::HeadcountConfig;
pub use errors::{DataSourceError, FormError, SelectionError, SessionError, StorageError};
pub use form::{LegSelection, MovementDraft, PostRequestDraft};
pub use hierarchy::{
    Constraints, HierarchyLevel, HistorySummary, MovementLeg, MovementRecord, PositionRecord,
    PostRequest, RawRow, StoredMovement, StoredPostRequest,
};
pub use lookup::{LoadOutcome, LookupEngine};
pub use session::{Session, View};
pub use traits::RecordStore;
