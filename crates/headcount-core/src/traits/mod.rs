//! Seams between core and its collaborators.

pub mod record_store;

pub use record_store::RecordStore;
