//! Cascading lookup over the reference table.

pub mod engine;
pub mod loader;

pub use engine::{LoadOutcome, LookupEngine};
pub use loader::load_reference_table;
