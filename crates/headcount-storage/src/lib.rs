//! SQLite-backed record store for confirmed movements and post requests.
//!
//! One serialized writer, read-only connections for file-backed databases,
//! schema versioned with `PRAGMA user_version`. Both tables are append-only.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod store;

pub use connection::DatabaseManager;
pub use store::SqliteRecordStore;
