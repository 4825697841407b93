//! Record store configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DATABASE_PATH, DEFAULT_RECENT_LIMIT};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file. Relative paths resolve against the config root.
    /// Default: `headcount.db`.
    pub database_path: Option<String>,
    /// Rows returned by recent-listing queries. Default: 50.
    pub recent_limit: Option<usize>,
}

impl StorageConfig {
    pub fn effective_database_path(&self, root: &Path) -> PathBuf {
        root.join(self.database_path.as_deref().unwrap_or(DEFAULT_DATABASE_PATH))
    }

    pub fn effective_recent_limit(&self) -> usize {
        self.recent_limit.unwrap_or(DEFAULT_RECENT_LIMIT)
    }
}
