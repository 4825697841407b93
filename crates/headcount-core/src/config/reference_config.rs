//! Reference table configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REFERENCE_PATH;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReferenceConfig {
    /// CSV reference table. Relative paths resolve against the config root.
    /// Default: `parametros.xlsx`.
    pub path: Option<String>,
}

impl ReferenceConfig {
    pub fn effective_path(&self, root: &Path) -> PathBuf {
        root.join(self.path.as_deref().unwrap_or(DEFAULT_REFERENCE_PATH))
    }
}
