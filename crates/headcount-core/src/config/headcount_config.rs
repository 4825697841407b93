//! Top-level configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{AuthConfig, ReferenceConfig, StorageConfig};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`HEADCOUNT_*`)
/// 3. Project config (`headcount.toml` in the root)
/// 4. User config (`~/.headcount/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HeadcountConfig {
    pub reference: ReferenceConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub reference_path: Option<String>,
    pub database_path: Option<String>,
}

impl HeadcountConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn validate(config: &HeadcountConfig) -> Result<(), ConfigError> {
        if let Some(path) = &config.reference.path {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "reference.path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if let Some(path) = &config.storage.database_path {
            if path.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.database_path".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if config.storage.recent_limit == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "storage.recent_limit".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(users) = &config.auth.users {
            if users.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "auth.users".to_string(),
                    message: "at least one user is required".to_string(),
                });
            }
            if let Some(blank) = users.keys().find(|u| u.trim().is_empty() || u.trim() != u.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "auth.users".to_string(),
                    message: format!("invalid user name '{blank}'"),
                });
            }
        }
        Ok(())
    }

    /// Reference table path resolved against `root`.
    pub fn reference_path(&self, root: &Path) -> PathBuf {
        self.reference.effective_path(root)
    }

    /// Database path resolved against `root`.
    pub fn database_path(&self, root: &Path) -> PathBuf {
        self.storage.effective_database_path(root)
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut HeadcountConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: HeadcountConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// `other` overrides `base` only where `other` has a value.
    fn merge(base: &mut HeadcountConfig, other: &HeadcountConfig) {
        if other.reference.path.is_some() {
            base.reference.path = other.reference.path.clone();
        }
        if other.storage.database_path.is_some() {
            base.storage.database_path = other.storage.database_path.clone();
        }
        if other.storage.recent_limit.is_some() {
            base.storage.recent_limit = other.storage.recent_limit;
        }
        if other.auth.users.is_some() {
            base.auth.users = other.auth.users.clone();
        }
    }

    /// Pattern: `HEADCOUNT_REFERENCE_PATH`, `HEADCOUNT_DATABASE_PATH`, ...
    fn apply_env_overrides(config: &mut HeadcountConfig) {
        if let Ok(val) = std::env::var("HEADCOUNT_REFERENCE_PATH") {
            config.reference.path = Some(val);
        }
        if let Ok(val) = std::env::var("HEADCOUNT_DATABASE_PATH") {
            config.storage.database_path = Some(val);
        }
        if let Ok(val) = std::env::var("HEADCOUNT_RECENT_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.recent_limit = Some(v);
            }
        }
    }

    fn apply_cli_overrides(config: &mut HeadcountConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.reference_path {
            config.reference.path = Some(v.clone());
        }
        if let Some(ref v) = cli.database_path {
            config.storage.database_path = Some(v.clone());
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
