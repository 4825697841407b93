//! Shared constants.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default reference table, relative to the config root.
pub const DEFAULT_REFERENCE_PATH: &str = "parametros.xlsx";

/// Default SQLite database, relative to the config root.
pub const DEFAULT_DATABASE_PATH: &str = "headcount.db";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "headcount.toml";

/// User config directory under the home directory.
pub const USER_CONFIG_DIR: &str = ".headcount";

/// Number of positional columns read from each reference row.
pub const REFERENCE_COLUMNS: usize = 7;

/// Smallest quantity a movement leg may carry.
pub const MIN_QUANTITY: u32 = 1;

/// Default number of post requests returned by recent-listing queries.
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "HEADCOUNT_LOG";

/// Filter used when `HEADCOUNT_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "headcount=info";
