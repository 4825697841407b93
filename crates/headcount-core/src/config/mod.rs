//! Configuration system.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod auth_config;
pub mod headcount_config;
pub mod reference_config;
pub mod storage_config;

pub use auth_config::AuthConfig;
pub use headcount_config::{CliOverrides, HeadcountConfig};
pub use reference_config::ReferenceConfig;
pub use storage_config::StorageConfig;
