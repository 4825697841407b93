//! Error handling for headcount.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod data_source_error;
pub mod error_code;
pub mod form_error;
pub mod selection_error;
pub mod session_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use data_source_error::DataSourceError;
pub use error_code::HeadcountErrorCode;
pub use form_error::FormError;
pub use selection_error::SelectionError;
pub use session_error::SessionError;
pub use storage_error::StorageError;
