//! HeadcountErrorCode trait for UI-facing error strings.

/// Every error enum implements this to give front ends a stable code
/// they can branch on without matching message text.
pub trait HeadcountErrorCode {
    /// Returns the error code string (e.g., "DATA_SOURCE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted display string: `[ERROR_CODE] message`.
    fn ui_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const DATA_SOURCE_NOT_FOUND: &str = "DATA_SOURCE_NOT_FOUND";
pub const DATA_SOURCE_ERROR: &str = "DATA_SOURCE_ERROR";
pub const INVALID_SELECTION: &str = "INVALID_SELECTION";
pub const CONSTRAINT_ORDER_VIOLATION: &str = "CONSTRAINT_ORDER_VIOLATION";
pub const FIELD_REQUIRED: &str = "FIELD_REQUIRED";
pub const INVALID_QUANTITY: &str = "INVALID_QUANTITY";
pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
pub const NOT_LOGGED_IN: &str = "NOT_LOGGED_IN";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
