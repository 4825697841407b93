//! Error codes and UI strings.

use std::path::PathBuf;

use headcount_core::errors::{
    DataSourceError, FormError, HeadcountErrorCode, SelectionError, SessionError, StorageError,
};
use headcount_core::hierarchy::HierarchyLevel;

#[test]
fn ui_string_prefixes_code() {
    let err = SessionError::InvalidCredentials;
    assert_eq!(err.ui_string(), "[INVALID_CREDENTIALS] Incorrect user or password");
}

#[test]
fn data_source_codes_distinguish_missing_file() {
    let missing = DataSourceError::NotFound {
        path: PathBuf::from("parametros.csv"),
    };
    assert_eq!(missing.error_code(), "DATA_SOURCE_NOT_FOUND");

    let malformed = DataSourceError::Malformed {
        path: PathBuf::from("parametros.csv"),
        line: 4,
        message: "bad".into(),
    };
    assert_eq!(malformed.error_code(), "DATA_SOURCE_ERROR");
}

#[test]
fn not_in_options_carries_selection_code() {
    let err = FormError::NotInOptions {
        field: "Role (exit)".into(),
        source: SelectionError::InvalidSelection {
            level: HierarchyLevel::Role,
            value: "Chef".into(),
        },
    };
    assert_eq!(err.error_code(), "INVALID_SELECTION");
    assert_eq!(err.field(), "Role (exit)");
    let text = err.to_string();
    assert!(text.contains("Role (exit)"));
    assert!(text.contains("Chef"));
}

#[test]
fn form_codes() {
    assert_eq!(
        FormError::FieldRequired { field: "Requester".into() }.error_code(),
        "FIELD_REQUIRED"
    );
    assert_eq!(
        FormError::InvalidQuantity { field: "Quantity (entry)".into(), value: 0, min: 1 }
            .error_code(),
        "INVALID_QUANTITY"
    );
    assert_eq!(
        SelectionError::ConstraintOrderViolation {
            queried: HierarchyLevel::Unit,
            constraint: HierarchyLevel::Role,
        }
        .error_code(),
        "CONSTRAINT_ORDER_VIOLATION"
    );
}

#[test]
fn storage_codes() {
    assert_eq!(StorageError::DbBusy.error_code(), "DB_BUSY");
    assert_eq!(
        StorageError::MigrationFailed { version: 2, message: "x".into() }.error_code(),
        "MIGRATION_FAILED"
    );
    assert_eq!(
        StorageError::SqliteError { message: "x".into() }.error_code(),
        "STORAGE_ERROR"
    );
    assert_eq!(SessionError::NotLoggedIn.error_code(), "NOT_LOGGED_IN");
}
