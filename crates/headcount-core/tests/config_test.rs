//! Layered configuration: defaults, user file, project file, env, CLI.

use std::path::Path;
use std::sync::Mutex;

use headcount_core::config::{CliOverrides, HeadcountConfig};
use headcount_core::errors::{ConfigError, HeadcountErrorCode};

/// Serializes tests that touch process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear HEADCOUNT_ vars and point HOME at an empty directory so the
/// developer's own user config never leaks in.
fn isolate_env(home: &Path) {
    for key in [
        "HEADCOUNT_REFERENCE_PATH",
        "HEADCOUNT_DATABASE_PATH",
        "HEADCOUNT_RECENT_LIMIT",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn defaults_resolve_against_root() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let root = tempdir();
    let config = HeadcountConfig::load(root.path(), None).unwrap();
    assert_eq!(config.reference_path(root.path()), root.path().join("parametros.xlsx"));
    assert_eq!(config.database_path(root.path()), root.path().join("headcount.db"));
    assert_eq!(config.storage.effective_recent_limit(), 50);
    assert!(config.auth.verify("admin", "admin123"));
}

#[test]
fn four_layer_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".headcount")).unwrap();
    std::fs::write(
        home.path().join(".headcount").join("config.toml"),
        r#"
[reference]
path = "user.csv"

[storage]
recent_limit = 7
"#,
    )
    .unwrap();

    let root = tempdir();
    std::fs::write(
        root.path().join("headcount.toml"),
        r#"
[reference]
path = "project.csv"

[storage]
database_path = "project.db"
"#,
    )
    .unwrap();

    std::env::set_var("HEADCOUNT_DATABASE_PATH", "env.db");

    let cli = CliOverrides {
        reference_path: Some("cli.csv".to_string()),
        ..Default::default()
    };
    let config = HeadcountConfig::load(root.path(), Some(&cli)).unwrap();
    std::env::remove_var("HEADCOUNT_DATABASE_PATH");

    assert_eq!(config.reference.path.as_deref(), Some("cli.csv"));
    assert_eq!(config.storage.database_path.as_deref(), Some("env.db"));
    assert_eq!(config.storage.recent_limit, Some(7));
}

#[test]
fn unparseable_env_number_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("HEADCOUNT_RECENT_LIMIT", "lots");
    let root = tempdir();
    let config = HeadcountConfig::load(root.path(), None).unwrap();
    std::env::remove_var("HEADCOUNT_RECENT_LIMIT");
    assert_eq!(config.storage.recent_limit, None);
}

#[test]
fn invalid_project_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let root = tempdir();
    std::fs::write(root.path().join("headcount.toml"), "[storage\nrecent_limit = ").unwrap();
    let err = HeadcountConfig::load(root.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn auth_table_replaces_builtin_accounts() {
    let config = HeadcountConfig::from_toml(
        r#"
[auth.users]
"rh.norte" = "pw"
"#,
    )
    .unwrap();
    assert!(config.auth.verify("rh.norte", "pw"));
    assert!(!config.auth.verify("admin", "admin123"));
    assert_eq!(config.auth.effective_users().len(), 1);
}

#[test]
fn validation_rejects_bad_values() {
    let zero = HeadcountConfig::from_toml("[storage]\nrecent_limit = 0\n").unwrap();
    let err = HeadcountConfig::validate(&zero).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::ValidationFailed { ref field, .. } if field == "storage.recent_limit"
    ));

    let blank_path = HeadcountConfig::from_toml("[reference]\npath = \"  \"\n").unwrap();
    assert!(HeadcountConfig::validate(&blank_path).is_err());

    let no_users = HeadcountConfig::from_toml("[auth.users]\n").unwrap();
    assert!(HeadcountConfig::validate(&no_users).is_err());

    let padded = HeadcountConfig::from_toml("[auth.users]\n\" admin\" = \"x\"\n").unwrap();
    assert!(HeadcountConfig::validate(&padded).is_err());
}

#[test]
fn unknown_keys_are_ignored() {
    let config = HeadcountConfig::from_toml(
        r#"
[reference]
path = "x.csv"
sheet = "Plan1"

[export]
enabled = true
"#,
    )
    .unwrap();
    assert_eq!(config.reference.path.as_deref(), Some("x.csv"));
}

#[test]
fn toml_serialization_preserves_values() {
    let config = HeadcountConfig::from_toml(
        "[storage]\ndatabase_path = \"a.db\"\nrecent_limit = 3\n",
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let again = HeadcountConfig::from_toml(&text).unwrap();
    assert_eq!(again.storage.database_path.as_deref(), Some("a.db"));
    assert_eq!(again.storage.recent_limit, Some(3));
}
