//! Schema versioning and append-only enforcement.

use headcount_core::errors::{HeadcountErrorCode, StorageError};
use headcount_storage::connection::pragmas;
use headcount_storage::migrations::{current_version, run_migrations, LATEST_VERSION};
use headcount_storage::DatabaseManager;
use rusqlite::Connection;

const INSERT_MOVEMENT: &str = "INSERT INTO movements (
    system_user, submitted_at, requester,
    exit_unit, exit_cost_center, exit_subprocess, exit_manager, exit_post, exit_role, exit_quantity,
    entry_unit, entry_cost_center, entry_subprocess, entry_manager, entry_post, entry_role, entry_quantity
) VALUES ('analista', 1767000000, 'Ana', 'A', '10', 'S1', 'M1', 'P1', 'Analyst', 1,
          'A', '20', 'S2', 'M2', 'P2', 'Manager', 1)";

fn migrated() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    pragmas::apply_pragmas(&conn).unwrap();
    run_migrations(&conn).unwrap();
    conn
}

#[test]
fn fresh_database_reaches_latest_version() {
    let conn = migrated();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
}

#[test]
fn rerunning_migrations_is_a_noop() {
    let conn = migrated();
    conn.execute(INSERT_MOVEMENT, []).unwrap();
    run_migrations(&conn).unwrap();
    run_migrations(&conn).unwrap();
    assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM movements", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn partially_migrated_database_catches_up() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(headcount_storage::migrations::v001_movements::MIGRATION_SQL)
        .unwrap();
    conn.pragma_update(None, "user_version", 1u32).unwrap();

    run_migrations(&conn).unwrap();
    assert_eq!(current_version(&conn).unwrap(), 2);
    conn.execute(
        "INSERT INTO post_requests (requested_at, submitted_by, unit, cost_center, subprocess, manager, role)
         VALUES (1, 'admin', 'A', '10', 'S1', 'M1', 'Analyst')",
        [],
    )
    .unwrap();
}

#[test]
fn movements_cannot_be_updated_or_deleted() {
    let conn = migrated();
    conn.execute(INSERT_MOVEMENT, []).unwrap();

    let update = conn.execute("UPDATE movements SET requester = 'Bob'", []);
    assert!(update.unwrap_err().to_string().contains("append-only"));
    let delete = conn.execute("DELETE FROM movements", []);
    assert!(delete.unwrap_err().to_string().contains("append-only"));

    let requester: String = conn
        .query_row("SELECT requester FROM movements", [], |r| r.get(0))
        .unwrap();
    assert_eq!(requester, "Ana");
}

#[test]
fn post_requests_cannot_be_deleted() {
    let conn = migrated();
    conn.execute(
        "INSERT INTO post_requests (requested_at, submitted_by, unit, cost_center, subprocess, manager, role)
         VALUES (1, 'admin', 'A', '10', 'S1', 'M1', 'Analyst')",
        [],
    )
    .unwrap();
    assert!(conn.execute("DELETE FROM post_requests", []).is_err());
    assert!(conn
        .execute("UPDATE post_requests SET role = 'x'", [])
        .is_err());
}

#[test]
fn strict_tables_reject_wrong_types() {
    let conn = migrated();
    let result = conn.execute(
        "INSERT INTO post_requests (requested_at, submitted_by, unit, cost_center, subprocess, manager, role)
         VALUES ('yesterday', 'admin', 'A', '10', 'S1', 'M1', 'Analyst')",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn manager_surfaces_errors_as_storage_errors() {
    let db = DatabaseManager::open_in_memory().unwrap();
    let err = db
        .with_writer(|conn| {
            conn.execute(INSERT_MOVEMENT, []).unwrap();
            conn.execute("DELETE FROM movements", [])
                .map_err(|e| StorageError::SqliteError {
                    message: e.to_string(),
                })
        })
        .unwrap_err();
    assert_eq!(err.error_code(), "STORAGE_ERROR");
}
