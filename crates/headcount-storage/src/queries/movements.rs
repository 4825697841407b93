//! movements queries: insert, per-user history, per-user summary.

use headcount_core::errors::StorageError;
use headcount_core::hierarchy::{HistorySummary, MovementLeg, MovementRecord, StoredMovement};
use rusqlite::{params, Connection, Row};

use super::{from_epoch, sqlite_error, to_epoch};

const MOVEMENT_COLUMNS: &str = "id, system_user, submitted_at, requester,
    exit_unit, exit_cost_center, exit_subprocess, exit_manager, exit_post, exit_role, exit_quantity,
    entry_unit, entry_cost_center, entry_subprocess, entry_manager, entry_post, entry_role, entry_quantity";

/// Append a movement. Returns the new row id.
pub fn insert_movement(conn: &Connection, movement: &MovementRecord) -> Result<i64, StorageError> {
    let exit = &movement.exit;
    let entry = &movement.entry;
    conn.prepare_cached(
        "INSERT INTO movements (
            system_user, submitted_at, requester,
            exit_unit, exit_cost_center, exit_subprocess, exit_manager, exit_post, exit_role, exit_quantity,
            entry_unit, entry_cost_center, entry_subprocess, entry_manager, entry_post, entry_role, entry_quantity
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
    )
    .map_err(sqlite_error)?
    .execute(params![
        movement.system_user,
        to_epoch(&movement.submitted_at),
        movement.requester,
        exit.unit,
        exit.cost_center,
        exit.subprocess,
        exit.manager,
        exit.post,
        exit.role,
        exit.quantity,
        entry.unit,
        entry.cost_center,
        entry.subprocess,
        entry.manager,
        entry.post,
        entry.role,
        entry.quantity,
    ])
    .map_err(sqlite_error)?;
    Ok(conn.last_insert_rowid())
}

/// Movements submitted by `user`, newest first.
pub fn movements_by_user(conn: &Connection, user: &str) -> Result<Vec<StoredMovement>, StorageError> {
    let sql = format!(
        "SELECT {MOVEMENT_COLUMNS} FROM movements WHERE system_user = ?1 ORDER BY id DESC"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_error)?;
    let rows = stmt
        .query_map(params![user], read_row)
        .map_err(sqlite_error)?;

    let mut result = Vec::new();
    for row in rows {
        let (id, secs, system_user, requester, exit, entry) = row.map_err(sqlite_error)?;
        result.push(StoredMovement {
            id,
            record: MovementRecord {
                system_user,
                submitted_at: from_epoch(id, secs)?,
                requester,
                exit,
                entry,
            },
        });
    }
    Ok(result)
}

/// Total movements for `user` and when the most recent one was submitted.
pub fn history_summary(conn: &Connection, user: &str) -> Result<HistorySummary, StorageError> {
    let (count, latest): (i64, Option<(i64, i64)>) = conn
        .query_row(
            "SELECT COUNT(*),
                    (SELECT id FROM movements WHERE system_user = ?1 ORDER BY id DESC LIMIT 1),
                    (SELECT submitted_at FROM movements WHERE system_user = ?1 ORDER BY id DESC LIMIT 1)
             FROM movements WHERE system_user = ?1",
            params![user],
            |row| {
                let id: Option<i64> = row.get(1)?;
                let secs: Option<i64> = row.get(2)?;
                Ok((row.get(0)?, id.zip(secs)))
            },
        )
        .map_err(sqlite_error)?;

    Ok(HistorySummary {
        total: u64::try_from(count).unwrap_or(0),
        last_submitted_at: latest.map(|(id, secs)| from_epoch(id, secs)).transpose()?,
    })
}

/// Total movements across all users.
pub fn count_movements(conn: &Connection) -> Result<u64, StorageError> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM movements", [], |row| row.get(0))
        .map_err(sqlite_error)?;
    Ok(u64::try_from(count).unwrap_or(0))
}

type MovementRow = (i64, i64, String, String, MovementLeg, MovementLeg);

fn read_row(row: &Row<'_>) -> rusqlite::Result<MovementRow> {
    Ok((
        row.get(0)?,
        row.get(2)?,
        row.get(1)?,
        row.get(3)?,
        read_leg(row, 4)?,
        read_leg(row, 11)?,
    ))
}

/// Six hierarchy columns then the quantity, starting at `start`.
fn read_leg(row: &Row<'_>, start: usize) -> rusqlite::Result<MovementLeg> {
    Ok(MovementLeg {
        unit: row.get(start)?,
        cost_center: row.get(start + 1)?,
        subprocess: row.get(start + 2)?,
        manager: row.get(start + 3)?,
        post: row.get(start + 4)?,
        role: row.get(start + 5)?,
        quantity: row.get(start + 6)?,
    })
}
