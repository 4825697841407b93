//! post_requests queries.

use headcount_core::errors::StorageError;
use headcount_core::hierarchy::{PostRequest, StoredPostRequest};
use rusqlite::{params, Connection};

use super::{from_epoch, sqlite_error, to_epoch};

pub fn insert_post_request(conn: &Connection, request: &PostRequest) -> Result<i64, StorageError> {
    conn.prepare_cached(
        "INSERT INTO post_requests (
            requested_at, submitted_by, unit, cost_center, subprocess, manager, role
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .map_err(sqlite_error)?
    .execute(params![
        to_epoch(&request.requested_at),
        request.submitted_by,
        request.unit,
        request.cost_center,
        request.subprocess,
        request.manager,
        request.role,
    ])
    .map_err(sqlite_error)?;
    Ok(conn.last_insert_rowid())
}

/// Up to `limit` post requests, newest first.
pub fn recent_post_requests(
    conn: &Connection,
    limit: usize,
) -> Result<Vec<StoredPostRequest>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, requested_at, submitted_by, unit, cost_center, subprocess, manager, role
             FROM post_requests ORDER BY id DESC LIMIT ?1",
        )
        .map_err(sqlite_error)?;

    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = stmt
        .query_map(params![limit], |row| {
            let id: i64 = row.get(0)?;
            let secs: i64 = row.get(1)?;
            Ok((
                id,
                secs,
                row.get::<_, String>(2)?,
                [
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                ],
            ))
        })
        .map_err(sqlite_error)?;

    let mut result = Vec::new();
    for row in rows {
        let (id, secs, submitted_by, [unit, cost_center, subprocess, manager, role]) =
            row.map_err(sqlite_error)?;
        result.push(StoredPostRequest {
            id,
            request: PostRequest {
                unit,
                cost_center,
                subprocess,
                manager,
                role,
                requested_at: from_epoch(id, secs)?,
                submitted_by,
            },
        });
    }
    Ok(result)
}
