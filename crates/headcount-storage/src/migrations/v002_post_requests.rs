//! v002: post requests raised when no matching post exists.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS post_requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    requested_at INTEGER NOT NULL,
    submitted_by TEXT NOT NULL,
    unit TEXT NOT NULL,
    cost_center TEXT NOT NULL,
    subprocess TEXT NOT NULL,
    manager TEXT NOT NULL,
    role TEXT NOT NULL
) STRICT;

CREATE TRIGGER IF NOT EXISTS post_requests_no_update
BEFORE UPDATE ON post_requests
BEGIN
    SELECT RAISE(ABORT, 'post requests are append-only');
END;

CREATE TRIGGER IF NOT EXISTS post_requests_no_delete
BEFORE DELETE ON post_requests
BEGIN
    SELECT RAISE(ABORT, 'post requests are append-only');
END;
"#;
