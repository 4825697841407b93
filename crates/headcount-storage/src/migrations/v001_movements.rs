//! v001: movements table, append-only.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS movements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    system_user TEXT NOT NULL,
    submitted_at INTEGER NOT NULL,
    requester TEXT NOT NULL,
    exit_unit TEXT NOT NULL,
    exit_cost_center TEXT NOT NULL,
    exit_subprocess TEXT NOT NULL,
    exit_manager TEXT NOT NULL,
    exit_post TEXT NOT NULL,
    exit_role TEXT NOT NULL,
    exit_quantity INTEGER NOT NULL CHECK (exit_quantity >= 1),
    entry_unit TEXT NOT NULL,
    entry_cost_center TEXT NOT NULL,
    entry_subprocess TEXT NOT NULL,
    entry_manager TEXT NOT NULL,
    entry_post TEXT NOT NULL,
    entry_role TEXT NOT NULL,
    entry_quantity INTEGER NOT NULL CHECK (entry_quantity >= 1)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_movements_user ON movements(system_user, id DESC);

CREATE TRIGGER IF NOT EXISTS movements_no_update
BEFORE UPDATE ON movements
BEGIN
    SELECT RAISE(ABORT, 'movements are append-only');
END;

CREATE TRIGGER IF NOT EXISTS movements_no_delete
BEFORE DELETE ON movements
BEGIN
    SELECT RAISE(ABORT, 'movements are append-only');
END;
"#;
