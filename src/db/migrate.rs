//! Ordered schema migrations keyed on SQLite's `user_version`.
//!
//! Files written by the older desktop tracker carry `user_version = 0`
//! and already contain `rooms`, `linens` and `changes_log`; migration 1 only
//! uses `IF NOT EXISTS`, so those files are adopted as-is after a zip safety
//! copy.

use crate::core::backup::zip_single_file;
use crate::db::log::oplog;
use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};

struct Migration {
    version: i64,
    name: &'static str,
    description: &'static str,
    apply: fn(&Connection) -> rusqlite::Result<()>,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "0001_base_schema",
        description: "rooms, linens, changes_log and log tables",
        apply: create_base_schema,
    },
    Migration {
        version: 2,
        name: "0002_rooms_resident_name",
        description: "optional resident name on rooms",
        apply: add_resident_name,
    },
    Migration {
        version: 3,
        name: "0003_changes_log_room_index",
        description: "index change history by room",
        apply: index_changes_log,
    },
];

/// Schema version this build writes.
pub const LATEST_VERSION: i64 = 3;

/// What [`run_pending_migrations`] did.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub from: i64,
    pub to: i64,
    pub applied: Vec<&'static str>,
    pub legacy_backup: Option<PathBuf>,
}

fn create_base_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            room_number TEXT NOT NULL UNIQUE,
            note        TEXT
        );

        CREATE TABLE IF NOT EXISTS linens (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            room_id       INTEGER NOT NULL,
            last_changed  TEXT NOT NULL,
            interval_days INTEGER NOT NULL,
            paused        INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY (room_id) REFERENCES rooms(id)
        );

        CREATE UNIQUE INDEX IF NOT EXISTS ux_linens_room ON linens(room_id);

        CREATE TABLE IF NOT EXISTS changes_log (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            room_id    INTEGER NOT NULL,
            changed_at TEXT NOT NULL,
            note       TEXT
        );

        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn add_resident_name(conn: &Connection) -> rusqlite::Result<()> {
    // Some unversioned files already got this column from the desktop app.
    if column_exists(conn, "rooms", "resident_name")? {
        return Ok(());
    }
    conn.execute_batch("ALTER TABLE rooms ADD COLUMN resident_name TEXT;")
}

fn index_changes_log(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_changes_log_room ON changes_log(room_id, changed_at);",
    )
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
}

fn database_file(conn: &Connection) -> Option<PathBuf> {
    conn.path()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .filter(|p| p.exists())
}

/// Zip the database next to itself before touching an unversioned file.
fn backup_before_migration(db_path: &Path) -> AppResult<PathBuf> {
    let file_name = db_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "database.sqlite".to_string());

    let zip_name = format!(
        "{}-pre-migration-{}.zip",
        Local::now().format("%Y%m%d_%H%M%S"),
        file_name
    );
    let zip_path = crate::utils::path::parent_dir(db_path).join(zip_name);

    zip_single_file(db_path, &zip_path, &file_name)?;
    Ok(zip_path)
}

/// Public entry point: apply every migration newer than the stored version,
/// each one in its own transaction together with the version bump.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<MigrationReport> {
    let current = schema_version(conn)?;

    let mut report = MigrationReport {
        from: current,
        to: current,
        ..Default::default()
    };

    if current > LATEST_VERSION {
        return Err(AppError::Migration(format!(
            "database schema v{} is newer than this build supports (v{})",
            current, LATEST_VERSION
        )));
    }

    if current == LATEST_VERSION {
        return Ok(report);
    }

    if current == 0
        && table_exists(conn, "rooms")?
        && let Some(db_path) = database_file(conn)
    {
        report.legacy_backup = Some(backup_before_migration(&db_path)?);
    }

    for m in MIGRATIONS.iter().filter(|m| m.version > current) {
        let tx = conn.unchecked_transaction()?;

        (m.apply)(&tx).map_err(|e| AppError::Migration(format!("{}: {}", m.name, e)))?;
        tx.pragma_update(None, "user_version", m.version)?;
        oplog(&tx, "migration_applied", m.name, m.description)?;

        tx.commit()?;

        report.to = m.version;
        report.applied.push(m.name);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_reaches_latest_version() {
        let conn = Connection::open_in_memory().unwrap();
        let report = run_pending_migrations(&conn).unwrap();

        assert_eq!(report.from, 0);
        assert_eq!(report.to, LATEST_VERSION);
        assert_eq!(report.applied.len(), MIGRATIONS.len());
        assert_eq!(schema_version(&conn).unwrap(), LATEST_VERSION);
        assert!(column_exists(&conn, "rooms", "resident_name").unwrap());
    }

    #[test]
    fn second_run_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        let again = run_pending_migrations(&conn).unwrap();
        assert!(again.applied.is_empty());

        let logged: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(logged, MIGRATIONS.len() as i64);
    }

    #[test]
    fn legacy_file_with_resident_column_is_adopted() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE rooms (id INTEGER PRIMARY KEY AUTOINCREMENT,
                                 room_number TEXT NOT NULL UNIQUE, note TEXT,
                                 resident_name TEXT);
             INSERT INTO rooms (room_number, note, resident_name) VALUES ('12', 'x', 'Kari');",
        )
        .unwrap();

        run_pending_migrations(&conn).unwrap();

        let name: String = conn
            .query_row("SELECT resident_name FROM rooms WHERE room_number='12'", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(name, "Kari");
        assert_eq!(schema_version(&conn).unwrap(), LATEST_VERSION);
    }

    #[test]
    fn newer_schema_is_refused() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", LATEST_VERSION + 1)
            .unwrap();
        assert!(matches!(
            run_pending_migrations(&conn),
            Err(AppError::Migration(_))
        ));
    }
}
