//! SQLite connection wrapper (one connection, single user).

use crate::db::initialize::init_db;
use crate::db::migrate::MigrationReport;
use crate::errors::AppResult;
use crate::ui::messages::info;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open (or create) the database at `path` and bring its schema up to date.
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let pool = Self::prepare(conn)?;
        Ok(pool)
    }

    /// Fresh in-memory store with the full schema, used by tests.
    pub fn in_memory() -> AppResult<Self> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(conn: Connection) -> AppResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        let report: MigrationReport = init_db(&conn)?;
        if let Some(copy) = &report.legacy_backup {
            info(format!(
                "Upgraded an older database to schema v{}; safety copy: {}",
                report.to,
                copy.display()
            ));
        }

        Ok(Self { conn })
    }
}
