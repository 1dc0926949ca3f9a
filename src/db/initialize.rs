use crate::db::migrate::{MigrationReport, run_pending_migrations};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// Every table and index comes from the migration list; nothing is created here.
pub fn init_db(conn: &Connection) -> AppResult<MigrationReport> {
    run_pending_migrations(conn)
}
