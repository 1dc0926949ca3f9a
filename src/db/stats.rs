use crate::core::query::{RoomFilter, RoomQuery};
use crate::db::migrate::schema_version;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

/// Numbers shown by `db --info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub file_size: u64,
    pub schema_version: i64,
    pub rooms: i64,
    pub paused: i64,
    pub overdue: usize,
    pub due_today: usize,
    pub changes: i64,
}

impl DbStats {
    pub fn collect(pool: &DbPool, db_path: &Path, today: NaiveDate) -> AppResult<Self> {
        let count = |sql: &str| -> AppResult<i64> {
            Ok(pool.conn.query_row(sql, [], |row| row.get(0))?)
        };

        let query = RoomQuery::new(today);

        Ok(Self {
            file_size: fs::metadata(db_path).map(|m| m.len()).unwrap_or(0),
            schema_version: schema_version(&pool.conn)?,
            rooms: count("SELECT COUNT(*) FROM rooms")?,
            paused: count("SELECT COUNT(*) FROM linens WHERE paused = 1")?,
            overdue: query.clone().filter(RoomFilter::Overdue).run(&pool.conn)?.len(),
            due_today: query.filter(RoomFilter::Today).run(&pool.conn)?.len(),
            changes: count("SELECT COUNT(*) FROM changes_log")?,
        })
    }
}

pub fn print_db_info(pool: &DbPool, db_path: &Path, today: NaiveDate) -> AppResult<()> {
    let stats = DbStats::collect(pool, db_path, today)?;
    let file_mb = (stats.file_size as f64) / (1024.0 * 1024.0);

    println!();
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path.display(), RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!("{}• Schema version:{} {}", CYAN, RESET, stats.schema_version);
    println!("{}• Rooms:{} {}{}{}", CYAN, RESET, GREEN, stats.rooms, RESET);
    println!("{}• Paused:{} {}", CYAN, RESET, stats.paused);
    println!(
        "{}• Overdue:{} {}{}{}",
        CYAN, RESET, RED, stats.overdue, RESET
    );
    println!(
        "{}• Due today:{} {}{}{}",
        CYAN, RESET, YELLOW, stats.due_today, RESET
    );
    println!("{}• Change log entries:{} {}", CYAN, RESET, stats.changes);
    println!();

    Ok(())
}
