use crate::config::Config;
use crate::core::query::{RoomFilter, RoomQuery};
use crate::db::log::oplog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::model::DueListRow;
use crate::export::{ExportFormat, notify_export_success, render_csv, render_json};
use crate::models::RoomView;
use crate::ui::messages::warning;
use crate::utils::date::to_iso;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

/// Rooms due today plus their rendered document.
#[derive(Debug, Clone)]
pub struct DueList {
    pub date: NaiveDate,
    pub rooms: Vec<RoomView>,
    pub content: String,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Unpaused rooms whose next change is exactly `today`, by room number.
    pub fn due_today(conn: &Connection, today: NaiveDate) -> AppResult<Vec<RoomView>> {
        let mut rooms = RoomQuery::new(today)
            .filter(RoomFilter::Today)
            .run(conn)?;
        rooms.sort_by(|a, b| a.room_number.cmp(&b.room_number));
        Ok(rooms)
    }

    /// Build the daily list in `format`. Nothing is written to disk.
    pub fn build(conn: &Connection, today: NaiveDate, format: ExportFormat) -> AppResult<DueList> {
        let rooms = Self::due_today(conn, today)?;
        let rows: Vec<DueListRow> = rooms.iter().map(DueListRow::from).collect();

        let content = match format {
            ExportFormat::Csv => render_csv(&rows)?,
            ExportFormat::Json => render_json(&rows)?,
        };

        Ok(DueList {
            date: today,
            rooms,
            content,
        })
    }

    /// `due_list_<YYYY-MM-DD>.<ext>`
    pub fn default_file_name(today: NaiveDate, format: ExportFormat) -> String {
        format!("due_list_{}.{}", to_iso(today), format.as_str())
    }

    /// Build the list and write it to `file` (or the default name inside the
    /// configured export directory). Returns the written path.
    pub fn export(
        pool: &DbPool,
        cfg: &Config,
        format: ExportFormat,
        file: Option<&str>,
        force: bool,
        today: NaiveDate,
    ) -> AppResult<PathBuf> {
        let path = match file {
            Some(f) => expand_tilde(f),
            None => cfg.export_dir().join(Self::default_file_name(today, format)),
        };

        ensure_writable(&path, force)?;

        let list = Self::build(&pool.conn, today, format)?;
        if list.rooms.is_empty() {
            warning(format!("No rooms are due on {}.", to_iso(today)));
        }

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, list.content.as_bytes())?;

        oplog_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} room(s) due {}", list.rooms.len(), to_iso(today)),
        );

        notify_export_success(&format.as_str().to_uppercase(), &path, list.rooms.len());
        Ok(path)
    }
}
