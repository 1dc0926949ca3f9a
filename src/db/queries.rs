//! SQL access for rooms, schedules and the change log.
//!
//! Every function takes a plain `&Connection` so it can run either directly
//! or inside a `Transaction` (which derefs to `Connection`).

use crate::core::query::RoomQuery;
use crate::errors::{AppError, AppResult};
use crate::models::change::CHANGED_AT_FORMAT;
use crate::models::{ChangeLogEntry, LinenSchedule, Room, RoomView};
use crate::utils::date::{DATE_FORMAT, to_iso};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

fn date_column(row: &Row, col: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(col)?;
    // Older files may hold a full timestamp; only the date part matters.
    let date_part = raw.get(..10).unwrap_or(&raw);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|_| conversion_error(col, AppError::InvalidDate(raw.clone())))
}

fn interval_column(row: &Row, col: usize) -> rusqlite::Result<u32> {
    let raw: i64 = row.get(col)?;
    u32::try_from(raw)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| conversion_error(col, AppError::InvalidInterval(raw)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn map_room(row: &Row) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get("id")?,
        room_number: row.get("room_number")?,
        resident_name: non_empty(row.get("resident_name")?),
        note: non_empty(row.get("note")?),
    })
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

pub fn find_room_by_number(conn: &Connection, room_number: &str) -> AppResult<Option<Room>> {
    let room = conn
        .query_row(
            "SELECT id, room_number, resident_name, note FROM rooms WHERE room_number = ?1",
            [room_number],
            map_room,
        )
        .optional()?;
    Ok(room)
}

pub fn find_room_by_id(conn: &Connection, id: i64) -> AppResult<Option<Room>> {
    let room = conn
        .query_row(
            "SELECT id, room_number, resident_name, note FROM rooms WHERE id = ?1",
            [id],
            map_room,
        )
        .optional()?;
    Ok(room)
}

pub fn insert_room(
    conn: &Connection,
    room_number: &str,
    resident_name: Option<&str>,
    note: Option<&str>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO rooms (room_number, resident_name, note) VALUES (?1, ?2, ?3)",
        params![room_number, resident_name, note],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_room_details(
    conn: &Connection,
    id: i64,
    resident_name: Option<&str>,
    note: Option<&str>,
) -> AppResult<()> {
    conn.execute(
        "UPDATE rooms SET resident_name = ?1, note = ?2 WHERE id = ?3",
        params![resident_name, note, id],
    )?;
    Ok(())
}

pub fn delete_room_row(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM rooms WHERE id = ?1", [id])?)
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

/// Create the schedule of a room, or overwrite its date and interval.
/// `paused` is left alone on update and starts at 0 on insert.
pub fn upsert_schedule(
    conn: &Connection,
    room_id: i64,
    last_changed: NaiveDate,
    interval_days: u32,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO linens (room_id, last_changed, interval_days, paused)
         VALUES (?1, ?2, ?3, 0)
         ON CONFLICT(room_id) DO UPDATE
         SET last_changed = excluded.last_changed,
             interval_days = excluded.interval_days",
        params![room_id, to_iso(last_changed), interval_days],
    )?;
    Ok(())
}

pub fn load_schedule(conn: &Connection, room_id: i64) -> AppResult<Option<LinenSchedule>> {
    let schedule = conn
        .query_row(
            "SELECT room_id, last_changed, interval_days, paused FROM linens WHERE room_id = ?1",
            [room_id],
            |row| {
                Ok(LinenSchedule {
                    room_id: row.get(0)?,
                    last_changed: date_column(row, 1)?,
                    interval_days: interval_column(row, 2)?,
                    paused: row.get::<_, i64>(3)? != 0,
                })
            },
        )
        .optional()?;
    Ok(schedule)
}

pub fn set_last_changed(conn: &Connection, room_id: i64, date: NaiveDate) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE linens SET last_changed = ?1 WHERE room_id = ?2",
        params![to_iso(date), room_id],
    )?)
}

pub fn set_paused(conn: &Connection, room_id: i64, paused: bool) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE linens SET paused = ?1 WHERE room_id = ?2",
        params![paused as i64, room_id],
    )?)
}

pub fn delete_schedule(conn: &Connection, room_id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM linens WHERE room_id = ?1", [room_id])?)
}

// ---------------------------------------------------------------------------
// Change log
// ---------------------------------------------------------------------------

pub fn insert_change(
    conn: &Connection,
    room_id: i64,
    changed_at: NaiveDateTime,
    note: &str,
) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO changes_log (room_id, changed_at, note) VALUES (?1, ?2, ?3)",
    )?;
    stmt.execute(params![
        room_id,
        changed_at.format(CHANGED_AT_FORMAT).to_string(),
        note
    ])?;
    Ok(())
}

/// Change history of a room, newest first.
pub fn load_changes(conn: &Connection, room_id: i64) -> AppResult<Vec<ChangeLogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, room_id, changed_at, note FROM changes_log
         WHERE room_id = ?1
         ORDER BY changed_at DESC, id DESC",
    )?;

    let rows = stmt.query_map([room_id], |row| {
        let raw: String = row.get(2)?;
        let changed_at = NaiveDateTime::parse_from_str(&raw, CHANGED_AT_FORMAT)
            .map_err(|_| conversion_error(2, AppError::InvalidDate(raw.clone())))?;
        Ok(ChangeLogEntry {
            id: row.get(0)?,
            room_id: row.get(1)?,
            changed_at,
            note: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_changes(conn: &Connection, room_id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM changes_log WHERE room_id = ?1", [room_id])?)
}

// ---------------------------------------------------------------------------
// Room list
// ---------------------------------------------------------------------------

/// Load the rooms matching the SQL part of `query`, joined with their schedule.
/// Search and final ordering are applied by [`RoomQuery::run`].
pub fn load_room_views(conn: &Connection, query: &RoomQuery) -> AppResult<Vec<RoomView>> {
    let (where_sql, values) = query.where_clause();

    let sql = format!(
        "SELECT r.id, r.room_number, r.resident_name, r.note,
                l.last_changed, l.interval_days, l.paused
         FROM rooms r
         JOIN linens l ON l.room_id = r.id
         WHERE {where_sql}
         ORDER BY r.room_number ASC"
    );

    let today = query.today();
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        let room = Room {
            id: row.get(0)?,
            room_number: row.get(1)?,
            resident_name: non_empty(row.get(2)?),
            note: non_empty(row.get(3)?),
        };
        let schedule = LinenSchedule {
            room_id: room.id,
            last_changed: date_column(row, 4)?,
            interval_days: interval_column(row, 5)?,
            paused: row.get::<_, i64>(6)? != 0,
        };
        Ok(RoomView::build(room, schedule, today))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
