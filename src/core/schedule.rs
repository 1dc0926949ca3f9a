//! Schedule state transitions: mark changed, postpone, pause.
//!
//! Every transition appends a change-log entry in the same transaction
//! that updates `linens`.

use crate::core::due::{checked_next_due, shift_forward};
use crate::db::pool::DbPool;
use crate::db::queries::{insert_change, load_schedule, set_last_changed, set_paused};
use crate::errors::{AppError, AppResult};
use crate::models::LinenSchedule;
use crate::utils::date::to_iso;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;

fn require_schedule(conn: &Connection, room_id: i64) -> AppResult<LinenSchedule> {
    load_schedule(conn, room_id)?.ok_or_else(|| AppError::RoomNotFound(format!("id {room_id}")))
}

pub struct ScheduleLogic;

impl ScheduleLogic {
    /// Linens were changed today.
    pub fn mark_today(
        pool: &mut DbPool,
        room_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<LinenSchedule> {
        Self::set_changed(pool, room_id, now.date(), now, "changed today".to_string())
    }

    /// Linens were changed on an earlier day. Future dates are refused.
    pub fn mark_on_date(
        pool: &mut DbPool,
        room_id: i64,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> AppResult<LinenSchedule> {
        if date > now.date() {
            return Err(AppError::FutureDate(to_iso(date)));
        }
        let note = if date == now.date() {
            "changed today".to_string()
        } else {
            format!("changed on {}", to_iso(date))
        };
        Self::set_changed(pool, room_id, date, now, note)
    }

    fn set_changed(
        pool: &mut DbPool,
        room_id: i64,
        date: NaiveDate,
        now: NaiveDateTime,
        note: String,
    ) -> AppResult<LinenSchedule> {
        let tx = pool.conn.transaction()?;

        let mut schedule = require_schedule(&tx, room_id)?;
        if checked_next_due(date, schedule.interval_days).is_none() {
            return Err(AppError::InvalidInterval(i64::from(schedule.interval_days)));
        }
        set_last_changed(&tx, room_id, date)?;
        insert_change(&tx, room_id, now, &note)?;

        tx.commit()?;

        schedule.last_changed = date;
        Ok(schedule)
    }

    /// Push the next change `days` forward without recording a change.
    pub fn postpone(
        pool: &mut DbPool,
        room_id: i64,
        days: u32,
        now: NaiveDateTime,
    ) -> AppResult<LinenSchedule> {
        if days == 0 {
            return Err(AppError::InvalidPostpone(0));
        }

        let tx = pool.conn.transaction()?;

        let mut schedule = require_schedule(&tx, room_id)?;
        schedule.last_changed = shift_forward(schedule.last_changed, days)
            .filter(|d| checked_next_due(*d, schedule.interval_days).is_some())
            .ok_or(AppError::InvalidPostpone(i64::from(days)))?;
        set_last_changed(&tx, room_id, schedule.last_changed)?;
        insert_change(
            &tx,
            room_id,
            now,
            &format!(
                "postponed {} days (next due {})",
                days,
                to_iso(schedule.next_due())
            ),
        )?;

        tx.commit()?;

        Ok(schedule)
    }

    /// Flip the paused flag and return the new schedule.
    pub fn toggle_pause(
        pool: &mut DbPool,
        room_id: i64,
        now: NaiveDateTime,
    ) -> AppResult<LinenSchedule> {
        let tx = pool.conn.transaction()?;

        let mut schedule = require_schedule(&tx, room_id)?;
        schedule.paused = !schedule.paused;
        set_paused(&tx, room_id, schedule.paused)?;
        insert_change(
            &tx,
            room_id,
            now,
            if schedule.paused {
                "tracking paused"
            } else {
                "tracking resumed"
            },
        )?;

        tx.commit()?;

        Ok(schedule)
    }
}
