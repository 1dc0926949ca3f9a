use crate::core::query::RoomQuery;
use crate::db::pool::DbPool;
use crate::db::queries::{find_room_by_number, load_changes, load_schedule};
use crate::errors::{AppError, AppResult};
use crate::models::{ChangeLogEntry, DueStatus, Room, RoomView};
use chrono::NaiveDate;

/// Per-status counts shown under the room list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListSummary {
    pub total: usize,
    pub overdue: usize,
    pub due_today: usize,
    pub due_this_week: usize,
    pub paused: usize,
}

impl ListSummary {
    pub fn of(rows: &[RoomView]) -> Self {
        let mut s = ListSummary {
            total: rows.len(),
            ..Default::default()
        };
        for r in rows {
            match r.status {
                DueStatus::Overdue => s.overdue += 1,
                DueStatus::DueToday => s.due_today += 1,
                DueStatus::DueThisWeek => s.due_this_week += 1,
                DueStatus::Paused => s.paused += 1,
                DueStatus::Scheduled => {}
            }
        }
        s
    }
}

/// Read side used by the CLI after every command.
pub struct ListLogic;

impl ListLogic {
    pub fn rooms(pool: &DbPool, query: &RoomQuery) -> AppResult<Vec<RoomView>> {
        query.run(&pool.conn)
    }

    /// Resolve a room number typed by the user.
    pub fn find_room(pool: &DbPool, room_number: &str) -> AppResult<Room> {
        let number = room_number.trim();
        if number.is_empty() {
            return Err(AppError::EmptyRoomNumber);
        }
        find_room_by_number(&pool.conn, number)?
            .ok_or_else(|| AppError::RoomNotFound(number.to_string()))
    }

    /// Fresh view of one room, as stored right now.
    pub fn room_view(pool: &DbPool, room: Room, today: NaiveDate) -> AppResult<RoomView> {
        let schedule = load_schedule(&pool.conn, room.id)?
            .ok_or_else(|| AppError::RoomNotFound(room.room_number.clone()))?;
        Ok(RoomView::build(room, schedule, today))
    }

    pub fn history(pool: &DbPool, room_id: i64) -> AppResult<Vec<ChangeLogEntry>> {
        load_changes(&pool.conn, room_id)
    }
}
