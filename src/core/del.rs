use crate::db::log::oplog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_changes, delete_room_row, delete_schedule, find_room_by_id};
use crate::errors::{AppError, AppResult};
use crate::models::Room;

/// Row counts removed by a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedRoom {
    pub room: Room,
    pub changes: usize,
    pub schedules: usize,
}

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove the change log, the schedule and the room itself in one
    /// transaction. Any failure rolls all three back.
    pub fn apply(pool: &mut DbPool, room_id: i64) -> AppResult<DeletedRoom> {
        let tx = pool.conn.transaction()?;

        let room = find_room_by_id(&tx, room_id)?
            .ok_or_else(|| AppError::RoomNotFound(format!("id {room_id}")))?;

        let changes = delete_changes(&tx, room_id)?;
        let schedules = delete_schedule(&tx, room_id)?;
        if delete_room_row(&tx, room_id)? != 1 {
            // dropping `tx` rolls back
            return Err(AppError::RoomNotFound(room.room_number));
        }

        tx.commit()?;

        oplog_quiet(
            &pool.conn,
            "del",
            &room.room_number,
            &format!("Deleted room with {} change log entries", changes),
        );

        Ok(DeletedRoom {
            room,
            changes,
            schedules,
        })
    }
}
