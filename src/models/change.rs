use chrono::NaiveDateTime;
use serde::Serialize;

/// Storage format of `changes_log.changed_at`.
pub const CHANGED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the append-only change history of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeLogEntry {
    pub id: i64,
    pub room_id: i64,
    pub changed_at: NaiveDateTime,
    pub note: String,
}
