use crate::models::RoomView;
use crate::utils::date::to_iso;
use serde::Serialize;

/// Flat row of the daily list, shared by every export format.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DueListRow {
    pub room: String,
    pub interval: u32,
    pub last_changed: String,
    pub next_due: String,
    pub resident: String,
    pub note: String,
}

impl From<&RoomView> for DueListRow {
    fn from(v: &RoomView) -> Self {
        Self {
            room: v.room_number.clone(),
            interval: v.interval_days,
            last_changed: to_iso(v.last_changed),
            next_due: to_iso(v.next_due),
            resident: v.resident_or_empty().to_string(),
            note: v.note_or_empty().to_string(),
        }
    }
}
