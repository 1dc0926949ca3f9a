use crate::core::due;
use crate::models::status::DueStatus;
use chrono::NaiveDate;
use serde::Serialize;

/// A trackable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub id: i64,
    pub room_number: String,         // ⇔ rooms.room_number (UNIQUE, non-empty)
    pub resident_name: Option<String>, // ⇔ rooms.resident_name
    pub note: Option<String>,        // ⇔ rooms.note
}

/// Due-date tracking state, exactly one per room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinenSchedule {
    pub room_id: i64,
    pub last_changed: NaiveDate, // ⇔ linens.last_changed (TEXT "YYYY-MM-DD")
    pub interval_days: u32,      // ⇔ linens.interval_days (>= 1)
    pub paused: bool,            // ⇔ linens.paused (0/1)
}

impl LinenSchedule {
    pub fn next_due(&self) -> NaiveDate {
        due::next_due(self.last_changed, self.interval_days)
    }

    pub fn status_on(&self, today: NaiveDate) -> DueStatus {
        due::classify(self.last_changed, self.interval_days, self.paused, today)
    }
}

/// A room joined with its schedule and the values derived for one day.
/// This is what the list, the exports and the CLI print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomView {
    pub id: i64,
    pub room_number: String,
    pub resident_name: Option<String>,
    pub note: Option<String>,
    pub last_changed: NaiveDate,
    pub interval_days: u32,
    pub paused: bool,
    pub next_due: NaiveDate,
    pub status: DueStatus,
}

impl RoomView {
    pub fn build(room: Room, schedule: LinenSchedule, today: NaiveDate) -> Self {
        Self {
            id: room.id,
            room_number: room.room_number,
            resident_name: room.resident_name,
            note: room.note,
            last_changed: schedule.last_changed,
            interval_days: schedule.interval_days,
            paused: schedule.paused,
            next_due: schedule.next_due(),
            status: schedule.status_on(today),
        }
    }

    pub fn note_or_empty(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }

    pub fn resident_or_empty(&self) -> &str {
        self.resident_name.as_deref().unwrap_or("")
    }
}
