use crate::core::due::{checked_next_due, last_trackable_day};
use crate::db::pool::DbPool;
use crate::db::queries::{
    find_room_by_number, insert_change, insert_room, update_room_details, upsert_schedule,
};
use crate::errors::{AppError, AppResult};
use crate::utils::date::to_iso;
use chrono::{NaiveDate, NaiveDateTime};

/// Input of the add/update command, already parsed.
#[derive(Debug, Clone)]
pub struct RoomInput {
    pub room_number: String,
    pub resident_name: Option<String>,
    pub note: Option<String>,
    pub last_changed: NaiveDate,
    pub interval_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    pub room_id: i64,
    pub created: bool,
}

fn clean(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Create the room when its number is new, otherwise update it in place.
    /// Resident, note, last change date and interval are overwritten; the
    /// paused flag is kept.
    pub fn apply(
        pool: &mut DbPool,
        input: &RoomInput,
        now: NaiveDateTime,
    ) -> AppResult<AddOutcome> {
        //
        // 1. Validate before touching the store
        //
        let room_number = input.room_number.trim();
        if room_number.is_empty() {
            return Err(AppError::EmptyRoomNumber);
        }
        if input.interval_days == 0 {
            return Err(AppError::InvalidInterval(0));
        }
        if input.last_changed > last_trackable_day() {
            return Err(AppError::InvalidDate(to_iso(input.last_changed)));
        }
        if checked_next_due(input.last_changed, input.interval_days).is_none() {
            return Err(AppError::InvalidInterval(i64::from(input.interval_days)));
        }

        let resident = clean(&input.resident_name);
        let note = clean(&input.note);

        //
        // 2. Room + schedule + log entry, all or nothing
        //
        let tx = pool.conn.transaction()?;

        let (room_id, created) = match find_room_by_number(&tx, room_number)? {
            Some(existing) => {
                update_room_details(&tx, existing.id, resident, note)?;
                (existing.id, false)
            }
            None => (insert_room(&tx, room_number, resident, note)?, true),
        };

        upsert_schedule(&tx, room_id, input.last_changed, input.interval_days)?;

        let verb = if created { "room created" } else { "room updated" };
        insert_change(
            &tx,
            room_id,
            now,
            &format!(
                "{} (last changed {}, every {} days)",
                verb,
                to_iso(input.last_changed),
                input.interval_days
            ),
        )?;

        tx.commit()?;

        Ok(AddOutcome { room_id, created })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn now() -> NaiveDateTime {
        d("2024-05-10").and_hms_opt(8, 0, 0).unwrap()
    }

    fn input(last: &str, interval: u32) -> RoomInput {
        RoomInput {
            room_number: "9".into(),
            resident_name: None,
            note: None,
            last_changed: d(last),
            interval_days: interval,
        }
    }

    fn rooms(pool: &DbPool) -> i64 {
        pool.conn
            .query_row("SELECT COUNT(*) FROM rooms", [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn interval_past_year_9999_is_rejected() {
        let mut pool = DbPool::in_memory().unwrap();

        let err = AddLogic::apply(&mut pool, &input("2024-05-01", 4_000_000_000), now()).unwrap_err();
        assert!(matches!(err, AppError::InvalidInterval(4_000_000_000)));

        let err = AddLogic::apply(&mut pool, &input("9999-12-31", 14), now()).unwrap_err();
        assert!(matches!(err, AppError::InvalidInterval(14)));
        assert_eq!(rooms(&pool), 0);
    }

    #[test]
    fn schedule_ending_on_the_last_day_is_accepted() {
        let mut pool = DbPool::in_memory().unwrap();
        AddLogic::apply(&mut pool, &input("9999-12-17", 14), now()).unwrap();
        assert_eq!(rooms(&pool), 1);
    }
}
