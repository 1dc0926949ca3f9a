use crate::cli::commands::view::print_room_line;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, RoomInput};
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use crate::utils::date;

/// Interval typed by the user. Missing or unreadable input falls back to the
/// configured default; a readable number below 1 is an error.
pub fn resolve_interval(raw: Option<&str>, default_days: u32) -> AppResult<u32> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(default_days);
    };

    match raw.parse::<i64>() {
        Ok(n) if n < 1 => Err(AppError::InvalidInterval(n)),
        Ok(n) => u32::try_from(n).map_err(|_| AppError::InvalidInterval(n)),
        Err(_) => {
            warning(format!(
                "Interval '{}' is not a number, using {} days",
                raw, default_days
            ));
            Ok(default_days)
        }
    }
}

/// Handle the `add` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        room,
        resident,
        note,
        last,
        interval,
    } = cmd
    {
        let now = date::now();

        let last_changed = match last {
            Some(s) => date::parse_date_arg(s)?,
            None => now.date(),
        };

        let input = RoomInput {
            room_number: room.clone(),
            resident_name: resident.clone(),
            note: note.clone(),
            last_changed,
            interval_days: resolve_interval(interval.as_deref(), cfg.default_interval_days)?,
        };

        let mut pool = DbPool::open(&cfg.database_path())?;
        let outcome = AddLogic::apply(&mut pool, &input, now)?;

        if outcome.created {
            success(format!("Room {} added.", input.room_number.trim()));
        } else {
            success(format!("Room {} updated.", input.room_number.trim()));
        }

        let stored = ListLogic::find_room(&pool, &input.room_number)?;
        print_room_line(&ListLogic::room_view(&pool, stored, now.date())?, now.date());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_defaults_when_missing_or_unreadable() {
        assert_eq!(resolve_interval(None, 14).unwrap(), 14);
        assert_eq!(resolve_interval(Some("  "), 14).unwrap(), 14);
        assert_eq!(resolve_interval(Some("weekly"), 14).unwrap(), 14);
        assert_eq!(resolve_interval(Some("7"), 14).unwrap(), 7);
    }

    #[test]
    fn interval_below_one_is_rejected() {
        assert!(matches!(
            resolve_interval(Some("0"), 14),
            Err(AppError::InvalidInterval(0))
        ));
        assert!(matches!(
            resolve_interval(Some("-3"), 14),
            Err(AppError::InvalidInterval(-3))
        ));
    }
}
