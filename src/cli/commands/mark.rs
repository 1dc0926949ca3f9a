use crate::cli::commands::view::print_room_line;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::core::schedule::ScheduleLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date;

/// Handle the `mark` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Mark {
        room,
        date: date_arg,
        yesterday,
    } = cmd
    {
        let now = date::now();
        let today = now.date();

        // Parse before opening the store so bad input never touches it.
        let on = match (date_arg, *yesterday) {
            (Some(s), _) => Some(date::parse_date_arg(s)?),
            (None, true) => Some(date::yesterday(today)),
            (None, false) => None,
        };

        let mut pool = DbPool::open(&cfg.database_path())?;
        let target = ListLogic::find_room(&pool, room)?;

        let schedule = match on {
            Some(d) => ScheduleLogic::mark_on_date(&mut pool, target.id, d, now)?,
            None => ScheduleLogic::mark_today(&mut pool, target.id, now)?,
        };

        success(format!(
            "Linens of room {} marked as changed on {}.",
            target.room_number,
            date::to_iso(schedule.last_changed)
        ));
        print_room_line(&ListLogic::room_view(&pool, target, today)?, today);
    }

    Ok(())
}
