use crate::cli::commands::view::print_room_line;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::core::schedule::ScheduleLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date;

/// Handle the `postpone` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Postpone { room, days } = cmd {
        let now = date::now();
        let days = days.unwrap_or(cfg.postpone_days);

        let mut pool = DbPool::open(&cfg.database_path())?;
        let target = ListLogic::find_room(&pool, room)?;
        let schedule = ScheduleLogic::postpone(&mut pool, target.id, days, now)?;

        success(format!(
            "Room {} postponed by {} day(s), next change {}.",
            target.room_number,
            days,
            date::to_iso(schedule.next_due())
        ));
        print_room_line(&ListLogic::room_view(&pool, target, now.date())?, now.date());
    }

    Ok(())
}
