use crate::cli::commands::view::print_room_line;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::core::schedule::ScheduleLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date;

/// Handle the `pause` command (toggles)
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Pause { room } = cmd {
        let now = date::now();

        let mut pool = DbPool::open(&cfg.database_path())?;
        let target = ListLogic::find_room(&pool, room)?;
        let schedule = ScheduleLogic::toggle_pause(&mut pool, target.id, now)?;

        if schedule.paused {
            success(format!("Tracking paused for room {}.", target.room_number));
        } else {
            success(format!("Tracking resumed for room {}.", target.room_number));
        }
        print_room_line(&ListLogic::room_view(&pool, target, now.date())?, now.date());
    }

    Ok(())
}
