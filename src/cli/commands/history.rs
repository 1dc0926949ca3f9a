use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::change::CHANGED_AT_FORMAT;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;

/// Handle the `history` command, newest entry first
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { room } = cmd {
        let pool = DbPool::open(&cfg.database_path())?;
        let target = ListLogic::find_room(&pool, room)?;
        let entries = ListLogic::history(&pool, target.id)?;

        header(format!("History of room {}", target.room_number));

        if entries.is_empty() {
            info("No changes recorded yet.");
            return Ok(());
        }

        let mut table = Table::new(vec!["When", "Entry"]);
        for e in &entries {
            table.add_row(vec![
                e.changed_at.format(CHANGED_AT_FORMAT).to_string(),
                e.note.clone(),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
