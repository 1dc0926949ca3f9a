use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::fs_utils::confirm;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { room, yes } = cmd {
        let mut pool = DbPool::open(&cfg.database_path())?;
        let target = ListLogic::find_room(&pool, room)?;

        //
        // Confirmation prompt
        //
        let prompt = format!(
            "Delete room {} with its schedule and change history? This action is irreversible.",
            target.room_number
        );
        if !*yes && !confirm(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        let deleted = DeleteLogic::apply(&mut pool, target.id)?;
        success(format!(
            "Room {} deleted ({} change log entries removed).",
            deleted.room.room_number, deleted.changes
        ));
    }

    Ok(())
}
