use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date;

/// Handle the `export` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database_path())?;
        ExportLogic::export(
            &pool,
            cfg,
            *format,
            file.as_deref(),
            *force,
            date::today(),
        )?;
    }

    Ok(())
}
