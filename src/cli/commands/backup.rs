use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::{BackupLogic, BackupPlan};
use crate::db::log::oplog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let db_path = cfg.database_path();

        let written = match file {
            Some(f) => {
                let dest = expand_tilde(f);
                let out = BackupLogic::backup_to_file(&db_path, &dest, *compress, *force)?;
                success(format!("Backup written to {}", out.display()));
                Some(out)
            }
            None => {
                let plan = BackupPlan::from_config(cfg);
                match BackupLogic::try_run(&plan, date::now())? {
                    Some(out) => {
                        success(format!("Backup written to {}", out.display()));
                        info(format!(
                            "Keeping the newest {} backup(s) in {}",
                            plan.retention,
                            plan.backup_dir.display()
                        ));
                        Some(out)
                    }
                    None => {
                        info(format!(
                            "Nothing to back up: {} does not exist.",
                            db_path.display()
                        ));
                        None
                    }
                }
            }
        };

        if let Some(out) = written {
            let pool = DbPool::open(&db_path)?;
            oplog_quiet(
                &pool.conn,
                "backup",
                &out.to_string_lossy(),
                "Database backup created",
            );
        }
    }

    Ok(())
}
