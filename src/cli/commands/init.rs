use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with every pending migration
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    println!("⚙️  Initializing linentrack…");

    if cli.test {
        println!("📄 Config file : (test mode, not written)");
    } else {
        let path = cfg.save()?;
        println!("📄 Config file : {}", path.display());
    }

    let db_path = cfg.database_path();
    println!("🗄️  Database   : {}", db_path.display());

    let pool = DbPool::open(&db_path)?;

    if let Err(e) = oplog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path.display()),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success(format!("Database initialized at {}", db_path.display()));
    Ok(())
}
