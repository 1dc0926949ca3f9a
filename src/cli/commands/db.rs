use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};
use crate::utils::date;

fn step(label: &str) {
    println!("{CYAN}▶ {label}…{RESET}");
}

fn done(msg: &str) {
    println!("{GREEN}✔ {msg}{RESET}\n");
}

/// Maintenance of the store. Flags run in a fixed order: migrate, info,
/// check, vacuum.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    else {
        return Ok(());
    };

    let db_path = cfg.database_path();

    // Opening the pool already migrates; `--migrate` reports what is left.
    let pool = DbPool::open(&db_path)?;

    if *migrate {
        step("Checking schema migrations");
        let report = run_pending_migrations(&pool.conn)?;
        if report.applied.is_empty() {
            done(&format!("Schema is at version {}.", report.to));
        } else {
            done(&format!(
                "Schema v{} → v{} ({})",
                report.from,
                report.to,
                report.applied.join(", ")
            ));
        }
    }

    if *info {
        stats::print_db_info(&pool, &db_path, date::today())?;
    }

    if *check {
        step("Running integrity check");
        let verdict: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
        if verdict == "ok" {
            done("Integrity check passed.");
        } else {
            println!("{RED}✘ Integrity check failed:{RESET} {verdict}\n");
        }
    }

    if *vacuum {
        step("Compacting the database (VACUUM)");
        pool.conn.execute_batch("VACUUM;")?;
        done("Vacuum completed.");
    }

    Ok(())
}
