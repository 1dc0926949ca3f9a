use crate::cli::commands::view::{LIST_HEADERS, room_row};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::{ListLogic, ListSummary};
use crate::core::query::{RoomFilter, RoomQuery};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, GREY, RED, RESET, YELLOW};
use crate::utils::date;
use crate::utils::table::Table;

/// Handle the `list` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { filter, search } = cmd {
        let today = date::today();

        let mut query = RoomQuery::new(today).filter(*filter);
        if let Some(term) = search {
            query = query.search(term);
        }

        let pool = DbPool::open(&cfg.database_path())?;
        let rows = ListLogic::rooms(&pool, &query)?;

        header(format!(
            "Rooms ({}) on {}",
            query.current_filter().label(),
            date::to_iso(today)
        ));

        if rows.is_empty() {
            if *filter == RoomFilter::All && search.is_none() {
                info("No rooms yet. Add one with `linentrack add <room>`.");
            } else {
                info("No rooms match.");
            }
            return Ok(());
        }

        let mut table = Table::new(LIST_HEADERS.to_vec());
        for view in &rows {
            table.add_row(room_row(view, today));
        }
        print!("{}", table.render());

        let s = ListSummary::of(&rows);
        println!();
        println!(
            "{} room(s): {}{} overdue{}, {}{} due today{}, {}{} this week{}, {}{} paused{}",
            s.total,
            RED,
            s.overdue,
            RESET,
            YELLOW,
            s.due_today,
            RESET,
            CYAN,
            s.due_this_week,
            RESET,
            GREY,
            s.paused,
            RESET
        );
    }

    Ok(())
}
