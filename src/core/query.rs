//! Room list query: filter, search and ordering.
//!
//! The due filter is an explicit enum mapped to SQL fragments with bound
//! parameters; the free-text search never reaches the SQL text. It is
//! matched in Rust so that case folding also works for non-ASCII names,
//! which SQLite's `LIKE` does not fold.

use crate::core::due::week_end;
use crate::db::queries::load_room_views;
use crate::errors::AppResult;
use crate::models::{DueStatus, RoomView};
use crate::utils::date::to_iso;
use chrono::NaiveDate;
use clap::ValueEnum;
use rusqlite::Connection;
use std::cmp::Ordering;

/// `last_changed + interval_days`, computed by SQLite.
const NEXT_DUE_SQL: &str = "date(l.last_changed, '+' || l.interval_days || ' days')";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RoomFilter {
    /// Every room, paused ones included
    #[default]
    All,
    /// Unpaused rooms due exactly today
    Today,
    /// Unpaused rooms whose next change is in the past
    Overdue,
    /// Unpaused rooms due between today and six days from now
    Week,
}

impl RoomFilter {
    pub fn label(&self) -> &'static str {
        match self {
            RoomFilter::All => "all rooms",
            RoomFilter::Today => "due today",
            RoomFilter::Overdue => "overdue",
            RoomFilter::Week => "due this week",
        }
    }

    /// Same predicate as the SQL fragment, evaluated on a derived view.
    pub fn accepts(&self, view: &RoomView, today: NaiveDate) -> bool {
        match self {
            RoomFilter::All => true,
            _ if view.paused => false,
            RoomFilter::Today => view.next_due == today,
            RoomFilter::Overdue => view.next_due < today,
            RoomFilter::Week => view.next_due >= today && view.next_due <= week_end(today),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RoomQuery {
    filter: RoomFilter,
    search: Option<String>,
    today: NaiveDate,
}

impl RoomQuery {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            filter: RoomFilter::All,
            search: None,
            today,
        }
    }

    pub fn filter(mut self, filter: RoomFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Case-insensitive substring over room number, resident and note.
    /// A blank term matches everything.
    pub fn search<S: AsRef<str>>(mut self, term: S) -> Self {
        let t = term.as_ref().trim();
        self.search = if t.is_empty() {
            None
        } else {
            Some(t.to_lowercase())
        };
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn current_filter(&self) -> RoomFilter {
        self.filter
    }

    /// WHERE clause for the due filter and its positional parameters.
    pub(crate) fn where_clause(&self) -> (String, Vec<String>) {
        let today = to_iso(self.today);
        match self.filter {
            RoomFilter::All => ("1=1".to_string(), Vec::new()),
            RoomFilter::Today => (
                format!("l.paused = 0 AND {NEXT_DUE_SQL} = date(?)"),
                vec![today],
            ),
            RoomFilter::Overdue => (
                format!("l.paused = 0 AND {NEXT_DUE_SQL} < date(?)"),
                vec![today],
            ),
            RoomFilter::Week => (
                format!("l.paused = 0 AND {NEXT_DUE_SQL} BETWEEN date(?) AND date(?)"),
                vec![today, to_iso(week_end(self.today))],
            ),
        }
    }

    pub fn matches_search(&self, view: &RoomView) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        [
            Some(view.room_number.as_str()),
            view.resident_name.as_deref(),
            view.note.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(term.as_str()))
    }

    /// Run the query against the store and return the ordered rows.
    pub fn run(&self, conn: &Connection) -> AppResult<Vec<RoomView>> {
        let mut rows: Vec<RoomView> = load_room_views(conn, self)?
            .into_iter()
            .filter(|v| self.filter.accepts(v, self.today) && self.matches_search(v))
            .collect();
        sort_views(&mut rows);
        Ok(rows)
    }
}

/// Overdue first (most overdue on top), then by next due date, then by room
/// number. Room numbers are unique, so this is a strict total order.
pub fn compare_views(a: &RoomView, b: &RoomView) -> Ordering {
    let a_late = a.status == DueStatus::Overdue;
    let b_late = b.status == DueStatus::Overdue;
    b_late
        .cmp(&a_late)
        .then_with(|| a.next_due.cmp(&b.next_due))
        .then_with(|| a.room_number.cmp(&b.room_number))
}

pub fn sort_views(rows: &mut [RoomView]) {
    rows.sort_by(compare_views);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinenSchedule, Room};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn view(num: &str, last: &str, interval: u32, paused: bool, today: NaiveDate) -> RoomView {
        RoomView::build(
            Room {
                id: 1,
                room_number: num.to_string(),
                resident_name: Some("Åse Ødegård".to_string()),
                note: Some("Allergic, use hypoallergenic linen".to_string()),
            },
            LinenSchedule {
                room_id: 1,
                last_changed: d(last),
                interval_days: interval,
                paused,
            },
            today,
        )
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let today = d("2024-03-10");
        let v = view("B-204", "2024-03-01", 14, false, today);

        assert!(RoomQuery::new(today).search("b-2").matches_search(&v));
        assert!(RoomQuery::new(today).search("ØDEGÅRD").matches_search(&v));
        assert!(RoomQuery::new(today).search("HYPOALLERGENIC").matches_search(&v));
        assert!(RoomQuery::new(today).search("   ").matches_search(&v));
        assert!(!RoomQuery::new(today).search("305").matches_search(&v));
    }

    #[test]
    fn search_term_is_not_part_of_the_sql() {
        let q = RoomQuery::new(d("2024-03-10"))
            .filter(RoomFilter::Week)
            .search("'; DROP TABLE rooms; --");
        let (sql, params) = q.where_clause();
        assert!(!sql.contains("DROP"));
        assert_eq!(params, vec!["2024-03-10".to_string(), "2024-03-16".to_string()]);
    }

    #[test]
    fn ordering_puts_overdue_first_then_next_due_then_number() {
        let today = d("2024-03-10");
        let mut rows = vec![
            view("300", "2024-03-05", 14, false, today), // due 03-19
            view("101", "2024-02-20", 14, false, today), // due 03-05, overdue
            view("200", "2024-03-05", 14, false, today), // due 03-19
            view("102", "2024-02-25", 14, false, today), // due 03-10, today
            view("050", "2024-02-10", 14, false, today), // due 02-24, overdue
        ];
        sort_views(&mut rows);
        let order: Vec<&str> = rows.iter().map(|r| r.room_number.as_str()).collect();
        assert_eq!(order, vec!["050", "101", "102", "200", "300"]);
    }

    #[test]
    fn paused_rows_only_pass_the_all_filter() {
        let today = d("2024-03-10");
        let v = view("1", "2024-02-25", 14, true, today); // would be due today
        assert!(RoomFilter::All.accepts(&v, today));
        for f in [RoomFilter::Today, RoomFilter::Overdue, RoomFilter::Week] {
            assert!(!f.accepts(&v, today));
        }
    }
}
