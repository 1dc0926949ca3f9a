//! Date helpers: parsing user input, "today", human readable offsets.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate, NaiveDateTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn yesterday(today: NaiveDate) -> NaiveDate {
    today.pred_opt().unwrap_or(today)
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parse a `YYYY-MM-DD` argument or fail with `InvalidDate`.
pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn to_iso(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// "3 days overdue", "due today", "in 5 days".
pub fn relative_label(next_due: NaiveDate, today: NaiveDate) -> String {
    let diff = (next_due - today).num_days();
    match diff {
        0 => "due today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "1 day overdue".to_string(),
        d if d < 0 => format!("{} days overdue", -d),
        d => format!("in {} days", d),
    }
}
