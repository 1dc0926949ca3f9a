/// ANSI color helper utilities for terminal output.
use crate::models::DueStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_status(status: DueStatus) -> &'static str {
    match status {
        DueStatus::Overdue => RED,
        DueStatus::DueToday => YELLOW,
        DueStatus::DueThisWeek => CYAN,
        DueStatus::Scheduled => GREEN,
        DueStatus::Paused => GREY,
    }
}

pub fn paint(value: &str, color: &str) -> String {
    format!("{color}{value}{RESET}")
}

/// Grey out empty optional fields so that columns stay readable.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        paint("--", GREY)
    } else {
        value.to_string()
    }
}
