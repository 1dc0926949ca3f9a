//! Shared room rendering for the list and for the feedback after a mutation.

use crate::models::RoomView;
use crate::utils::colors::{color_for_status, colorize_optional, paint};
use crate::utils::date::{relative_label, to_iso};
use crate::utils::table::truncate;
use chrono::NaiveDate;

const NOTE_MAX: usize = 40;

pub const LIST_HEADERS: [&str; 8] = [
    "Room", "Resident", "Last", "Every", "Next due", "", "Status", "Note",
];

/// One table row for `list`.
pub fn room_row(view: &RoomView, today: NaiveDate) -> Vec<String> {
    let color = color_for_status(view.status);
    let when = if view.paused {
        String::new()
    } else {
        relative_label(view.next_due, today)
    };

    vec![
        view.room_number.clone(),
        colorize_optional(view.resident_or_empty()),
        to_iso(view.last_changed),
        format!("{}d", view.interval_days),
        paint(&to_iso(view.next_due), color),
        when,
        paint(view.status.label(), color),
        colorize_optional(&truncate(view.note_or_empty(), NOTE_MAX)),
    ]
}

/// Single line printed after add/mark/postpone/pause.
pub fn print_room_line(view: &RoomView, today: NaiveDate) {
    let color = color_for_status(view.status);
    let mut line = format!(
        "Room {}: last changed {}, every {} days, next due {}",
        view.room_number,
        to_iso(view.last_changed),
        view.interval_days,
        paint(&to_iso(view.next_due), color),
    );
    if view.paused {
        line.push_str(&format!(" [{}]", paint("paused", color)));
    } else {
        line.push_str(&format!(" ({})", relative_label(view.next_due, today)));
    }
    println!("{line}");
}
