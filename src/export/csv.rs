use crate::errors::{AppError, AppResult};
use crate::export::model::DueListRow;
use csv::{QuoteStyle, WriterBuilder};

pub const CSV_HEADER: [&str; 5] = ["Room", "Interval", "LastChanged", "NextDue", "Note"];

/// The list is written without quoting, so delimiter and line breaks inside
/// a value become plain spaces.
fn flatten(value: &str) -> String {
    value.replace([',', '\r', '\n'], " ")
}

/// Render the daily list as CSV text (header + one line per room).
pub fn render_csv(rows: &[DueListRow]) -> AppResult<String> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;

    for r in rows {
        wtr.write_record([
            flatten(&r.room),
            r.interval.to_string(),
            r.last_changed.clone(),
            r.next_due.clone(),
            flatten(&r.note),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Export(format!("CSV encoding error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(room: &str, note: &str) -> DueListRow {
        DueListRow {
            room: room.into(),
            interval: 14,
            last_changed: "2024-03-01".into(),
            next_due: "2024-03-15".into(),
            resident: String::new(),
            note: note.into(),
        }
    }

    #[test]
    fn header_and_rows_without_quotes() {
        let out = render_csv(&[row("101", "window side, extra pillow"), row("102", "")]).unwrap();
        assert_eq!(
            out,
            "Room,Interval,LastChanged,NextDue,Note\n\
             101,14,2024-03-01,2024-03-15,window side  extra pillow\n\
             102,14,2024-03-01,2024-03-15,\n"
        );
    }

    #[test]
    fn empty_list_is_just_the_header() {
        assert_eq!(render_csv(&[]).unwrap(), "Room,Interval,LastChanged,NextDue,Note\n");
    }
}
