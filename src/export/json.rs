use crate::errors::AppResult;
use crate::export::model::DueListRow;

/// Render the daily list as a pretty-printed JSON array.
pub fn render_json(rows: &[DueListRow]) -> AppResult<String> {
    let mut out = serde_json::to_string_pretty(rows)?;
    out.push('\n');
    Ok(out)
}
