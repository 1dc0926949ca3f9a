//! Daily due list export (CSV for printing, JSON for other tools).

mod csv;
pub mod fs_utils;
mod json;
pub mod logic;
mod model;

pub use self::csv::{CSV_HEADER, render_csv};
pub use json::render_json;
pub use logic::{DueList, ExportLogic};
pub use model::DueListRow;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path, rows: usize) {
    success(format!(
        "{label} export completed ({rows} room(s)): {}",
        path.display()
    ));
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}
