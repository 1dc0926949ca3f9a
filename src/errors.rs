//! Unified application error type.
//! Every layer (db, core, export, cli) returns AppError so that a failed
//! command ends with one readable message instead of a panic.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Room number must not be empty")]
    EmptyRoomNumber,

    #[error("Invalid interval: {0} (must be at least 1 day)")]
    InvalidInterval(i64),

    #[error("Invalid postpone value: {0} (must be at least 1 day)")]
    InvalidPostpone(i64),

    #[error("Date {0} is in the future")]
    FutureDate(String),

    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Room not found: {0}")]
    RoomNotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Validation errors are rejected before anything touches the store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::EmptyRoomNumber
                | AppError::InvalidInterval(_)
                | AppError::InvalidPostpone(_)
                | AppError::FutureDate(_)
                | AppError::InvalidDate(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
