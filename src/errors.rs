//! Unified application error type.
//! All modules (db, core, api, cli) return AppError to keep the error
//! handling consistent and easy to manage.

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
    // Storage
    // ---------------------------
    #[error("Storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Corrupt value for setting '{key}': {value:?}")]
    CorruptValue { key: String, value: String },

    // ---------------------------
    // Input
    // ---------------------------
    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid UTC offset: {0}")]
    InvalidOffset(String),

    // ---------------------------
    // Config
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // HTTP server
    // ---------------------------
    #[error("Server error: {0}")]
    Server(String),
}

impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AppError::InvalidInput(msg.into())
    }

    /// True for errors caused by the caller's input rather than the system.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AppError::InvalidInput(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
