//! Unified application error type.
//! CLI handlers, config, journal and runtime all return AppError so the
//! binary has a single place to report failures.

use crate::backend::BackendError;
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
    // Journal (SQLite)
    // ---------------------------
    #[error("Journal error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Journal migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Configuration file not found: {0}")]
    ConfigMissing(String),

    #[error("Invalid API base URL: {0}")]
    InvalidApiUrl(String),

    // ---------------------------
    // Backend
    // ---------------------------
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
