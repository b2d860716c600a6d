//! Error types for haulboard

use chrono::NaiveDate;
use thiserror::Error;

use crate::RecordKind;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Environment variable {0} is not set")]
    MissingSecret(String),

    #[error("Backend is not initialized")]
    NotInitialized,
}

/// Record store fetch failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Failed to load {kind}: {reason}")]
    Unavailable { kind: RecordKind, reason: String },

    #[error("Loading {kind} timed out after {timeout_ms} ms")]
    TimedOut { kind: RecordKind, timeout_ms: u64 },

    #[error("Loading {kind} was cancelled")]
    Cancelled { kind: RecordKind },
}

impl FetchError {
    pub fn kind(&self) -> RecordKind {
        match self {
            FetchError::Unavailable { kind, .. }
            | FetchError::TimedOut { kind, .. }
            | FetchError::Cancelled { kind } => *kind,
        }
    }

    /// The cause without the record kind prefix
    pub fn reason(&self) -> String {
        match self {
            FetchError::Unavailable { reason, .. } => reason.clone(),
            FetchError::TimedOut { timeout_ms, .. } => format!("timed out after {} ms", timeout_ms),
            FetchError::Cancelled { .. } => "cancelled".to_string(),
        }
    }
}

/// Filter and paging input rejected before the pipeline runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Start date {start} must be before end date {end}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid {field} date: '{input}'")]
    InvalidDate { field: &'static str, input: String },

    #[error("Page size must be at least 1")]
    ZeroPageSize,

    #[error("Unknown status '{0}'")]
    UnknownStatus(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("No {kind} record with id '{id}'")]
    NotFound { kind: RecordKind, id: String },

    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

impl Error {
    pub fn not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
