// src/error.rs
use thiserror::Error;

/// Boxed transport error raised by a [`LogStore`](crate::store::LogStore) implementation
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum LogDataError {
    #[error("Malformed record {record:?}: {reason}")]
    RecordFormat { record: String, reason: String },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Incompatible units: {left} vs {right}")]
    IncompatibleUnit { left: String, right: String },

    #[error("Unsupported unit: {0:?}")]
    UnsupportedUnit(String),

    #[error("Invalid cast: value is {found}, requested {expected}")]
    TypeCast { expected: String, found: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Remote store error: {0}")]
    Store(#[source] StoreError),

    #[error("Cursor failed earlier: {0}")]
    CursorFailed(String),

    #[error("Store returned a full page of {rows} rows without advancing past {after}")]
    StalledFetch { after: String, rows: usize },
}

impl LogDataError {
    pub(crate) fn record_format(record: &str, reason: impl Into<String>) -> Self {
        LogDataError::RecordFormat {
            record: record.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn type_mismatch(expected: impl ToString, found: impl ToString) -> Self {
        LogDataError::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LogDataError>;
