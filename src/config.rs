// src/config.rs
use crate::error::{LogDataError, Result};
use crate::record::DEFAULT_DELIMITER;
use serde::{Deserialize, Serialize};

/// Caller-side limits and formatting for reads and writes
///
/// Row limits are upper bounds: the store's own limit always wins when it
/// is smaller.
///
/// ```
/// use welllog_rs::TransferOptions;
///
/// let options = TransferOptions::default().with_max_rows(500);
/// assert_eq!(options.effective_max_rows(10_000).unwrap(), 500);
/// assert_eq!(options.effective_max_rows(200).unwrap(), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferOptions {
    pub max_rows: Option<usize>,
    pub delimiter: char,
    pub write_chunk_size: Option<usize>,
}

impl Default for TransferOptions {
    fn default() -> Self {
        TransferOptions {
            max_rows: None,
            delimiter: DEFAULT_DELIMITER,
            write_chunk_size: None,
        }
    }
}

impl TransferOptions {
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_write_chunk_size(mut self, chunk_size: usize) -> Self {
        self.write_chunk_size = Some(chunk_size);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_rows == Some(0) {
            return Err(LogDataError::InvalidArgument("max_rows must be positive".into()));
        }
        if self.write_chunk_size == Some(0) {
            return Err(LogDataError::InvalidArgument("write_chunk_size must be positive".into()));
        }
        if self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(LogDataError::InvalidArgument("delimiter cannot be a line break".into()));
        }
        Ok(())
    }

    /// Rows per read request against a store accepting `store_max_rows`
    pub fn effective_max_rows(&self, store_max_rows: usize) -> Result<usize> {
        self.validate()?;
        cap(self.max_rows, store_max_rows)
    }

    /// Rows per write request against a store accepting `store_max_rows`
    pub fn effective_write_chunk_size(&self, store_max_rows: usize) -> Result<usize> {
        self.validate()?;
        cap(self.write_chunk_size, store_max_rows)
    }
}

fn cap(requested: Option<usize>, store_max_rows: usize) -> Result<usize> {
    if store_max_rows == 0 {
        return Err(LogDataError::InvalidArgument("store reports a row limit of 0".into()));
    }
    Ok(requested.map_or(store_max_rows, |r| r.min(store_max_rows)))
}
