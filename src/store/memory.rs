// src/store/memory.rs
use super::{FetchRequest, LogStore, RawBatch};
use crate::error::{LogDataError, Result, StoreError};
use crate::record::{Row, DEFAULT_DELIMITER};
use crate::writer::{LogHeader, WriteBatch};
use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryStoreError {
    #[error("Unknown curve: {0}")]
    UnknownCurve(String),

    #[error("Header does not match store curves: {0:?}")]
    HeaderMismatch(Vec<String>),

    #[error("Batch of {rows} rows exceeds the store limit of {max_rows}")]
    BatchTooLarge { rows: usize, max_rows: usize },

    #[error("Injected failure on fetch #{0}")]
    InjectedFailure(usize),
}

#[derive(Default)]
struct MemoryState {
    rows: Vec<Row>,
    written: Vec<WriteBatch>,
    fetches: Vec<FetchRequest>,
    fail_on_fetch: Option<usize>,
}

/// In-process [`LogStore`] over a sorted row set
///
/// Serves the same contract as a remote store: rows are rendered to raw
/// records, responses are truncated at the row limit, and exclusive start
/// bounds are honored.
pub struct MemoryLogStore {
    header: Arc<LogHeader>,
    max_rows: usize,
    delimiter: char,
    state: Mutex<MemoryState>,
}

impl MemoryLogStore {
    pub fn new(header: LogHeader, max_rows: usize) -> Result<Self> {
        if max_rows == 0 {
            return Err(LogDataError::InvalidArgument("max_rows must be positive".into()));
        }
        Ok(MemoryLogStore {
            header: Arc::new(header),
            max_rows,
            delimiter: DEFAULT_DELIMITER,
            state: Mutex::new(MemoryState::default()),
        })
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_rows(self, rows: Vec<Row>) -> Result<Self> {
        self.insert_rows(rows)?;
        Ok(self)
    }

    pub fn header(&self) -> &LogHeader {
        &self.header
    }

    /// Add rows, keeping the set ordered by index
    pub fn insert_rows(&self, rows: Vec<Row>) -> Result<()> {
        let mut state = self.state.lock();
        let reference = state.rows.first().or(rows.first()).map(|r| r.index);
        for row in &rows {
            self.header.check_row(row)?;
            if let Some(first) = &reference {
                first.check_compatible(&row.index)?;
            }
        }
        state.rows.extend(rows);
        state
            .rows
            .sort_by(|a, b| a.index.raw_cmp(&b.index).unwrap_or(Ordering::Equal));
        Ok(())
    }

    /// Make the `nth` fetch (1-based) fail
    pub fn fail_on_fetch(&self, nth: usize) {
        self.state.lock().fail_on_fetch = Some(nth);
    }

    pub fn fetch_count(&self) -> usize {
        self.state.lock().fetches.len()
    }

    pub fn fetch_requests(&self) -> Vec<FetchRequest> {
        self.state.lock().fetches.clone()
    }

    pub fn written_batches(&self) -> Vec<WriteBatch> {
        self.state.lock().written.clone()
    }

    pub fn rows(&self) -> Vec<Row> {
        self.state.lock().rows.clone()
    }

    pub fn row_count(&self) -> usize {
        self.state.lock().rows.len()
    }

    fn curve_positions(&self, curve_names: &[String]) -> std::result::Result<Vec<usize>, MemoryStoreError> {
        curve_names
            .iter()
            .map(|name| {
                self.header
                    .position(name)
                    .ok_or_else(|| MemoryStoreError::UnknownCurve(name.clone()))
            })
            .collect()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    fn max_rows(&self) -> usize {
        self.max_rows
    }

    async fn fetch(&self, request: &FetchRequest) -> std::result::Result<RawBatch, StoreError> {
        let positions = self.curve_positions(&request.curve_names)?;
        let mut state = self.state.lock();
        state.fetches.push(request.clone());

        let fetch_number = state.fetches.len();
        if state.fail_on_fetch == Some(fetch_number) {
            return Err(Box::new(MemoryStoreError::InjectedFailure(fetch_number)));
        }

        let limit = request.max_rows.min(self.max_rows);
        let mut records = Vec::with_capacity(limit.min(state.rows.len()));
        for row in &state.rows {
            if records.len() == limit {
                break;
            }
            if !request.start.admits(&row.index)? {
                continue;
            }
            if row.index.raw_cmp(&request.end)? == Ordering::Greater {
                break;
            }
            let values = positions.iter().map(|&p| row.values[p].clone()).collect();
            records.push(Row::new(row.index, values).to_record(self.delimiter));
        }

        debug!("MemoryLogStore fetch #{fetch_number}: {} records", records.len());
        Ok(RawBatch::new(records))
    }

    async fn write(&self, batch: &WriteBatch) -> std::result::Result<(), StoreError> {
        if batch.len() > self.max_rows {
            return Err(Box::new(MemoryStoreError::BatchTooLarge {
                rows: batch.len(),
                max_rows: self.max_rows,
            }));
        }
        if batch.header().curve_names() != self.header.curve_names() {
            return Err(Box::new(MemoryStoreError::HeaderMismatch(
                batch.header().curve_names().to_vec(),
            )));
        }
        self.insert_rows(batch.rows().to_vec())?;
        self.state.lock().written.push(batch.clone());
        Ok(())
    }
}
