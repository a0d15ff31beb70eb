// src/store/mod.rs
mod memory;

pub use memory::{MemoryLogStore, MemoryStoreError};

use crate::error::{Result, StoreError};
use crate::index::Index;
use crate::writer::WriteBatch;
use async_trait::async_trait;
use std::cmp::Ordering;

/// Lower bound of a fetch request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartBound {
    /// Rows at or after the index
    Inclusive(Index),
    /// Rows strictly after the index
    Exclusive(Index),
}

impl StartBound {
    pub fn index(&self) -> &Index {
        match self {
            StartBound::Inclusive(index) | StartBound::Exclusive(index) => index,
        }
    }

    /// Whether `index` lies past this bound, compared exactly
    pub fn admits(&self, index: &Index) -> Result<bool> {
        Ok(match self {
            StartBound::Inclusive(bound) => index.raw_cmp(bound)? != Ordering::Less,
            StartBound::Exclusive(bound) => index.raw_cmp(bound)? == Ordering::Greater,
        })
    }
}

/// One bounded read against a [`LogStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub curve_names: Vec<String>,
    pub start: StartBound,
    pub end: Index,
    pub max_rows: usize,
}

/// Raw delimited records as returned by a store, `index,v1,..,vN` each
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBatch {
    pub records: Vec<String>,
}

impl RawBatch {
    pub fn new(records: Vec<String>) -> Self {
        RawBatch { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<String>> for RawBatch {
    fn from(records: Vec<String>) -> Self {
        RawBatch::new(records)
    }
}

/// Remote log data store with a per-request row limit
///
/// Implementations own transport, authentication and timeouts. Errors are
/// passed through to callers untouched.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Largest number of rows the store returns or accepts per request
    fn max_rows(&self) -> usize;

    /// Rows for `request.curve_names` between the bounds, in index order,
    /// truncated at `request.max_rows`
    async fn fetch(&self, request: &FetchRequest) -> std::result::Result<RawBatch, StoreError>;

    /// Persist one batch of at most [`max_rows`](Self::max_rows) rows
    async fn write(&self, batch: &WriteBatch) -> std::result::Result<(), StoreError>;
}
