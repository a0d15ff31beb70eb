// src/lib.rs
//! # welllog-rs
//!
//! Index/value model and chunked streaming transfer engine for well-log data
//! indexed by measured depth or by time, exchanged with a remote store that
//! limits how many rows one request may carry.
//!
//! ## Features
//!
//! - 📏 **Typed Indices**: Depth, date-time and time-span indices under one ordering,
//!   equality and continuity contract, with unit checks instead of silent conversion
//! - 🧾 **Record Parsing**: Delimited `index,v1,..,vN` records into typed rows
//! - 🌊 **Streaming Reads**: A paginated cursor that walks a store in bounded batches,
//!   reports progress, and can be cancelled between fetches
//! - 📦 **Chunked Writes**: Store-sized write batches sharing one curve header
//!
//! ## Quick Start
//!
//! ### Parsing Records
//!
//! ```rust
//! use welllog_rs::*;
//!
//! fn main() -> Result<()> {
//!     let row = Row::parse("100.0,12.3,abc", 2)?;
//!     assert_eq!(row.index, Index::depth(100.0, DepthUnit::Meter));
//!     assert_eq!(row.values[0], Some(CurveValue::Numeric(12.3)));
//!
//!     let point = Point::parse("2023-05-01T10:00:00.000Z,42.1")?;
//!     assert_eq!(point.index.kind(), IndexKind::DateTime);
//!     Ok(())
//! }
//! ```
//!
//! ### Reading From a Store
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use welllog_rs::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let header = LogHeader::new(vec!["GR".into()], vec!["gAPI".into()])?;
//!     let store = Arc::new(MemoryLogStore::new(header, 500)?);
//!
//!     let mut reader = LogDataReader::new(
//!         store,
//!         vec!["GR".to_string()],
//!         Index::depth(0.0, DepthUnit::Meter),
//!         Index::depth(1000.0, DepthUnit::Meter),
//!     )?;
//!
//!     while let Some(batch) = reader.next_batch().await? {
//!         println!("{} rows ({:.0}%)", batch.len(), batch.progress() * 100.0);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Writing To a Store
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use welllog_rs::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let header = LogHeader::new(vec!["GR".into()], vec!["gAPI".into()])?;
//!     let store = Arc::new(MemoryLogStore::new(header.clone(), 1000)?);
//!
//!     let rows: Vec<Row> = (0..2500)
//!         .map(|i| Row::new(Index::depth(i as f64 * 0.1, DepthUnit::Meter), vec![Some(CurveValue::Numeric(1.0))]))
//!         .collect();
//!
//!     let writer = LogDataWriter::new(store, header)?;
//!     let summary = writer.write_all(rows).await?;
//!     assert_eq!(summary.batches, 3);
//!     Ok(())
//! }
//! ```

// Modules
pub mod error;
pub mod types;
pub mod index;
pub mod record;
pub mod store;
pub mod reader;
pub mod writer;
pub mod config;

// Re-export commonly used types at the crate root for convenience
pub use error::{LogDataError, Result, StoreError};

// Type exports
pub use types::{
    Unit,
    DepthUnit,
    CurveValue,
};

// Index exports
pub use index::{
    Index,
    IndexKind,
    IndexDelta,
    IndexRange,
    DepthIndex,
    DateTimeIndex,
    TimeSpanIndex,
    find_gaps,
};

// Record exports
pub use record::{
    Point,
    Row,
    RecordParser,
};

// Store exports
pub use store::{
    LogStore,
    FetchRequest,
    StartBound,
    RawBatch,
    MemoryLogStore,
};

// Reader exports
pub use reader::{
    LogDataReader,
    CursorState,
    RowBatch,
    ProgressEstimator,
    CurveSet,
    progress_of,
};

#[cfg(feature = "stream")]
pub use reader::{read_all, read_all_with_options};

// Writer exports
pub use writer::{
    LogHeader,
    WriteBatch,
    WriteChunker,
    LogDataWriter,
    WriteSummary,
    chunk_for_write,
};

pub use config::TransferOptions;

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use welllog_rs::prelude::*;
    //! ```

    pub use crate::error::{LogDataError, Result};
    pub use crate::types::{CurveValue, DepthUnit, Unit};
    pub use crate::index::{Index, IndexKind};
    pub use crate::record::Row;
    pub use crate::store::LogStore;
    pub use crate::reader::{LogDataReader, RowBatch};
    pub use crate::writer::{LogDataWriter, LogHeader};

    #[cfg(feature = "stream")]
    pub use crate::reader::read_all;
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
