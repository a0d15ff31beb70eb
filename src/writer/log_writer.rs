// src/writer/log_writer.rs
use crate::config::TransferOptions;
use crate::error::{LogDataError, Result};
use crate::record::Row;
use crate::store::LogStore;
use crate::writer::{LogHeader, WriteChunker};
use log::{debug, info, warn};
use std::sync::Arc;

/// Outcome of a completed [`LogDataWriter::write_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    pub batches: usize,
    pub rows: usize,
}

/// Writes a row collection to a store in store-sized batches, one at a time
pub struct LogDataWriter<S: LogStore + ?Sized> {
    store: Arc<S>,
    chunker: WriteChunker,
}

impl<S: LogStore + ?Sized> LogDataWriter<S> {
    pub fn new(store: Arc<S>, header: LogHeader) -> Result<Self> {
        Self::with_options(store, header, &TransferOptions::default())
    }

    pub fn with_options(store: Arc<S>, header: LogHeader, options: &TransferOptions) -> Result<Self> {
        let chunk_size = options.effective_write_chunk_size(store.max_rows())?;
        let chunker = WriteChunker::new(header, chunk_size)?;
        Ok(LogDataWriter { store, chunker })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunker.chunk_size()
    }

    pub fn header(&self) -> &LogHeader {
        self.chunker.header()
    }

    /// Write every row in order. Stops at the first batch the store rejects;
    /// batches before it stay written.
    pub async fn write_all(&self, rows: Vec<Row>) -> Result<WriteSummary> {
        let mut summary = WriteSummary::default();
        let chunks = self.chunker.chunk(rows)?;
        let total_batches = chunks.len();

        for batch in chunks {
            debug!(
                "Writing batch {}/{} ({} rows)",
                summary.batches + 1,
                total_batches,
                batch.len()
            );
            if let Err(e) = self.store.write(&batch).await {
                warn!(
                    "Write failed on batch {}/{} after {} rows: {}",
                    summary.batches + 1,
                    total_batches,
                    summary.rows,
                    e
                );
                return Err(LogDataError::Store(e));
            }
            summary.batches += 1;
            summary.rows += batch.len();
        }

        info!("Wrote {} rows in {} batches", summary.rows, summary.batches);
        Ok(summary)
    }
}
