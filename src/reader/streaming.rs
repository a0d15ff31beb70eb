// src/reader/streaming.rs
use crate::config::TransferOptions;
use crate::error::Result;
use crate::index::Index;
use crate::reader::{LogDataReader, RowBatch};
use crate::store::LogStore;
use futures::stream::Stream;
use std::sync::Arc;

impl<S: LogStore + ?Sized + 'static> LogDataReader<S> {
    /// Turn the cursor into a stream of batches
    ///
    /// The stream ends after the first error; dropping it between items
    /// stops further fetches.
    pub fn into_stream(mut self) -> impl Stream<Item = Result<RowBatch>> + Send {
        async_stream::try_stream! {
            while let Some(batch) = self.next_batch().await? {
                yield batch;
            }
        }
    }
}

/// Read `[start, end]` of `curve_names` as a stream of batches
///
/// # Example
///
/// ```no_run
/// use futures::StreamExt;
/// use std::sync::Arc;
/// use welllog_rs::*;
///
/// # async fn run(store: Arc<MemoryLogStore>) -> Result<()> {
/// let batches = read_all(
///     store,
///     vec!["GR".to_string(), "ROP".to_string()],
///     Index::depth(0.0, DepthUnit::Meter),
///     Index::depth(1000.0, DepthUnit::Meter),
/// );
/// futures::pin_mut!(batches);
///
/// while let Some(batch) = batches.next().await {
///     let batch = batch?;
///     println!("{} rows up to {:?}", batch.len(), batch.last_index());
/// }
/// # Ok(())
/// # }
/// ```
pub fn read_all<S>(
    store: Arc<S>,
    curve_names: Vec<String>,
    start: Index,
    end: Index,
) -> impl Stream<Item = Result<RowBatch>> + Send
where
    S: LogStore + ?Sized + 'static,
{
    read_all_with_options(store, curve_names, start, end, TransferOptions::default())
}

pub fn read_all_with_options<S>(
    store: Arc<S>,
    curve_names: Vec<String>,
    start: Index,
    end: Index,
    options: TransferOptions,
) -> impl Stream<Item = Result<RowBatch>> + Send
where
    S: LogStore + ?Sized + 'static,
{
    async_stream::try_stream! {
        let mut reader = LogDataReader::with_options(store, curve_names, start, end, &options)?;
        while let Some(batch) = reader.next_batch().await? {
            yield batch;
        }
    }
}
