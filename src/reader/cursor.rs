// src/reader/cursor.rs
use crate::config::TransferOptions;
use crate::error::{LogDataError, Result};
use crate::index::{Index, IndexRange};
use crate::reader::{CurveSet, ProgressEstimator};
use crate::record::{RecordParser, Row};
use crate::store::{FetchRequest, LogStore, RawBatch, StartBound};
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Where a [`LogDataReader`] is in its range
#[derive(Debug, Clone, PartialEq)]
pub enum CursorState {
    /// The next fetch starts at this bound
    Ready(StartBound),
    /// A fetch from this bound was issued and has not completed.
    /// Seen only if a `next_batch` future was dropped; the next call
    /// re-issues the same request.
    Fetching(StartBound),
    Exhausted,
    Failed(String),
}

impl CursorState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CursorState::Exhausted | CursorState::Failed(_))
    }
}

/// Rows from one fetch, in store order
#[derive(Debug, Clone, PartialEq)]
pub struct RowBatch {
    curve_names: Arc<[String]>,
    rows: Vec<Row>,
    progress: f64,
}

impl RowBatch {
    pub fn curve_names(&self) -> &[String] {
        &self.curve_names
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_index(&self) -> Option<&Index> {
        self.rows.first().map(|r| &r.index)
    }

    pub fn last_index(&self) -> Option<&Index> {
        self.rows.last().map(|r| &r.index)
    }

    /// Read completion after this batch, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        self.progress
    }
}

/// Forward-only cursor reading `[start, end]` from a [`LogStore`] in
/// store-sized batches
///
/// Each batch is fetched only after the previous one has been consumed, so a
/// cursor must be driven from one task. After a non-empty batch ending at
/// `L` the next request asks for rows strictly after `L`; rows at or before
/// `L` in a response are dropped; a full page with no rows past `L` fails
/// the cursor rather than ending it. The cursor never retries: a failed fetch
/// leaves it in [`CursorState::Failed`], and [`last_index`](Self::last_index)
/// tells a caller where a fresh cursor should resume.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use welllog_rs::*;
///
/// # async fn run(store: Arc<MemoryLogStore>) -> Result<()> {
/// let mut reader = LogDataReader::new(
///     store,
///     vec!["GR".to_string()],
///     Index::depth(0.0, DepthUnit::Meter),
///     Index::depth(1000.0, DepthUnit::Meter),
/// )?;
///
/// while let Some(batch) = reader.next_batch().await? {
///     println!("{} rows, {:.0}% done", batch.len(), batch.progress() * 100.0);
/// }
/// # Ok(())
/// # }
/// ```
pub struct LogDataReader<S: LogStore + ?Sized> {
    store: Arc<S>,
    curve_names: Arc<[String]>,
    range: IndexRange,
    max_rows: usize,
    parser: RecordParser,
    progress: ProgressEstimator,
    state: CursorState,
    last_index: Option<Index>,
    fetch_count: usize,
    cancel: CancellationToken,
    cancelled: bool,
}

impl<S: LogStore + ?Sized> LogDataReader<S> {
    pub fn new(store: Arc<S>, curve_names: Vec<String>, start: Index, end: Index) -> Result<Self> {
        Self::with_options(store, curve_names, start, end, &TransferOptions::default())
    }

    pub fn with_options(
        store: Arc<S>,
        curve_names: Vec<String>,
        start: Index,
        end: Index,
        options: &TransferOptions,
    ) -> Result<Self> {
        if curve_names.is_empty() {
            return Err(LogDataError::InvalidArgument("no curves selected".into()));
        }
        let range = IndexRange::new(start, end)?;
        let max_rows = options.effective_max_rows(store.max_rows())?;
        let parser = RecordParser::new(options.delimiter, start.depth_unit().unwrap_or_default())
            .with_index_kind(start.kind());

        Ok(LogDataReader {
            store,
            curve_names: curve_names.into(),
            range,
            max_rows,
            parser,
            progress: ProgressEstimator::new(start, end)?,
            state: CursorState::Ready(StartBound::Inclusive(start)),
            last_index: None,
            fetch_count: 0,
            cancel: CancellationToken::new(),
            cancelled: false,
        })
    }

    /// Stop issuing fetches once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Measure progress against other bounds than the requested range
    pub fn with_progress_bounds(mut self, start: Option<Index>, end: Option<Index>) -> Result<Self> {
        self.progress = self.progress.with_bounds(start, end)?;
        Ok(self)
    }

    /// Begin strictly after `index` instead of at the range start, e.g. to
    /// resume from the [`last_index`](Self::last_index) of a failed cursor
    pub fn starting_after(mut self, index: Index) -> Result<Self> {
        self.range.start().check_compatible(&index)?;
        self.state = CursorState::Ready(StartBound::Exclusive(index));
        Ok(self)
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn curve_names(&self) -> &[String] {
        &self.curve_names
    }

    pub fn range(&self) -> &IndexRange {
        &self.range
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    /// Number of fetch requests issued so far
    pub fn fetch_count(&self) -> usize {
        self.fetch_count
    }

    /// Index of the last row yielded, if any
    pub fn last_index(&self) -> Option<&Index> {
        self.last_index.as_ref()
    }

    pub fn has_more(&self) -> bool {
        !self.state.is_terminal()
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn progress(&self) -> Result<f64> {
        self.progress.estimate(self.last_index.as_ref())
    }

    /// Fetch the next batch. `Ok(None)` once the range is exhausted or the
    /// cursor was cancelled.
    pub async fn next_batch(&mut self) -> Result<Option<RowBatch>> {
        let start = match &self.state {
            CursorState::Ready(bound) | CursorState::Fetching(bound) => *bound,
            CursorState::Exhausted => return Ok(None),
            CursorState::Failed(reason) => return Err(LogDataError::CursorFailed(reason.clone())),
        };

        if self.cancel.is_cancelled() {
            info!("Log read cancelled after {} fetches", self.fetch_count);
            self.cancelled = true;
            self.state = CursorState::Exhausted;
            return Ok(None);
        }

        let request = FetchRequest {
            curve_names: self.curve_names.to_vec(),
            start,
            end: *self.range.end(),
            max_rows: self.max_rows,
        };
        self.state = CursorState::Fetching(start);
        self.fetch_count += 1;
        debug!(
            "Fetch #{}: {:?} from {:?} to {} (max {} rows)",
            self.fetch_count,
            request.curve_names,
            request.start,
            request.end,
            request.max_rows
        );

        let raw = match self.store.fetch(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Fetch #{} failed: {}", self.fetch_count, e);
                self.state = CursorState::Failed(e.to_string());
                return Err(LogDataError::Store(e));
            }
        };

        let rows = match self.parse_batch(&raw, &start) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Fetch #{} returned unusable data: {}", self.fetch_count, e);
                self.state = CursorState::Failed(e.to_string());
                return Err(e);
            }
        };
        debug!("Fetch #{}: {} records, {} new rows", self.fetch_count, raw.len(), rows.len());

        let Some(last) = rows.last().map(|r| r.index) else {
            if raw.len() >= self.max_rows {
                let err = LogDataError::StalledFetch {
                    after: start.index().to_string(),
                    rows: raw.len(),
                };
                warn!("Fetch #{}: {}", self.fetch_count, err);
                self.state = CursorState::Failed(err.to_string());
                return Err(err);
            }
            info!("Log read exhausted after {} fetches", self.fetch_count);
            self.state = CursorState::Exhausted;
            return Ok(None);
        };

        let progress = self.progress.estimate(Some(&last))?;
        let reached_end = last.raw_cmp(self.range.end())? != Ordering::Less;
        self.last_index = Some(last);
        self.state = if raw.len() < self.max_rows || reached_end {
            info!("Log read complete at {} after {} fetches", last, self.fetch_count);
            CursorState::Exhausted
        } else {
            CursorState::Ready(StartBound::Exclusive(last))
        };

        Ok(Some(RowBatch {
            curve_names: Arc::clone(&self.curve_names),
            rows,
            progress,
        }))
    }

    fn parse_batch(&self, raw: &RawBatch, start: &StartBound) -> Result<Vec<Row>> {
        let end = self.range.end();
        let mut rows = Vec::with_capacity(raw.len());
        for record in &raw.records {
            let row = self.parser.parse_row(record, self.curve_names.len())?;
            end.check_compatible(&row.index)?;
            if start.admits(&row.index)? {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    /// Drive the cursor to the end, concatenating batches per curve
    pub async fn read_to_end(&mut self) -> Result<CurveSet> {
        let mut curves = CurveSet::new(self.curve_names.to_vec());
        while let Some(batch) = self.next_batch().await? {
            curves.extend_from_batch(&batch)?;
        }
        Ok(curves)
    }
}
