// src/reader/progress.rs
use crate::error::Result;
use crate::index::Index;
use crate::reader::RowBatch;

/// Completion fraction of a read over `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEstimator {
    start: Index,
    end: Index,
}

impl ProgressEstimator {
    pub fn new(start: Index, end: Index) -> Result<Self> {
        start.check_compatible(&end)?;
        Ok(ProgressEstimator { start, end })
    }

    /// Replace either bound, e.g. when the effective range differs from the
    /// bounds declared by the log header
    pub fn with_bounds(&self, start: Option<Index>, end: Option<Index>) -> Result<Self> {
        Self::new(start.unwrap_or(self.start), end.unwrap_or(self.end))
    }

    pub fn start(&self) -> &Index {
        &self.start
    }

    pub fn end(&self) -> &Index {
        &self.end
    }

    /// Fraction in `[0, 1]` for the last observed index; `0.0` before any data
    pub fn estimate(&self, observed: Option<&Index>) -> Result<f64> {
        let Some(observed) = observed else {
            return Ok(0.0);
        };
        observed.check_compatible(&self.start)?;

        let total = self.end.subtract(&self.start)?.magnitude();
        let done = observed.subtract(&self.start)?.magnitude();
        if total <= 0.0 {
            return Ok(if done >= 0.0 { 1.0 } else { 0.0 });
        }
        Ok((done / total).clamp(0.0, 1.0))
    }

    pub fn progress_of(&self, batch: &RowBatch) -> Result<f64> {
        self.estimate(batch.last_index())
    }
}

/// Progress recorded on a batch by the cursor that yielded it
pub fn progress_of(batch: &RowBatch) -> f64 {
    batch.progress()
}
