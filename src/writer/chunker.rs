// src/writer/chunker.rs
use crate::error::{LogDataError, Result};
use crate::record::Row;
use crate::types::Unit;
use std::sync::Arc;

/// Curve names and their units, shared by every batch of one write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogHeader {
    curve_names: Vec<String>,
    units: Vec<Unit>,
}

impl LogHeader {
    pub fn new(curve_names: Vec<String>, units: Vec<Unit>) -> Result<Self> {
        if curve_names.len() != units.len() {
            return Err(LogDataError::InvalidArgument(format!(
                "{} curve names but {} units",
                curve_names.len(),
                units.len()
            )));
        }
        if let Some(blank) = curve_names.iter().position(|n| n.trim().is_empty()) {
            return Err(LogDataError::InvalidArgument(format!("curve name #{} is blank", blank)));
        }
        Ok(LogHeader { curve_names, units })
    }

    /// Header whose curves all have the empty unit
    pub fn unitless(curve_names: Vec<String>) -> Self {
        let units = vec![Unit::none(); curve_names.len()];
        LogHeader { curve_names, units }
    }

    pub fn curve_names(&self) -> &[String] {
        &self.curve_names
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.curve_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curve_names.is_empty()
    }

    pub fn position(&self, curve_name: &str) -> Option<usize> {
        self.curve_names.iter().position(|n| n == curve_name)
    }

    pub fn unit_of(&self, curve_name: &str) -> Option<&Unit> {
        self.position(curve_name).map(|p| &self.units[p])
    }

    /// Fail unless the row carries exactly one value per curve
    pub fn check_row(&self, row: &Row) -> Result<()> {
        if row.len() != self.len() {
            return Err(LogDataError::record_format(
                &row.to_string(),
                format!("row has {} values, header has {} curves", row.len(), self.len()),
            ));
        }
        Ok(())
    }
}

/// Rows bound for one store write, with the shared header
#[derive(Debug, Clone, PartialEq)]
pub struct WriteBatch {
    header: Arc<LogHeader>,
    rows: Vec<Row>,
}

impl WriteBatch {
    pub fn new(header: Arc<LogHeader>, rows: Vec<Row>) -> Self {
        WriteBatch { header, rows }
    }

    pub fn header(&self) -> &LogHeader {
        &self.header
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
}

/// Splits a row collection into batches of at most `chunk_size` rows
#[derive(Debug, Clone)]
pub struct WriteChunker {
    header: Arc<LogHeader>,
    chunk_size: usize,
}

impl WriteChunker {
    pub fn new(header: LogHeader, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(LogDataError::InvalidArgument("chunk size must be positive".into()));
        }
        Ok(WriteChunker {
            header: Arc::new(header),
            chunk_size,
        })
    }

    pub fn header(&self) -> &LogHeader {
        &self.header
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Validate every row against the header, then yield batches in input order
    pub fn chunk(&self, rows: Vec<Row>) -> Result<WriteChunks> {
        for row in &rows {
            self.header.check_row(row)?;
        }
        Ok(WriteChunks {
            header: Arc::clone(&self.header),
            rows: rows.into_iter(),
            chunk_size: self.chunk_size,
        })
    }
}

/// Iterator over the batches of one [`WriteChunker::chunk`] call
pub struct WriteChunks {
    header: Arc<LogHeader>,
    rows: std::vec::IntoIter<Row>,
    chunk_size: usize,
}

impl Iterator for WriteChunks {
    type Item = WriteBatch;

    fn next(&mut self) -> Option<WriteBatch> {
        let rows: Vec<Row> = self.rows.by_ref().take(self.chunk_size).collect();
        if rows.is_empty() {
            return None;
        }
        Some(WriteBatch::new(Arc::clone(&self.header), rows))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let batches = self.rows.len().div_ceil(self.chunk_size);
        (batches, Some(batches))
    }
}

impl ExactSizeIterator for WriteChunks {}

/// Split rows into store-sized write batches sharing `header`
pub fn chunk_for_write(rows: Vec<Row>, header: LogHeader, max_rows: usize) -> Result<WriteChunks> {
    WriteChunker::new(header, max_rows)?.chunk(rows)
}
