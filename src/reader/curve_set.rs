// src/reader/curve_set.rs
use crate::error::{LogDataError, Result};
use crate::index::{find_gaps, Index, IndexRange};
use crate::reader::RowBatch;
use crate::record::{Point, Row};
use crate::types::CurveValue;

/// Column-wise accumulation of read batches, one value sequence per curve
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurveSet {
    curve_names: Vec<String>,
    indices: Vec<Index>,
    columns: Vec<Vec<Option<CurveValue>>>,
}

impl CurveSet {
    pub fn new(curve_names: Vec<String>) -> Self {
        let columns = vec![Vec::new(); curve_names.len()];
        CurveSet {
            curve_names,
            indices: Vec::new(),
            columns,
        }
    }

    /// Append a batch in arrival order. Its curves must match this set's.
    pub fn extend_from_batch(&mut self, batch: &RowBatch) -> Result<()> {
        if batch.curve_names() != self.curve_names.as_slice() {
            return Err(LogDataError::InvalidArgument(format!(
                "batch curves {:?} do not match {:?}",
                batch.curve_names(),
                self.curve_names
            )));
        }
        self.extend_from_rows(batch.rows())
    }

    pub fn extend_from_rows(&mut self, rows: &[Row]) -> Result<()> {
        for row in rows {
            if row.len() != self.columns.len() {
                return Err(LogDataError::record_format(
                    &row.to_string(),
                    format!("expected {} values", self.columns.len()),
                ));
            }
        }
        for row in rows {
            self.indices.push(row.index);
            for (column, value) in self.columns.iter_mut().zip(&row.values) {
                column.push(value.clone());
            }
        }
        Ok(())
    }

    pub fn curve_names(&self) -> &[String] {
        &self.curve_names
    }

    pub fn indices(&self) -> &[Index] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn curve(&self, name: &str) -> Option<&[Option<CurveValue>]> {
        let position = self.curve_names.iter().position(|n| n == name)?;
        Some(&self.columns[position])
    }

    /// Non-empty values of one curve as points
    pub fn points(&self, name: &str) -> Option<Vec<Point>> {
        let values = self.curve(name)?;
        Some(
            self.indices
                .iter()
                .zip(values)
                .filter(|(_, value)| value.is_some())
                .map(|(index, value)| Point::new(*index, value.clone()))
                .collect(),
        )
    }

    /// Breaks in the index sequence, see [`find_gaps`]
    pub fn gaps(&self) -> Result<Vec<IndexRange>> {
        find_gaps(&self.indices)
    }

    pub fn into_rows(self) -> Vec<Row> {
        let mut columns: Vec<_> = self.columns.into_iter().map(Vec::into_iter).collect();
        self.indices
            .into_iter()
            .map(|index| {
                let values = columns.iter_mut().map(|c| c.next().flatten()).collect();
                Row::new(index, values)
            })
            .collect()
    }
}
