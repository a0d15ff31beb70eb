// src/record/row.rs
use super::{RecordParser, DEFAULT_DELIMITER};
use crate::error::Result;
use crate::index::Index;
use crate::types::CurveValue;

/// An index with one value per curve, in header order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: Index,
    pub values: Vec<Option<CurveValue>>,
}

impl Row {
    pub fn new(index: Index, values: Vec<Option<CurveValue>>) -> Self {
        Row { index, values }
    }

    /// Parse with the default parser (comma, meters)
    pub fn parse(record: &str, curve_count: usize) -> Result<Self> {
        RecordParser::default().parse_row(record, curve_count)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, position: usize) -> Option<&CurveValue> {
        self.values.get(position).and_then(Option::as_ref)
    }

    /// Canonical text form; a missing value writes an empty field
    pub fn to_record(&self, delimiter: char) -> String {
        let mut record = self.index.to_canonical_string();
        for value in &self.values {
            record.push(delimiter);
            if let Some(value) = value {
                record.push_str(&value.as_string());
            }
        }
        record
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_record(DEFAULT_DELIMITER))
    }
}
