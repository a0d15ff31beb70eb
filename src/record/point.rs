// src/record/point.rs
use super::{RecordParser, DEFAULT_DELIMITER};
use crate::error::Result;
use crate::index::Index;
use crate::types::CurveValue;

/// A single curve value at an index
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub index: Index,
    pub value: Option<CurveValue>,
}

impl Point {
    pub fn new(index: Index, value: Option<CurveValue>) -> Self {
        Point { index, value }
    }

    /// Parse `index,value` with the default parser (comma, meters)
    pub fn parse(record: &str) -> Result<Self> {
        RecordParser::default().parse_point(record)
    }

    pub fn to_record(&self, delimiter: char) -> String {
        let value = self.value.as_ref().map(CurveValue::as_string).unwrap_or_default();
        format!("{}{}{}", self.index, delimiter, value)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_record(DEFAULT_DELIMITER))
    }
}
