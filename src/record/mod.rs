// src/record/mod.rs
mod point;
mod row;

pub use point::Point;
pub use row::Row;

use crate::error::{LogDataError, Result};
use crate::index::{Index, IndexKind};
use crate::types::{CurveValue, DepthUnit};
use smallvec::SmallVec;

/// Default field separator of a data record
pub const DEFAULT_DELIMITER: char = ',';

pub(crate) type Fields<'a> = SmallVec<[&'a str; 16]>;

pub(crate) fn split_fields(record: &str, delimiter: char) -> Fields<'_> {
    record.trim_end_matches(&['\r', '\n'][..]).split(delimiter).collect()
}

/// Turns delimited text records into [`Point`]s and [`Row`]s
///
/// Field 0 is the index. With a fixed [`IndexKind`] it is parsed as that
/// kind; otherwise it is tried as an ISO-8601 instant first, then as a depth
/// in the parser's depth unit. The remaining fields are curve values in the
/// caller's curve order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordParser {
    delimiter: char,
    depth_unit: DepthUnit,
    index_kind: Option<IndexKind>,
}

impl Default for RecordParser {
    fn default() -> Self {
        RecordParser {
            delimiter: DEFAULT_DELIMITER,
            depth_unit: DepthUnit::Meter,
            index_kind: None,
        }
    }
}

impl RecordParser {
    pub fn new(delimiter: char, depth_unit: DepthUnit) -> Self {
        RecordParser {
            delimiter,
            depth_unit,
            index_kind: None,
        }
    }

    /// Parse every index field as `kind` instead of probing
    pub fn with_index_kind(mut self, kind: IndexKind) -> Self {
        self.index_kind = Some(kind);
        self
    }

    pub fn index_kind(&self) -> Option<IndexKind> {
        self.index_kind
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_depth_unit(mut self, depth_unit: DepthUnit) -> Self {
        self.depth_unit = depth_unit;
        self
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn depth_unit(&self) -> DepthUnit {
        self.depth_unit
    }

    fn parse_index(&self, record: &str, field: &str) -> Result<Index> {
        let parsed = match self.index_kind {
            Some(kind) => Index::parse(kind, field, self.depth_unit),
            None => Index::parse_probe(field, self.depth_unit),
        };
        parsed.map_err(|_| {
            LogDataError::record_format(record, format!("unparseable index field {:?}", field))
        })
    }

    /// Parse a two-field `index,value` record
    pub fn parse_point(&self, record: &str) -> Result<Point> {
        let fields = split_fields(record, self.delimiter);
        if fields.len() != 2 {
            return Err(LogDataError::record_format(
                record,
                format!("expected 2 fields, found {}", fields.len()),
            ));
        }
        let index = self.parse_index(record, fields[0])?;
        Ok(Point::new(index, CurveValue::from_token(fields[1])))
    }

    /// Parse an `index,v1,..,vN` record carrying `curve_count` values
    pub fn parse_row(&self, record: &str, curve_count: usize) -> Result<Row> {
        let fields = split_fields(record, self.delimiter);
        if fields.len() != curve_count + 1 {
            return Err(LogDataError::record_format(
                record,
                format!("expected {} fields, found {}", curve_count + 1, fields.len()),
            ));
        }
        let index = self.parse_index(record, fields[0])?;
        let values = fields[1..].iter().map(|f| CurveValue::from_token(f)).collect();
        Ok(Row::new(index, values))
    }
}
