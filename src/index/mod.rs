// src/index/mod.rs
mod depth;
mod date_time;
mod time_span;
mod range;

pub use depth::DepthIndex;
pub use date_time::DateTimeIndex;
pub use time_span::TimeSpanIndex;
pub use range::{find_gaps, IndexRange};

use crate::error::{LogDataError, Result};
use crate::types::DepthUnit;
use chrono::Duration;
use std::cmp::Ordering;
use std::fmt;

/// The physical domain an index lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Depth,
    DateTime,
    TimeSpan,
}

impl IndexKind {
    pub fn name(&self) -> &'static str {
        match self {
            IndexKind::Depth => "depth",
            IndexKind::DateTime => "date-time",
            IndexKind::TimeSpan => "time-span",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a log row: a depth, an instant, or an elapsed time
///
/// Operations between two indices require the same variant (and, for depth,
/// the same unit). Violations surface as [`LogDataError::TypeMismatch`] or
/// [`LogDataError::IncompatibleUnit`].
#[derive(Debug, Clone, Copy)]
pub enum Index {
    Depth(DepthIndex),
    DateTime(DateTimeIndex),
    TimeSpan(TimeSpanIndex),
}

/// Result of subtracting two indices of the same kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndexDelta {
    Depth { value: f64, unit: DepthUnit },
    Time(Duration),
}

impl IndexDelta {
    /// Depth units for depth deltas, milliseconds for time deltas
    pub fn magnitude(&self) -> f64 {
        match self {
            IndexDelta::Depth { value, .. } => *value,
            IndexDelta::Time(duration) => duration.num_milliseconds() as f64,
        }
    }
}

impl Index {
    pub fn depth(value: f64, unit: DepthUnit) -> Self {
        Index::Depth(DepthIndex::new(value, unit))
    }

    pub fn kind(&self) -> IndexKind {
        match self {
            Index::Depth(_) => IndexKind::Depth,
            Index::DateTime(_) => IndexKind::DateTime,
            Index::TimeSpan(_) => IndexKind::TimeSpan,
        }
    }

    /// Null sentinel for a kind. Time spans have no sentinel and use zero.
    pub fn null(kind: IndexKind, unit: DepthUnit) -> Self {
        match kind {
            IndexKind::Depth => Index::Depth(DepthIndex::null(unit)),
            IndexKind::DateTime => Index::DateTime(DateTimeIndex::null()),
            IndexKind::TimeSpan => Index::TimeSpan(TimeSpanIndex::from_millis(0)),
        }
    }

    /// Parse `text` as an index of a known kind. `unit` applies to depth only.
    pub fn parse(kind: IndexKind, text: &str, unit: DepthUnit) -> Result<Self> {
        match kind {
            IndexKind::Depth => DepthIndex::parse(text, unit).map(Index::Depth),
            IndexKind::DateTime => DateTimeIndex::parse(text).map(Index::DateTime),
            IndexKind::TimeSpan => TimeSpanIndex::parse(text).map(Index::TimeSpan),
        }
    }

    /// Parse a record's index field: an ISO-8601 instant if it reads as one,
    /// otherwise a depth in `unit`.
    pub fn parse_probe(text: &str, unit: DepthUnit) -> Result<Self> {
        if let Ok(date_time) = DateTimeIndex::parse(text) {
            return Ok(Index::DateTime(date_time));
        }
        DepthIndex::parse(text, unit)
            .map(Index::Depth)
            .map_err(|_| LogDataError::record_format(text, "index is neither a date-time nor a number"))
    }

    pub fn as_depth(&self) -> Option<&DepthIndex> {
        match self {
            Index::Depth(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&DateTimeIndex> {
        match self {
            Index::DateTime(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_time_span(&self) -> Option<&TimeSpanIndex> {
        match self {
            Index::TimeSpan(t) => Some(t),
            _ => None,
        }
    }

    /// Depth unit, if this is a depth index
    pub fn depth_unit(&self) -> Option<DepthUnit> {
        self.as_depth().map(DepthIndex::unit)
    }

    fn mismatch(&self, other: &Index) -> LogDataError {
        LogDataError::type_mismatch(self.kind(), other.kind())
    }

    /// Fail unless both indices share a variant and, for depth, a unit
    pub fn check_compatible(&self, other: &Index) -> Result<()> {
        match (self, other) {
            (Index::Depth(a), Index::Depth(b)) => a.check_unit(b),
            (Index::DateTime(_), Index::DateTime(_)) | (Index::TimeSpan(_), Index::TimeSpan(_)) => Ok(()),
            _ => Err(self.mismatch(other)),
        }
    }

    pub fn compare(&self, other: &Index) -> Result<Ordering> {
        match (self, other) {
            (Index::Depth(a), Index::Depth(b)) => a.compare(b),
            (Index::DateTime(a), Index::DateTime(b)) => Ok(a.compare(b)),
            (Index::TimeSpan(a), Index::TimeSpan(b)) => Ok(a.compare(b)),
            _ => Err(self.mismatch(other)),
        }
    }

    /// Like [`compare`](Self::compare) but exact for depths
    pub fn raw_cmp(&self, other: &Index) -> Result<Ordering> {
        match (self, other) {
            (Index::Depth(a), Index::Depth(b)) => a.raw_cmp(b),
            _ => self.compare(other),
        }
    }

    pub fn is_continuous_with(&self, other: &Index) -> Result<bool> {
        match (self, other) {
            (Index::Depth(a), Index::Depth(b)) => a.is_continuous_with(b),
            (Index::DateTime(a), Index::DateTime(b)) => Ok(a.is_continuous_with(b)),
            (Index::TimeSpan(a), Index::TimeSpan(b)) => Ok(a.is_continuous_with(b)),
            _ => Err(self.mismatch(other)),
        }
    }

    /// `self - other`
    pub fn subtract(&self, other: &Index) -> Result<IndexDelta> {
        match (self, other) {
            (Index::Depth(a), Index::Depth(b)) => Ok(IndexDelta::Depth {
                value: a.subtract(b)?,
                unit: a.unit(),
            }),
            (Index::DateTime(a), Index::DateTime(b)) => Ok(IndexDelta::Time(a.subtract(b))),
            (Index::TimeSpan(a), Index::TimeSpan(b)) => Ok(IndexDelta::Time(a.subtract(b))),
            _ => Err(self.mismatch(other)),
        }
    }

    pub fn min_of(a: Index, b: Index) -> Result<Index> {
        Ok(if a.compare(&b)? == Ordering::Greater { b } else { a })
    }

    pub fn max_of(a: Index, b: Index) -> Result<Index> {
        Ok(if a.compare(&b)? == Ordering::Less { b } else { a })
    }

    /// Depth of zero or less; time variants are never negative
    pub fn is_negative(&self) -> bool {
        match self {
            Index::Depth(d) => d.is_negative(),
            Index::DateTime(_) | Index::TimeSpan(_) => false,
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            Index::Depth(d) => d.is_null(),
            Index::DateTime(t) => t.is_null(),
            Index::TimeSpan(_) => false,
        }
    }

    pub fn to_canonical_string(&self) -> String {
        match self {
            Index::Depth(d) => d.to_canonical_string(),
            Index::DateTime(t) => t.to_canonical_string(),
            Index::TimeSpan(t) => t.to_canonical_string(),
        }
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compare(other), Ok(Ordering::Equal))
    }
}

impl PartialOrd for Index {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl From<DepthIndex> for Index {
    fn from(index: DepthIndex) -> Self {
        Index::Depth(index)
    }
}

impl From<DateTimeIndex> for Index {
    fn from(index: DateTimeIndex) -> Self {
        Index::DateTime(index)
    }
}

impl From<TimeSpanIndex> for Index {
    fn from(index: TimeSpanIndex) -> Self {
        Index::TimeSpan(index)
    }
}
