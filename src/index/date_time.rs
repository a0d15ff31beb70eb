// src/index/date_time.rs
use crate::error::{LogDataError, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::cmp::Ordering;
use std::fmt;

/// Absolute UTC instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTimeIndex {
    value: DateTime<Utc>,
}

impl DateTimeIndex {
    /// Largest gap between two instants that still counts as one data run
    pub const CONTINUITY_THRESHOLD_MS: i64 = 10_000;

    /// Reserved "no index" instant in canonical form
    pub const NULL_VALUE: &'static str = "1900-01-01T00:00:00.000Z";

    const NULL_TIMESTAMP_MILLIS: i64 = -2_208_988_800_000;

    pub fn new(value: DateTime<Utc>) -> Self {
        DateTimeIndex { value }
    }

    pub fn null() -> Self {
        Self::new(DateTime::from_timestamp_millis(Self::NULL_TIMESTAMP_MILLIS).unwrap_or_default())
    }

    pub fn from_timestamp_millis(millis: i64) -> Result<Self> {
        DateTime::from_timestamp_millis(millis)
            .map(Self::new)
            .ok_or_else(|| LogDataError::InvalidArgument(format!("timestamp out of range: {}", millis)))
    }

    /// Parse an ISO-8601 instant with a `Z` suffix or an explicit offset
    pub fn parse(text: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(text.trim())
            .map(|parsed| Self::new(parsed.with_timezone(&Utc)))
            .map_err(|e| LogDataError::record_format(text, format!("invalid date-time: {}", e)))
    }

    pub fn value(&self) -> DateTime<Utc> {
        self.value
    }

    pub fn compare(&self, other: &DateTimeIndex) -> Ordering {
        self.value.cmp(&other.value)
    }

    pub fn is_continuous_with(&self, other: &DateTimeIndex) -> bool {
        self.subtract(other).num_milliseconds().abs() < Self::CONTINUITY_THRESHOLD_MS
    }

    pub fn subtract(&self, other: &DateTimeIndex) -> Duration {
        self.value - other.value
    }

    pub fn is_null(&self) -> bool {
        self.value.timestamp_millis() == Self::NULL_TIMESTAMP_MILLIS
    }

    /// `yyyy-MM-ddTHH:mm:ss.fffZ`
    pub fn to_canonical_string(&self) -> String {
        self.value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl From<DateTime<Utc>> for DateTimeIndex {
    fn from(value: DateTime<Utc>) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for DateTimeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}
