// src/index/time_span.rs
use crate::error::{LogDataError, Result};
use chrono::Duration;
use std::cmp::Ordering;
use std::fmt;

/// Elapsed time since an unspecified start, millisecond resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSpanIndex {
    value: Duration,
}

impl TimeSpanIndex {
    pub const CONTINUITY_THRESHOLD_MS: i64 = 10_000;

    pub fn new(value: Duration) -> Self {
        TimeSpanIndex { value }
    }

    pub fn from_millis(millis: i64) -> Self {
        Self::new(Duration::milliseconds(millis))
    }

    /// Parse `[-][d.]hh:mm:ss[.fff]`. Fraction digits past milliseconds are dropped.
    pub fn parse(text: &str) -> Result<Self> {
        parse_span_millis(text.trim())
            .map(Self::from_millis)
            .ok_or_else(|| LogDataError::record_format(text, "invalid time span, expected [d.]hh:mm:ss.fff"))
    }

    pub fn value(&self) -> Duration {
        self.value
    }

    pub fn compare(&self, other: &TimeSpanIndex) -> Ordering {
        self.value.cmp(&other.value)
    }

    pub fn is_continuous_with(&self, other: &TimeSpanIndex) -> bool {
        self.subtract(other).num_milliseconds().abs() < Self::CONTINUITY_THRESHOLD_MS
    }

    pub fn subtract(&self, other: &TimeSpanIndex) -> Duration {
        self.value - other.value
    }

    pub fn to_canonical_string(&self) -> String {
        let total = self.value.num_milliseconds();
        let sign = if total < 0 { "-" } else { "" };
        let abs = total.unsigned_abs();

        let millis = abs % 1000;
        let seconds = abs / 1000;
        let (days, hours) = (seconds / 86_400, (seconds / 3600) % 24);
        let (minutes, secs) = ((seconds / 60) % 60, seconds % 60);

        if days > 0 {
            format!("{sign}{days}.{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
        } else {
            format!("{sign}{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
        }
    }
}

impl fmt::Display for TimeSpanIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_span_millis(text: &str) -> Option<i64> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let mut parts = body.split(':');
    let head = parts.next()?;
    let minutes = parse_digits(parts.next()?)?;
    let seconds_part = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let (days, hours) = match head.split_once('.') {
        Some((d, h)) => (parse_digits(d)?, parse_digits(h)?),
        None => (0, parse_digits(head)?),
    };
    let (seconds, fraction) = match seconds_part.split_once('.') {
        Some((s, f)) => (parse_digits(s)?, f),
        None => (parse_digits(seconds_part)?, ""),
    };
    if hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    let millis = if fraction.is_empty() {
        0
    } else {
        parse_digits(fraction)?;
        let mut digits: String = fraction.chars().take(3).collect();
        while digits.len() < 3 {
            digits.push('0');
        }
        parse_digits(&digits)?
    };

    let total = days
        .checked_mul(24)?
        .checked_add(hours)?
        .checked_mul(60)?
        .checked_add(minutes)?
        .checked_mul(60)?
        .checked_add(seconds)?
        .checked_mul(1000)?
        .checked_add(millis)?;
    Some(if negative { -total } else { total })
}
