// src/index/depth.rs
use crate::error::{LogDataError, Result};
use crate::types::{format_number, DepthUnit};
use std::cmp::Ordering;
use std::fmt;

/// Measured-depth position with its unit
///
/// Two depths are equal when they share a unit and differ by less than
/// [`DepthIndex::EPSILON`]. Mixing units is an error, never a conversion.
#[derive(Debug, Clone, Copy)]
pub struct DepthIndex {
    value: f64,
    unit: DepthUnit,
}

impl DepthIndex {
    /// Equality tolerance, in depth units
    pub const EPSILON: f64 = 1e-3;

    /// Largest gap between two depths that still counts as one data run
    pub const CONTINUITY_THRESHOLD: f64 = 0.1;

    /// Reserved "no index" depth
    pub const NULL_VALUE: f64 = -999.25;

    pub fn new(value: f64, unit: DepthUnit) -> Self {
        DepthIndex { value, unit }
    }

    pub fn meters(value: f64) -> Self {
        Self::new(value, DepthUnit::Meter)
    }

    pub fn feet(value: f64) -> Self {
        Self::new(value, DepthUnit::Feet)
    }

    pub fn null(unit: DepthUnit) -> Self {
        Self::new(Self::NULL_VALUE, unit)
    }

    /// Parse a culture-invariant decimal number. Non-finite values are rejected.
    pub fn parse(text: &str, unit: DepthUnit) -> Result<Self> {
        let value = text
            .trim()
            .parse::<f64>()
            .map_err(|e| LogDataError::record_format(text, format!("invalid depth: {}", e)))?;
        if !value.is_finite() {
            return Err(LogDataError::record_format(text, "depth must be finite"));
        }
        Ok(Self::new(value, unit))
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> DepthUnit {
        self.unit
    }

    pub fn check_unit(&self, other: &DepthIndex) -> Result<()> {
        if self.unit != other.unit {
            return Err(LogDataError::IncompatibleUnit {
                left: self.unit.to_string(),
                right: other.unit.to_string(),
            });
        }
        Ok(())
    }

    pub fn compare(&self, other: &DepthIndex) -> Result<Ordering> {
        self.compare_with_epsilon(other, Self::EPSILON)
    }

    /// Compare treating values closer than `epsilon` as equal
    pub fn compare_with_epsilon(&self, other: &DepthIndex, epsilon: f64) -> Result<Ordering> {
        self.check_unit(other)?;
        if (self.value - other.value).abs() < epsilon {
            return Ok(Ordering::Equal);
        }
        Ok(self.value.total_cmp(&other.value))
    }

    /// Exact comparison of the stored values, without tolerance
    pub fn raw_cmp(&self, other: &DepthIndex) -> Result<Ordering> {
        self.check_unit(other)?;
        Ok(self.value.total_cmp(&other.value))
    }

    pub fn is_continuous_with(&self, other: &DepthIndex) -> Result<bool> {
        self.check_unit(other)?;
        Ok((self.value - other.value).abs() < Self::CONTINUITY_THRESHOLD)
    }

    /// `self - other`, in the shared unit
    pub fn subtract(&self, other: &DepthIndex) -> Result<f64> {
        self.check_unit(other)?;
        Ok(self.value - other.value)
    }

    /// Non-positive depth, zero included
    pub fn is_negative(&self) -> bool {
        self.value <= 0.0
    }

    /// True only when the value is exactly the null sentinel
    pub fn is_null(&self) -> bool {
        self.value == Self::NULL_VALUE
    }

    pub fn is_null_within(&self, tolerance: f64) -> bool {
        (self.value - Self::NULL_VALUE).abs() <= tolerance
    }

    /// Step one epsilon past this depth.
    ///
    /// Only meaningful for stores that keep exactly three decimals of depth.
    #[deprecated(note = "assumes three-decimal depth precision on the server")]
    pub fn add_epsilon(&self) -> DepthIndex {
        Self::new(self.value + Self::EPSILON, self.unit)
    }

    pub fn to_canonical_string(&self) -> String {
        format_number(self.value)
    }
}

impl PartialEq for DepthIndex {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compare(other), Ok(Ordering::Equal))
    }
}

impl fmt::Display for DepthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}
