// src/types.rs
use crate::error::{LogDataError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit of measure, compared by its code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unit(String);

impl Unit {
    pub fn new(code: impl Into<String>) -> Self {
        Unit(code.into())
    }

    /// The dimensionless / unspecified unit (`""`)
    pub fn none() -> Self {
        Unit(String::new())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Unit {
    fn from(code: &str) -> Self {
        Unit::new(code)
    }
}

impl From<String> for Unit {
    fn from(code: String) -> Self {
        Unit(code)
    }
}

/// Unit of a measured-depth index. Only meters and feet are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DepthUnit {
    #[default]
    Meter,
    Feet,
}

impl DepthUnit {
    pub const METER_CODE: &'static str = "m";
    pub const FEET_CODE: &'static str = "ft";

    pub fn code(&self) -> &'static str {
        match self {
            DepthUnit::Meter => Self::METER_CODE,
            DepthUnit::Feet => Self::FEET_CODE,
        }
    }

    /// Look up a depth unit by code. Codes are matched exactly.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            Self::METER_CODE => Ok(DepthUnit::Meter),
            Self::FEET_CODE => Ok(DepthUnit::Feet),
            other => Err(LogDataError::UnsupportedUnit(other.to_string())),
        }
    }

    pub fn to_unit(&self) -> Unit {
        Unit::new(self.code())
    }
}

impl fmt::Display for DepthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for DepthUnit {
    type Error = LogDataError;

    fn try_from(code: &str) -> Result<Self> {
        DepthUnit::from_code(code)
    }
}

impl TryFrom<String> for DepthUnit {
    type Error = LogDataError;

    fn try_from(code: String) -> Result<Self> {
        DepthUnit::from_code(&code)
    }
}

impl TryFrom<&Unit> for DepthUnit {
    type Error = LogDataError;

    fn try_from(unit: &Unit) -> Result<Self> {
        DepthUnit::from_code(unit.code())
    }
}

impl From<DepthUnit> for String {
    fn from(unit: DepthUnit) -> Self {
        unit.code().to_string()
    }
}

impl From<DepthUnit> for Unit {
    fn from(unit: DepthUnit) -> Self {
        unit.to_unit()
    }
}

/// One cell of curve data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurveValue {
    Numeric(f64),
    Text(String),
}

impl CurveValue {
    /// Parse a raw token.
    ///
    /// Blank tokens carry no value and yield `None`. Anything that parses as a
    /// floating point number (`.` decimal point, no grouping) is numeric,
    /// everything else is kept as text.
    pub fn from_token(token: &str) -> Option<CurveValue> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => Some(CurveValue::Numeric(value)),
            Err(_) => Some(CurveValue::Text(token.to_string())),
        }
    }

    /// Get the name of the stored variant
    pub fn type_name(&self) -> &'static str {
        match self {
            CurveValue::Numeric(_) => "numeric",
            CurveValue::Text(_) => "text",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CurveValue::Numeric(_))
    }

    /// Textual form of either variant
    pub fn as_string(&self) -> String {
        match self {
            CurveValue::Numeric(v) => format_number(*v),
            CurveValue::Text(s) => s.clone(),
        }
    }

    pub fn as_f64(&self) -> Result<f64> {
        match self {
            CurveValue::Numeric(v) => Ok(*v),
            other => Err(LogDataError::TypeCast {
                expected: "numeric".to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    pub fn as_string_value(&self) -> Result<&str> {
        match self {
            CurveValue::Text(s) => Ok(s),
            other => Err(LogDataError::TypeCast {
                expected: "text".to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }
}

impl fmt::Display for CurveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<f64> for CurveValue {
    fn from(value: f64) -> Self {
        CurveValue::Numeric(value)
    }
}

impl From<&str> for CurveValue {
    fn from(value: &str) -> Self {
        CurveValue::Text(value.to_string())
    }
}

impl From<String> for CurveValue {
    fn from(value: String) -> Self {
        CurveValue::Text(value)
    }
}

/// Shortest round-trip decimal form: `.` separator, no grouping, no exponent.
pub(crate) fn format_number(value: f64) -> String {
    format!("{}", value)
}
