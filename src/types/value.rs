//! Raw and cleaned measurement values.

use serde::{Serialize, Serializer};

/// Text emitted in place of a missing measurement.
pub const MISSING_MARKER: &str = "--";

/// Value the DWD archive stores for a reading that was not taken.
pub const MISSING_SENTINEL: f64 = -999.0;

/// A measurement as it comes out of the store, before cleaning.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<Option<f64>> for RawValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(RawValue::Null, RawValue::Float)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// Feeding a cleaned value back into the cleaner reproduces it.
impl From<CleanValue> for RawValue {
    fn from(value: CleanValue) -> Self {
        match value {
            CleanValue::Number(n) => RawValue::Float(n),
            CleanValue::Missing => RawValue::Null,
            CleanValue::Unparsed(text) => RawValue::Text(text),
        }
    }
}

/// Result of cleaning a [`RawValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum CleanValue {
    /// A reading rounded to the requested [`Precision`].
    Number(f64),
    /// The reading is absent or was recorded as the `-999` sentinel.
    Missing,
    /// Text that does not parse as a number, passed through unchanged.
    Unparsed(String),
}

impl CleanValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CleanValue::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CleanValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Whole numbers serialize as JSON integers, missing values as `"--"`.
impl Serialize for CleanValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CleanValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            CleanValue::Number(n) => serializer.serialize_f64(*n),
            CleanValue::Missing => serializer.serialize_str(MISSING_MARKER),
            CleanValue::Unparsed(text) => serializer.serialize_str(text),
        }
    }
}

/// Rounding applied by the cleaner. Both variants round half away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Round to whole units (`7.5` becomes `8`).
    #[default]
    Whole,
    /// Round to two decimals (`7.456` becomes `7.46`).
    Hundredths,
}

impl Precision {
    pub(crate) fn apply(&self, value: f64) -> f64 {
        match self {
            Precision::Whole => value.round(),
            Precision::Hundredths => (value * 100.0).round() / 100.0,
        }
    }
}
