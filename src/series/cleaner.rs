//! Normalizes raw measurements: sentinel detection and rounding.

use crate::types::value::{CleanValue, Precision, RawValue, MISSING_SENTINEL};
use log::debug;

/// Maps `-999` sentinels and nulls to [`CleanValue::Missing`] and rounds
/// everything else to a fixed [`Precision`].
///
/// Cleaning is pure and idempotent: `clean(clean(x).into()) == clean(x)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueCleaner {
    precision: Precision,
}

impl ValueCleaner {
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Cleans a single value.
    ///
    /// # Examples
    ///
    /// ```
    /// use klimadaten::{CleanValue, RawValue, ValueCleaner};
    ///
    /// let cleaner = ValueCleaner::default();
    /// assert_eq!(cleaner.clean(RawValue::Integer(-999)), CleanValue::Missing);
    /// assert_eq!(cleaner.clean(RawValue::from("-999.0")), CleanValue::Missing);
    /// assert_eq!(cleaner.clean(RawValue::Float(7.456)), CleanValue::Number(7.0));
    /// ```
    pub fn clean(&self, raw: RawValue) -> CleanValue {
        let parsed = match raw {
            RawValue::Null => return CleanValue::Missing,
            RawValue::Integer(i) => i as f64,
            RawValue::Float(f) => f,
            RawValue::Text(text) => match text.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => f,
                _ => {
                    debug!("Leaving unparsable measurement {text:?} unchanged");
                    return CleanValue::Unparsed(text);
                }
            },
        };

        if parsed == MISSING_SENTINEL || !parsed.is_finite() {
            return CleanValue::Missing;
        }
        // A reading that rounds onto the sentinel would read back as missing.
        match self.precision.apply(parsed) {
            rounded if rounded == MISSING_SENTINEL => CleanValue::Missing,
            rounded => CleanValue::Number(rounded),
        }
    }
}
