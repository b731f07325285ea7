//! Defines the time bucketing used by charts and history tables.

use crate::KlimadatenError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Represents the time-bucketing unit of an aggregated view.
///
/// Daily views return the stored values of each day, monthly and yearly views
/// aggregate the days of each calendar month or year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar day, labelled `YYYY-MM-DD`.
    Daily,
    /// One bucket per calendar month, labelled `YYYY-MM`.
    Monthly,
    /// One bucket per calendar year, labelled `YYYY`.
    Yearly,
}

impl Granularity {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        }
    }

    /// SQLite `strftime` pattern producing this granularity's period label.
    pub(crate) fn strftime_pattern(&self) -> &'static str {
        match self {
            Granularity::Daily => "%Y-%m-%d",
            Granularity::Monthly => "%Y-%m",
            Granularity::Yearly => "%Y",
        }
    }
}

/// Allows formatting a `Granularity` with the name used in requests.
///
/// # Examples
///
/// ```
/// use klimadaten::Granularity;
///
/// assert_eq!(Granularity::Monthly.to_string(), "monthly");
/// ```
impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parses the request names `daily`, `monthly` and `yearly`.
///
/// # Examples
///
/// ```
/// use klimadaten::{Granularity, KlimadatenError};
///
/// assert_eq!("yearly".parse::<Granularity>().unwrap(), Granularity::Yearly);
/// assert!(matches!(
///     "weekly".parse::<Granularity>(),
///     Err(KlimadatenError::InvalidGranularity(_))
/// ));
/// ```
impl FromStr for Granularity {
    type Err = KlimadatenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Granularity::Daily),
            "monthly" => Ok(Granularity::Monthly),
            "yearly" => Ok(Granularity::Yearly),
            other => Err(KlimadatenError::InvalidGranularity(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Daily".parse::<Granularity>().is_err());
        assert_eq!("daily".parse::<Granularity>().unwrap(), Granularity::Daily);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for g in [Granularity::Daily, Granularity::Monthly, Granularity::Yearly] {
            assert_eq!(g.to_string().parse::<Granularity>().unwrap(), g);
        }
    }
}
