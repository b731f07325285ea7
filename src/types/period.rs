//! Period labels used as the x-axis of every aggregated view.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Year(pub i32);

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month(pub i32, pub u32);
impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Self(date.year(), date.month())
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}

/// Label of one daily (`YYYY-MM-DD`), monthly (`YYYY-MM`) or yearly (`YYYY`) bucket.
///
/// Labels of the same granularity sort chronologically when compared as strings,
/// which is what the store's `GROUP BY` output and the range merge rely on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PeriodKey(String);

impl PeriodKey {
    pub fn day(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn month(month: Month) -> Self {
        Self(month.to_string())
    }

    pub fn year(year: Year) -> Self {
        Self(year.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Labels read back from the store are taken verbatim.
impl From<String> for PeriodKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<&str> for PeriodKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(987, 3, 9).unwrap();
        assert_eq!(PeriodKey::day(date), "0987-03-09");
        assert_eq!(PeriodKey::month(Month::of(date)), "0987-03");
        assert_eq!(PeriodKey::year(Year(987)), "0987");
    }

    #[test]
    fn test_string_order_matches_chronology() {
        let a = PeriodKey::month(Month(2019, 12));
        let b = PeriodKey::month(Month(2020, 1));
        assert!(a < b);
    }
}
