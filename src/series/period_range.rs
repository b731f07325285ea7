//! Generates the complete label axis of a chart, independent of stored data.

use crate::types::granularity::Granularity;
use crate::types::period::{Month, PeriodKey, Year};
use chrono::{Datelike, Months, NaiveDate};

/// Produces every period label between two dates, in chronological order.
pub struct PeriodRangeGenerator;

impl PeriodRangeGenerator {
    /// Returns the gap-free sequence of labels from the period containing
    /// `start` through the period containing `end`, both inclusive.
    ///
    /// Monthly ranges start at the first of `start`'s month and yearly ranges
    /// at January 1 of `start`'s year. An inverted range yields no labels.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use klimadaten::{Granularity, PeriodRangeGenerator};
    ///
    /// let start = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2020, 3, 5).unwrap();
    /// let labels = PeriodRangeGenerator::generate(Granularity::Monthly, start, end);
    /// assert_eq!(labels, ["2020-01", "2020-02", "2020-03"]);
    /// ```
    pub fn generate(granularity: Granularity, start: NaiveDate, end: NaiveDate) -> Vec<PeriodKey> {
        if start > end {
            return vec![];
        }
        match granularity {
            Granularity::Daily => start
                .iter_days()
                .take_while(|day| *day <= end)
                .map(PeriodKey::day)
                .collect(),
            Granularity::Monthly => {
                let mut labels = Vec::new();
                let mut cursor = start.with_day(1);
                while let Some(month_start) = cursor.filter(|d| *d <= end) {
                    labels.push(PeriodKey::month(Month::of(month_start)));
                    cursor = month_start.checked_add_months(Months::new(1));
                }
                labels
            }
            Granularity::Yearly => (start.year()..=end.year())
                .map(|y| PeriodKey::year(Year(y)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_crosses_february_in_common_year() {
        let labels =
            PeriodRangeGenerator::generate(Granularity::Daily, date(2021, 2, 27), date(2021, 3, 1));
        assert_eq!(labels, ["2021-02-27", "2021-02-28", "2021-03-01"]);
    }

    #[test]
    fn test_daily_includes_leap_day() {
        let labels =
            PeriodRangeGenerator::generate(Granularity::Daily, date(2020, 2, 28), date(2020, 3, 1));
        assert_eq!(labels, ["2020-02-28", "2020-02-29", "2020-03-01"]);
    }

    #[test]
    fn test_monthly_normalizes_start_to_first_of_month() {
        let labels = PeriodRangeGenerator::generate(
            Granularity::Monthly,
            date(2020, 1, 15),
            date(2020, 3, 5),
        );
        assert_eq!(labels, ["2020-01", "2020-02", "2020-03"]);
    }

    #[test]
    fn test_monthly_steps_by_calendar_month_across_years() {
        let labels = PeriodRangeGenerator::generate(
            Granularity::Monthly,
            date(2019, 11, 30),
            date(2020, 2, 1),
        );
        assert_eq!(labels, ["2019-11", "2019-12", "2020-01", "2020-02"]);
    }

    #[test]
    fn test_yearly_covers_partial_years() {
        let labels = PeriodRangeGenerator::generate(
            Granularity::Yearly,
            date(2018, 7, 1),
            date(2020, 1, 1),
        );
        assert_eq!(labels, ["2018", "2019", "2020"]);
    }

    #[test]
    fn test_single_day_range() {
        let day = date(2022, 6, 30);
        for (granularity, expected) in [
            (Granularity::Daily, "2022-06-30"),
            (Granularity::Monthly, "2022-06"),
            (Granularity::Yearly, "2022"),
        ] {
            assert_eq!(
                PeriodRangeGenerator::generate(granularity, day, day),
                [expected]
            );
        }
    }

    #[test]
    fn test_inverted_range_is_empty() {
        for granularity in [Granularity::Daily, Granularity::Monthly, Granularity::Yearly] {
            let labels =
                PeriodRangeGenerator::generate(granularity, date(2020, 1, 2), date(2020, 1, 1));
            assert!(labels.is_empty());
        }
    }

    #[test]
    fn test_labels_are_unique_and_sorted() {
        let labels = PeriodRangeGenerator::generate(
            Granularity::Daily,
            date(1999, 12, 1),
            date(2001, 3, 1),
        );
        assert_eq!(labels.len(), 31 + 366 + 31 + 28 + 1);
        assert!(labels.windows(2).all(|w| w[0] < w[1]));
    }
}
