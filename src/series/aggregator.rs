//! Builds gap-filled chart series for a single metric.

use crate::series::cleaner::ValueCleaner;
use crate::series::period_range::PeriodRangeGenerator;
use crate::store::error::StoreError;
use crate::store::sqlite::ClimateStore;
use crate::types::chart::ChartSeries;
use crate::types::granularity::Granularity;
use crate::types::metric::Metric;
use crate::types::period::PeriodKey;
use crate::types::value::{CleanValue, RawValue};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Turns the stored daily observations of one station into a [`ChartSeries`]
/// with exactly one value per period of the requested range.
#[derive(Debug, Clone)]
pub struct Aggregator {
    store: ClimateStore,
    cleaner: ValueCleaner,
}

impl Aggregator {
    pub fn new(store: ClimateStore, cleaner: ValueCleaner) -> Self {
        Self { store, cleaner }
    }

    /// Charts `metric` for `station_id` between `start` and `end` (inclusive).
    ///
    /// Daily series carry the cleaned stored value of each day. Monthly and
    /// yearly series carry the per-period mean or sum declared by the metric,
    /// computed over the days inside `start..=end` only. Periods without data
    /// are filled with [`CleanValue::Missing`], so the result always has one
    /// entry per label of [`PeriodRangeGenerator::generate`].
    pub async fn aggregate(
        &self,
        metric: Metric,
        station_id: i64,
        granularity: Granularity,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ChartSeries, StoreError> {
        let labels = PeriodRangeGenerator::generate(granularity, start, end);
        if labels.is_empty() {
            return Ok(ChartSeries {
                metric,
                station_id,
                granularity,
                labels,
                values: vec![],
            });
        }

        let fetched: HashMap<PeriodKey, CleanValue> = match granularity {
            Granularity::Daily => self
                .store
                .daily_values(metric, station_id, start, end)
                .await?
                .into_iter()
                .map(|(period, raw)| (period, self.cleaner.clean(raw)))
                .collect(),
            Granularity::Monthly | Granularity::Yearly => self
                .store
                .aggregated_values(metric, granularity, station_id, start, end)
                .await?
                .into_iter()
                .map(|(period, value)| (period, self.cleaner.clean(RawValue::from(value))))
                .collect(),
        };

        let values = labels
            .iter()
            .map(|label| fetched.get(label).cloned().unwrap_or(CleanValue::Missing))
            .collect();

        Ok(ChartSeries {
            metric,
            station_id,
            granularity,
            labels,
            values,
        })
    }
}
