use crate::types::metric::Metric;
use crate::types::value::RawValue;
use chrono::NaiveDate;

/// One day of measurements of one station, as written by an importer.
///
/// Metrics not listed in `values` are stored as `NULL`.
#[derive(Debug, PartialEq, Clone)]
pub struct Observation {
    pub station_id: i64,
    pub date: NaiveDate,
    pub values: Vec<(Metric, RawValue)>,
}

impl Observation {
    pub fn new(station_id: i64, date: NaiveDate) -> Self {
        Self {
            station_id,
            date,
            values: Vec::new(),
        }
    }

    pub fn with(mut self, metric: Metric, value: impl Into<RawValue>) -> Self {
        self.values.push((metric, value.into()));
        self
    }
}
