use crate::types::granularity::Granularity;
use crate::types::metric::Metric;
use crate::types::period::PeriodKey;
use crate::types::value::CleanValue;
use serde::Serialize;

/// One metric of one station over a contiguous run of periods.
///
/// `labels` and `values` always have the same length; periods without data
/// carry [`CleanValue::Missing`]. Serializes as `{"labels": [...], "values": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    #[serde(skip)]
    pub metric: Metric,
    #[serde(skip)]
    pub station_id: i64,
    #[serde(skip)]
    pub granularity: Granularity,
    pub labels: Vec<PeriodKey>,
    pub values: Vec<CleanValue>,
}

impl ChartSeries {
    /// Legend text for the charted metric.
    pub fn metric_label(&self) -> &'static str {
        self.metric.label()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates `(label, value)` pairs in period order.
    pub fn points(&self) -> impl Iterator<Item = (&PeriodKey, &CleanValue)> {
        self.labels.iter().zip(self.values.iter())
    }
}
