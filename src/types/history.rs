use crate::types::granularity::Granularity;
use crate::types::metric::Metric;
use crate::types::period::PeriodKey;
use crate::types::value::CleanValue;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Display label of the period column in daily history rows.
pub const DAY_LABEL: &str = "Datum";
/// Display label of the period column in monthly and yearly history rows.
pub const PERIOD_LABEL: &str = "Monats/Jahreszeitraum";

/// One row of a history table: a period and every tracked metric.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub granularity: Granularity,
    pub period: PeriodKey,
    pub values: Vec<(Metric, CleanValue)>,
}

impl HistoryRecord {
    pub fn get(&self, metric: Metric) -> Option<&CleanValue> {
        self.values
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, value)| value)
    }

    pub(crate) fn period_label(&self) -> &'static str {
        match self.granularity {
            Granularity::Daily => DAY_LABEL,
            Granularity::Monthly | Granularity::Yearly => PERIOD_LABEL,
        }
    }
}

/// Serializes as an object keyed by display labels, period column first.
impl Serialize for HistoryRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry(self.period_label(), &self.period)?;
        for (metric, value) in &self.values {
            map.serialize_entry(metric.label(), value)?;
        }
        map.end()
    }
}

/// Serializes as `{"aggregation": "monthly", "rows": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryTable {
    pub aggregation: Granularity,
    pub rows: Vec<HistoryRecord>,
}
