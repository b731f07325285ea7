use crate::series::cleaner::ValueCleaner;
use crate::store::error::StoreError;
use crate::store::sqlite::ClimateStore;
use crate::types::granularity::Granularity;
use crate::types::history::{HistoryRecord, HistoryTable};
use crate::types::metric::Metric;
use crate::types::period::PeriodKey;
use crate::types::value::RawValue;
use chrono::NaiveDate;
use log::debug;

/// Builds the multi-metric history table of a station.
///
/// The columns are [`Metric::TRACKED`]. Daily tables contain only the days on
/// which every tracked metric has a reading; monthly and yearly tables contain
/// one row per period that has any stored day, with missing readings left out
/// of each aggregate. Periods without stored days are not gap-filled.
#[derive(Debug, Clone)]
pub struct HistoryAssembler {
    store: ClimateStore,
    cleaner: ValueCleaner,
}

impl HistoryAssembler {
    pub fn new(store: ClimateStore, cleaner: ValueCleaner) -> Self {
        Self { store, cleaner }
    }

    pub async fn assemble(
        &self,
        granularity: Granularity,
        station_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HistoryTable, StoreError> {
        if start > end {
            debug!("Empty history range {start}..{end}, store not queried");
            return Ok(HistoryTable {
                aggregation: granularity,
                rows: vec![],
            });
        }

        let metrics = Metric::TRACKED;
        let rows = match granularity {
            Granularity::Daily => self
                .store
                .complete_daily_rows(&metrics, station_id, start, end)
                .await?
                .into_iter()
                .map(|(period, values)| self.record(granularity, period, &metrics, values))
                .collect(),
            Granularity::Monthly | Granularity::Yearly => self
                .store
                .aggregated_rows(&metrics, granularity, station_id, start, end)
                .await?
                .into_iter()
                .map(|(period, values)| {
                    let values = values.into_iter().map(RawValue::from).collect();
                    self.record(granularity, period, &metrics, values)
                })
                .collect(),
        };

        Ok(HistoryTable {
            aggregation: granularity,
            rows,
        })
    }

    fn record(
        &self,
        granularity: Granularity,
        period: PeriodKey,
        metrics: &[Metric],
        values: Vec<RawValue>,
    ) -> HistoryRecord {
        HistoryRecord {
            granularity,
            period,
            values: metrics
                .iter()
                .copied()
                .zip(values.into_iter().map(|raw| self.cleaner.clean(raw)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::{date, seeded_store, BREMEN};
    use crate::types::value::CleanValue;
    use serde_json::json;
    use std::error::Error;

    async fn assembler() -> Result<HistoryAssembler, StoreError> {
        Ok(HistoryAssembler::new(
            seeded_store().await?,
            ValueCleaner::default(),
        ))
    }

    #[tokio::test]
    async fn test_daily_history_drops_incomplete_days() -> Result<(), Box<dyn Error>> {
        let table = assembler()
            .await?
            .assemble(Granularity::Daily, BREMEN, date(2020, 1, 1), date(2020, 1, 31))
            .await?;

        // Jan 2 has a TMK sentinel, Jan 3 an RSK sentinel and Jan 25 no humidity.
        let periods: Vec<_> = table.rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, ["2020-01-01", "2020-01-20"]);

        let value = serde_json::to_value(&table)?;
        assert_eq!(
            value,
            json!({
                "aggregation": "daily",
                "rows": [
                    {
                        "Datum": "2020-01-01",
                        "Durchschnittstemperatur": 10,
                        "Max. Temperatur": 12,
                        "Min. Temperatur": 8,
                        "Niederschlagssumme": 2,
                        "Luftfeuchtigkeit": 80
                    },
                    {
                        "Datum": "2020-01-20",
                        "Durchschnittstemperatur": 3,
                        "Max. Temperatur": 5,
                        "Min. Temperatur": 1,
                        "Niederschlagssumme": 2,
                        "Luftfeuchtigkeit": "k.A."
                    }
                ]
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_monthly_history_aggregates_each_metric() -> Result<(), Box<dyn Error>> {
        let table = assembler()
            .await?
            .assemble(Granularity::Monthly, BREMEN, date(2020, 1, 1), date(2020, 12, 31))
            .await?;

        let periods: Vec<_> = table.rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, ["2020-01", "2020-03"]);

        let january = &table.rows[0];
        assert_eq!(
            january.get(Metric::MeanTemperature),
            Some(&CleanValue::Number(9.0))
        );
        assert_eq!(
            january.get(Metric::MaxTemperature),
            Some(&CleanValue::Number(11.0))
        );
        // 1.5 + 0.0 + 2.25
        assert_eq!(
            january.get(Metric::Precipitation),
            Some(&CleanValue::Number(4.0))
        );

        let value = serde_json::to_value(january)?;
        assert_eq!(value["Monats/Jahreszeitraum"], json!("2020-01"));
        assert!(value.get("Datum").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_day_without_humidity() -> Result<(), StoreError> {
        let assembler = assembler().await?;
        let day = date(2020, 1, 25);

        let daily = assembler
            .assemble(Granularity::Daily, BREMEN, day, day)
            .await?;
        assert!(daily.rows.is_empty());

        let monthly = assembler
            .assemble(Granularity::Monthly, BREMEN, day, day)
            .await?;
        assert_eq!(monthly.rows.len(), 1);
        let row = &monthly.rows[0];
        assert_eq!(row.get(Metric::MeanTemperature), Some(&CleanValue::Number(9.0)));
        assert_eq!(row.get(Metric::Precipitation), Some(&CleanValue::Number(0.0)));
        assert_eq!(row.get(Metric::Humidity), Some(&CleanValue::Missing));

        // The other January days still make up the humidity mean: (80.456 + 85 + 90) / 3
        let january = assembler
            .assemble(Granularity::Monthly, BREMEN, date(2020, 1, 1), date(2020, 1, 31))
            .await?;
        assert_eq!(
            january.rows[0].get(Metric::Humidity),
            Some(&CleanValue::Number(85.0))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_yearly_history() -> Result<(), StoreError> {
        let table = assembler()
            .await?
            .assemble(Granularity::Yearly, BREMEN, date(2019, 6, 1), date(2021, 12, 31))
            .await?;

        let periods: Vec<_> = table.rows.iter().map(|r| r.period.as_str()).collect();
        assert_eq!(periods, ["2020", "2021"]);
        assert_eq!(
            table.rows[1].get(Metric::MeanTemperature),
            Some(&CleanValue::Number(-3.0))
        );
        assert_eq!(table.aggregation, Granularity::Yearly);
        Ok(())
    }

    #[tokio::test]
    async fn test_history_columns_follow_tracked_order() -> Result<(), StoreError> {
        let table = assembler()
            .await?
            .assemble(Granularity::Monthly, BREMEN, date(2021, 1, 1), date(2021, 1, 31))
            .await?;
        let metrics: Vec<_> = table.rows[0].values.iter().map(|(m, _)| *m).collect();
        assert_eq!(metrics, Metric::TRACKED);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_range_does_not_query() -> Result<(), StoreError> {
        let store = seeded_store().await?;
        store.pool().close().await;
        let table = HistoryAssembler::new(store, ValueCleaner::default())
            .assemble(Granularity::Monthly, BREMEN, date(2020, 3, 1), date(2020, 1, 1))
            .await?;
        assert!(table.rows.is_empty());
        Ok(())
    }
}
