//! A small in-memory data set shared by the unit tests.

use crate::store::error::StoreError;
use crate::store::sqlite::ClimateStore;
use crate::types::metric::Metric;
use crate::types::observation::Observation;
use crate::types::station::{Location, Station};
use chrono::NaiveDate;

pub(crate) const BREMEN: i64 = 691;
pub(crate) const HANNOVER: i64 = 2014;
pub(crate) const POTSDAM: i64 = 3987;

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub(crate) fn station(id: i64, name: &str, latitude: f64, longitude: f64) -> Station {
    Station {
        id,
        valid_from: Some(date(1890, 1, 1)),
        valid_to: None,
        location: Location {
            latitude: Some(latitude),
            longitude: Some(longitude),
            elevation: Some(10.0),
        },
        name: name.to_string(),
        region: Some("Niedersachsen".to_string()),
        release: Some("Frei".to_string()),
    }
}

pub(crate) fn stations() -> Vec<Station> {
    vec![
        station(BREMEN, "Bremen", 53.0450, 8.7979),
        station(1766, "Münster/Osnabrück", 52.1344, 7.6969),
        station(HANNOVER, "Hannover", 52.4644, 9.6779),
        station(POTSDAM, "Potsdam", 52.3812, 13.0622),
        station(5792, "Zugspitze", 47.4209, 10.9847),
        station(4928, "Stuttgart (Schnarrenberg)", 48.8281, 9.2000),
    ]
}

/// Bremen observations around the turn of 2020, with sentinels, a text
/// reading, a day without humidity and no rows at all in February.
pub(crate) fn observations() -> Vec<Observation> {
    let day = |d: NaiveDate| Observation::new(BREMEN, d);
    vec![
        day(date(2020, 1, 1))
            .with(Metric::MeanTemperature, 10.0)
            .with(Metric::MaxTemperature, 12.0)
            .with(Metric::MinTemperature, 8.0)
            .with(Metric::Precipitation, 1.5)
            .with(Metric::Humidity, 80.456),
        day(date(2020, 1, 2))
            .with(Metric::MeanTemperature, -999.0)
            .with(Metric::MaxTemperature, 11.0)
            .with(Metric::MinTemperature, 7.0)
            .with(Metric::Precipitation, 0.0)
            .with(Metric::Humidity, 85.0),
        day(date(2020, 1, 3))
            .with(Metric::MeanTemperature, 14.0)
            .with(Metric::MaxTemperature, 16.0)
            .with(Metric::MinTemperature, 11.0)
            .with(Metric::Precipitation, -999_i64)
            .with(Metric::Humidity, 90.0),
        day(date(2020, 1, 20))
            .with(Metric::MeanTemperature, 3.0)
            .with(Metric::MaxTemperature, 5.0)
            .with(Metric::MinTemperature, 1.0)
            .with(Metric::Precipitation, 2.25)
            .with(Metric::Humidity, "k.A."),
        // Keeps the January means and sums of the other days unchanged
        day(date(2020, 1, 25))
            .with(Metric::MeanTemperature, 9.0)
            .with(Metric::MaxTemperature, 11.0)
            .with(Metric::MinTemperature, 6.0)
            .with(Metric::Precipitation, 0.0),
        day(date(2020, 3, 4))
            .with(Metric::MeanTemperature, 6.0)
            .with(Metric::MaxTemperature, 9.0)
            .with(Metric::MinTemperature, 2.0)
            .with(Metric::Precipitation, 3.75)
            .with(Metric::Humidity, 70.0),
        day(date(2021, 1, 10))
            .with(Metric::MeanTemperature, -2.5)
            .with(Metric::MaxTemperature, 0.5)
            .with(Metric::MinTemperature, -4.0)
            .with(Metric::Precipitation, 0.5)
            .with(Metric::Humidity, 92.0),
    ]
}

pub(crate) async fn seeded_store() -> Result<ClimateStore, StoreError> {
    let store = ClimateStore::in_memory().await?;
    seed(&store).await?;
    Ok(store)
}

pub(crate) async fn seed(store: &ClimateStore) -> Result<(), StoreError> {
    for station in stations() {
        store.insert_station(&station).await?;
    }
    store.insert_observations(&observations()).await?;
    Ok(())
}
