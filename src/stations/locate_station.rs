use crate::store::error::StoreError;
use crate::store::sqlite::ClimateStore;
use crate::types::station::Station;
use haversine::{distance, Location as HaversineLocation, Units};
use log::debug;
use ordered_float::OrderedFloat;

/// Default number of stations returned by a proximity query.
pub const DEFAULT_LIMIT: usize = 5;

/// Ranks stations by great-circle distance to a query point.
///
/// Every station with coordinates is a candidate; there is no radius or
/// bounding-box pre-filter. Stations keep the order they were loaded in
/// (ascending station id when loaded from the store), which decides between
/// equal distances.
#[derive(Debug, Clone)]
pub struct StationLocator {
    stations: Vec<Station>,
}

impl StationLocator {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    pub async fn from_store(store: &ClimateStore) -> Result<Self, StoreError> {
        Ok(Self::new(store.stations().await?))
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Up to `limit` stations closest to (`latitude`, `longitude`), nearest
    /// first, each paired with its distance in kilometres.
    pub fn nearest(&self, latitude: f64, longitude: f64, limit: usize) -> Vec<(Station, f64)> {
        if limit == 0 {
            return vec![];
        }

        let mut ranked: Vec<(&Station, f64)> = self
            .stations
            .iter()
            .filter_map(|station| {
                let (lat, lon) = station.location.coordinates()?;
                Some((station, haversine_km(latitude, longitude, lat, lon)))
            })
            .collect();
        // sort_by_key is stable
        ranked.sort_by_key(|(_, km)| OrderedFloat(*km));
        ranked.truncate(limit);

        debug!(
            "Ranked {} stations around ({latitude}, {longitude}), keeping {}",
            self.stations.len(),
            ranked.len()
        );
        ranked
            .into_iter()
            .map(|(station, km)| (station.clone(), km))
            .collect()
    }
}

/// Great-circle distance in kilometres on a sphere of radius 6371 km.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance(
        HaversineLocation {
            latitude: lat1,
            longitude: lon1,
        },
        HaversineLocation {
            latitude: lat2,
            longitude: lon2,
        },
        Units::Kilometers,
    )
}
