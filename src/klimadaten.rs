//! This module provides the main entry point of the crate: the [`Klimadaten`]
//! client, which answers chart, history and station requests against a DWD
//! daily climate database.

use crate::error::KlimadatenError;
use crate::series::aggregator::Aggregator;
use crate::series::cleaner::ValueCleaner;
use crate::series::history::HistoryAssembler;
use crate::stations::locate_station::{StationLocator, DEFAULT_LIMIT};
use crate::store::sqlite::{ClimateStore, StoreOptions};
use crate::types::chart::ChartSeries;
use crate::types::granularity::Granularity;
use crate::types::history::HistoryTable;
use crate::types::metric::Metric;
use crate::types::station::{NearbyStation, Station};
use crate::types::value::Precision;
use crate::utils::{default_database_path, parse_request_date};
use bon::bon;
use std::path::PathBuf;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use klimadaten::LatLon;
///
/// let bremen = LatLon(53.0450, 8.7979);
/// assert_eq!(bremen.0, 53.0450); // Latitude
/// assert_eq!(bremen.1, 8.7979); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The main client for querying the climate archive.
///
/// Every request is validated first (metric names, aggregation names and
/// dates), then answered with one read query against the shared store.
///
/// Create an instance with [`Klimadaten::new()`] for the default database
/// location, [`Klimadaten::with_database()`] for a custom file, or
/// [`Klimadaten::from_store()`] to reuse an existing [`ClimateStore`].
///
/// # Examples
///
/// ```rust,no_run
/// # use klimadaten::{Klimadaten, KlimadatenError};
/// # async fn run() -> Result<(), KlimadatenError> {
/// let client = Klimadaten::new().await?;
/// let series = client
///     .chart()
///     .metric("TMK")
///     .station(691)
///     .granularity("monthly")
///     .start("2020-01-01")
///     .end("2020-12-31")
///     .call()
///     .await?;
/// assert_eq!(series.len(), 12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Klimadaten {
    store: ClimateStore,
}

#[bon]
impl Klimadaten {
    /// Opens the default database read-only.
    ///
    /// The file lives at `<data dir>/klimadaten/Wetterdaten.db`, with the data
    /// directory resolved through the `dirs` crate (e.g. `~/.local/share` on Linux).
    ///
    /// # Errors
    ///
    /// Returns [`KlimadatenError::DataDirResolution`] if there is no data directory
    /// for the current user, and [`KlimadatenError::Store`] if the database cannot
    /// be opened.
    pub async fn new() -> Result<Self, KlimadatenError> {
        Self::with_database(default_database_path()?).await
    }

    /// Opens the database at `path` read-only.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use klimadaten::{Klimadaten, KlimadatenError};
    /// # async fn run() -> Result<(), KlimadatenError> {
    /// let client = Klimadaten::with_database("/srv/dwd/Wetterdaten.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_database(path: impl Into<PathBuf>) -> Result<Self, KlimadatenError> {
        Self::with_options(StoreOptions::builder().path(path).build()).await
    }

    pub async fn with_options(options: StoreOptions) -> Result<Self, KlimadatenError> {
        Ok(Self::from_store(ClimateStore::connect(options).await?))
    }

    pub fn from_store(store: ClimateStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ClimateStore {
        &self.store
    }

    /// Every station, ordered by station id.
    pub async fn all_stations(&self) -> Result<Vec<Station>, KlimadatenError> {
        Ok(self.store.stations().await?)
    }

    /// Finds the stations closest to a location, nearest first.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** The point to measure from.
    /// * `.limit(usize)`: Optional. Maximum number of stations returned. Defaults to `5`;
    ///   `0` returns no stations.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use klimadaten::{Klimadaten, KlimadatenError, LatLon};
    /// # async fn run() -> Result<(), KlimadatenError> {
    /// let client = Klimadaten::new().await?;
    /// let nearby = client
    ///     .nearest_stations()
    ///     .location(LatLon(53.08, 8.80))
    ///     .limit(3)
    ///     .call()
    ///     .await?;
    /// for n in &nearby {
    ///     println!("{} ({:.1} km)", n.station.name, n.distance_km);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn nearest_stations(
        &self,
        location: LatLon,
        limit: Option<usize>,
    ) -> Result<Vec<NearbyStation>, KlimadatenError> {
        let locator = StationLocator::from_store(&self.store).await?;
        Ok(locator
            .nearest(location.0, location.1, limit.unwrap_or(DEFAULT_LIMIT))
            .into_iter()
            .map(|(station, distance_km)| NearbyStation {
                station,
                distance_km,
            })
            .collect())
    }

    /// Builds the history table of a station: the tracked metrics per day,
    /// month or year.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.granularity(&str)`: **Required.** `daily`, `monthly` or `yearly`.
    /// * `.station(i64)`: **Required.** DWD station id.
    /// * `.start(&str)`, `.end(&str)`: **Required.** Inclusive `YYYY-MM-DD` bounds.
    /// * `.precision(Precision)`: Optional. Defaults to whole numbers.
    ///
    /// # Errors
    ///
    /// [`KlimadatenError::InvalidGranularity`] and [`KlimadatenError::InvalidDate`]
    /// are returned before the store is queried.
    #[builder]
    pub async fn history(
        &self,
        granularity: &str,
        station: i64,
        start: &str,
        end: &str,
        precision: Option<Precision>,
    ) -> Result<HistoryTable, KlimadatenError> {
        let granularity: Granularity = granularity.parse()?;
        let (start, end) = (parse_request_date(start)?, parse_request_date(end)?);
        let cleaner = ValueCleaner::new(precision.unwrap_or_default());

        Ok(HistoryAssembler::new(self.store.clone(), cleaner)
            .assemble(granularity, station, start, end)
            .await?)
    }

    /// Builds a gap-filled series of one metric for charting.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.metric(&str)`: **Required.** Column name such as `TMK` or `RSK`.
    /// * `.station(i64)`: **Required.** DWD station id.
    /// * `.granularity(&str)`: **Required.** `daily`, `monthly` or `yearly`.
    /// * `.start(&str)`, `.end(&str)`: **Required.** Inclusive `YYYY-MM-DD` bounds.
    /// * `.precision(Precision)`: Optional. Defaults to whole numbers.
    ///
    /// # Errors
    ///
    /// [`KlimadatenError::InvalidMetric`], [`KlimadatenError::InvalidGranularity`] and
    /// [`KlimadatenError::InvalidDate`] are returned before the store is queried.
    #[builder]
    pub async fn chart(
        &self,
        metric: &str,
        station: i64,
        granularity: &str,
        start: &str,
        end: &str,
        precision: Option<Precision>,
    ) -> Result<ChartSeries, KlimadatenError> {
        let metric: Metric = metric.parse()?;
        let granularity: Granularity = granularity.parse()?;
        let (start, end) = (parse_request_date(start)?, parse_request_date(end)?);
        let cleaner = ValueCleaner::new(precision.unwrap_or_default());

        Ok(Aggregator::new(self.store.clone(), cleaner)
            .aggregate(metric, station, granularity, start, end)
            .await?)
    }
}
