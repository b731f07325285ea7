//! Read access to the climate database: the `Station` table and the DWD daily
//! product table `produkt_klima_tag`.

use crate::store::error::StoreError;
use crate::types::granularity::Granularity;
use crate::types::metric::Metric;
use crate::types::period::PeriodKey;
use crate::types::station::{parse_station_date, Location, Station};
use crate::types::value::RawValue;
use bon::Builder;
use chrono::NaiveDate;
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::PathBuf;
use std::str::FromStr;

pub(crate) const OBSERVATION_TABLE: &str = "produkt_klima_tag";

/// Connection settings for [`ClimateStore::connect`].
///
/// # Examples
///
/// ```
/// use klimadaten::StoreOptions;
///
/// let options = StoreOptions::builder()
///     .path("/var/lib/klimadaten/Wetterdaten.db")
///     .max_connections(2)
///     .build();
/// assert!(options.read_only());
/// ```
#[derive(Debug, Clone, Builder)]
pub struct StoreOptions {
    #[builder(into)]
    path: PathBuf,
    #[builder(default = 5)]
    max_connections: u32,
    #[builder(default = false)]
    create_if_missing: bool,
    #[builder(default = true)]
    read_only: bool,
}

impl StoreOptions {
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }
}

/// Handle to the observation store, shared by every query component.
///
/// Cloning is cheap: clones share one connection pool, and every query
/// checks a connection out of it only for its own duration.
#[derive(Debug, Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
}

impl ClimateStore {
    pub async fn connect(options: StoreOptions) -> Result<Self, StoreError> {
        if options.create_if_missing {
            if let Some(parent) = options.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::DataDirCreation(parent.to_path_buf(), e))?;
            }
        }

        let connect_options = SqliteConnectOptions::new()
            .filename(&options.path)
            .create_if_missing(options.create_if_missing)
            .read_only(options.read_only)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::Open(options.path.clone(), e))?;

        info!(
            "Opened climate database at {} (read_only: {})",
            options.path.display(),
            options.read_only
        );
        Ok(Self { pool })
    }

    /// Opens a private in-memory database with the schema already created.
    ///
    /// The pool holds exactly one connection that is never recycled, since an
    /// in-memory SQLite database lives only as long as its connection.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let path = PathBuf::from(":memory:");
        let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StoreError::Open(path.clone(), e))?
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::Open(path, e))?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All stations, ordered by station id, including those without coordinates.
    pub async fn stations(&self) -> Result<Vec<Station>, StoreError> {
        let rows: Vec<StationRow> = sqlx::query_as(
            r#"
            SELECT
                STATIONS_ID,
                CAST(VON_DATUM AS TEXT) AS VON_DATUM,
                CAST(BIS_DATUM AS TEXT) AS BIS_DATUM,
                CAST(STATIONSHOEHE AS REAL) AS STATIONSHOEHE,
                CAST(GEOBREITE AS REAL) AS GEOBREITE,
                CAST(GEOLAENGE AS REAL) AS GEOLAENGE,
                STATIONSNAME,
                BUNDESLAND,
                ABGABE
            FROM Station
            ORDER BY STATIONS_ID ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let stations: Vec<Station> = rows.into_iter().map(StationRow::into_station).collect();
        debug!("Loaded {} stations", stations.len());
        Ok(stations)
    }

    /// Stored values of one metric for each day in `start..=end`, ordered by day.
    pub async fn daily_values(
        &self,
        metric: Metric,
        station_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(PeriodKey, RawValue)>, StoreError> {
        let column = metric.column();
        let sql = format!(
            r#"
            SELECT
                DATE(MESS_DATUM) AS period,
                typeof({column}) AS kind,
                CAST({column} AS TEXT) AS raw
            FROM {OBSERVATION_TABLE}
            WHERE STATIONS_ID = ?1
              AND DATE(MESS_DATUM) BETWEEN DATE(?2) AND DATE(?3)
            ORDER BY period ASC
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(station_id)
            .bind(iso(start))
            .bind(iso(end))
            .fetch_all(&self.pool)
            .await?;

        let values = rows
            .iter()
            .map(|row| -> Result<_, sqlx::Error> {
                Ok((period_at(row, 0)?, raw_value_at(row, 1)?))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        debug!(
            "Station {station_id}: {} daily {column} rows between {start} and {end}",
            values.len()
        );
        Ok(values)
    }

    /// Mean or sum (per [`Metric::aggregation`]) of one metric per period.
    ///
    /// Nulls, non-numeric text and `-999` sentinels are excluded from the
    /// aggregate. A period whose rows are all excluded yields `None`.
    pub async fn aggregated_values(
        &self,
        metric: Metric,
        granularity: Granularity,
        station_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(PeriodKey, Option<f64>)>, StoreError> {
        let sql = format!(
            r#"
            SELECT
                strftime('{pattern}', MESS_DATUM) AS period,
                {value}
            FROM {OBSERVATION_TABLE}
            WHERE STATIONS_ID = ?1
              AND DATE(MESS_DATUM) BETWEEN DATE(?2) AND DATE(?3)
            GROUP BY period
            ORDER BY period ASC
            "#,
            pattern = granularity.strftime_pattern(),
            value = aggregate_expr(metric),
        );

        let rows = sqlx::query(&sql)
            .bind(station_id)
            .bind(iso(start))
            .bind(iso(end))
            .fetch_all(&self.pool)
            .await?;

        let values = rows
            .iter()
            .map(|row| -> Result<_, sqlx::Error> {
                Ok((period_at(row, 0)?, row.try_get::<Option<f64>, _>(1)?))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        debug!(
            "Station {station_id}: {} {granularity} {metric} periods between {start} and {end}",
            values.len()
        );
        Ok(values)
    }

    /// Days on which every metric in `metrics` holds a real reading.
    ///
    /// Days with a null or `-999` in any of the columns are left out entirely.
    pub async fn complete_daily_rows(
        &self,
        metrics: &[Metric],
        station_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(PeriodKey, Vec<RawValue>)>, StoreError> {
        let columns = metrics
            .iter()
            .map(|m| {
                let c = m.column();
                format!("typeof({c}) AS {c}_kind, CAST({c} AS TEXT) AS {c}_raw")
            })
            .collect::<Vec<_>>()
            .join(",\n                ");
        let complete = metrics
            .iter()
            .map(|m| {
                let c = m.column();
                format!("AND {c} IS NOT NULL AND {c} <> -999")
            })
            .collect::<Vec<_>>()
            .join("\n              ");
        let sql = format!(
            r#"
            SELECT
                DATE(MESS_DATUM) AS period,
                {columns}
            FROM {OBSERVATION_TABLE}
            WHERE STATIONS_ID = ?1
              AND DATE(MESS_DATUM) BETWEEN DATE(?2) AND DATE(?3)
              {complete}
            ORDER BY period ASC
            "#
        );

        let rows = sqlx::query(&sql)
            .bind(station_id)
            .bind(iso(start))
            .bind(iso(end))
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| -> Result<_, sqlx::Error> {
                let values = (0..metrics.len())
                    .map(|i| raw_value_at(row, 1 + 2 * i))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((period_at(row, 0)?, values))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        debug!(
            "Station {station_id}: {} complete days between {start} and {end}",
            records.len()
        );
        Ok(records)
    }

    /// One row per period with the aggregate of every metric in `metrics`.
    pub async fn aggregated_rows(
        &self,
        metrics: &[Metric],
        granularity: Granularity,
        station_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(PeriodKey, Vec<Option<f64>>)>, StoreError> {
        let columns = metrics
            .iter()
            .map(|m| aggregate_expr(*m))
            .collect::<Vec<_>>()
            .join(",\n                ");
        let sql = format!(
            r#"
            SELECT
                strftime('{pattern}', MESS_DATUM) AS period,
                {columns}
            FROM {OBSERVATION_TABLE}
            WHERE STATIONS_ID = ?1
              AND DATE(MESS_DATUM) BETWEEN DATE(?2) AND DATE(?3)
            GROUP BY period
            ORDER BY period ASC
            "#,
            pattern = granularity.strftime_pattern(),
        );

        let rows = sqlx::query(&sql)
            .bind(station_id)
            .bind(iso(start))
            .bind(iso(end))
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| -> Result<_, sqlx::Error> {
                let values = (0..metrics.len())
                    .map(|i| row.try_get::<Option<f64>, _>(1 + i))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((period_at(row, 0)?, values))
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        debug!(
            "Station {station_id}: {} {granularity} history periods between {start} and {end}",
            records.len()
        );
        Ok(records)
    }
}

#[derive(sqlx::FromRow)]
struct StationRow {
    #[sqlx(rename = "STATIONS_ID")]
    id: i64,
    #[sqlx(rename = "VON_DATUM")]
    valid_from: Option<String>,
    #[sqlx(rename = "BIS_DATUM")]
    valid_to: Option<String>,
    #[sqlx(rename = "STATIONSHOEHE")]
    elevation: Option<f64>,
    #[sqlx(rename = "GEOBREITE")]
    latitude: Option<f64>,
    #[sqlx(rename = "GEOLAENGE")]
    longitude: Option<f64>,
    #[sqlx(rename = "STATIONSNAME")]
    name: Option<String>,
    #[sqlx(rename = "BUNDESLAND")]
    region: Option<String>,
    #[sqlx(rename = "ABGABE")]
    release: Option<String>,
}

impl StationRow {
    fn into_station(self) -> Station {
        Station {
            id: self.id,
            valid_from: self.valid_from.as_deref().and_then(parse_station_date),
            valid_to: self.valid_to.as_deref().and_then(parse_station_date),
            location: Location {
                latitude: self.latitude,
                longitude: self.longitude,
                elevation: self.elevation,
            },
            name: self.name.unwrap_or_default(),
            region: self.region,
            release: self.release,
        }
    }
}

/// `AVG`/`SUM` over the numeric, non-sentinel values of a metric column.
fn aggregate_expr(metric: Metric) -> String {
    let c = metric.column();
    format!(
        "CAST({func}(CASE WHEN typeof({c}) IN ('integer', 'real') AND {c} <> -999 THEN {c} END) AS REAL) AS {c}",
        func = metric.aggregation().sql_function(),
    )
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn period_at(row: &SqliteRow, index: usize) -> Result<PeriodKey, sqlx::Error> {
    row.try_get::<String, _>(index).map(PeriodKey::from)
}

/// Rebuilds the stored value from its `typeof` and text rendering, so columns
/// holding a mix of numbers and text decode without type errors.
fn raw_value_at(row: &SqliteRow, index: usize) -> Result<RawValue, sqlx::Error> {
    let kind: String = row.try_get(index)?;
    let raw: Option<String> = row.try_get(index + 1)?;
    let Some(text) = raw else {
        return Ok(RawValue::Null);
    };
    Ok(match kind.as_str() {
        "integer" => match text.parse::<i64>() {
            Ok(i) => RawValue::Integer(i),
            Err(_) => RawValue::Text(text),
        },
        "real" => match text.parse::<f64>() {
            Ok(f) => RawValue::Float(f),
            Err(_) => RawValue::Text(text),
        },
        "null" => RawValue::Null,
        _ => RawValue::Text(text),
    })
}
