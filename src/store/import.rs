//! Schema bootstrap and the insert-or-ignore write path used by importers and
//! fixtures. Query components never call into this module.

use crate::store::error::StoreError;
use crate::store::sqlite::{ClimateStore, OBSERVATION_TABLE};
use crate::types::observation::Observation;
use crate::types::station::Station;
use crate::types::value::RawValue;
use log::info;

const CREATE_STATION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Station (
    STATIONS_ID   INTEGER PRIMARY KEY,
    VON_DATUM     DATE,
    BIS_DATUM     DATE,
    STATIONSHOEHE REAL,
    GEOBREITE     REAL,
    GEOLAENGE     REAL,
    STATIONSNAME  TEXT,
    BUNDESLAND    TEXT,
    ABGABE        TEXT
)
"#;

const CREATE_OBSERVATION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS produkt_klima_tag (
    MESS_ID     INTEGER PRIMARY KEY AUTOINCREMENT,
    STATIONS_ID INTEGER,
    FX          REAL,
    FM          REAL,
    QN_4        INTEGER,
    RSK         REAL,
    RSKF        INTEGER,
    SDK         REAL,
    SHK_TAG     REAL,
    NM          REAL,
    VPM         REAL,
    MESS_DATUM  DATE,
    TMK         REAL,
    PM          REAL,
    UPM         REAL,
    TXK         REAL,
    TNK         REAL,
    TGK         REAL,
    QN_3        REAL,
    FOREIGN KEY (STATIONS_ID) REFERENCES Station(STATIONS_ID)
)
"#;

const CREATE_OBSERVATION_INDEX: &str = r#"
CREATE UNIQUE INDEX IF NOT EXISTS idx_produkt_klima_tag_station_date
    ON produkt_klima_tag (STATIONS_ID, MESS_DATUM)
"#;

impl ClimateStore {
    /// Creates the `Station` and `produkt_klima_tag` tables if they are absent.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in [
            CREATE_STATION_TABLE,
            CREATE_OBSERVATION_TABLE,
            CREATE_OBSERVATION_INDEX,
        ] {
            sqlx::query(statement)
                .execute(self.pool())
                .await
                .map_err(StoreError::Schema)?;
        }
        Ok(())
    }

    /// Inserts a station unless its id already exists; existing rows are kept
    /// as they are. Returns whether a row was written.
    pub async fn insert_station(&self, station: &Station) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO Station (
                STATIONS_ID, VON_DATUM, BIS_DATUM, STATIONSHOEHE, GEOBREITE,
                GEOLAENGE, STATIONSNAME, BUNDESLAND, ABGABE
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(station.id)
        .bind(station.valid_from.map(|d| d.format("%Y%m%d").to_string()))
        .bind(station.valid_to.map(|d| d.format("%Y%m%d").to_string()))
        .bind(station.location.elevation)
        .bind(station.location.latitude)
        .bind(station.location.longitude)
        .bind(station.name.as_str())
        .bind(station.region.as_deref())
        .bind(station.release.as_deref())
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Writes daily observations in one transaction. A day already stored for
    /// the same station is left untouched. Returns the number of rows written.
    pub async fn insert_observations(
        &self,
        observations: &[Observation],
    ) -> Result<u64, StoreError> {
        let mut tx = self.pool().begin().await?;
        let mut written = 0;
        for observation in observations {
            let columns: String = observation
                .values
                .iter()
                .map(|(metric, _)| format!(", {}", metric.column()))
                .collect();
            let placeholders = ", ?".repeat(observation.values.len());
            let sql = format!(
                "INSERT OR IGNORE INTO {OBSERVATION_TABLE} (STATIONS_ID, MESS_DATUM{columns}) VALUES (?, ?{placeholders})"
            );

            let mut query = sqlx::query(&sql)
                .bind(observation.station_id)
                .bind(observation.date.format("%Y-%m-%d").to_string());
            for (_, value) in &observation.values {
                query = match value {
                    RawValue::Null => query.bind(None::<f64>),
                    RawValue::Integer(i) => query.bind(*i),
                    RawValue::Float(f) => query.bind(*f),
                    RawValue::Text(text) => query.bind(text.clone()),
                };
            }
            written += query.execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;
        info!("Stored {written} of {} observations", observations.len());
        Ok(written)
    }
}
