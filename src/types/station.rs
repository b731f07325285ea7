//! Defines the data structures representing DWD weather stations as listed in
//! the archive's station description file.

use chrono::NaiveDate;
use serde::Serialize;

/// A weather station of the daily climate archive.
///
/// Serializes with the archive's own column names (`STATIONS_ID`,
/// `STATIONSNAME`, ...), which is the shape map and search front ends expect.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Station {
    /// The unique DWD station identifier (e.g. `691` for Bremen).
    #[serde(rename = "STATIONS_ID")]
    pub id: i64,
    /// First day covered by the station's daily record, if known.
    #[serde(rename = "VON_DATUM")]
    pub valid_from: Option<NaiveDate>,
    /// Last day covered by the station's daily record, if known.
    #[serde(rename = "BIS_DATUM")]
    pub valid_to: Option<NaiveDate>,
    #[serde(flatten)]
    pub location: Location,
    #[serde(rename = "STATIONSNAME")]
    pub name: String,
    /// The federal state (Bundesland).
    #[serde(rename = "BUNDESLAND")]
    pub region: Option<String>,
    /// Data release flag (`Abgabe`), e.g. `Frei`.
    #[serde(rename = "ABGABE")]
    pub release: Option<String>,
}

/// Represents the geographical location of a weather station.
///
/// Some archive rows carry no coordinates; they serialize as `null`.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees (positive for North).
    #[serde(rename = "GEOBREITE")]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees (positive for East).
    #[serde(rename = "GEOLAENGE")]
    pub longitude: Option<f64>,
    /// Elevation above sea level in meters, if available.
    #[serde(rename = "STATIONSHOEHE")]
    pub elevation: Option<f64>,
}

/// A station together with its distance to a query point.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct NearbyStation {
    #[serde(flatten)]
    pub station: Station,
    pub distance_km: f64,
}

/// Parses the validity dates found in the station table. The archive writes
/// `YYYYMMDD`; rows written by other tooling may use ISO dates.
pub(crate) fn parse_station_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

impl Location {
    /// `(latitude, longitude)` when both are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}
