//! The fixed table of measurement columns of the DWD daily climate product
//! (`produkt_klima_tag`) that can be charted or listed in history tables.

use crate::KlimadatenError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How the days of a month or year are combined into a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    /// Arithmetic mean of the valid days (temperatures, humidity, wind, ...).
    Mean,
    /// Sum of the valid days (precipitation, sunshine duration).
    Sum,
}

impl Aggregation {
    pub(crate) fn sql_function(&self) -> &'static str {
        match self {
            Aggregation::Mean => "AVG",
            Aggregation::Sum => "SUM",
        }
    }
}

/// A measurement column of the daily observation table.
///
/// Each metric knows its storage column, its aggregation function and the
/// display label used in history tables and chart legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    #[serde(rename = "TMK")]
    MeanTemperature,
    #[serde(rename = "TXK")]
    MaxTemperature,
    #[serde(rename = "TNK")]
    MinTemperature,
    #[serde(rename = "TGK")]
    MinGroundTemperature,
    #[serde(rename = "RSK")]
    Precipitation,
    #[serde(rename = "UPM")]
    Humidity,
    #[serde(rename = "FM")]
    WindSpeed,
    #[serde(rename = "FX")]
    WindGust,
    #[serde(rename = "SDK")]
    Sunshine,
    #[serde(rename = "SHK_TAG")]
    SnowDepth,
    #[serde(rename = "NM")]
    CloudCover,
    #[serde(rename = "VPM")]
    VapourPressure,
    #[serde(rename = "PM")]
    Pressure,
}

impl Metric {
    pub const ALL: [Metric; 13] = [
        Metric::MeanTemperature,
        Metric::MaxTemperature,
        Metric::MinTemperature,
        Metric::MinGroundTemperature,
        Metric::Precipitation,
        Metric::Humidity,
        Metric::WindSpeed,
        Metric::WindGust,
        Metric::Sunshine,
        Metric::SnowDepth,
        Metric::CloudCover,
        Metric::VapourPressure,
        Metric::Pressure,
    ];

    /// Columns of a history table, in display order.
    pub const TRACKED: [Metric; 5] = [
        Metric::MeanTemperature,
        Metric::MaxTemperature,
        Metric::MinTemperature,
        Metric::Precipitation,
        Metric::Humidity,
    ];

    /// Column name in `produkt_klima_tag`, also the name used in requests.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::MeanTemperature => "TMK",
            Metric::MaxTemperature => "TXK",
            Metric::MinTemperature => "TNK",
            Metric::MinGroundTemperature => "TGK",
            Metric::Precipitation => "RSK",
            Metric::Humidity => "UPM",
            Metric::WindSpeed => "FM",
            Metric::WindGust => "FX",
            Metric::Sunshine => "SDK",
            Metric::SnowDepth => "SHK_TAG",
            Metric::CloudCover => "NM",
            Metric::VapourPressure => "VPM",
            Metric::Pressure => "PM",
        }
    }

    pub fn aggregation(&self) -> Aggregation {
        match self {
            Metric::Precipitation | Metric::Sunshine => Aggregation::Sum,
            _ => Aggregation::Mean,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::MeanTemperature => "Durchschnittstemperatur",
            Metric::MaxTemperature => "Max. Temperatur",
            Metric::MinTemperature => "Min. Temperatur",
            Metric::MinGroundTemperature => "Min. Temperatur 5cm",
            Metric::Precipitation => "Niederschlagssumme",
            Metric::Humidity => "Luftfeuchtigkeit",
            Metric::WindSpeed => "Windgeschwindigkeit",
            Metric::WindGust => "Windspitze",
            Metric::Sunshine => "Sonnenscheindauer",
            Metric::SnowDepth => "Schneehöhe",
            Metric::CloudCover => "Bedeckungsgrad",
            Metric::VapourPressure => "Dampfdruck",
            Metric::Pressure => "Luftdruck",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Parses a column name such as `TMK` or `RSK`.
///
/// # Examples
///
/// ```
/// use klimadaten::{Aggregation, Metric};
///
/// let metric: Metric = "RSK".parse().unwrap();
/// assert_eq!(metric.aggregation(), Aggregation::Sum);
/// assert!("UNKNOWN_METRIC".parse::<Metric>().is_err());
/// ```
impl FromStr for Metric {
    type Err = KlimadatenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.column() == s)
            .ok_or_else(|| KlimadatenError::InvalidMetric(s.to_string()))
    }
}
