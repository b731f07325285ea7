mod error;
mod klimadaten;
mod series;
mod stations;
mod store;
mod types;
mod utils;

pub use error::KlimadatenError;
pub use klimadaten::*;

pub use series::aggregator::Aggregator;
pub use series::cleaner::ValueCleaner;
pub use series::history::HistoryAssembler;
pub use series::period_range::PeriodRangeGenerator;

pub use stations::locate_station::{haversine_km, StationLocator, DEFAULT_LIMIT};

pub use store::error::StoreError;
pub use store::sqlite::{ClimateStore, StoreOptions};

pub use types::chart::ChartSeries;
pub use types::granularity::Granularity;
pub use types::history::{HistoryRecord, HistoryTable, DAY_LABEL, PERIOD_LABEL};
pub use types::metric::{Aggregation, Metric};
pub use types::observation::Observation;
pub use types::period::{Month, PeriodKey, Year};
pub use types::station::{Location, NearbyStation, Station};
pub use types::value::{CleanValue, Precision, RawValue, MISSING_MARKER, MISSING_SENTINEL};

pub use utils::{default_database_path, parse_request_date};
