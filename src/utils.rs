use crate::KlimadatenError;
use chrono::NaiveDate;
use std::path::PathBuf;

const DATA_DIR_NAME: &str = "klimadaten";
const DATABASE_FILE_NAME: &str = "Wetterdaten.db";

/// `<data dir>/klimadaten/Wetterdaten.db`, e.g. `~/.local/share/klimadaten/Wetterdaten.db` on Linux.
pub fn default_database_path() -> Result<PathBuf, KlimadatenError> {
    dirs::data_dir()
        .ok_or(KlimadatenError::DataDirResolution)
        .map(|p| p.join(DATA_DIR_NAME).join(DATABASE_FILE_NAME))
}

/// Parses an ISO `YYYY-MM-DD` request date.
pub fn parse_request_date(value: &str) -> Result<NaiveDate, KlimadatenError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| KlimadatenError::InvalidDate(value.to_string()))
}
