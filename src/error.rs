use crate::store::error::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KlimadatenError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Unknown metric '{0}'")]
    InvalidMetric(String),

    #[error("Unknown aggregation '{0}', expected daily, monthly or yearly")]
    InvalidGranularity(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Failed to determine data directory")]
    DataDirResolution,
}
