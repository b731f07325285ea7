use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open climate database '{0}'")]
    Open(PathBuf, #[source] sqlx::Error),

    #[error("Failed to create database directory '{0}'")]
    DataDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to create climate schema")]
    Schema(#[source] sqlx::Error),

    #[error("Climate database unavailable")]
    Unavailable(#[from] sqlx::Error),
}
