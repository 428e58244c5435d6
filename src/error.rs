//! Error types for the library's I/O paths
//!
//! Matching itself is total and never returns an error.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlantPalError>;

#[derive(Error, Debug)]
pub enum PlantPalError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed store file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Plant not in catalog: {0}")]
    UnknownPlant(String),

    #[error("Selection store lock poisoned")]
    LockPoisoned,

    #[error("Recommendation service returned HTTP {0}")]
    UnexpectedStatus(u16),

    #[error("Network error: {0}")]
    Network(String),
}
