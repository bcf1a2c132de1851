use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort validation instead of being reported in the result record.
///
/// Per-address problems (bad syntax, failed MX lookups) never surface here; they
/// are captured as fields of [`ValidationResult`](crate::models::ValidationResult).
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read reference data from {path}: {source}")]
    ReferenceData {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no trust rules registered")]
    NoTrustRules,
    #[error("invalid trust rule pattern {pattern:?}: {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("failed to initialise DNS resolver: {0}")]
    ResolverInit(#[source] io::Error),
    #[error("failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
