use std::io;
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error;

/// Errors raised while loading configuration or resolving a header schema.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid SQL identifier for {what}: {value:?}")]
    InvalidIdentifier { what: &'static str, value: String },

    #[error("header row has no {0:?} column")]
    MissingKeyColumn(&'static str),

    #[error("unknown field: {0}")]
    UnknownField(String),
}

pub type Result<T> = StdResult<T, CoreError>;
