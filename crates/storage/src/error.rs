//! Typed error enum for the storage layer.
//!
//! Lets the bootstrap distinguish the one recoverable setup condition
//! (database already exists) from every other failure without inspecting
//! driver errors itself.

use thiserror::Error;
use votereg_core::{
    SQLSTATE_DUPLICATE_DATABASE, SQLSTATE_INVALID_CATALOG_NAME, SQLSTATE_UNDEFINED_TABLE,
};

/// Storage-layer error with variants covering every expected failure mode.
#[derive(Debug, Error)]
pub enum StorageError {
    /// `CREATE DATABASE` on a name that already exists (SQLSTATE 42P04).
    #[error("database already exists: {0}")]
    DuplicateDatabase(String),

    /// Connecting to a database that does not exist (SQLSTATE 3D000).
    #[error("unknown database: {0}")]
    UnknownDatabase(String),

    /// The records table has not been created (SQLSTATE 42P01).
    #[error("missing table: {0}")]
    MissingTable(String),

    /// Name rejected before being interpolated into DDL.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// SQL / connection failure.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Row data could not be mapped onto a record.
    #[error("data corruption: {context}")]
    DataCorruption {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StorageError {
    /// Whether this is the non-fatal "database already exists" condition.
    pub fn is_duplicate_database(&self) -> bool {
        matches!(self, Self::DuplicateDatabase(_))
    }

    pub fn is_missing_table(&self) -> bool {
        matches!(self, Self::MissingTable(_))
    }
}

/// Custom `From<sqlx::Error>`, classifying the SQLSTATEs the callers act on.
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        let classified = err.as_database_error().and_then(|db_err| {
            let code = db_err.code()?;
            let message = db_err.message().to_owned();
            match &*code {
                SQLSTATE_DUPLICATE_DATABASE => Some(Self::DuplicateDatabase(message)),
                SQLSTATE_INVALID_CATALOG_NAME => Some(Self::UnknownDatabase(message)),
                SQLSTATE_UNDEFINED_TABLE => Some(Self::MissingTable(message)),
                _ => None,
            }
        });
        classified.unwrap_or_else(|| Self::Database(err))
    }
}
