//! Storage backend trait abstraction
//!
//! Splits the two connections the seeding flow needs: an admin connection to
//! the maintenance database for CREATE/DROP DATABASE, and a connection to the
//! target database for schema and row operations.

use async_trait::async_trait;
use votereg_core::{DbConfig, VoterRegistrationRecord};

use crate::error::StorageError;

/// Database-level DDL issued over the admin connection.
#[async_trait]
pub trait DatabaseAdmin: Send {
    /// `CREATE DATABASE`. Fails with [`StorageError::DuplicateDatabase`] if it exists.
    async fn create_database(&mut self, name: &str) -> Result<(), StorageError>;

    /// `DROP DATABASE IF EXISTS`. Dropping a missing database succeeds.
    async fn drop_database(&mut self, name: &str) -> Result<(), StorageError>;

    /// Release the connection.
    async fn close(self) -> Result<(), StorageError>
    where
        Self: Sized;
}

/// Row operations on the records table of the target database.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create the records table if it does not exist.
    async fn ensure_schema(&self) -> Result<(), StorageError>;

    /// Insert the record, or overwrite every field of the row with the same state.
    async fn upsert_record(&self, record: &VoterRegistrationRecord) -> Result<(), StorageError>;

    /// All records ordered by state.
    async fn list_records(&self) -> Result<Vec<VoterRegistrationRecord>, StorageError>;

    async fn count_records(&self) -> Result<usize, StorageError>;

    /// Release the connection(s). Later calls fail.
    async fn close(&self);
}

/// Opens the admin and target connections for a configuration.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    type Admin: DatabaseAdmin;
    type Store: RecordStore;

    async fn connect_admin(&self, config: &DbConfig) -> Result<Self::Admin, StorageError>;

    async fn connect_target(&self, config: &DbConfig) -> Result<Self::Store, StorageError>;
}
