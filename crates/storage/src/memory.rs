//! In-process backend mirroring PostgreSQL semantics.
//!
//! A [`MemoryCluster`] holds named databases; each database holds at most one
//! records table keyed by state. Failure modes match the PostgreSQL backend:
//! duplicate `CREATE DATABASE`, connecting to a dropped database, and row
//! operations before the table exists all return the same [`StorageError`]
//! variants.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use votereg_core::{DbConfig, VoterRegistrationRecord};

use crate::error::StorageError;
use crate::traits::{DatabaseAdmin, RecordStore, StoreConnector};

type Table = BTreeMap<String, VoterRegistrationRecord>;

#[derive(Default)]
struct Database {
    tables: HashMap<String, Table>,
}

/// Shared set of in-memory databases. Clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryCluster {
    databases: Arc<Mutex<HashMap<String, Database>>>,
}

impl MemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn database_exists(&self, name: &str) -> bool {
        self.databases.lock().await.contains_key(name)
    }

    /// Open a store on an existing database without going through a connector.
    pub async fn open_store(
        &self,
        database: &str,
        table: &str,
    ) -> Result<MemoryStore, StorageError> {
        if !self.database_exists(database).await {
            return Err(StorageError::UnknownDatabase(format!(
                "database \"{database}\" does not exist"
            )));
        }
        Ok(MemoryStore {
            databases: Arc::clone(&self.databases),
            database: database.to_owned(),
            table: table.to_owned(),
            closed: Arc::new(AtomicBool::new(false)),
        })
    }
}

#[async_trait]
impl StoreConnector for MemoryCluster {
    type Admin = MemoryAdmin;
    type Store = MemoryStore;

    async fn connect_admin(&self, _config: &DbConfig) -> Result<MemoryAdmin, StorageError> {
        Ok(MemoryAdmin { databases: Arc::clone(&self.databases) })
    }

    async fn connect_target(&self, config: &DbConfig) -> Result<MemoryStore, StorageError> {
        self.open_store(&config.database_name, &config.table_name).await
    }
}

pub struct MemoryAdmin {
    databases: Arc<Mutex<HashMap<String, Database>>>,
}

#[async_trait]
impl DatabaseAdmin for MemoryAdmin {
    async fn create_database(&mut self, name: &str) -> Result<(), StorageError> {
        let mut databases = self.databases.lock().await;
        if databases.contains_key(name) {
            return Err(StorageError::DuplicateDatabase(format!(
                "database \"{name}\" already exists"
            )));
        }
        databases.insert(name.to_owned(), Database::default());
        Ok(())
    }

    async fn drop_database(&mut self, name: &str) -> Result<(), StorageError> {
        self.databases.lock().await.remove(name);
        Ok(())
    }

    async fn close(self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Handle on one table of one in-memory database.
#[derive(Clone)]
pub struct MemoryStore {
    databases: Arc<Mutex<HashMap<String, Database>>>,
    database: String,
    table: String,
    closed: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    async fn with_table<T: Send>(
        &self,
        f: impl FnOnce(&mut Table) -> T + Send,
    ) -> Result<T, StorageError> {
        if self.is_closed() {
            return Err(StorageError::Database(sqlx::Error::PoolClosed));
        }
        let mut databases = self.databases.lock().await;
        let database = databases.get_mut(&self.database).ok_or_else(|| {
            StorageError::UnknownDatabase(format!("database \"{}\" does not exist", self.database))
        })?;
        let table = database.tables.get_mut(&self.table).ok_or_else(|| {
            StorageError::MissingTable(format!("relation \"{}\" does not exist", self.table))
        })?;
        Ok(f(table))
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        if self.is_closed() {
            return Err(StorageError::Database(sqlx::Error::PoolClosed));
        }
        let mut databases = self.databases.lock().await;
        let database = databases.get_mut(&self.database).ok_or_else(|| {
            StorageError::UnknownDatabase(format!("database \"{}\" does not exist", self.database))
        })?;
        database.tables.entry(self.table.clone()).or_default();
        Ok(())
    }

    async fn upsert_record(&self, record: &VoterRegistrationRecord) -> Result<(), StorageError> {
        let record = record.clone();
        self.with_table(move |table| {
            table.insert(record.state.clone(), record);
        })
        .await
    }

    async fn list_records(&self) -> Result<Vec<VoterRegistrationRecord>, StorageError> {
        self.with_table(|table| table.values().cloned().collect()).await
    }

    async fn count_records(&self) -> Result<usize, StorageError> {
        self.with_table(|table| table.len()).await
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votereg_core::Field;

    async fn ready_store(cluster: &MemoryCluster) -> MemoryStore {
        let mut admin = MemoryAdmin { databases: Arc::clone(&cluster.databases) };
        admin.create_database("voter_info").await.unwrap();
        let store = cluster.open_store("voter_info", "deadlines").await.unwrap();
        store.ensure_schema().await.unwrap();
        store
    }

    #[tokio::test]
    async fn duplicate_create_is_classified() {
        let cluster = MemoryCluster::new();
        let mut admin = MemoryAdmin { databases: Arc::clone(&cluster.databases) };
        admin.create_database("voter_info").await.unwrap();
        let err = admin.create_database("voter_info").await.unwrap_err();
        assert!(err.is_duplicate_database());
    }

    #[tokio::test]
    async fn upsert_replaces_every_field() {
        let cluster = MemoryCluster::new();
        let store = ready_store(&cluster).await;

        let first = VoterRegistrationRecord::new("Alabama")
            .with(Field::DeadlineInPerson, "2018-10-22")
            .with(Field::Description, "old");
        store.upsert_record(&first).await.unwrap();
        let second = VoterRegistrationRecord::new("Alabama").with(Field::DeadlineByMail, "late");
        store.upsert_record(&second).await.unwrap();

        let rows = store.list_records().await.unwrap();
        assert_eq!(rows, vec![second]);
    }

    #[tokio::test]
    async fn list_is_ordered_by_state() {
        let cluster = MemoryCluster::new();
        let store = ready_store(&cluster).await;
        for state in ["Wyoming", "Alaska", "Maine"] {
            store.upsert_record(&VoterRegistrationRecord::new(state)).await.unwrap();
        }
        let states: Vec<String> =
            store.list_records().await.unwrap().into_iter().map(|r| r.state).collect();
        assert_eq!(states, ["Alaska", "Maine", "Wyoming"]);
    }

    #[tokio::test]
    async fn operations_before_schema_fail_with_missing_table() {
        let cluster = MemoryCluster::new();
        let mut admin = MemoryAdmin { databases: Arc::clone(&cluster.databases) };
        admin.create_database("voter_info").await.unwrap();
        let store = cluster.open_store("voter_info", "deadlines").await.unwrap();
        let err = store.upsert_record(&VoterRegistrationRecord::new("Ohio")).await.unwrap_err();
        assert!(err.is_missing_table());
    }

    #[tokio::test]
    async fn closed_store_rejects_operations() {
        let cluster = MemoryCluster::new();
        let store = ready_store(&cluster).await;
        store.close().await;
        assert!(store.is_closed());
        assert!(store.count_records().await.is_err());
    }

    #[tokio::test]
    async fn dropping_missing_database_succeeds() {
        let cluster = MemoryCluster::new();
        let mut admin = MemoryAdmin { databases: Arc::clone(&cluster.databases) };
        admin.drop_database("never_created").await.unwrap();
        assert!(!cluster.database_exists("never_created").await);
    }
}
