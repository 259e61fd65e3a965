use std::io::Write as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use votereg_core::{DbConfig, VoterRegistrationRecord};
use votereg_storage::{
    DatabaseAdmin, MemoryAdmin, MemoryCluster, MemoryStore, RecordStore, StorageError,
    StoreConnector,
};

use crate::{Bootstrap, BootstrapPhase, DatabaseStatus, ServiceError, Teardown};

const DEADLINES_CSV: &str = "\
State,Registration Deadline In-Person,Registration Deadline By Mail,Registration Deadline Online,Election Day Registration,Online Registration Link,Description
Alabama,2018-10-22,2018-10-22,2018-10-22,No,https://www.alabamavotes.gov,Postmarked by deadline
Alaska,2018-10-07,2018-10-07,2018-10-07,No,https://voterregistration.alaska.gov,Received by deadline
";

fn test_config() -> DbConfig {
    DbConfig::from_json(
        r#"{"user":"postgres","password":"pw","host":"localhost","port":"5432",
            "databaseName":"voter_info","tableName":"registration_deadlines"}"#,
    )
    .unwrap()
}

fn failure() -> StorageError {
    StorageError::Database(sqlx::Error::PoolTimedOut)
}

/// Wraps the in-memory cluster with injectable failures and close counters.
#[derive(Clone, Default)]
struct Scripted {
    cluster: MemoryCluster,
    fail_admin_connect: bool,
    fail_create: bool,
    fail_drop: bool,
    fail_upsert_at: Option<usize>,
    admin_closes: Arc<AtomicUsize>,
    store_closes: Arc<AtomicUsize>,
}

struct ScriptedAdmin {
    inner: MemoryAdmin,
    fail_create: bool,
    fail_drop: bool,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl DatabaseAdmin for ScriptedAdmin {
    async fn create_database(&mut self, name: &str) -> Result<(), StorageError> {
        if self.fail_create {
            return Err(failure());
        }
        self.inner.create_database(name).await
    }

    async fn drop_database(&mut self, name: &str) -> Result<(), StorageError> {
        if self.fail_drop {
            return Err(failure());
        }
        self.inner.drop_database(name).await
    }

    async fn close(self) -> Result<(), StorageError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.inner.close().await
    }
}

struct ScriptedStore {
    inner: MemoryStore,
    fail_upsert_at: Option<usize>,
    upserts: AtomicUsize,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        self.inner.ensure_schema().await
    }

    async fn upsert_record(&self, record: &VoterRegistrationRecord) -> Result<(), StorageError> {
        let n = self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_upsert_at == Some(n) {
            return Err(failure());
        }
        self.inner.upsert_record(record).await
    }

    async fn list_records(&self) -> Result<Vec<VoterRegistrationRecord>, StorageError> {
        self.inner.list_records().await
    }

    async fn count_records(&self) -> Result<usize, StorageError> {
        self.inner.count_records().await
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.inner.close().await;
    }
}

#[async_trait]
impl StoreConnector for Scripted {
    type Admin = ScriptedAdmin;
    type Store = ScriptedStore;

    async fn connect_admin(&self, config: &DbConfig) -> Result<ScriptedAdmin, StorageError> {
        if self.fail_admin_connect {
            return Err(failure());
        }
        Ok(ScriptedAdmin {
            inner: self.cluster.connect_admin(config).await?,
            fail_create: self.fail_create,
            fail_drop: self.fail_drop,
            closes: Arc::clone(&self.admin_closes),
        })
    }

    async fn connect_target(&self, config: &DbConfig) -> Result<ScriptedStore, StorageError> {
        Ok(ScriptedStore {
            inner: self.cluster.connect_target(config).await?,
            fail_upsert_at: self.fail_upsert_at,
            upserts: AtomicUsize::new(0),
            closes: Arc::clone(&self.store_closes),
        })
    }
}

async fn stored(cluster: &MemoryCluster) -> Vec<VoterRegistrationRecord> {
    cluster
        .open_store("voter_info", "registration_deadlines")
        .await
        .unwrap()
        .list_records()
        .await
        .unwrap()
}

#[tokio::test]
async fn second_run_reuses_existing_database() {
    let cluster = MemoryCluster::new();
    let bootstrap = Bootstrap::new(cluster.clone(), test_config());

    let first = bootstrap.run_with_reader(DEADLINES_CSV.as_bytes()).await.unwrap();
    assert_eq!(first.database, DatabaseStatus::Created);
    assert_eq!(first.rows_loaded, 2);

    let second = bootstrap.run_with_reader(DEADLINES_CSV.as_bytes()).await.unwrap();
    assert_eq!(second.database, DatabaseStatus::AlreadyExisted);
    assert_eq!(stored(&cluster).await.len(), 2);
}

#[tokio::test]
async fn alabama_row_is_stored_with_canonical_fields() {
    let cluster = MemoryCluster::new();
    Bootstrap::new(cluster.clone(), test_config())
        .run_with_reader(DEADLINES_CSV.as_bytes())
        .await
        .unwrap();

    let rows = stored(&cluster).await;
    let alabama = rows.iter().find(|r| r.state == "Alabama").unwrap();
    assert_eq!(alabama.deadline_in_person, "2018-10-22");
    assert_eq!(alabama.online_registration_link, "https://www.alabamavotes.gov");
    assert_eq!(alabama.election_day_registration, "No");
}

#[tokio::test]
async fn later_csv_row_for_same_state_wins() {
    let csv = "State,Description\nOhio,first\nOhio,second\n";
    let cluster = MemoryCluster::new();
    let report = Bootstrap::new(cluster.clone(), test_config())
        .run_with_reader(csv.as_bytes())
        .await
        .unwrap();

    assert_eq!(report.rows_loaded, 2);
    let rows = stored(&cluster).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "second");
}

#[tokio::test]
async fn admin_connect_failure_aborts_before_import() {
    let connector = Scripted { fail_admin_connect: true, ..Scripted::default() };
    let err = Bootstrap::new(connector.clone(), test_config())
        .run_with_reader(DEADLINES_CSV.as_bytes())
        .await
        .unwrap_err();

    assert_eq!(err.phase, BootstrapPhase::ConnectingAdmin);
    assert!(err.aborted_before_import());
    assert!(!connector.cluster.database_exists("voter_info").await);
}

#[tokio::test]
async fn non_duplicate_create_error_is_fatal_and_releases_admin() {
    let connector = Scripted { fail_create: true, ..Scripted::default() };
    let err = Bootstrap::new(connector.clone(), test_config())
        .run_with_reader(DEADLINES_CSV.as_bytes())
        .await
        .unwrap_err();

    assert_eq!(err.phase, BootstrapPhase::CreatingDatabase);
    assert!(matches!(err.source, ServiceError::Storage(StorageError::Database(_))));
    assert_eq!(connector.admin_closes.load(Ordering::SeqCst), 1);
    assert_eq!(connector.store_closes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_upsert_aborts_remaining_rows_and_closes_store() {
    let connector = Scripted { fail_upsert_at: Some(1), ..Scripted::default() };
    let err = Bootstrap::new(connector.clone(), test_config())
        .run_with_reader(DEADLINES_CSV.as_bytes())
        .await
        .unwrap_err();

    assert_eq!(err.phase, BootstrapPhase::Loading);
    assert!(!err.aborted_before_import());
    assert_eq!(connector.store_closes.load(Ordering::SeqCst), 1);

    let states: Vec<String> =
        stored(&connector.cluster).await.into_iter().map(|r| r.state).collect();
    assert_eq!(states, ["Alabama"]);
}

#[tokio::test]
async fn run_reads_configured_csv_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DEADLINES_CSV.as_bytes()).unwrap();

    let mut config = test_config();
    config.csv_path = file.path().to_path_buf();
    let cluster = MemoryCluster::new();
    let report = Bootstrap::new(cluster.clone(), config).run().await.unwrap();

    assert_eq!(report.rows_read, 2);
    assert_eq!(stored(&cluster).await.len(), 2);
}

#[tokio::test]
async fn missing_csv_file_fails_while_streaming() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config();
    config.csv_path = dir.path().join("absent.csv");

    let connector = Scripted::default();
    let err = Bootstrap::new(connector.clone(), config).run().await.unwrap_err();

    assert_eq!(err.phase, BootstrapPhase::StreamingCsv);
    assert!(matches!(err.source, ServiceError::Io(_)));
    assert_eq!(connector.store_closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn teardown_of_missing_database_succeeds() {
    let connector = Scripted::default();
    Teardown::new(connector.clone(), test_config()).run().await.unwrap();
    assert_eq!(connector.admin_closes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn teardown_removes_bootstrapped_database() {
    let cluster = MemoryCluster::new();
    Bootstrap::new(cluster.clone(), test_config())
        .run_with_reader(DEADLINES_CSV.as_bytes())
        .await
        .unwrap();
    Teardown::new(cluster.clone(), test_config()).run().await.unwrap();
    assert!(!cluster.database_exists("voter_info").await);
}

#[tokio::test]
async fn teardown_drop_failure_is_reported_after_closing() {
    let connector = Scripted { fail_drop: true, ..Scripted::default() };
    let err = Teardown::new(connector.clone(), test_config()).run().await.unwrap_err();
    assert!(matches!(err, ServiceError::Storage(_)));
    assert_eq!(connector.admin_closes.load(Ordering::SeqCst), 1);
}
