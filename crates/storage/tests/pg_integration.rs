//! Integration tests for the PostgreSQL backend.
//! Run with: VOTEREG_TEST_DB_CONFIG=path/to/db_config.json cargo test -p votereg-storage -- --ignored pg_

#![allow(clippy::unwrap_used, reason = "integration test code")]

use votereg_core::{DbConfig, Field, VoterRegistrationRecord};
use votereg_storage::{DatabaseAdmin, PgConnector, RecordStore, StoreConnector};

fn test_config(suffix: &str) -> DbConfig {
    let path = std::env::var("VOTEREG_TEST_DB_CONFIG")
        .expect("VOTEREG_TEST_DB_CONFIG must be set for PostgreSQL integration tests");
    let mut config = DbConfig::load(std::path::Path::new(&path)).unwrap();
    config.database_name = format!("{}_{suffix}", config.database_name);
    config
}

async fn fresh_database(config: &DbConfig) {
    let mut admin = PgConnector.connect_admin(config).await.unwrap();
    admin.drop_database(&config.database_name).await.unwrap();
    admin.create_database(&config.database_name).await.unwrap();
    admin.close().await.unwrap();
}

async fn drop_database(config: &DbConfig) {
    let mut admin = PgConnector.connect_admin(config).await.unwrap();
    admin.drop_database(&config.database_name).await.unwrap();
    admin.close().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn pg_second_create_reports_duplicate_database() {
    let config = test_config("dup");
    fresh_database(&config).await;

    let mut admin = PgConnector.connect_admin(&config).await.unwrap();
    let err = admin.create_database(&config.database_name).await.unwrap_err();
    assert!(err.is_duplicate_database(), "expected 42P04, got {err}");
    admin.close().await.unwrap();

    drop_database(&config).await;
}

#[tokio::test]
#[ignore]
async fn pg_upsert_is_idempotent_and_last_write_wins() {
    let config = test_config("upsert");
    fresh_database(&config).await;

    let store = PgConnector.connect_target(&config).await.unwrap();
    store.ensure_schema().await.unwrap();
    store.ensure_schema().await.unwrap();

    let alabama = VoterRegistrationRecord::new("Alabama").with(Field::DeadlineInPerson, "2018-10-22");
    store.upsert_record(&alabama).await.unwrap();
    store.upsert_record(&alabama).await.unwrap();
    let updated = alabama.clone().with(Field::Description, "Postmarked 15 days before.");
    store.upsert_record(&updated).await.unwrap();
    store.upsert_record(&VoterRegistrationRecord::new("Alaska")).await.unwrap();

    assert_eq!(store.count_records().await.unwrap(), 2);
    let rows = store.list_records().await.unwrap();
    assert_eq!(rows[0], VoterRegistrationRecord::new("Alabama")
        .with(Field::DeadlineInPerson, "2018-10-22")
        .with(Field::Description, "Postmarked 15 days before."));
    assert_eq!(rows[1].state, "Alaska");
    store.close().await;

    drop_database(&config).await;
}

#[tokio::test]
#[ignore]
async fn pg_upsert_without_table_is_missing_table() {
    let config = test_config("notable");
    fresh_database(&config).await;

    let store = PgConnector.connect_target(&config).await.unwrap();
    let err = store.upsert_record(&VoterRegistrationRecord::new("Ohio")).await.unwrap_err();
    assert!(err.is_missing_table(), "expected 42P01, got {err}");
    store.close().await;

    drop_database(&config).await;
}

#[tokio::test]
#[ignore]
async fn pg_drop_missing_database_succeeds() {
    let config = test_config("never_created");
    drop_database(&config).await;
    drop_database(&config).await;
}
