//! RecordStore implementation for PostgreSQL.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use votereg_core::{DbConfig, Field, PG_POOL_IDLE_TIMEOUT_SECS, VoterRegistrationRecord};

use super::{connect_options, quote_ident};
use crate::error::StorageError;
use crate::traits::RecordStore;

/// Records table in the target database.
///
/// Statements are rendered once from [`Field::ALL`] so column order is the
/// same for DDL, upserts and selects.
#[derive(Clone, Debug)]
pub struct PgRecordStore {
    pool: PgPool,
    statements: Statements,
}

#[derive(Clone, Debug)]
struct Statements {
    create_table: String,
    upsert: String,
    select_all: String,
    count: String,
}

impl Statements {
    fn new(table: &str) -> Result<Self, StorageError> {
        let table = quote_ident(table)?;
        let columns: Vec<String> =
            Field::ALL.iter().map(|f| format!("\"{}\"", f.column_name())).collect();
        let key = &columns[0];

        let definitions = columns
            .iter()
            .map(|c| if c == key { format!("{c} TEXT PRIMARY KEY") } else { format!("{c} TEXT") })
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders =
            (1..=columns.len()).map(|i| format!("${i}")).collect::<Vec<_>>().join(", ");
        let updates = columns[1..]
            .iter()
            .map(|c| format!("{c} = EXCLUDED.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let column_list = columns.join(", ");

        Ok(Self {
            create_table: format!("CREATE TABLE IF NOT EXISTS {table} ({definitions})"),
            upsert: format!(
                "INSERT INTO {table} ({column_list}) VALUES ({placeholders}) \
                 ON CONFLICT ({key}) DO UPDATE SET {updates}"
            ),
            select_all: format!("SELECT {column_list} FROM {table} ORDER BY {key}"),
            count: format!("SELECT COUNT(*) FROM {table}"),
        })
    }
}

impl PgRecordStore {
    pub async fn connect(config: &DbConfig, max_connections: u32) -> Result<Self, StorageError> {
        let statements = Statements::new(&config.table_name)?;
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .connect_with(connect_options(config, &config.database_name))
            .await?;
        tracing::info!(
            database = %config.database_name,
            table = %config.table_name,
            "PgRecordStore initialized"
        );
        Ok(Self { pool, statements })
    }
}

fn row_to_record(row: &PgRow) -> Result<VoterRegistrationRecord, StorageError> {
    let mut record = VoterRegistrationRecord::default();
    for (idx, field) in Field::ALL.into_iter().enumerate() {
        let value: Option<String> = row.try_get(idx).map_err(|e| StorageError::DataCorruption {
            context: format!("column {}", field.column_name()),
            source: Box::new(e),
        })?;
        record.set(field, value.unwrap_or_default());
    }
    Ok(record)
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(&self.statements.create_table).execute(&self.pool).await?;
        Ok(())
    }

    async fn upsert_record(&self, record: &VoterRegistrationRecord) -> Result<(), StorageError> {
        Field::ALL
            .into_iter()
            .fold(sqlx::query(&self.statements.upsert), |query, field| query.bind(record.get(field)))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<VoterRegistrationRecord>, StorageError> {
        let rows = sqlx::query(&self.statements.select_all).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn count_records(&self) -> Result<usize, StorageError> {
        let count: i64 =
            sqlx::query_scalar(&self.statements.count).fetch_one(&self.pool).await?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::debug!("target connection pool closed");
    }
}
