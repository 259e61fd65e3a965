//! PostgreSQL storage backend using sqlx.

mod admin;
mod records;

pub use admin::PgAdmin;
pub use records::PgRecordStore;

use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use votereg_core::{DbConfig, is_sql_identifier};

use crate::error::StorageError;
use crate::traits::StoreConnector;

/// Opens real PostgreSQL connections.
#[derive(Clone, Copy, Debug, Default)]
pub struct PgConnector;

#[async_trait]
impl StoreConnector for PgConnector {
    type Admin = PgAdmin;
    type Store = PgRecordStore;

    async fn connect_admin(&self, config: &DbConfig) -> Result<PgAdmin, StorageError> {
        PgAdmin::connect(config).await
    }

    async fn connect_target(&self, config: &DbConfig) -> Result<PgRecordStore, StorageError> {
        // Seeding writes one row at a time; a single connection is enough.
        PgRecordStore::connect(config, 1).await
    }
}

/// Connection options for `database` using the credentials in `config`.
pub(crate) fn connect_options(config: &DbConfig, database: &str) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(database)
}

/// Double-quote an identifier after checking it is a plain name.
pub(crate) fn quote_ident(name: &str) -> Result<String, StorageError> {
    if is_sql_identifier(name) {
        Ok(format!("\"{name}\""))
    } else {
        Err(StorageError::InvalidIdentifier(name.to_owned()))
    }
}
