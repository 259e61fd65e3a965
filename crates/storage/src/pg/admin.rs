//! Admin connection against the maintenance database.

use async_trait::async_trait;
use sqlx::Connection;
use sqlx::postgres::PgConnection;
use votereg_core::{ADMIN_DATABASE, DbConfig};

use super::{connect_options, quote_ident};
use crate::error::StorageError;
use crate::traits::DatabaseAdmin;

/// Single connection to the `postgres` database, used only for DDL.
pub struct PgAdmin {
    conn: PgConnection,
}

impl PgAdmin {
    pub async fn connect(config: &DbConfig) -> Result<Self, StorageError> {
        let conn = PgConnection::connect_with(&connect_options(config, ADMIN_DATABASE)).await?;
        tracing::debug!(host = %config.host, port = config.port, "admin connection opened");
        Ok(Self { conn })
    }
}

#[async_trait]
impl DatabaseAdmin for PgAdmin {
    async fn create_database(&mut self, name: &str) -> Result<(), StorageError> {
        let sql = format!("CREATE DATABASE {}", quote_ident(name)?);
        sqlx::Executor::execute(&mut self.conn, sqlx::raw_sql(&sql)).await?;
        Ok(())
    }

    async fn drop_database(&mut self, name: &str) -> Result<(), StorageError> {
        let sql = format!("DROP DATABASE IF EXISTS {}", quote_ident(name)?);
        sqlx::Executor::execute(&mut self.conn, sqlx::raw_sql(&sql)).await?;
        Ok(())
    }

    async fn close(self) -> Result<(), StorageError> {
        self.conn.close().await?;
        tracing::debug!("admin connection closed");
        Ok(())
    }
}
