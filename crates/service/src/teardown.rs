//! Unconditional `DROP DATABASE IF EXISTS` for development resets.

use votereg_core::DbConfig;
use votereg_storage::{DatabaseAdmin, StoreConnector};

use crate::error::ServiceError;

pub struct Teardown<C> {
    connector: C,
    config: DbConfig,
}

impl<C: StoreConnector> Teardown<C> {
    pub fn new(connector: C, config: DbConfig) -> Self {
        Self { connector, config }
    }

    /// Drop the configured database. A missing database is not an error.
    pub async fn run(&self) -> Result<(), ServiceError> {
        let name = &self.config.database_name;
        let mut admin = self.connector.connect_admin(&self.config).await.map_err(|e| {
            tracing::error!(database = %name, error = %e, "error connecting to admin database");
            e
        })?;

        let dropped = admin.drop_database(name).await;
        if let Err(e) = admin.close().await {
            tracing::warn!(error = %e, "failed to close admin connection");
        }

        match dropped {
            Ok(()) => {
                tracing::info!(database = %name, "database dropped");
                Ok(())
            },
            Err(e) => {
                tracing::error!(database = %name, error = %e, "error dropping database");
                Err(e.into())
            },
        }
    }
}
