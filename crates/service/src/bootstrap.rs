//! Database bootstrap: create the database, ensure the table, import the CSV.
//!
//! ```text
//! Idle → ConnectingAdmin → CreatingDatabase → ConnectingTarget
//!      → EnsuringSchema → StreamingCsv → Loading → Done
//! ```
//!
//! "Database already exists" is the only recoverable condition; it is logged
//! and the import continues. Every other failure is returned as a
//! [`BootstrapError`] carrying the phase. Both connections are released on
//! every path.

use std::fs::File;
use std::io::{BufReader, Read};

use votereg_core::{DbConfig, HeaderSchema};
use votereg_storage::{DatabaseAdmin, RecordStore, StoreConnector};

use crate::error::{BootstrapError, BootstrapPhase, ServiceError};
use crate::import::{CsvSource, ImportStats};

/// Whether this run created the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    Created,
    AlreadyExisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub database: DatabaseStatus,
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub rows_skipped: usize,
}

pub struct Bootstrap<C> {
    connector: C,
    config: DbConfig,
    schema: HeaderSchema,
}

impl<C: StoreConnector> Bootstrap<C> {
    pub fn new(connector: C, config: DbConfig) -> Self {
        Self { connector, config, schema: HeaderSchema::default() }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: HeaderSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Run against the CSV file named in the configuration.
    pub async fn run(&self) -> Result<BootstrapReport, BootstrapError> {
        let path = self.config.csv_path.clone();
        self.run_inner(move || {
            let file = File::open(&path)?;
            tracing::info!(path = %path.display(), "reading CSV");
            Ok(BufReader::new(file))
        })
        .await
    }

    /// Run against an already opened CSV stream.
    pub async fn run_with_reader<R: Read>(
        &self,
        input: R,
    ) -> Result<BootstrapReport, BootstrapError> {
        self.run_inner(move || Ok(input)).await
    }

    async fn run_inner<R, F>(&self, open_csv: F) -> Result<BootstrapReport, BootstrapError>
    where
        R: Read,
        F: FnOnce() -> Result<R, ServiceError>,
    {
        let name = &self.config.database_name;
        let mut phase = BootstrapPhase::Idle;
        tracing::debug!(%phase, database = %name, "bootstrap starting");

        phase = advance(phase, BootstrapPhase::ConnectingAdmin);
        let mut admin = self
            .connector
            .connect_admin(&self.config)
            .await
            .map_err(|e| BootstrapError::at(phase)(e.into()))?;

        phase = advance(phase, BootstrapPhase::CreatingDatabase);
        let created = admin.create_database(name).await;
        if let Err(e) = admin.close().await {
            tracing::warn!(error = %e, "failed to close admin connection");
        }
        let database = match created {
            Ok(()) => {
                tracing::info!(database = %name, "database created");
                DatabaseStatus::Created
            },
            Err(e) if e.is_duplicate_database() => {
                tracing::info!(database = %name, "database already exists, continuing");
                DatabaseStatus::AlreadyExisted
            },
            Err(e) => {
                tracing::error!(database = %name, error = %e, "error creating database");
                return Err(BootstrapError::at(phase)(e.into()));
            },
        };

        phase = advance(phase, BootstrapPhase::ConnectingTarget);
        let store = self
            .connector
            .connect_target(&self.config)
            .await
            .map_err(|e| BootstrapError::at(phase)(e.into()))?;

        let imported = self.import(&store, &mut phase, open_csv).await;
        store.close().await;

        let stats = imported.map_err(|e| {
            tracing::error!(%phase, error = %e, "bootstrap aborted");
            BootstrapError::at(phase)(e)
        })?;

        advance(phase, BootstrapPhase::Done);
        tracing::info!(
            rows = stats.rows_loaded,
            skipped = stats.rows_skipped,
            table = %self.config.table_name,
            "data imported successfully"
        );
        Ok(BootstrapReport {
            database,
            rows_read: stats.rows_read,
            rows_loaded: stats.rows_loaded,
            rows_skipped: stats.rows_skipped,
        })
    }

    async fn import<R, F>(
        &self,
        store: &C::Store,
        phase: &mut BootstrapPhase,
        open_csv: F,
    ) -> Result<ImportStats, ServiceError>
    where
        R: Read,
        F: FnOnce() -> Result<R, ServiceError>,
    {
        *phase = advance(*phase, BootstrapPhase::EnsuringSchema);
        store.ensure_schema().await?;

        *phase = advance(*phase, BootstrapPhase::StreamingCsv);
        let source = CsvSource::open(open_csv()?, &self.schema)?;

        *phase = advance(*phase, BootstrapPhase::Loading);
        source.load_into(store).await
    }
}

fn advance(from: BootstrapPhase, to: BootstrapPhase) -> BootstrapPhase {
    tracing::debug!(from = %from, to = %to, "bootstrap phase");
    to
}
