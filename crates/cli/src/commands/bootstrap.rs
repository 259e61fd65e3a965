use anyhow::Result;
use votereg_core::DbConfig;
use votereg_service::{Bootstrap, DatabaseStatus};
use votereg_storage::PgConnector;

pub(crate) async fn run(config: DbConfig) -> Result<()> {
    let report = Bootstrap::new(PgConnector, config).run().await?;
    let database = match report.database {
        DatabaseStatus::Created => "created",
        DatabaseStatus::AlreadyExisted => "already existed",
    };
    println!(
        "database {database}; loaded {} of {} rows ({} skipped)",
        report.rows_loaded, report.rows_read, report.rows_skipped
    );
    Ok(())
}
