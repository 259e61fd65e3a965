use anyhow::Result;
use votereg_core::DbConfig;
use votereg_service::Teardown;
use votereg_storage::PgConnector;

pub(crate) async fn run(config: DbConfig) -> Result<()> {
    let name = config.database_name.clone();
    Teardown::new(PgConnector, config).run().await?;
    println!("database {name} dropped");
    Ok(())
}
