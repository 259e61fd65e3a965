use std::sync::Arc;

use anyhow::Result;
use votereg_core::{ApiConfig, DbConfig, PG_POOL_MAX_CONNECTIONS};
use votereg_http::{AppState, create_router};
use votereg_storage::{PgRecordStore, RecordStore};

pub(crate) async fn run(db: &DbConfig, api: &ApiConfig) -> Result<()> {
    let store = Arc::new(PgRecordStore::connect(db, PG_POOL_MAX_CONNECTIONS).await?);
    tracing::info!(database = %db.database_name, table = %db.table_name, "connected to store");

    let state = Arc::new(AppState::new(Arc::clone(&store) as Arc<dyn RecordStore>));
    let router = create_router(state);
    let addr = api.bind_address();
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let served = votereg_http::serve(listener, router).await;

    store.close().await;
    Ok(served?)
}
