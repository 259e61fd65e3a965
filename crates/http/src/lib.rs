//! Read-only data server for votereg.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

pub mod api_error;
mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use votereg_storage::RecordStore;

pub use api_error::ApiError;

/// Shared state for all handlers.
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/data", get(handlers::get_data))
        .route("/columns", get(handlers::get_columns))
        .route("/health", get(handlers::health))
        .layer(cors)
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Serve until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "data server listening");
    }
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("data server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::warn!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            },
            Err(e) => {
                tracing::warn!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votereg_core::{DbConfig, Field, VoterRegistrationRecord};
    use votereg_storage::{DatabaseAdmin, MemoryCluster, MemoryStore, StoreConnector};

    async fn memory_store(records: &[VoterRegistrationRecord]) -> MemoryStore {
        let config = DbConfig::from_json(
            r#"{"user":"u","host":"h","port":1,"databaseName":"voter_info","tableName":"t"}"#,
        )
        .unwrap();
        let cluster = MemoryCluster::new();
        cluster.connect_admin(&config).await.unwrap().create_database("voter_info").await.unwrap();
        let store = cluster.connect_target(&config).await.unwrap();
        store.ensure_schema().await.unwrap();
        for record in records {
            store.upsert_record(record).await.unwrap();
        }
        store
    }

    async fn spawn_server(store: MemoryStore) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = create_router(Arc::new(AppState::new(Arc::new(store))));
        tokio::spawn(async move { axum::serve(listener, router).await });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn data_returns_records_with_cache_header() {
        let store = memory_store(&[
            VoterRegistrationRecord::new("Ohio"),
            VoterRegistrationRecord::new("Alabama").with(Field::DeadlineInPerson, "2018-10-22"),
        ])
        .await;
        let base = spawn_server(store).await;

        let response = reqwest::get(format!("{base}/data")).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["cache-control"], "public, max-age=3600");
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body[0]["state"], "Alabama");
        assert_eq!(body[0]["deadlineInPerson"], "2018-10-22");
        assert_eq!(body[1]["state"], "Ohio");
    }

    #[tokio::test]
    async fn store_failure_is_opaque_500() {
        let store = memory_store(&[]).await;
        store.close().await;
        let base = spawn_server(store).await;

        let response = reqwest::get(format!("{base}/data")).await.unwrap();
        assert_eq!(response.status(), 500);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, serde_json::json!({"error": "internal server error"}));
    }

    #[tokio::test]
    async fn columns_describe_desktop_schema() {
        let base = spawn_server(memory_store(&[]).await).await;
        let body: serde_json::Value =
            reqwest::get(format!("{base}/columns")).await.unwrap().json().await.unwrap();
        let columns = body.as_array().unwrap();
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[5]["headerName"], "Online Registration Link");
        assert_eq!(columns[5]["flex"], 1.5);
    }

    #[tokio::test]
    async fn health_is_ok() {
        let base = spawn_server(memory_store(&[]).await).await;
        let text = reqwest::get(format!("{base}/health")).await.unwrap().text().await.unwrap();
        assert_eq!(text, "ok");
    }
}
