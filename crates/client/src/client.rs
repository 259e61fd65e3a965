use votereg_core::{ApiConfig, VoterRegistrationRecord};

use crate::error::FetchError;
use crate::state::FetchState;

/// Client for the read-only data server.
///
/// One request per call. No timeout, retry or caching is applied.
#[derive(Debug, Clone)]
pub struct DataClient {
    client: reqwest::Client,
    base_url: String,
}

impl DataClient {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let client =
            reqwest::Client::builder().build().map_err(|e| FetchError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        Self::new(config.base_url())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /data`, decoded into canonical records.
    ///
    /// # Errors
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body is not a JSON array of records.
    pub async fn fetch_records(&self) -> Result<Vec<VoterRegistrationRecord>, FetchError> {
        let body = self.get_text("/data").await?;
        serde_json::from_str(&body)
            .map_err(|source| FetchError::JsonParse { context: "GET /data".to_owned(), source })
    }

    /// `GET /columns`, returned as the raw JSON text.
    pub async fn fetch_columns(&self) -> Result<String, FetchError> {
        self.get_text("/columns").await
    }

    /// Fetch records, folding any failure into [`FetchState::Failed`].
    pub async fn load(&self) -> FetchState {
        match self.fetch_records().await {
            Ok(records) => {
                tracing::debug!(rows = records.len(), "data loaded");
                FetchState::Loaded(records)
            },
            Err(e) => {
                tracing::warn!(url = %self.base_url, error = %e, "error fetching data");
                FetchState::Failed { reason: e.to_string() }
            },
        }
    }

    async fn get_text(&self, route: &str) -> Result<String, FetchError> {
        let response = self.client.get(format!("{}{route}", self.base_url)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::HttpStatus { code: status.as_u16(), body });
        }
        Ok(body)
    }
}
