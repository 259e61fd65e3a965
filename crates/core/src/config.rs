//! Configuration values read once at startup and passed explicitly.
//!
//! Both files use the camelCase keys of the deployed JSON configs
//! (`db_config.json`, `local_api.json`).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::constants::DEFAULT_CSV_PATH;
use crate::error::CoreError;

static SQL_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("identifier regex is valid")
});

/// Whether `name` can be used as a database or table identifier.
///
/// Identifiers are interpolated into DDL, so only plain names are allowed.
pub fn is_sql_identifier(name: &str) -> bool {
    SQL_IDENTIFIER.is_match(name)
}

/// Database connection and seeding settings.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbConfig {
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub host: String,
    #[serde(deserialize_with = "port_from_number_or_string")]
    pub port: u16,
    pub database_name: String,
    pub table_name: String,
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
}

fn default_csv_path() -> PathBuf {
    PathBuf::from(DEFAULT_CSV_PATH)
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("user", &self.user)
            .field("password", &"***")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_name", &self.database_name)
            .field("table_name", &self.table_name)
            .field("csv_path", &self.csv_path)
            .finish()
    }
}

impl DbConfig {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = read_config(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !is_sql_identifier(&self.database_name) {
            return Err(CoreError::InvalidIdentifier {
                what: "databaseName",
                value: self.database_name.clone(),
            });
        }
        if !is_sql_identifier(&self.table_name) {
            return Err(CoreError::InvalidIdentifier {
                what: "tableName",
                value: self.table_name.clone(),
            });
        }
        Ok(())
    }
}

/// Host and port of the data server, used by both the server and the client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub server_host: String,
    #[serde(deserialize_with = "port_from_number_or_string")]
    pub server_port: u16,
}

impl ApiConfig {
    pub fn new(server_host: impl Into<String>, server_port: u16) -> Self {
        Self { server_host: server_host.into(), server_port }
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let raw = read_config(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// `http://host:port`, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn read_config(path: &Path) -> Result<String, CoreError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| CoreError::ConfigRead { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(raw)
}

// local_api.json stores the port as a string.
fn port_from_number_or_string<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u16),
        Text(String),
    }

    match Port::deserialize(deserializer)? {
        Port::Number(port) => Ok(port),
        Port::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
