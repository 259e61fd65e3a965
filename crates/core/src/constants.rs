//! Shared constants for votereg.

/// Maintenance database used by the admin connection for CREATE/DROP DATABASE.
pub const ADMIN_DATABASE: &str = "postgres";

/// SQLSTATE `duplicate_database`.
pub const SQLSTATE_DUPLICATE_DATABASE: &str = "42P04";

/// SQLSTATE `undefined_table`.
pub const SQLSTATE_UNDEFINED_TABLE: &str = "42P01";

/// SQLSTATE `invalid_catalog_name` (connecting to a database that does not exist).
pub const SQLSTATE_INVALID_CATALOG_NAME: &str = "3D000";

/// PostgreSQL connection pool for the data server: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL connection pool for the data server: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// `Cache-Control` max-age for `GET /data` responses.
pub const DATA_CACHE_MAX_AGE_SECS: u32 = 3600;

/// Default location of the database configuration file.
pub const DEFAULT_DB_CONFIG_PATH: &str = "config/db_config.json";

/// Default location of the API (server host/port) configuration file.
pub const DEFAULT_API_CONFIG_PATH: &str = "config/local_api.json";

/// Default CSV seed file read by the bootstrap command.
pub const DEFAULT_CSV_PATH: &str = "voter_registration_deadlines.csv";

/// Environment variable overriding [`DEFAULT_DB_CONFIG_PATH`].
pub const DB_CONFIG_ENV: &str = "VOTEREG_DB_CONFIG";

/// Environment variable overriding [`DEFAULT_API_CONFIG_PATH`].
pub const API_CONFIG_ENV: &str = "VOTEREG_API_CONFIG";
