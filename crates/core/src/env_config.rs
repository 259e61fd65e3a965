//! Environment overrides for config file locations.

use std::path::PathBuf;

/// Path from the environment variable `var`, or `default` when it is unset or blank.
pub fn config_path_from_env(var: &str, default: &str) -> PathBuf {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => {
            tracing::debug!(var, path = %v, "config path overridden by environment");
            PathBuf::from(v)
        },
        Ok(_) => {
            tracing::warn!(var, default, "empty env var value, using default");
            PathBuf::from(default)
        },
        Err(_) => PathBuf::from(default),
    }
}
