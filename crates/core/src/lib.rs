//! Core types for votereg
//!
//! The canonical voter registration record, the explicit field enumeration,
//! the header schema that normalizes raw CSV rows, and the configuration
//! values handed to every entry point.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

pub mod config;
mod constants;
mod env_config;
mod error;
mod record;
mod schema;

pub use config::{ApiConfig, DbConfig, is_sql_identifier};
pub use constants::*;
pub use env_config::config_path_from_env;
pub use error::{CoreError, Result};
pub use record::{Field, VoterRegistrationRecord};
pub use schema::{HeaderSchema, ResolvedSchema};
