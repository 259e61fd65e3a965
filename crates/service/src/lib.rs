//! Service layer for votereg
//!
//! The two setup commands: bootstrap (create database, ensure the table,
//! import the CSV) and teardown (drop the database). Both are generic over a
//! [`StoreConnector`](votereg_storage::StoreConnector) so they run the same
//! against PostgreSQL and the in-memory backend.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

mod bootstrap;
mod error;
mod import;
mod teardown;

#[cfg(test)]
mod bootstrap_tests;

pub use bootstrap::{Bootstrap, BootstrapReport, DatabaseStatus};
pub use error::{BootstrapError, BootstrapPhase, ServiceError};
pub use import::{CsvSource, ImportStats};
pub use teardown::Teardown;
