//! Storage layer for votereg
//!
//! PostgreSQL backend via sqlx plus an in-memory backend with the same
//! failure semantics. Both sit behind the [`traits`] seams used by the
//! bootstrap, teardown and data server.

pub mod error;
pub mod memory;
pub mod pg;
pub mod traits;

pub use error::StorageError;
pub use memory::{MemoryAdmin, MemoryCluster, MemoryStore};
pub use pg::{PgAdmin, PgConnector, PgRecordStore};
pub use traits::{DatabaseAdmin, RecordStore, StoreConnector};
