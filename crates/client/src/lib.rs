//! Data fetch client for votereg
//!
//! Retrieves the record set from the data server's `GET /data` and tracks the
//! loading lifecycle for the table view.

mod client;
mod error;
mod state;
mod task;


pub use client::DataClient;
pub use error::FetchError;
pub use state::FetchState;
pub use task::FetchTask;
