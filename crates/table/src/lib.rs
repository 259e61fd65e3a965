//! Table presentation for votereg
//!
//! Pure view-model logic behind the deadlines table: viewport-dependent
//! column schema, stable sorting, quick filter and pagination. Nothing here
//! does I/O; callers hand in records and a [`TableState`] and get back a
//! [`TableView`] to draw.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]

mod columns;
mod error;
mod filter;
mod pagination;
mod render;
mod sort;
mod view;

pub use columns::{
    ColumnDef, DESKTOP_COLUMNS, MOBILE_BREAKPOINT_PX, MOBILE_COLUMNS, ViewportClass, columns_for,
};
pub use error::TableError;
pub use filter::{Filter, FilterOperator};
pub use pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, Pagination};
pub use render::{TITLE, render_banner, render_text};
pub use sort::{SortDirection, SortModel, sort_records};
pub use view::{ERROR_INDICATOR, TableRow, TableState, TableStatus, TableView};
