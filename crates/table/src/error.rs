use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("unsupported page size {0}, expected one of 5, 10, 25, 50, 100")]
    UnsupportedPageSize(usize),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("invalid filter {0:?}, expected FIELD=VALUE")]
    InvalidFilter(String),
}
