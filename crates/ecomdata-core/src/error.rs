use thiserror::Error;

/// Core error type shared across ecomdata crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The table descriptors violate internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// A table name that is not part of the dataset.
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

/// Convenience alias for results returned by ecomdata crates.
pub type Result<T> = std::result::Result<T, Error>;
