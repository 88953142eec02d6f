use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while loading the flat files into the store.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("missing artifact for table {table}: {}", .path.display())]
    MissingArtifact { table: &'static str, path: PathBuf },
    #[error("invalid artifact for table {table}: {message}")]
    InvalidArtifact {
        table: &'static str,
        message: String,
    },
    #[error(
        "type coercion failed for {table}.{column} at row {row}: {value:?} is not a valid {expected}"
    )]
    TypeCoercion {
        table: &'static str,
        column: &'static str,
        row: u64,
        value: String,
        expected: &'static str,
    },
    #[error("store {} cannot be prepared: {message}", .path.display())]
    StoreState { path: PathBuf, message: String },
    #[error("table {table} holds {actual} rows after load, expected {expected}")]
    RowCountMismatch {
        table: &'static str,
        expected: u64,
        actual: u64,
    },
    #[error("schema error: {0}")]
    Schema(#[from] ecomdata_core::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl IngestError {
    /// Name of the table the error is attached to, if any.
    pub fn table(&self) -> Option<&'static str> {
        match self {
            IngestError::MissingArtifact { table, .. }
            | IngestError::InvalidArtifact { table, .. }
            | IngestError::TypeCoercion { table, .. }
            | IngestError::RowCountMismatch { table, .. } => Some(*table),
            _ => None,
        }
    }
}
