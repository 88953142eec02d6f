use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("integrity violation in {entity}: {message}")]
    Integrity {
        entity: &'static str,
        message: String,
    },
    #[error("schema error: {0}")]
    Schema(#[from] ecomdata_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl GenerationError {
    pub(crate) fn integrity(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Integrity {
            entity,
            message: message.into(),
        }
    }
}
