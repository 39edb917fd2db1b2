use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to extract text from {source_name}: {reason}")]
    Extraction { source_name: String, reason: String },

    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    #[error("Embedding service returned {actual} vectors for {expected} inputs")]
    EmbeddingCountMismatch { expected: usize, actual: usize },

    #[error("Generation service error: {0}")]
    GenerationService(String),

    #[error("Query must not be empty")]
    EmptyQuery,

    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether retrying the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::EmbeddingService(_) | Error::GenerationService(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
