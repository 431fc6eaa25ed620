use thiserror::Error;

pub type Result<T> = std::result::Result<T, VectorStoreError>;

#[derive(Error, Debug)]
pub enum VectorStoreError {
    #[error("Chunker error: {0}")]
    Chunker(#[from] ragnote_chunker::ChunkerError),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Chunk id {id} out of range (store holds {len})")]
    OutOfRange { id: usize, len: usize },

    #[error("Add request supplied no input source")]
    EmptyRequest,
}
