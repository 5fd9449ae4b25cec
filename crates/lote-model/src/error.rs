use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("empty batch: no rows to import")]
    EmptyBatch,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
