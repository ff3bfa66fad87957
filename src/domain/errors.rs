use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),
    #[error("payload too large: {0} bytes (max: {1} bytes)")]
    PayloadTooLarge(usize, usize),
    #[error("operation failed: {0}")]
    OperationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
