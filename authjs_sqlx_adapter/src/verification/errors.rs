use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum VerificationError {
    #[error("Storage error: {0}")]
    Storage(String),
}
