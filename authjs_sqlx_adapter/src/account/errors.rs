use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum AccountError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid account type: {0}")]
    InvalidType(String),
}
