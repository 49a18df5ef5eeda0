use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum AuthenticatorError {
    #[error("Authenticator not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(String),
}
