use thiserror::Error;

use crate::account::AccountError;
use crate::authenticator::AuthenticatorError;
use crate::session::SessionError;
use crate::storage::StorageError;
use crate::userdb::UserError;
use crate::verification::VerificationError;

/// Errors surfaced through the [`Adapter`](crate::Adapter) contract
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("User error: {0}")]
    User(UserError),

    #[error("Account error: {0}")]
    Account(AccountError),

    #[error("Session error: {0}")]
    Session(SessionError),

    #[error("Verification token error: {0}")]
    Verification(VerificationError),

    #[error("Authenticator error: {0}")]
    Authenticator(AuthenticatorError),

    /// Data store construction or configuration failed
    #[error("Data store error: {0}")]
    Storage(StorageError),
}

// Conversions log the error once, where it leaves the domain layer

impl From<UserError> for AdapterError {
    fn from(err: UserError) -> Self {
        let error = Self::User(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<AccountError> for AdapterError {
    fn from(err: AccountError) -> Self {
        let error = Self::Account(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for AdapterError {
    fn from(err: SessionError) -> Self {
        let error = Self::Session(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<VerificationError> for AdapterError {
    fn from(err: VerificationError) -> Self {
        let error = Self::Verification(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<AuthenticatorError> for AdapterError {
    fn from(err: AuthenticatorError) -> Self {
        let error = Self::Authenticator(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<StorageError> for AdapterError {
    fn from(err: StorageError) -> Self {
        let error = Self::Storage(err);
        tracing::error!("{}", error);
        error
    }
}
