mod errors;
mod storage;
mod types;

pub use errors::AuthenticatorError;
pub use types::Authenticator;

pub(crate) use storage::{AuthenticatorStore, DB_TABLE_AUTHENTICATORS};
