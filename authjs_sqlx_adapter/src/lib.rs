//! authjs-sqlx-adapter - SQL persistence for Auth.js-style authentication frameworks
//!
//! This crate stores users, linked provider accounts, sessions, verification
//! tokens and WebAuthn authenticators in PostgreSQL or SQLite through `sqlx`.
//! It implements the framework's [`Adapter`] contract and nothing more: it
//! never creates tables and never decides whether a session or token is still
//! valid.
//!
//! ```no_run
//! use authjs_sqlx_adapter::{Adapter, NewUser, SqlAdapter};
//!
//! # async fn run() -> Result<(), authjs_sqlx_adapter::AdapterError> {
//! let adapter = SqlAdapter::from_env()?;
//! adapter.init().await?;
//!
//! let user = adapter.create_user(NewUser::new("alice@example.com")).await?;
//! assert!(adapter.get_user(&user.id).await?.is_some());
//! # Ok(())
//! # }
//! ```

mod account;
mod adapter;
mod authenticator;
mod session;
mod storage;
mod userdb;
mod verification;

#[cfg(test)]
mod test_utils;

pub use adapter::{Adapter, AdapterError, SqlAdapter};

pub use account::{Account, AccountError, AccountType};
pub use authenticator::{Authenticator, AuthenticatorError};
pub use session::{Session, SessionAndUser, SessionError, SessionUpdate};
pub use userdb::{NewUser, User, UserError, UserUpdate};
pub use verification::{VerificationError, VerificationToken};

pub use storage::{
    DataStore, DataStoreConfig, PostgresDataStore, SqliteDataStore, StorageError, StoreType,
};
