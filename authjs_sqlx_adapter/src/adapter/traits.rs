use async_trait::async_trait;

use crate::account::Account;
use crate::authenticator::Authenticator;
use crate::session::{Session, SessionAndUser, SessionUpdate};
use crate::userdb::{NewUser, User, UserUpdate};
use crate::verification::VerificationToken;

use super::errors::AdapterError;

/// Persistence operations an authentication framework calls on its adapter.
///
/// Lookups return `Ok(None)` when nothing matches. Expiry timestamps are
/// stored and returned as-is; deciding whether a session or token is still
/// valid is the caller's job.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Store a verification token and hand it back unchanged.
    async fn create_verification_token(
        &self,
        token: VerificationToken,
    ) -> Result<VerificationToken, AdapterError>;

    /// Delete and return the token matching `identifier` and `token`.
    ///
    /// A token can be used once; later calls return `None`.
    async fn use_verification_token(
        &self,
        identifier: &str,
        token: &str,
    ) -> Result<Option<VerificationToken>, AdapterError>;

    async fn create_user(&self, user: NewUser) -> Result<User, AdapterError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, AdapterError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AdapterError>;

    /// Find the user that owns the linked account `(provider, provider_account_id)`.
    async fn get_user_by_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<User>, AdapterError>;

    /// Apply the fields set in `update` and return the stored user.
    async fn update_user(&self, update: UserUpdate) -> Result<User, AdapterError>;

    /// Remove a user together with its sessions, accounts and authenticators.
    async fn delete_user(&self, user_id: &str) -> Result<(), AdapterError>;

    async fn link_account(&self, account: Account) -> Result<Account, AdapterError>;

    async fn unlink_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<(), AdapterError>;

    async fn get_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<Account>, AdapterError>;

    async fn create_session(&self, session: Session) -> Result<Session, AdapterError>;

    async fn get_session_and_user(
        &self,
        session_token: &str,
    ) -> Result<Option<SessionAndUser>, AdapterError>;

    /// Returns `None` when no session has the given token.
    async fn update_session(
        &self,
        update: SessionUpdate,
    ) -> Result<Option<Session>, AdapterError>;

    async fn delete_session(&self, session_token: &str) -> Result<(), AdapterError>;

    async fn create_authenticator(
        &self,
        authenticator: Authenticator,
    ) -> Result<Authenticator, AdapterError>;

    async fn get_authenticator(
        &self,
        credential_id: &str,
    ) -> Result<Option<Authenticator>, AdapterError>;

    async fn list_authenticators_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Vec<Authenticator>, AdapterError>;

    async fn update_authenticator_counter(
        &self,
        credential_id: &str,
        counter: u32,
    ) -> Result<Authenticator, AdapterError>;
}
