use std::sync::Arc;

use async_trait::async_trait;

use crate::account::{Account, AccountStore};
use crate::authenticator::{Authenticator, AuthenticatorStore};
use crate::session::{Session, SessionAndUser, SessionStore, SessionUpdate};
use crate::storage::{DataStore, DataStoreConfig, PostgresDataStore, SqliteDataStore};
use crate::userdb::{NewUser, User, UserStore, UserUpdate};
use crate::verification::{VerificationStore, VerificationToken};

use super::errors::AdapterError;
use super::traits::Adapter;

/// [`Adapter`] backed by a SQLite or PostgreSQL connection pool
#[derive(Clone)]
pub struct SqlAdapter {
    store: Arc<dyn DataStore>,
}

impl std::fmt::Debug for SqlAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = if self.store.as_sqlite().is_some() {
            "sqlite"
        } else if self.store.as_postgres().is_some() {
            "postgres"
        } else {
            "unknown"
        };
        f.debug_struct("SqlAdapter").field("backend", &backend).finish()
    }
}

impl SqlAdapter {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub fn with_sqlite_pool(pool: sqlx::SqlitePool) -> Self {
        Self::new(Arc::new(SqliteDataStore::new(pool)))
    }

    pub fn with_postgres_pool(pool: sqlx::PgPool) -> Self {
        Self::new(Arc::new(PostgresDataStore::new(pool)))
    }

    /// Build the adapter from `GENERIC_DATA_STORE_TYPE` and `GENERIC_DATA_STORE_URL`.
    ///
    /// The pool connects lazily, so an unreachable database surfaces on the
    /// first query (or on [`SqlAdapter::init`]).
    pub fn from_env() -> Result<Self, AdapterError> {
        let store = DataStoreConfig::from_env()?.connect()?;
        Ok(Self::new(store))
    }

    /// Check that every table the adapter touches exists with the expected columns.
    ///
    /// Tables are never created here; the host application owns the schema.
    pub async fn init(&self) -> Result<(), AdapterError> {
        let store = self.store.as_ref();

        UserStore::validate(store).await?;
        AccountStore::validate(store).await?;
        SessionStore::validate(store).await?;
        VerificationStore::validate(store).await?;
        AuthenticatorStore::validate(store).await?;

        tracing::info!("Adapter schema validated");
        Ok(())
    }
}

#[async_trait]
impl Adapter for SqlAdapter {
    async fn create_verification_token(
        &self,
        token: VerificationToken,
    ) -> Result<VerificationToken, AdapterError> {
        Ok(VerificationStore::create_verification_token(self.store.as_ref(), token).await?)
    }

    async fn use_verification_token(
        &self,
        identifier: &str,
        token: &str,
    ) -> Result<Option<VerificationToken>, AdapterError> {
        Ok(
            VerificationStore::use_verification_token(self.store.as_ref(), identifier, token)
                .await?,
        )
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AdapterError> {
        Ok(UserStore::create_user(self.store.as_ref(), user).await?)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, AdapterError> {
        match UserStore::get_user(self.store.as_ref(), id).await {
            Ok(user) => Ok(user),
            Err(e) => {
                tracing::warn!(error = %e, "get_user failed, treating as missing");
                Ok(None)
            }
        }
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AdapterError> {
        match UserStore::get_user_by_email(self.store.as_ref(), email).await {
            Ok(user) => Ok(user),
            Err(e) => {
                tracing::warn!(error = %e, "get_user_by_email failed, treating as missing");
                Ok(None)
            }
        }
    }

    async fn get_user_by_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<User>, AdapterError> {
        Ok(
            UserStore::get_user_by_account(self.store.as_ref(), provider, provider_account_id)
                .await?,
        )
    }

    async fn update_user(&self, update: UserUpdate) -> Result<User, AdapterError> {
        Ok(UserStore::update_user(self.store.as_ref(), update).await?)
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), AdapterError> {
        Ok(UserStore::delete_user(self.store.as_ref(), user_id).await?)
    }

    async fn link_account(&self, account: Account) -> Result<Account, AdapterError> {
        AccountStore::link_account(self.store.as_ref(), &account).await?;
        Ok(account)
    }

    async fn unlink_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<(), AdapterError> {
        Ok(AccountStore::unlink_account(self.store.as_ref(), provider, provider_account_id).await?)
    }

    async fn get_account(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<Account>, AdapterError> {
        Ok(AccountStore::get_account(self.store.as_ref(), provider, provider_account_id).await?)
    }

    async fn create_session(&self, session: Session) -> Result<Session, AdapterError> {
        Ok(SessionStore::create_session(self.store.as_ref(), &session).await?)
    }

    async fn get_session_and_user(
        &self,
        session_token: &str,
    ) -> Result<Option<SessionAndUser>, AdapterError> {
        Ok(SessionStore::get_session_and_user(self.store.as_ref(), session_token).await?)
    }

    async fn update_session(
        &self,
        update: SessionUpdate,
    ) -> Result<Option<Session>, AdapterError> {
        Ok(SessionStore::update_session(self.store.as_ref(), update).await?)
    }

    async fn delete_session(&self, session_token: &str) -> Result<(), AdapterError> {
        Ok(SessionStore::delete_session(self.store.as_ref(), session_token).await?)
    }

    async fn create_authenticator(
        &self,
        authenticator: Authenticator,
    ) -> Result<Authenticator, AdapterError> {
        Ok(AuthenticatorStore::create_authenticator(self.store.as_ref(), &authenticator).await?)
    }

    async fn get_authenticator(
        &self,
        credential_id: &str,
    ) -> Result<Option<Authenticator>, AdapterError> {
        match AuthenticatorStore::get_authenticator(self.store.as_ref(), credential_id).await {
            Ok(authenticator) => Ok(authenticator),
            Err(e) => {
                tracing::warn!(error = %e, "get_authenticator failed, treating as missing");
                Ok(None)
            }
        }
    }

    async fn list_authenticators_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Vec<Authenticator>, AdapterError> {
        Ok(AuthenticatorStore::list_authenticators_by_user_id(self.store.as_ref(), user_id).await?)
    }

    async fn update_authenticator_counter(
        &self,
        credential_id: &str,
        counter: u32,
    ) -> Result<Authenticator, AdapterError> {
        Ok(
            AuthenticatorStore::update_authenticator_counter(
                self.store.as_ref(),
                credential_id,
                counter,
            )
            .await?,
        )
    }
}
