use crate::account::{errors::AccountError, types::Account};
use crate::storage::DataStore;

use super::postgres::*;
use super::sqlite::*;

pub(crate) struct AccountStore;

impl AccountStore {
    pub(crate) async fn validate(store: &dyn DataStore) -> Result<(), AccountError> {
        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => validate_account_tables_sqlite(pool).await,
            (_, Some(pool)) => validate_account_tables_postgres(pool).await,
            _ => Err(AccountError::Storage(
                "Unsupported database type".to_string(),
            )),
        }
    }

    /// Store a provider account for a user
    #[tracing::instrument(
        skip(store, account),
        fields(user_id = %account.user_id, provider = %account.provider)
    )]
    pub(crate) async fn link_account(
        store: &dyn DataStore,
        account: &Account,
    ) -> Result<(), AccountError> {
        let id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(account_id = %id, account_type = %account.account_type, "Linking account");

        if let Some(pool) = store.as_sqlite() {
            insert_account_sqlite(pool, &id, account).await
        } else if let Some(pool) = store.as_postgres() {
            insert_account_postgres(pool, &id, account).await
        } else {
            Err(AccountError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    #[tracing::instrument(skip(store))]
    pub(crate) async fn get_account(
        store: &dyn DataStore,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<Account>, AccountError> {
        if let Some(pool) = store.as_sqlite() {
            get_account_by_provider_sqlite(pool, provider, provider_account_id).await
        } else if let Some(pool) = store.as_postgres() {
            get_account_by_provider_postgres(pool, provider, provider_account_id).await
        } else {
            Err(AccountError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    #[tracing::instrument(skip(store))]
    pub(crate) async fn unlink_account(
        store: &dyn DataStore,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<(), AccountError> {
        if let Some(pool) = store.as_sqlite() {
            delete_account_by_provider_sqlite(pool, provider, provider_account_id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_account_by_provider_postgres(pool, provider, provider_account_id).await
        } else {
            Err(AccountError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }
}
