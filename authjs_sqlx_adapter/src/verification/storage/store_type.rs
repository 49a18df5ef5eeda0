use crate::storage::DataStore;
use crate::verification::{errors::VerificationError, types::VerificationToken};

use super::postgres::*;
use super::sqlite::*;

pub(crate) struct VerificationStore;

impl VerificationStore {
    pub(crate) async fn validate(store: &dyn DataStore) -> Result<(), VerificationError> {
        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => validate_verification_tables_sqlite(pool).await,
            (_, Some(pool)) => validate_verification_tables_postgres(pool).await,
            _ => Err(VerificationError::Storage(
                "Unsupported database type".to_string(),
            )),
        }
    }

    #[tracing::instrument(skip_all)]
    pub(crate) async fn create_verification_token(
        store: &dyn DataStore,
        token: VerificationToken,
    ) -> Result<VerificationToken, VerificationError> {
        if let Some(pool) = store.as_sqlite() {
            insert_verification_token_sqlite(pool, &token).await?;
        } else if let Some(pool) = store.as_postgres() {
            insert_verification_token_postgres(pool, &token).await?;
        } else {
            return Err(VerificationError::Storage(
                "Unsupported database type".to_string(),
            ));
        }

        tracing::debug!(expires = %token.expires, "Verification token stored");
        Ok(token)
    }

    /// Consumes the token: a second call with the same pair yields `None`
    #[tracing::instrument(skip_all)]
    pub(crate) async fn use_verification_token(
        store: &dyn DataStore,
        identifier: &str,
        token: &str,
    ) -> Result<Option<VerificationToken>, VerificationError> {
        let taken = if let Some(pool) = store.as_sqlite() {
            take_verification_token_sqlite(pool, identifier, token).await
        } else if let Some(pool) = store.as_postgres() {
            take_verification_token_postgres(pool, identifier, token).await
        } else {
            Err(VerificationError::Storage(
                "Unsupported database type".to_string(),
            ))
        }?;

        tracing::debug!(consumed = taken.is_some(), "Verification token lookup");
        Ok(taken)
    }
}
