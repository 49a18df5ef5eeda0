use crate::authenticator::{errors::AuthenticatorError, types::Authenticator};
use crate::storage::DataStore;

use super::postgres::*;
use super::sqlite::*;

pub(crate) struct AuthenticatorStore;

impl AuthenticatorStore {
    pub(crate) async fn validate(store: &dyn DataStore) -> Result<(), AuthenticatorError> {
        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => validate_authenticator_tables_sqlite(pool).await,
            (_, Some(pool)) => validate_authenticator_tables_postgres(pool).await,
            _ => Err(AuthenticatorError::Storage(
                "Unsupported database type".to_string(),
            )),
        }
    }

    #[tracing::instrument(skip(store, authenticator), fields(user_id = %authenticator.user_id))]
    pub(crate) async fn create_authenticator(
        store: &dyn DataStore,
        authenticator: &Authenticator,
    ) -> Result<Authenticator, AuthenticatorError> {
        if let Some(pool) = store.as_sqlite() {
            insert_authenticator_sqlite(pool, authenticator).await
        } else if let Some(pool) = store.as_postgres() {
            insert_authenticator_postgres(pool, authenticator).await
        } else {
            Err(AuthenticatorError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    #[tracing::instrument(skip(store))]
    pub(crate) async fn get_authenticator(
        store: &dyn DataStore,
        credential_id: &str,
    ) -> Result<Option<Authenticator>, AuthenticatorError> {
        if let Some(pool) = store.as_sqlite() {
            get_authenticator_sqlite(pool, credential_id).await
        } else if let Some(pool) = store.as_postgres() {
            get_authenticator_postgres(pool, credential_id).await
        } else {
            Err(AuthenticatorError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    #[tracing::instrument(skip(store))]
    pub(crate) async fn list_authenticators_by_user_id(
        store: &dyn DataStore,
        user_id: &str,
    ) -> Result<Vec<Authenticator>, AuthenticatorError> {
        let authenticators = if let Some(pool) = store.as_sqlite() {
            list_authenticators_by_user_id_sqlite(pool, user_id).await
        } else if let Some(pool) = store.as_postgres() {
            list_authenticators_by_user_id_postgres(pool, user_id).await
        } else {
            Err(AuthenticatorError::Storage(
                "Unsupported database type".to_string(),
            ))
        }?;

        tracing::debug!(count = authenticators.len(), "Listed authenticators");
        Ok(authenticators)
    }

    /// Store a new signature counter, returning the updated credential
    #[tracing::instrument(skip(store))]
    pub(crate) async fn update_authenticator_counter(
        store: &dyn DataStore,
        credential_id: &str,
        counter: u32,
    ) -> Result<Authenticator, AuthenticatorError> {
        let updated = if let Some(pool) = store.as_sqlite() {
            update_authenticator_counter_sqlite(pool, credential_id, counter).await
        } else if let Some(pool) = store.as_postgres() {
            update_authenticator_counter_postgres(pool, credential_id, counter).await
        } else {
            Err(AuthenticatorError::Storage(
                "Unsupported database type".to_string(),
            ))
        }?;

        updated.ok_or(AuthenticatorError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_user, init_test_store, sample_authenticator};

    #[tokio::test]
    async fn test_authenticatorstore_validate() {
        let store = init_test_store().await;

        let result = AuthenticatorStore::validate(store.as_ref()).await;
        assert!(result.is_ok(), "authenticators table should validate: {result:?}");
    }

    #[tokio::test]
    async fn test_authenticatorstore_create_and_get() {
        let store = init_test_store().await;
        let user = create_test_user(store.as_ref(), "passkey").await;
        let input = sample_authenticator(&user.id, "cred-get");

        let created = AuthenticatorStore::create_authenticator(store.as_ref(), &input)
            .await
            .expect("Failed to create authenticator");
        assert_eq!(created, input);

        let fetched = AuthenticatorStore::get_authenticator(store.as_ref(), "cred-get")
            .await
            .expect("lookup should succeed");
        assert_eq!(fetched, Some(input));
    }

    #[tokio::test]
    async fn test_authenticatorstore_get_unknown_credential() {
        let store = init_test_store().await;

        let fetched = AuthenticatorStore::get_authenticator(store.as_ref(), "missing")
            .await
            .expect("lookup should succeed");
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_authenticatorstore_list_by_user() {
        // Given two users, one with two credentials
        let store = init_test_store().await;
        let owner = create_test_user(store.as_ref(), "owner").await;
        let other = create_test_user(store.as_ref(), "other").await;
        for (user_id, cred) in [(&owner.id, "cred-a"), (&owner.id, "cred-b"), (&other.id, "cred-c")]
        {
            AuthenticatorStore::create_authenticator(
                store.as_ref(),
                &sample_authenticator(user_id, cred),
            )
            .await
            .expect("Failed to create authenticator");
        }

        // When listing the owner's credentials
        let mut listed = AuthenticatorStore::list_authenticators_by_user_id(store.as_ref(), &owner.id)
            .await
            .expect("list should succeed");
        listed.sort_by(|a, b| a.credential_id.cmp(&b.credential_id));

        // Then only theirs come back
        let ids: Vec<&str> = listed.iter().map(|a| a.credential_id.as_str()).collect();
        assert_eq!(ids, ["cred-a", "cred-b"]);
    }

    #[tokio::test]
    async fn test_authenticatorstore_list_empty() {
        let store = init_test_store().await;

        let listed = AuthenticatorStore::list_authenticators_by_user_id(store.as_ref(), "nobody")
            .await
            .expect("list should succeed");
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_authenticatorstore_update_counter() {
        let store = init_test_store().await;
        let user = create_test_user(store.as_ref(), "counter").await;
        AuthenticatorStore::create_authenticator(
            store.as_ref(),
            &sample_authenticator(&user.id, "cred-counter"),
        )
        .await
        .expect("Failed to create authenticator");

        let updated =
            AuthenticatorStore::update_authenticator_counter(store.as_ref(), "cred-counter", 42)
                .await
                .expect("Failed to update counter");
        assert_eq!(updated.counter, 42);
        assert_eq!(updated.credential_id, "cred-counter");

        let fetched = AuthenticatorStore::get_authenticator(store.as_ref(), "cred-counter")
            .await
            .expect("lookup should succeed")
            .expect("authenticator should exist");
        assert_eq!(fetched.counter, 42);
    }

    #[tokio::test]
    async fn test_authenticatorstore_update_counter_unknown_credential() {
        let store = init_test_store().await;

        let result =
            AuthenticatorStore::update_authenticator_counter(store.as_ref(), "missing", 1).await;
        assert!(matches!(result, Err(AuthenticatorError::NotFound)));
    }

    #[tokio::test]
    async fn test_authenticatorstore_duplicate_credential_rejected() {
        let store = init_test_store().await;
        let user = create_test_user(store.as_ref(), "dup").await;
        let input = sample_authenticator(&user.id, "cred-dup");
        AuthenticatorStore::create_authenticator(store.as_ref(), &input)
            .await
            .expect("Failed to create authenticator");

        let result = AuthenticatorStore::create_authenticator(store.as_ref(), &input).await;
        assert!(matches!(result, Err(AuthenticatorError::Storage(_))));
    }
}
