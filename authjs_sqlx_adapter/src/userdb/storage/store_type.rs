use crate::storage::DataStore;
use crate::userdb::{
    errors::UserError,
    types::{NewUser, User, UserSearchField, UserUpdate},
};

use super::postgres::*;
use super::sqlite::*;

pub(crate) struct UserStore;

impl UserStore {
    /// Check that the users table exists with the expected columns
    pub(crate) async fn validate(store: &dyn DataStore) -> Result<(), UserError> {
        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => validate_user_tables_sqlite(pool).await,
            (_, Some(pool)) => validate_user_tables_postgres(pool).await,
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Insert a new user under a freshly generated id
    #[tracing::instrument(skip(store, new_user))]
    pub(crate) async fn create_user(
        store: &dyn DataStore,
        new_user: NewUser,
    ) -> Result<User, UserError> {
        let user = new_user.into_user(uuid::Uuid::new_v4().to_string());
        tracing::debug!(user_id = %user.id, "Creating user");

        if let Some(pool) = store.as_sqlite() {
            insert_user_sqlite(pool, &user).await
        } else if let Some(pool) = store.as_postgres() {
            insert_user_postgres(pool, &user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Get a user by their ID
    pub(crate) async fn get_user(
        store: &dyn DataStore,
        id: &str,
    ) -> Result<Option<User>, UserError> {
        Self::get_user_by(store, UserSearchField::Id(id.to_string())).await
    }

    /// Get a user by their email address
    pub(crate) async fn get_user_by_email(
        store: &dyn DataStore,
        email: &str,
    ) -> Result<Option<User>, UserError> {
        Self::get_user_by(store, UserSearchField::Email(email.to_string())).await
    }

    #[tracing::instrument(skip(store), fields(user_field = %field))]
    pub(crate) async fn get_user_by(
        store: &dyn DataStore,
        field: UserSearchField,
    ) -> Result<Option<User>, UserError> {
        let result = if let Some(pool) = store.as_sqlite() {
            get_user_by_field_sqlite(pool, &field).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_by_field_postgres(pool, &field).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(user) => tracing::debug!(found = user.is_some(), "User lookup completed"),
            Err(e) => tracing::error!(error = %e, "User lookup failed"),
        }

        result
    }

    /// Find the user owning the account `(provider, provider_account_id)`
    #[tracing::instrument(skip(store))]
    pub(crate) async fn get_user_by_account(
        store: &dyn DataStore,
        provider: &str,
        provider_account_id: &str,
    ) -> Result<Option<User>, UserError> {
        if let Some(pool) = store.as_sqlite() {
            get_user_by_account_sqlite(pool, provider, provider_account_id).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_by_account_postgres(pool, provider, provider_account_id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }

    /// Merge `update` over the stored user and persist the result
    #[tracing::instrument(skip(store, update), fields(user_id = %update.id))]
    pub(crate) async fn update_user(
        store: &dyn DataStore,
        update: UserUpdate,
    ) -> Result<User, UserError> {
        let current = Self::get_user(store, &update.id)
            .await?
            .ok_or(UserError::NotFound)?;
        let merged = current.merged_with(update);

        let updated = if let Some(pool) = store.as_sqlite() {
            update_user_sqlite(pool, &merged).await
        } else if let Some(pool) = store.as_postgres() {
            update_user_postgres(pool, &merged).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }?;

        // The row can vanish between the read and the write
        updated.ok_or(UserError::NotFound)
    }

    /// Delete the user with its sessions, accounts and authenticators
    #[tracing::instrument(skip(store))]
    pub(crate) async fn delete_user(store: &dyn DataStore, id: &str) -> Result<(), UserError> {
        if let Some(pool) = store.as_sqlite() {
            delete_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Account, AccountStore, AccountType};
    use crate::authenticator::{AuthenticatorStore, DB_TABLE_AUTHENTICATORS};
    use crate::session::{Session, SessionStore};
    use crate::test_utils::{init_test_store, sample_authenticator, sample_new_user};
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_userstore_validate() {
        let store = init_test_store().await;

        let result = UserStore::validate(store.as_ref()).await;
        assert!(result.is_ok(), "users table should validate: {result:?}");
    }

    /// Creating a user assigns an id and returns the stored row
    #[tokio::test]
    async fn test_userstore_create_user() {
        let store = init_test_store().await;

        let created = UserStore::create_user(store.as_ref(), sample_new_user("create"))
            .await
            .expect("Failed to create user");

        assert!(!created.id.is_empty(), "id should be generated");
        assert_eq!(created.email, "create@example.com");
        assert_eq!(created.name.as_deref(), Some("User create"));

        let fetched = UserStore::get_user(store.as_ref(), &created.id)
            .await
            .expect("lookup should succeed")
            .expect("user should exist");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_userstore_get_user_missing() {
        let store = init_test_store().await;

        let result = UserStore::get_user(store.as_ref(), "non-existent-user-id").await;
        assert!(result.expect("query should succeed").is_none());
    }

    #[tokio::test]
    async fn test_userstore_get_user_by_email() {
        let store = init_test_store().await;
        let created = UserStore::create_user(store.as_ref(), sample_new_user("email"))
            .await
            .expect("Failed to create user");

        let found = UserStore::get_user_by_email(store.as_ref(), "email@example.com")
            .await
            .expect("lookup should succeed");
        assert_eq!(found.map(|u| u.id), Some(created.id));

        let missing = UserStore::get_user_by_email(store.as_ref(), "nobody@example.com")
            .await
            .expect("lookup should succeed");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_userstore_get_user_by_account() {
        let store = init_test_store().await;
        let user = UserStore::create_user(store.as_ref(), sample_new_user("linked"))
            .await
            .expect("Failed to create user");
        AccountStore::link_account(
            store.as_ref(),
            &Account::new(&user.id, AccountType::Oauth, "github", "gh-42"),
        )
        .await
        .expect("Failed to link account");

        let found = UserStore::get_user_by_account(store.as_ref(), "github", "gh-42")
            .await
            .expect("lookup should succeed");
        assert_eq!(found, Some(user));

        let other_provider = UserStore::get_user_by_account(store.as_ref(), "google", "gh-42")
            .await
            .expect("lookup should succeed");
        assert!(other_provider.is_none());
    }

    /// Updating merges the provided fields over the stored row
    #[tokio::test]
    async fn test_userstore_update_user() {
        let store = init_test_store().await;
        let user = UserStore::create_user(store.as_ref(), sample_new_user("update"))
            .await
            .expect("Failed to create user");

        let verified = Utc::now();
        let updated = UserStore::update_user(
            store.as_ref(),
            UserUpdate {
                email_verified: Some(Some(verified)),
                image: Some(Some("https://example.com/new.png".to_string())),
                ..UserUpdate::new(&user.id)
            },
        )
        .await
        .expect("Failed to update user");

        assert_eq!(updated.id, user.id);
        assert_eq!(updated.name, user.name);
        assert_eq!(updated.email, user.email);
        assert_eq!(
            updated.email_verified.map(|t| t.timestamp()),
            Some(verified.timestamp())
        );
        assert_eq!(updated.image.as_deref(), Some("https://example.com/new.png"));
    }

    /// `Some(None)` clears a nullable column
    #[tokio::test]
    async fn test_userstore_update_user_clears_image() {
        // Given a user with an image
        let store = init_test_store().await;
        let user = UserStore::create_user(
            store.as_ref(),
            NewUser {
                image: Some("https://example.com/old.png".to_string()),
                ..sample_new_user("clear")
            },
        )
        .await
        .expect("Failed to create user");

        // When the image is explicitly cleared
        let updated = UserStore::update_user(
            store.as_ref(),
            UserUpdate {
                image: Some(None),
                ..UserUpdate::new(&user.id)
            },
        )
        .await
        .expect("Failed to update user");

        // Then it is gone while other fields stay
        assert!(updated.image.is_none());
        assert_eq!(updated.name, user.name);
        let fetched = UserStore::get_user(store.as_ref(), &user.id)
            .await
            .expect("lookup should succeed")
            .expect("user should exist");
        assert!(fetched.image.is_none());
    }

    #[tokio::test]
    async fn test_userstore_update_missing_user() {
        let store = init_test_store().await;

        let result = UserStore::update_user(store.as_ref(), UserUpdate::new("ghost")).await;
        assert!(matches!(result, Err(UserError::NotFound)));
    }

    /// Deleting a user removes its sessions, accounts and authenticators too
    #[tokio::test]
    async fn test_userstore_delete_user_cascades() {
        let store = init_test_store().await;
        let user = UserStore::create_user(store.as_ref(), sample_new_user("delete"))
            .await
            .expect("Failed to create user");
        AccountStore::link_account(
            store.as_ref(),
            &Account::new(&user.id, AccountType::Oidc, "google", "g-1"),
        )
        .await
        .expect("Failed to link account");
        SessionStore::create_session(
            store.as_ref(),
            &Session {
                session_token: "delete-token".to_string(),
                user_id: user.id.clone(),
                expires: Utc::now() + Duration::days(30),
            },
        )
        .await
        .expect("Failed to create session");
        AuthenticatorStore::create_authenticator(
            store.as_ref(),
            &sample_authenticator(&user.id, "cred-delete"),
        )
        .await
        .expect("Failed to create authenticator");

        UserStore::delete_user(store.as_ref(), &user.id)
            .await
            .expect("Failed to delete user");

        assert!(
            UserStore::get_user(store.as_ref(), &user.id)
                .await
                .expect("lookup should succeed")
                .is_none()
        );
        assert!(
            SessionStore::get_session_and_user(store.as_ref(), "delete-token")
                .await
                .expect("lookup should succeed")
                .is_none()
        );
        assert!(
            UserStore::get_user_by_account(store.as_ref(), "google", "g-1")
                .await
                .expect("lookup should succeed")
                .is_none()
        );
        assert!(
            AuthenticatorStore::list_authenticators_by_user_id(store.as_ref(), &user.id)
                .await
                .expect("list should succeed")
                .is_empty()
        );
    }

    /// A failing statement inside the delete leaves every row in place
    #[tokio::test]
    async fn test_userstore_delete_user_rolls_back_on_failure() {
        // Given a user with a session and an account
        let store = init_test_store().await;
        let user = UserStore::create_user(store.as_ref(), sample_new_user("rollback"))
            .await
            .expect("Failed to create user");
        AccountStore::link_account(
            store.as_ref(),
            &Account::new(&user.id, AccountType::Oauth, "github", "gh-rollback"),
        )
        .await
        .expect("Failed to link account");
        SessionStore::create_session(
            store.as_ref(),
            &Session {
                session_token: "rollback-token".to_string(),
                user_id: user.id.clone(),
                expires: Utc::now() + Duration::days(1),
            },
        )
        .await
        .expect("Failed to create session");

        // And the authenticators table is missing, so its delete fails mid-transaction
        let pool = store.as_sqlite().expect("test store is sqlite");
        sqlx::query(&format!("DROP TABLE {}", DB_TABLE_AUTHENTICATORS.as_str()))
            .execute(pool)
            .await
            .expect("Failed to drop authenticators table");

        // When deleting the user
        let result = UserStore::delete_user(store.as_ref(), &user.id).await;

        // Then the call fails and the earlier deletes were rolled back
        assert!(matches!(result, Err(UserError::Storage(_))));
        assert!(
            UserStore::get_user(store.as_ref(), &user.id)
                .await
                .expect("lookup should succeed")
                .is_some()
        );
        assert!(
            SessionStore::get_session_and_user(store.as_ref(), "rollback-token")
                .await
                .expect("lookup should succeed")
                .is_some()
        );
        assert!(
            AccountStore::get_account(store.as_ref(), "github", "gh-rollback")
                .await
                .expect("lookup should succeed")
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_userstore_delete_missing_user_is_noop() {
        let store = init_test_store().await;

        let result = UserStore::delete_user(store.as_ref(), "ghost").await;
        assert!(result.is_ok());
    }
}
