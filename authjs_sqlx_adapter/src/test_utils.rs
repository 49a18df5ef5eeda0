//! Shared fixtures for unit tests
//!
//! Every test gets its own in-memory SQLite database with the framework's
//! tables created under the configured table names.

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;

use crate::account::DB_TABLE_ACCOUNTS;
use crate::authenticator::{Authenticator, DB_TABLE_AUTHENTICATORS};
use crate::session::DB_TABLE_SESSIONS;
use crate::storage::{DataStore, SqliteDataStore};
use crate::userdb::{DB_TABLE_USERS, NewUser, User, UserStore};
use crate::verification::DB_TABLE_VERIFICATION_TOKENS;

/// Fresh, empty in-memory database
///
/// Pinned to one connection that never expires; a second connection would
/// open a different, empty database.
pub(crate) async fn sqlite_pool() -> sqlx::SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite")
}

/// In-memory store with all adapter tables in place
pub(crate) async fn init_test_store() -> Arc<dyn DataStore> {
    let pool = sqlite_pool().await;

    for ddl in schema_ddl() {
        sqlx::query(&ddl)
            .execute(&pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to apply test schema: {e}\n{ddl}"));
    }

    Arc::new(SqliteDataStore::new(pool))
}

fn schema_ddl() -> Vec<String> {
    let users = DB_TABLE_USERS.as_str();
    let accounts = DB_TABLE_ACCOUNTS.as_str();
    let sessions = DB_TABLE_SESSIONS.as_str();
    let tokens = DB_TABLE_VERIFICATION_TOKENS.as_str();
    let authenticators = DB_TABLE_AUTHENTICATORS.as_str();

    vec![
        format!(
            r#"
            CREATE TABLE {users} (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT,
                email TEXT NOT NULL UNIQUE,
                "emailVerified" TIMESTAMP,
                image TEXT
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE {accounts} (
                id TEXT PRIMARY KEY NOT NULL,
                "userId" TEXT NOT NULL,
                type TEXT NOT NULL,
                provider TEXT NOT NULL,
                "providerAccountId" TEXT NOT NULL,
                refresh_token TEXT,
                access_token TEXT,
                expires_at INTEGER,
                token_type TEXT,
                scope TEXT,
                id_token TEXT,
                session_state TEXT,
                UNIQUE (provider, "providerAccountId")
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE {sessions} (
                id TEXT PRIMARY KEY NOT NULL,
                "sessionToken" TEXT NOT NULL UNIQUE,
                "userId" TEXT NOT NULL,
                expires TIMESTAMP NOT NULL
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE {tokens} (
                identifier TEXT NOT NULL,
                expires TIMESTAMP NOT NULL,
                token TEXT NOT NULL,
                PRIMARY KEY (identifier, token)
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE {authenticators} (
                "credentialID" TEXT NOT NULL UNIQUE,
                "userId" TEXT NOT NULL,
                "providerAccountId" TEXT NOT NULL,
                "credentialPublicKey" TEXT NOT NULL,
                counter INTEGER NOT NULL,
                "credentialDeviceType" TEXT NOT NULL,
                "credentialBackedUp" BOOLEAN NOT NULL,
                transports TEXT,
                PRIMARY KEY ("userId", "credentialID")
            )
            "#
        ),
    ]
}

pub(crate) fn sample_new_user(suffix: &str) -> NewUser {
    NewUser {
        name: Some(format!("User {suffix}")),
        ..NewUser::new(format!("{suffix}@example.com"))
    }
}

pub(crate) async fn create_test_user(store: &dyn DataStore, suffix: &str) -> User {
    UserStore::create_user(store, sample_new_user(suffix))
        .await
        .expect("Failed to create test user")
}

pub(crate) fn sample_authenticator(user_id: &str, credential_id: &str) -> Authenticator {
    Authenticator {
        credential_id: credential_id.to_string(),
        user_id: user_id.to_string(),
        provider_account_id: credential_id.to_string(),
        credential_public_key: format!("pk-{credential_id}"),
        counter: 0,
        credential_device_type: "multiDevice".to_string(),
        credential_backed_up: true,
        transports: Some("internal,hybrid".to_string()),
    }
}
