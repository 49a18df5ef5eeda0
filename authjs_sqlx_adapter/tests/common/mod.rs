//! Shared setup for integration tests

use authjs_sqlx_adapter::SqlAdapter;
use sqlx::sqlite::SqlitePoolOptions;

/// Framework schema with the default table names
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE users (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT,
        email TEXT NOT NULL UNIQUE,
        "emailVerified" TIMESTAMP,
        image TEXT
    )"#,
    r#"CREATE TABLE accounts (
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
    )"#,
    r#"CREATE TABLE sessions (
        id TEXT PRIMARY KEY NOT NULL,
        "sessionToken" TEXT NOT NULL UNIQUE,
        "userId" TEXT NOT NULL,
        expires TIMESTAMP NOT NULL
    )"#,
    r#"CREATE TABLE verification_token (
        identifier TEXT NOT NULL,
        expires TIMESTAMP NOT NULL,
        token TEXT NOT NULL,
        PRIMARY KEY (identifier, token)
    )"#,
    r#"CREATE TABLE authenticators (
        "credentialID" TEXT NOT NULL UNIQUE,
        "userId" TEXT NOT NULL,
        "providerAccountId" TEXT NOT NULL,
        "credentialPublicKey" TEXT NOT NULL,
        counter INTEGER NOT NULL,
        "credentialDeviceType" TEXT NOT NULL,
        "credentialBackedUp" BOOLEAN NOT NULL,
        transports TEXT,
        PRIMARY KEY ("userId", "credentialID")
    )"#,
];

/// Adapter over a private in-memory database with the schema applied
pub async fn setup_adapter() -> SqlAdapter {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    for ddl in SCHEMA {
        sqlx::query(ddl)
            .execute(&pool)
            .await
            .expect("Failed to apply schema");
    }

    let adapter = SqlAdapter::with_sqlite_pool(pool);
    adapter.init().await.expect("Schema should validate");
    adapter
}
