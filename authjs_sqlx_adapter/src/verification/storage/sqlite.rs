use sqlx::{Pool, Sqlite};

use crate::storage::validate_sqlite_table_schema;
use crate::verification::{errors::VerificationError, types::VerificationToken};

use super::config::DB_TABLE_VERIFICATION_TOKENS;

// SQLite implementations

pub(super) async fn validate_verification_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), VerificationError> {
    let tokens_table = DB_TABLE_VERIFICATION_TOKENS.as_str();

    validate_sqlite_table_schema(
        pool,
        tokens_table,
        &["identifier", "expires", "token"],
        VerificationError::Storage,
    )
    .await
}

pub(super) async fn insert_verification_token_sqlite(
    pool: &Pool<Sqlite>,
    token: &VerificationToken,
) -> Result<(), VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_TOKENS.as_str();

    sqlx::query(&format!(
        r#"INSERT INTO {table_name} (identifier, expires, token) VALUES (?, ?, ?)"#
    ))
    .bind(&token.identifier)
    .bind(token.expires)
    .bind(&token.token)
    .execute(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))?;

    Ok(())
}

/// Deletes the token and hands back the deleted row, if there was one
pub(super) async fn take_verification_token_sqlite(
    pool: &Pool<Sqlite>,
    identifier: &str,
    token: &str,
) -> Result<Option<VerificationToken>, VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_TOKENS.as_str();

    sqlx::query_as::<_, VerificationToken>(&format!(
        r#"
        DELETE FROM {table_name} WHERE identifier = ? AND token = ?
        RETURNING identifier, expires, token
        "#
    ))
    .bind(identifier)
    .bind(token)
    .fetch_optional(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))
}
