use sqlx::{Pool, Postgres};

use crate::storage::{PG_TEXT, PG_TIMESTAMP, validate_postgres_table_schema};
use crate::verification::{errors::VerificationError, types::VerificationToken};

use super::config::DB_TABLE_VERIFICATION_TOKENS;

// PostgreSQL implementations

pub(super) async fn validate_verification_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), VerificationError> {
    let tokens_table = DB_TABLE_VERIFICATION_TOKENS.as_str();

    // Define expected schema (column name, accepted data types)
    let expected_columns = [
        ("identifier", PG_TEXT),
        ("expires", PG_TIMESTAMP),
        ("token", PG_TEXT),
    ];

    validate_postgres_table_schema(
        pool,
        tokens_table,
        &expected_columns,
        VerificationError::Storage,
    )
    .await
}

pub(super) async fn insert_verification_token_postgres(
    pool: &Pool<Postgres>,
    token: &VerificationToken,
) -> Result<(), VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_TOKENS.as_str();

    sqlx::query(&format!(
        r#"INSERT INTO {table_name} (identifier, expires, token) VALUES ($1, $2, $3)"#
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
pub(super) async fn take_verification_token_postgres(
    pool: &Pool<Postgres>,
    identifier: &str,
    token: &str,
) -> Result<Option<VerificationToken>, VerificationError> {
    let table_name = DB_TABLE_VERIFICATION_TOKENS.as_str();

    sqlx::query_as::<_, VerificationToken>(&format!(
        r#"
        DELETE FROM {table_name} WHERE identifier = $1 AND token = $2
        RETURNING identifier, expires, token
        "#
    ))
    .bind(identifier)
    .bind(token)
    .fetch_optional(pool)
    .await
    .map_err(|e| VerificationError::Storage(e.to_string()))
}
