use sqlx::{Pool, Postgres};

use crate::account::{errors::AccountError, types::Account};
use crate::storage::{PG_BIGINT, PG_TEXT, validate_postgres_table_schema};

use super::config::DB_TABLE_ACCOUNTS;

// PostgreSQL implementations

/// Validates that the accounts table carries the columns we write
pub(super) async fn validate_account_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), AccountError> {
    let accounts_table = DB_TABLE_ACCOUNTS.as_str();

    // Define expected schema (column name, accepted data types)
    let expected_columns = [
        ("id", PG_TEXT),
        ("userId", PG_TEXT),
        ("type", PG_TEXT),
        ("provider", PG_TEXT),
        ("providerAccountId", PG_TEXT),
        ("refresh_token", PG_TEXT),
        ("access_token", PG_TEXT),
        ("expires_at", PG_BIGINT),
        ("token_type", PG_TEXT),
        ("scope", PG_TEXT),
        ("id_token", PG_TEXT),
        ("session_state", PG_TEXT),
    ];

    validate_postgres_table_schema(
        pool,
        accounts_table,
        &expected_columns,
        AccountError::Storage,
    )
    .await
}

pub(super) async fn insert_account_postgres(
    pool: &Pool<Postgres>,
    id: &str,
    account: &Account,
) -> Result<(), AccountError> {
    let table_name = DB_TABLE_ACCOUNTS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name}
        (id, "userId", type, provider, "providerAccountId", refresh_token, access_token,
         expires_at, token_type, scope, id_token, session_state)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#
    ))
    .bind(id)
    .bind(&account.user_id)
    .bind(account.account_type.as_str())
    .bind(&account.provider)
    .bind(&account.provider_account_id)
    .bind(&account.refresh_token)
    .bind(&account.access_token)
    .bind(account.expires_at)
    .bind(&account.token_type)
    .bind(&account.scope)
    .bind(&account.id_token)
    .bind(&account.session_state)
    .execute(pool)
    .await
    .map_err(|e| AccountError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn delete_account_by_provider_postgres(
    pool: &Pool<Postgres>,
    provider: &str,
    provider_account_id: &str,
) -> Result<(), AccountError> {
    let table_name = DB_TABLE_ACCOUNTS.as_str();

    sqlx::query(&format!(
        r#"DELETE FROM {table_name} WHERE provider = $1 AND "providerAccountId" = $2"#
    ))
    .bind(provider)
    .bind(provider_account_id)
    .execute(pool)
    .await
    .map_err(|e| AccountError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_account_by_provider_postgres(
    pool: &Pool<Postgres>,
    provider: &str,
    provider_account_id: &str,
) -> Result<Option<Account>, AccountError> {
    let table_name = DB_TABLE_ACCOUNTS.as_str();

    sqlx::query_as::<_, Account>(&format!(
        r#"SELECT * FROM {table_name} WHERE provider = $1 AND "providerAccountId" = $2"#
    ))
    .bind(provider)
    .bind(provider_account_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AccountError::Storage(e.to_string()))
}
