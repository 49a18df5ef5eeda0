use sqlx::{Pool, Sqlite};

use crate::account::{errors::AccountError, types::Account};
use crate::storage::validate_sqlite_table_schema;

use super::config::DB_TABLE_ACCOUNTS;

// SQLite implementations

/// Validates that the accounts table carries the columns we write
pub(super) async fn validate_account_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), AccountError> {
    let accounts_table = DB_TABLE_ACCOUNTS.as_str();

    let expected_columns = [
        "id",
        "userId",
        "type",
        "provider",
        "providerAccountId",
        "refresh_token",
        "access_token",
        "expires_at",
        "token_type",
        "scope",
        "id_token",
        "session_state",
    ];

    validate_sqlite_table_schema(
        pool,
        accounts_table,
        &expected_columns,
        AccountError::Storage,
    )
    .await
}

pub(super) async fn insert_account_sqlite(
    pool: &Pool<Sqlite>,
    id: &str,
    account: &Account,
) -> Result<(), AccountError> {
    let table_name = DB_TABLE_ACCOUNTS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name}
        (id, "userId", type, provider, "providerAccountId", refresh_token, access_token,
         expires_at, token_type, scope, id_token, session_state)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
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

pub(super) async fn delete_account_by_provider_sqlite(
    pool: &Pool<Sqlite>,
    provider: &str,
    provider_account_id: &str,
) -> Result<(), AccountError> {
    let table_name = DB_TABLE_ACCOUNTS.as_str();

    sqlx::query(&format!(
        r#"DELETE FROM {table_name} WHERE provider = ? AND "providerAccountId" = ?"#
    ))
    .bind(provider)
    .bind(provider_account_id)
    .execute(pool)
    .await
    .map_err(|e| AccountError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_account_by_provider_sqlite(
    pool: &Pool<Sqlite>,
    provider: &str,
    provider_account_id: &str,
) -> Result<Option<Account>, AccountError> {
    let table_name = DB_TABLE_ACCOUNTS.as_str();

    sqlx::query_as::<_, Account>(&format!(
        r#"SELECT * FROM {table_name} WHERE provider = ? AND "providerAccountId" = ?"#
    ))
    .bind(provider)
    .bind(provider_account_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AccountError::Storage(e.to_string()))
}
