use sqlx::{Pool, Sqlite};

use crate::account::DB_TABLE_ACCOUNTS;
use crate::authenticator::DB_TABLE_AUTHENTICATORS;
use crate::session::DB_TABLE_SESSIONS;
use crate::storage::validate_sqlite_table_schema;
use crate::userdb::{
    errors::UserError,
    types::{User, UserSearchField},
};

use super::config::DB_TABLE_USERS;

// SQLite implementations

/// Validates that the users table carries the columns we query
pub(super) async fn validate_user_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();

    validate_sqlite_table_schema(
        pool,
        users_table,
        &["id", "name", "email", "emailVerified", "image"],
        UserError::Storage,
    )
    .await
}

pub(super) async fn insert_user_sqlite(
    pool: &Pool<Sqlite>,
    user: &User,
) -> Result<User, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO {table_name} (id, name, email, "emailVerified", image)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, name, email, "emailVerified", image
        "#
    ))
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.email_verified)
    .bind(&user.image)
    .fetch_one(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn get_user_by_field_sqlite(
    pool: &Pool<Sqlite>,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let (query, value) = match field {
        UserSearchField::Id(id) => (
            format!(r#"SELECT id, name, email, "emailVerified", image FROM {table_name} WHERE id = ?"#),
            id.as_str(),
        ),
        UserSearchField::Email(email) => (
            format!(
                r#"SELECT id, name, email, "emailVerified", image FROM {table_name} WHERE email = ?"#
            ),
            email.as_str(),
        ),
    };

    sqlx::query_as::<_, User>(&query)
        .bind(value)
        .fetch_optional(pool)
        .await
        .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn get_user_by_account_sqlite(
    pool: &Pool<Sqlite>,
    provider: &str,
    provider_account_id: &str,
) -> Result<Option<User>, UserError> {
    let users_table = DB_TABLE_USERS.as_str();
    let accounts_table = DB_TABLE_ACCOUNTS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        SELECT u.id, u.name, u.email, u."emailVerified", u.image
        FROM {users_table} u JOIN {accounts_table} a ON u.id = a."userId"
        WHERE a.provider = ? AND a."providerAccountId" = ?
        "#
    ))
    .bind(provider)
    .bind(provider_account_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

pub(super) async fn update_user_sqlite(
    pool: &Pool<Sqlite>,
    user: &User,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE {table_name}
        SET name = ?, email = ?, "emailVerified" = ?, image = ?
        WHERE id = ?
        RETURNING id, name, email, "emailVerified", image
        "#
    ))
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.email_verified)
    .bind(&user.image)
    .bind(&user.id)
    .fetch_optional(pool)
    .await
    .map_err(|e| UserError::Storage(e.to_string()))
}

/// Deletes the user and everything that references it in one transaction
pub(super) async fn delete_user_sqlite(pool: &Pool<Sqlite>, id: &str) -> Result<(), UserError> {
    let users_table = DB_TABLE_USERS.as_str();
    let sessions_table = DB_TABLE_SESSIONS.as_str();
    let accounts_table = DB_TABLE_ACCOUNTS.as_str();
    let authenticators_table = DB_TABLE_AUTHENTICATORS.as_str();

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| UserError::Storage(e.to_string()))?;

    for query in [
        format!(r#"DELETE FROM {sessions_table} WHERE "userId" = ?"#),
        format!(r#"DELETE FROM {accounts_table} WHERE "userId" = ?"#),
        format!(r#"DELETE FROM {authenticators_table} WHERE "userId" = ?"#),
        format!(r#"DELETE FROM {users_table} WHERE id = ?"#),
    ] {
        sqlx::query(&query)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| UserError::Storage(e.to_string()))?;
    }

    tx.commit()
        .await
        .map_err(|e| UserError::Storage(e.to_string()))?;

    Ok(())
}
