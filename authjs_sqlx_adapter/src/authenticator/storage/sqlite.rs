use sqlx::{Pool, Sqlite};

use crate::authenticator::{errors::AuthenticatorError, types::Authenticator};
use crate::storage::validate_sqlite_table_schema;

use super::config::DB_TABLE_AUTHENTICATORS;

const AUTHENTICATOR_COLUMNS: &str = r#""credentialID", "userId", "providerAccountId", "credentialPublicKey", counter, "credentialDeviceType", "credentialBackedUp", transports"#;

// SQLite implementations

pub(super) async fn validate_authenticator_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), AuthenticatorError> {
    let authenticators_table = DB_TABLE_AUTHENTICATORS.as_str();

    let expected_columns = [
        "credentialID",
        "userId",
        "providerAccountId",
        "credentialPublicKey",
        "counter",
        "credentialDeviceType",
        "credentialBackedUp",
        "transports",
    ];

    validate_sqlite_table_schema(
        pool,
        authenticators_table,
        &expected_columns,
        AuthenticatorError::Storage,
    )
    .await
}

pub(super) async fn insert_authenticator_sqlite(
    pool: &Pool<Sqlite>,
    authenticator: &Authenticator,
) -> Result<Authenticator, AuthenticatorError> {
    let table_name = DB_TABLE_AUTHENTICATORS.as_str();

    sqlx::query_as::<_, Authenticator>(&format!(
        r#"
        INSERT INTO {table_name} ({AUTHENTICATOR_COLUMNS})
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {AUTHENTICATOR_COLUMNS}
        "#
    ))
    .bind(&authenticator.credential_id)
    .bind(&authenticator.user_id)
    .bind(&authenticator.provider_account_id)
    .bind(&authenticator.credential_public_key)
    .bind(i64::from(authenticator.counter))
    .bind(&authenticator.credential_device_type)
    .bind(authenticator.credential_backed_up)
    .bind(&authenticator.transports)
    .fetch_one(pool)
    .await
    .map_err(|e| AuthenticatorError::Storage(e.to_string()))
}

pub(super) async fn get_authenticator_sqlite(
    pool: &Pool<Sqlite>,
    credential_id: &str,
) -> Result<Option<Authenticator>, AuthenticatorError> {
    let table_name = DB_TABLE_AUTHENTICATORS.as_str();

    sqlx::query_as::<_, Authenticator>(&format!(
        r#"SELECT {AUTHENTICATOR_COLUMNS} FROM {table_name} WHERE "credentialID" = ?"#
    ))
    .bind(credential_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AuthenticatorError::Storage(e.to_string()))
}

pub(super) async fn list_authenticators_by_user_id_sqlite(
    pool: &Pool<Sqlite>,
    user_id: &str,
) -> Result<Vec<Authenticator>, AuthenticatorError> {
    let table_name = DB_TABLE_AUTHENTICATORS.as_str();

    sqlx::query_as::<_, Authenticator>(&format!(
        r#"SELECT {AUTHENTICATOR_COLUMNS} FROM {table_name} WHERE "userId" = ?"#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| AuthenticatorError::Storage(e.to_string()))
}

pub(super) async fn update_authenticator_counter_sqlite(
    pool: &Pool<Sqlite>,
    credential_id: &str,
    counter: u32,
) -> Result<Option<Authenticator>, AuthenticatorError> {
    let table_name = DB_TABLE_AUTHENTICATORS.as_str();

    sqlx::query_as::<_, Authenticator>(&format!(
        r#"
        UPDATE {table_name} SET counter = ? WHERE "credentialID" = ?
        RETURNING {AUTHENTICATOR_COLUMNS}
        "#
    ))
    .bind(i64::from(counter))
    .bind(credential_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AuthenticatorError::Storage(e.to_string()))
}
