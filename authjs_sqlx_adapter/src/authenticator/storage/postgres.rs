use sqlx::{Pool, Postgres};

use crate::authenticator::{errors::AuthenticatorError, types::Authenticator};
use crate::storage::{PG_BOOLEAN, PG_INTEGER, PG_TEXT, validate_postgres_table_schema};

use super::config::DB_TABLE_AUTHENTICATORS;

const AUTHENTICATOR_COLUMNS: &str = r#""credentialID", "userId", "providerAccountId", "credentialPublicKey", counter, "credentialDeviceType", "credentialBackedUp", transports"#;

// PostgreSQL implementations

pub(super) async fn validate_authenticator_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), AuthenticatorError> {
    let authenticators_table = DB_TABLE_AUTHENTICATORS.as_str();

    // Define expected schema (column name, accepted data types)
    let expected_columns = [
        ("credentialID", PG_TEXT),
        ("userId", PG_TEXT),
        ("providerAccountId", PG_TEXT),
        ("credentialPublicKey", PG_TEXT),
        ("counter", PG_INTEGER),
        ("credentialDeviceType", PG_TEXT),
        ("credentialBackedUp", PG_BOOLEAN),
        ("transports", PG_TEXT),
    ];

    validate_postgres_table_schema(
        pool,
        authenticators_table,
        &expected_columns,
        AuthenticatorError::Storage,
    )
    .await
}

/// The counter column is a 32-bit signed INTEGER
fn counter_to_db(counter: u32) -> Result<i32, AuthenticatorError> {
    i32::try_from(counter).map_err(|_| {
        AuthenticatorError::Storage(format!("Counter {counter} exceeds INTEGER range"))
    })
}

pub(super) async fn insert_authenticator_postgres(
    pool: &Pool<Postgres>,
    authenticator: &Authenticator,
) -> Result<Authenticator, AuthenticatorError> {
    let table_name = DB_TABLE_AUTHENTICATORS.as_str();
    let counter = counter_to_db(authenticator.counter)?;

    sqlx::query_as::<_, Authenticator>(&format!(
        r#"
        INSERT INTO {table_name} ({AUTHENTICATOR_COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {AUTHENTICATOR_COLUMNS}
        "#
    ))
    .bind(&authenticator.credential_id)
    .bind(&authenticator.user_id)
    .bind(&authenticator.provider_account_id)
    .bind(&authenticator.credential_public_key)
    .bind(counter)
    .bind(&authenticator.credential_device_type)
    .bind(authenticator.credential_backed_up)
    .bind(&authenticator.transports)
    .fetch_one(pool)
    .await
    .map_err(|e| AuthenticatorError::Storage(e.to_string()))
}

pub(super) async fn get_authenticator_postgres(
    pool: &Pool<Postgres>,
    credential_id: &str,
) -> Result<Option<Authenticator>, AuthenticatorError> {
    let table_name = DB_TABLE_AUTHENTICATORS.as_str();

    sqlx::query_as::<_, Authenticator>(&format!(
        r#"SELECT {AUTHENTICATOR_COLUMNS} FROM {table_name} WHERE "credentialID" = $1"#
    ))
    .bind(credential_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AuthenticatorError::Storage(e.to_string()))
}

pub(super) async fn list_authenticators_by_user_id_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<Vec<Authenticator>, AuthenticatorError> {
    let table_name = DB_TABLE_AUTHENTICATORS.as_str();

    sqlx::query_as::<_, Authenticator>(&format!(
        r#"SELECT {AUTHENTICATOR_COLUMNS} FROM {table_name} WHERE "userId" = $1"#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| AuthenticatorError::Storage(e.to_string()))
}

pub(super) async fn update_authenticator_counter_postgres(
    pool: &Pool<Postgres>,
    credential_id: &str,
    counter: u32,
) -> Result<Option<Authenticator>, AuthenticatorError> {
    let table_name = DB_TABLE_AUTHENTICATORS.as_str();
    let counter = counter_to_db(counter)?;

    sqlx::query_as::<_, Authenticator>(&format!(
        r#"
        UPDATE {table_name} SET counter = $1 WHERE "credentialID" = $2
        RETURNING {AUTHENTICATOR_COLUMNS}
        "#
    ))
    .bind(counter)
    .bind(credential_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AuthenticatorError::Storage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_to_db_bounds() {
        assert_eq!(counter_to_db(0).unwrap(), 0);
        assert_eq!(counter_to_db(i32::MAX as u32).unwrap(), i32::MAX);
        assert!(matches!(
            counter_to_db(i32::MAX as u32 + 1),
            Err(AuthenticatorError::Storage(_))
        ));
    }
}
