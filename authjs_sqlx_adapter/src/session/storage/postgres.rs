use sqlx::{Pool, Postgres};

use crate::session::{
    errors::SessionError,
    types::{Session, SessionUserRow},
};
use crate::storage::{PG_TEXT, PG_TIMESTAMP, validate_postgres_table_schema};
use crate::userdb::DB_TABLE_USERS;

use super::config::DB_TABLE_SESSIONS;

// PostgreSQL implementations

pub(super) async fn validate_session_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), SessionError> {
    let sessions_table = DB_TABLE_SESSIONS.as_str();

    // Define expected schema (column name, accepted data types)
    let expected_columns = [
        ("id", PG_TEXT),
        ("userId", PG_TEXT),
        ("expires", PG_TIMESTAMP),
        ("sessionToken", PG_TEXT),
    ];

    validate_postgres_table_schema(
        pool,
        sessions_table,
        &expected_columns,
        SessionError::Storage,
    )
    .await
}

pub(super) async fn insert_session_postgres(
    pool: &Pool<Postgres>,
    id: &str,
    session: &Session,
) -> Result<Session, SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query_as::<_, Session>(&format!(
        r#"
        INSERT INTO {table_name} (id, "userId", expires, "sessionToken")
        VALUES ($1, $2, $3, $4)
        RETURNING "sessionToken", "userId", expires
        "#
    ))
    .bind(id)
    .bind(&session.user_id)
    .bind(session.expires)
    .bind(&session.session_token)
    .fetch_one(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))
}

pub(super) async fn get_session_postgres(
    pool: &Pool<Postgres>,
    session_token: &str,
) -> Result<Option<Session>, SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query_as::<_, Session>(&format!(
        r#"SELECT "sessionToken", "userId", expires FROM {table_name} WHERE "sessionToken" = $1"#
    ))
    .bind(session_token)
    .fetch_optional(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))
}

pub(super) async fn get_session_and_user_postgres(
    pool: &Pool<Postgres>,
    session_token: &str,
) -> Result<Option<SessionUserRow>, SessionError> {
    let sessions_table = DB_TABLE_SESSIONS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, SessionUserRow>(&format!(
        r#"
        SELECT s."sessionToken", s."userId", s.expires, u.name, u.email, u."emailVerified", u.image
        FROM {sessions_table} s JOIN {users_table} u ON s."userId" = u.id
        WHERE s."sessionToken" = $1
        "#
    ))
    .bind(session_token)
    .fetch_optional(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))
}

pub(super) async fn update_session_postgres(
    pool: &Pool<Postgres>,
    session: &Session,
) -> Result<Option<Session>, SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query_as::<_, Session>(&format!(
        r#"
        UPDATE {table_name} SET "userId" = $1, expires = $2
        WHERE "sessionToken" = $3
        RETURNING "sessionToken", "userId", expires
        "#
    ))
    .bind(&session.user_id)
    .bind(session.expires)
    .bind(&session.session_token)
    .fetch_optional(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))
}

pub(super) async fn delete_session_postgres(
    pool: &Pool<Postgres>,
    session_token: &str,
) -> Result<(), SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query(&format!(
        r#"DELETE FROM {table_name} WHERE "sessionToken" = $1"#
    ))
    .bind(session_token)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(())
}
