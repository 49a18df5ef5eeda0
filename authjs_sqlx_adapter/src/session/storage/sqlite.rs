use sqlx::{Pool, Sqlite};

use crate::session::{
    errors::SessionError,
    types::{Session, SessionUserRow},
};
use crate::storage::validate_sqlite_table_schema;
use crate::userdb::DB_TABLE_USERS;

use super::config::DB_TABLE_SESSIONS;

// SQLite implementations

pub(super) async fn validate_session_tables_sqlite(
    pool: &Pool<Sqlite>,
) -> Result<(), SessionError> {
    let sessions_table = DB_TABLE_SESSIONS.as_str();

    validate_sqlite_table_schema(
        pool,
        sessions_table,
        &["id", "userId", "expires", "sessionToken"],
        SessionError::Storage,
    )
    .await
}

pub(super) async fn insert_session_sqlite(
    pool: &Pool<Sqlite>,
    id: &str,
    session: &Session,
) -> Result<Session, SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query_as::<_, Session>(&format!(
        r#"
        INSERT INTO {table_name} (id, "userId", expires, "sessionToken")
        VALUES (?, ?, ?, ?)
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

pub(super) async fn get_session_sqlite(
    pool: &Pool<Sqlite>,
    session_token: &str,
) -> Result<Option<Session>, SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query_as::<_, Session>(&format!(
        r#"SELECT "sessionToken", "userId", expires FROM {table_name} WHERE "sessionToken" = ?"#
    ))
    .bind(session_token)
    .fetch_optional(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))
}

pub(super) async fn get_session_and_user_sqlite(
    pool: &Pool<Sqlite>,
    session_token: &str,
) -> Result<Option<SessionUserRow>, SessionError> {
    let sessions_table = DB_TABLE_SESSIONS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query_as::<_, SessionUserRow>(&format!(
        r#"
        SELECT s."sessionToken", s."userId", s.expires, u.name, u.email, u."emailVerified", u.image
        FROM {sessions_table} s JOIN {users_table} u ON s."userId" = u.id
        WHERE s."sessionToken" = ?
        "#
    ))
    .bind(session_token)
    .fetch_optional(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))
}

pub(super) async fn update_session_sqlite(
    pool: &Pool<Sqlite>,
    session: &Session,
) -> Result<Option<Session>, SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query_as::<_, Session>(&format!(
        r#"
        UPDATE {table_name} SET "userId" = ?, expires = ?
        WHERE "sessionToken" = ?
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

pub(super) async fn delete_session_sqlite(
    pool: &Pool<Sqlite>,
    session_token: &str,
) -> Result<(), SessionError> {
    let table_name = DB_TABLE_SESSIONS.as_str();

    sqlx::query(&format!(
        r#"DELETE FROM {table_name} WHERE "sessionToken" = ?"#
    ))
    .bind(session_token)
    .execute(pool)
    .await
    .map_err(|e| SessionError::Storage(e.to_string()))?;

    Ok(())
}
