use crate::session::{
    errors::SessionError,
    types::{Session, SessionAndUser, SessionUpdate},
};
use crate::storage::DataStore;

use super::postgres::*;
use super::sqlite::*;

pub(crate) struct SessionStore;

impl SessionStore {
    pub(crate) async fn validate(store: &dyn DataStore) -> Result<(), SessionError> {
        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => validate_session_tables_sqlite(pool).await,
            (_, Some(pool)) => validate_session_tables_postgres(pool).await,
            _ => Err(SessionError::Storage(
                "Unsupported database type".to_string(),
            )),
        }
    }

    #[tracing::instrument(skip(store, session), fields(user_id = %session.user_id))]
    pub(crate) async fn create_session(
        store: &dyn DataStore,
        session: &Session,
    ) -> Result<Session, SessionError> {
        let id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(expires = %session.expires, "Creating session");

        if let Some(pool) = store.as_sqlite() {
            insert_session_sqlite(pool, &id, session).await
        } else if let Some(pool) = store.as_postgres() {
            insert_session_postgres(pool, &id, session).await
        } else {
            Err(SessionError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    #[tracing::instrument(skip_all)]
    pub(crate) async fn get_session_and_user(
        store: &dyn DataStore,
        session_token: &str,
    ) -> Result<Option<SessionAndUser>, SessionError> {
        let row = if let Some(pool) = store.as_sqlite() {
            get_session_and_user_sqlite(pool, session_token).await
        } else if let Some(pool) = store.as_postgres() {
            get_session_and_user_postgres(pool, session_token).await
        } else {
            Err(SessionError::Storage(
                "Unsupported database type".to_string(),
            ))
        }?;

        tracing::debug!(found = row.is_some(), "Session lookup completed");
        Ok(row.map(SessionAndUser::from))
    }

    /// Merge `update` over the stored session; `None` when the token is unknown
    #[tracing::instrument(skip_all)]
    pub(crate) async fn update_session(
        store: &dyn DataStore,
        update: SessionUpdate,
    ) -> Result<Option<Session>, SessionError> {
        let current = if let Some(pool) = store.as_sqlite() {
            get_session_sqlite(pool, &update.session_token).await
        } else if let Some(pool) = store.as_postgres() {
            get_session_postgres(pool, &update.session_token).await
        } else {
            Err(SessionError::Storage(
                "Unsupported database type".to_string(),
            ))
        }?;

        let Some(current) = current else {
            tracing::debug!("Session to update not found");
            return Ok(None);
        };
        let merged = current.merged_with(update);

        if let Some(pool) = store.as_sqlite() {
            update_session_sqlite(pool, &merged).await
        } else if let Some(pool) = store.as_postgres() {
            update_session_postgres(pool, &merged).await
        } else {
            Err(SessionError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    #[tracing::instrument(skip_all)]
    pub(crate) async fn delete_session(
        store: &dyn DataStore,
        session_token: &str,
    ) -> Result<(), SessionError> {
        if let Some(pool) = store.as_sqlite() {
            delete_session_sqlite(pool, session_token).await
        } else if let Some(pool) = store.as_postgres() {
            delete_session_postgres(pool, session_token).await
        } else {
            Err(SessionError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }
}
