use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::userdb::User;

/// A database session as exchanged with the authentication framework
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[sqlx(rename = "sessionToken")]
    pub session_token: String,
    #[sqlx(rename = "userId")]
    pub user_id: String,
    pub expires: DateTime<Utc>,
}

/// Partial session update keyed by the session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    pub session_token: String,
    pub user_id: Option<String>,
    pub expires: Option<DateTime<Utc>>,
}

impl SessionUpdate {
    pub fn new(session_token: impl Into<String>) -> Self {
        Self {
            session_token: session_token.into(),
            user_id: None,
            expires: None,
        }
    }
}

impl Session {
    pub(crate) fn merged_with(self, update: SessionUpdate) -> Session {
        Session {
            session_token: self.session_token,
            user_id: update.user_id.unwrap_or(self.user_id),
            expires: update.expires.unwrap_or(self.expires),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionAndUser {
    pub session: Session,
    pub user: User,
}

/// Flat row of the sessions/users join
#[derive(Debug, FromRow)]
pub(crate) struct SessionUserRow {
    #[sqlx(rename = "sessionToken")]
    session_token: String,
    #[sqlx(rename = "userId")]
    user_id: String,
    expires: DateTime<Utc>,
    name: Option<String>,
    email: String,
    #[sqlx(rename = "emailVerified")]
    email_verified: Option<DateTime<Utc>>,
    image: Option<String>,
}

impl From<SessionUserRow> for SessionAndUser {
    fn from(row: SessionUserRow) -> Self {
        SessionAndUser {
            user: User {
                id: row.user_id.clone(),
                name: row.name,
                email: row.email,
                email_verified: row.email_verified,
                image: row.image,
            },
            session: Session {
                session_token: row.session_token,
                user_id: row.user_id,
                expires: row.expires,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn stored_session() -> Session {
        Session {
            session_token: "tok".to_string(),
            user_id: "user-1".to_string(),
            expires: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_merge_extends_expiry_only() {
        let later = stored_session().expires + Duration::days(30);
        let update = SessionUpdate {
            expires: Some(later),
            ..SessionUpdate::new("tok")
        };

        let merged = stored_session().merged_with(update);

        assert_eq!(merged.session_token, "tok");
        assert_eq!(merged.user_id, "user-1");
        assert_eq!(merged.expires, later);
    }

    #[test]
    fn test_merge_keeps_token_of_stored_session() {
        let update = SessionUpdate {
            user_id: Some("user-2".to_string()),
            ..SessionUpdate::new("other-token")
        };

        let merged = stored_session().merged_with(update);

        assert_eq!(merged.session_token, "tok");
        assert_eq!(merged.user_id, "user-2");
    }

    #[test]
    fn test_join_row_splits_into_session_and_user() {
        // Given a flat join row
        let row = SessionUserRow {
            session_token: "tok".to_string(),
            user_id: "user-1".to_string(),
            expires: stored_session().expires,
            name: Some("Alice".to_string()),
            email: "alice@example.com".to_string(),
            email_verified: None,
            image: None,
        };

        // When converting it
        let SessionAndUser { session, user } = row.into();

        // Then the user id is shared between both halves
        assert_eq!(session, stored_session());
        assert_eq!(user.id, "user-1");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let json = serde_json::to_value(stored_session()).expect("serialize session");

        assert_eq!(json["sessionToken"], "tok");
        assert_eq!(json["userId"], "user-1");
    }
}
