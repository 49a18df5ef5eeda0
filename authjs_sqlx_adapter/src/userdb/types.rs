use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A user record as exchanged with the authentication framework
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier, assigned by the adapter on creation
    pub id: String,
    /// Display name
    pub name: Option<String>,
    /// Email address
    pub email: String,
    /// When the email address was verified, if ever
    #[sqlx(rename = "emailVerified")]
    pub email_verified: Option<DateTime<Utc>>,
    /// Avatar URL
    pub image: Option<String>,
}

/// Input for creating a user; the id is always generated by the adapter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub email_verified: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

impl NewUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
            email_verified: None,
            image: None,
        }
    }

    pub(crate) fn into_user(self, id: String) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            email_verified: self.email_verified,
            image: self.image,
        }
    }
}

/// Partial user update
///
/// `None` keeps the stored value. For nullable columns `Some(None)` clears
/// the value, matching an explicit JSON `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub id: String,
    #[serde(
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub email_verified: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Option<String>>,
}

/// A key that is present, even with a `null` value, becomes `Some(..)`
fn present_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UserUpdate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl User {
    /// Overlay the provided fields of `update` on this user
    pub(crate) fn merged_with(self, update: UserUpdate) -> User {
        User {
            id: self.id,
            name: update.name.unwrap_or(self.name),
            email: update.email.unwrap_or(self.email),
            email_verified: update.email_verified.unwrap_or(self.email_verified),
            image: update.image.unwrap_or(self.image),
        }
    }
}

/// Columns a user can be looked up by
#[derive(Debug, Clone)]
pub(crate) enum UserSearchField {
    Id(String),
    Email(String),
}

impl fmt::Display for UserSearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSearchField::Id(id) => write!(f, "Id({id})"),
            UserSearchField::Email(_) => write!(f, "Email(..)"),
        }
    }
}
