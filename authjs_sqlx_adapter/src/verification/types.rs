use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One-shot token, e.g. for passwordless email sign-in
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct VerificationToken {
    /// Who the token was issued for, usually an email address
    pub identifier: String,
    pub expires: DateTime<Utc>,
    /// The token value, typically stored hashed by the framework
    pub token: String,
}
