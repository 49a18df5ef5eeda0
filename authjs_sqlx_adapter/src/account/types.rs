use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::errors::AccountError;

/// How the account authenticates against its provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Oauth,
    Oidc,
    Email,
    Webauthn,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Oauth => "oauth",
            AccountType::Oidc => "oidc",
            AccountType::Email => "email",
            AccountType::Webauthn => "webauthn",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oauth" => Ok(AccountType::Oauth),
            "oidc" => Ok(AccountType::Oidc),
            "email" => Ok(AccountType::Email),
            "webauthn" => Ok(AccountType::Webauthn),
            other => Err(AccountError::InvalidType(other.to_string())),
        }
    }
}

impl TryFrom<String> for AccountType {
    type Error = AccountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A provider account linked to a user
///
/// Token fields keep the provider's snake_case names, as the framework does.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Account {
    #[serde(rename = "userId")]
    #[sqlx(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type", try_from = "String")]
    pub account_type: AccountType,
    pub provider: String,
    #[serde(rename = "providerAccountId")]
    #[sqlx(rename = "providerAccountId")]
    pub provider_account_id: String,
    pub refresh_token: Option<String>,
    pub access_token: Option<String>,
    /// Access token expiry in seconds since the epoch
    pub expires_at: Option<i64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub id_token: Option<String>,
    pub session_state: Option<String>,
}

impl Account {
    pub fn new(
        user_id: impl Into<String>,
        account_type: AccountType,
        provider: impl Into<String>,
        provider_account_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            account_type,
            provider: provider.into(),
            provider_account_id: provider_account_id.into(),
            refresh_token: None,
            access_token: None,
            expires_at: None,
            token_type: None,
            scope: None,
            id_token: None,
            session_state: None,
        }
    }
}
