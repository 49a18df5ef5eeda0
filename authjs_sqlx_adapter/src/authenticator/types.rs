use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, postgres::PgRow, sqlite::SqliteRow};

/// A registered WebAuthn credential
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Authenticator {
    /// Base64url credential id issued by the authenticator
    #[serde(rename = "credentialID")]
    pub credential_id: String,
    pub user_id: String,
    pub provider_account_id: String,
    pub credential_public_key: String,
    /// Signature counter, used for clone detection by the caller
    pub counter: u32,
    pub credential_device_type: String,
    pub credential_backed_up: bool,
    /// Comma separated transport hints, e.g. "usb,nfc"
    pub transports: Option<String>,
}

// SQLite stores INTEGER as i64
impl<'r> FromRow<'r, SqliteRow> for Authenticator {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let counter: i64 = row.try_get("counter")?;

        Ok(Authenticator {
            credential_id: row.try_get("credentialID")?,
            user_id: row.try_get("userId")?,
            provider_account_id: row.try_get("providerAccountId")?,
            credential_public_key: row.try_get("credentialPublicKey")?,
            counter: counter_from_db(counter)?,
            credential_device_type: row.try_get("credentialDeviceType")?,
            credential_backed_up: row.try_get("credentialBackedUp")?,
            transports: row.try_get("transports")?,
        })
    }
}

// PostgreSQL INTEGER is i32
impl<'r> FromRow<'r, PgRow> for Authenticator {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let counter: i32 = row.try_get("counter")?;

        Ok(Authenticator {
            credential_id: row.try_get("credentialID")?,
            user_id: row.try_get("userId")?,
            provider_account_id: row.try_get("providerAccountId")?,
            credential_public_key: row.try_get("credentialPublicKey")?,
            counter: counter_from_db(i64::from(counter))?,
            credential_device_type: row.try_get("credentialDeviceType")?,
            credential_backed_up: row.try_get("credentialBackedUp")?,
            transports: row.try_get("transports")?,
        })
    }
}

fn counter_from_db(counter: i64) -> Result<u32, sqlx::Error> {
    u32::try_from(counter).map_err(|e| sqlx::Error::ColumnDecode {
        index: "counter".to_string(),
        source: Box::new(e),
    })
}
