use std::{env, sync::LazyLock};

use crate::storage::DB_TABLE_PREFIX;

/// Verification tokens table name
pub(crate) static DB_TABLE_VERIFICATION_TOKENS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_VERIFICATION_TOKENS")
        .unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "verification_token"))
});
