//! Data store configuration

use std::{env, str::FromStr, sync::Arc, sync::LazyLock};

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};
use crate::storage::errors::StorageError;

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_default());

/// Backend selected by `GENERIC_DATA_STORE_TYPE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    Sqlite,
    Postgres,
}

impl FromStr for StoreType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(Self::Sqlite),
            "postgres" => Ok(Self::Postgres),
            t => Err(StorageError::Config(format!(
                "Unsupported store type: {t}. Supported types are 'sqlite' and 'postgres'"
            ))),
        }
    }
}

/// Connection settings for the backing database
#[derive(Debug, Clone)]
pub struct DataStoreConfig {
    pub store_type: StoreType,
    pub url: String,
}

impl DataStoreConfig {
    /// Read `GENERIC_DATA_STORE_TYPE` and `GENERIC_DATA_STORE_URL`
    pub fn from_env() -> Result<Self, StorageError> {
        let store_type = env::var("GENERIC_DATA_STORE_TYPE").map_err(|_| {
            StorageError::Config("GENERIC_DATA_STORE_TYPE must be set".to_string())
        })?;
        let url = env::var("GENERIC_DATA_STORE_URL")
            .map_err(|_| StorageError::Config("GENERIC_DATA_STORE_URL must be set".to_string()))?;

        Ok(Self {
            store_type: store_type.parse()?,
            url,
        })
    }

    /// Build a lazily connecting pool for the configured backend
    pub fn connect(&self) -> Result<Arc<dyn DataStore>, StorageError> {
        tracing::info!(
            "Initializing data store with type: {:?}, url: {}",
            self.store_type,
            redact_url(&self.url)
        );

        let store: Arc<dyn DataStore> = match self.store_type {
            StoreType::Sqlite => {
                let opts = SqliteConnectOptions::from_str(&self.url)
                    .map_err(|e| {
                        StorageError::Config(format!("Invalid SQLite connection string: {e}"))
                    })?
                    .create_if_missing(true);

                // Every connection to an in-memory database sees its own database,
                // so keep exactly one connection alive for the pool's lifetime.
                let pool_options = if is_in_memory_sqlite(&self.url) {
                    SqlitePoolOptions::new()
                        .max_connections(1)
                        .idle_timeout(None)
                        .max_lifetime(None)
                } else {
                    SqlitePoolOptions::new()
                };

                Arc::new(SqliteDataStore::new(pool_options.connect_lazy_with(opts)))
            }
            StoreType::Postgres => {
                let pool = PgPoolOptions::new()
                    .connect_lazy(&self.url)
                    .map_err(|e| StorageError::Config(format!("Invalid Postgres URL: {e}")))?;
                Arc::new(PostgresDataStore::new(pool))
            }
        };

        tracing::info!("Data store ready: type={:?}", self.store_type);

        Ok(store)
    }
}

fn is_in_memory_sqlite(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Strip the password component from a connection URL before logging it
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.split_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}
