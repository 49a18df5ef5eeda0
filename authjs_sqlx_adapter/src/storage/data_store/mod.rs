mod config;
mod types;

pub(crate) use config::DB_TABLE_PREFIX;
pub use config::{DataStoreConfig, StoreType};
pub use types::{DataStore, PostgresDataStore, SqliteDataStore};
