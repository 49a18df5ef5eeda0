mod data_store;
mod errors;
mod schema_validation;

pub use data_store::{DataStore, DataStoreConfig, PostgresDataStore, SqliteDataStore, StoreType};
pub use errors::StorageError;

pub(crate) use data_store::DB_TABLE_PREFIX;
pub(crate) use schema_validation::{
    PG_BIGINT, PG_BOOLEAN, PG_INTEGER, PG_TEXT, PG_TIMESTAMP, validate_postgres_table_schema,
    validate_sqlite_table_schema,
};
