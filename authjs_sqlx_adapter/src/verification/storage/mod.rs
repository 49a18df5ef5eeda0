mod config;
mod postgres;
mod sqlite;
mod store_type;

#[cfg(test)]
pub(crate) use config::DB_TABLE_VERIFICATION_TOKENS;
pub(crate) use store_type::VerificationStore;
