mod errors;
mod storage;
mod types;

pub use errors::VerificationError;
pub use types::VerificationToken;

pub(crate) use storage::VerificationStore;

#[cfg(test)]
pub(crate) use storage::DB_TABLE_VERIFICATION_TOKENS;
