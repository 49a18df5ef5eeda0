mod errors;
mod storage;
mod types;

pub use errors::AccountError;
pub use types::{Account, AccountType};

pub(crate) use storage::{AccountStore, DB_TABLE_ACCOUNTS};
