mod errors;
mod storage;
mod types;

pub use errors::UserError;
pub use types::{NewUser, User, UserUpdate};

pub(crate) use storage::{DB_TABLE_USERS, UserStore};
