mod errors;
mod storage;
mod types;

pub use errors::SessionError;
pub use types::{Session, SessionAndUser, SessionUpdate};

pub(crate) use storage::{DB_TABLE_SESSIONS, SessionStore};
