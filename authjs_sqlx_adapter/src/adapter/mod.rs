mod errors;
mod sql;
mod traits;

pub use errors::AdapterError;
pub use sql::SqlAdapter;
pub use traits::Adapter;
