#![forbid(unsafe_code)]

pub mod repository;
pub mod session_store;
pub mod sqlite;

pub use repository::{InMemoryStore, KvStore, StorageError};
pub use session_store::SessionStore;
pub use sqlite::{SqliteInitError, SqliteStore};
