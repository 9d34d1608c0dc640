pub mod connection;
pub mod key_value;
pub mod sessions;

use crate::session::SessionRecord;
use rusqlite::{Connection, Result};
use thiserror::Error;

pub use key_value::KeyValueRepository;
pub use sessions::{SESSIONS_KEY, SessionsRepository};

/// Failures of the session store. None of them touch in-memory session state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Main Database struct providing access to all repositories
pub struct Database {
    pub conn: Connection,
}

impl Database {
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = connection::init_connection(db_path)?;
        Ok(Database { conn })
    }

    // ===== Key-Value Store Access =====

    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        KeyValueRepository::new(&self.conn).get(key)
    }

    pub fn put_value(&self, key: &str, value: &str) -> Result<()> {
        KeyValueRepository::new(&self.conn).put(key, value)
    }

    // ===== Sessions Repository Access =====

    pub fn save_session(&self, record: &SessionRecord) -> std::result::Result<usize, StorageError> {
        SessionsRepository::new(&self.conn).append(record)
    }

    pub fn list_sessions(&self) -> std::result::Result<Vec<SessionRecord>, StorageError> {
        SessionsRepository::new(&self.conn).list()
    }

    pub fn count_sessions(&self) -> std::result::Result<usize, StorageError> {
        Ok(self.list_sessions()?.len())
    }
}
