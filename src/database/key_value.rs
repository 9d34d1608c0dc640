use rusqlite::{Connection, OptionalExtension, Result, params};

/// String key-value store, the local counterpart of browser storage
pub struct KeyValueRepository<'a> {
    conn: &'a Connection,
}

impl<'a> KeyValueRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        KeyValueRepository { conn }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
    }

    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::init_connection;

    fn create_test_db() -> Connection {
        init_connection(":memory:").expect("Failed to create test database")
    }

    #[test]
    fn test_get_missing_key() {
        let conn = create_test_db();
        let repo = KeyValueRepository::new(&conn);
        assert_eq!(repo.get("nothing").unwrap(), None);
    }

    #[test]
    fn test_put_then_overwrite() {
        let conn = create_test_db();
        let repo = KeyValueRepository::new(&conn);

        repo.put("k", "one").unwrap();
        repo.put("k", "two").unwrap();

        assert_eq!(repo.get("k").unwrap().as_deref(), Some("two"));
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let conn = create_test_db();
        let repo = KeyValueRepository::new(&conn);

        repo.put("a", "1").unwrap();
        repo.put("b", "2").unwrap();

        assert_eq!(repo.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(repo.get("b").unwrap().as_deref(), Some("2"));
    }
}
