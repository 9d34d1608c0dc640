use crate::database::StorageError;
use crate::database::key_value::KeyValueRepository;
use crate::session::SessionRecord;
use log::{debug, info};
use rusqlite::Connection;

/// Key under which saved sessions accumulate
pub const SESSIONS_KEY: &str = "mathSessions";

/// Saved practice sessions, stored as one JSON array under [`SESSIONS_KEY`]
pub struct SessionsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SessionsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SessionsRepository { conn }
    }

    /// Appends a record and returns how many sessions are now saved
    pub fn append(&self, record: &SessionRecord) -> Result<usize, StorageError> {
        let tx = self.conn.unchecked_transaction()?;

        let count = {
            let store = KeyValueRepository::new(&tx);
            let mut sessions = Self::decode(store.get(SESSIONS_KEY)?)?;
            sessions.push(serde_json::to_value(record)?);
            store.put(SESSIONS_KEY, &serde_json::to_string(&sessions)?)?;
            sessions.len()
        };

        tx.commit()?;
        info!("Saved session #{} ({} problem(s))", count, record.problems.len());
        Ok(count)
    }

    pub fn list(&self) -> Result<Vec<SessionRecord>, StorageError> {
        let store = KeyValueRepository::new(self.conn);
        let raw = Self::decode(store.get(SESSIONS_KEY)?)?;
        debug!("Loaded {} saved session(s)", raw.len());
        raw.into_iter()
            .map(|value| serde_json::from_value(value).map_err(StorageError::from))
            .collect()
    }

    fn decode(stored: Option<String>) -> Result<Vec<serde_json::Value>, StorageError> {
        match stored {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer_validator::validate;
    use crate::database::connection::init_connection;
    use crate::operations::{Operation, Problem, ProblemId};
    use chrono::{TimeZone, Utc};

    fn record(answer: &str) -> SessionRecord {
        let problem = Problem::new(ProblemId::new("addition-1-1-0"), Operation::Addition, 7, 3).unwrap();
        SessionRecord {
            timestamp: Utc.with_ymd_and_hms(2024, 4, 4, 4, 4, 4).unwrap(),
            answers: [(problem.id.clone(), answer.to_string())].into_iter().collect(),
            problems: vec![problem],
            feedback: Default::default(),
            score_summary: None,
        }
    }

    #[test]
    fn test_append_accumulates_records() {
        let conn = init_connection(":memory:").unwrap();
        let repo = SessionsRepository::new(&conn);

        assert_eq!(repo.append(&record("10")).unwrap(), 1);
        assert_eq!(repo.append(&record("11")).unwrap(), 2);

        let saved = repo.list().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0], record("10"));
        assert_eq!(saved[1], record("11"));
    }

    #[test]
    fn test_list_empty_store() {
        let conn = init_connection(":memory:").unwrap();
        let repo = SessionsRepository::new(&conn);
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_store_is_reported_and_left_untouched() {
        let conn = init_connection(":memory:").unwrap();
        KeyValueRepository::new(&conn)
            .put(SESSIONS_KEY, "not json")
            .unwrap();

        let repo = SessionsRepository::new(&conn);
        let err = repo.append(&record("10")).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));

        let stored = KeyValueRepository::new(&conn).get(SESSIONS_KEY).unwrap();
        assert_eq!(stored.as_deref(), Some("not json"));
    }

    #[test]
    fn test_records_use_camel_case_fields() {
        let conn = init_connection(":memory:").unwrap();
        let mut scored = record("10");
        let validation = validate(&scored.problems, &scored.answers).unwrap();
        scored.feedback = validation.feedback;
        scored.score_summary = Some(validation.summary);
        SessionsRepository::new(&conn).append(&scored).unwrap();

        let stored = KeyValueRepository::new(&conn)
            .get(SESSIONS_KEY)
            .unwrap()
            .unwrap();
        assert!(stored.contains("\"scoreSummary\":{"));
        assert!(stored.contains("\"expectedAnswer\":10"));
        assert!(!stored.contains('_'), "snake_case key in {}", stored);
        assert_eq!(SessionsRepository::new(&conn).list().unwrap(), vec![scored]);
    }
}
