use crate::cli::Args;
use crate::database::Database;
use log::info;
use rusqlite::Result;

pub const DEFAULT_DB_PATH: &str = "math_drill.db";

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Whether to use in-memory database
    pub is_test_mode: bool,
    /// Custom database file path (ignored if in test mode)
    pub custom_path: Option<String>,
}

impl DatabaseConfig {
    pub fn get_path(&self) -> &str {
        if self.is_test_mode {
            ":memory:"
        } else {
            self.custom_path.as_deref().unwrap_or(DEFAULT_DB_PATH)
        }
    }
}

impl From<&Args> for DatabaseConfig {
    fn from(args: &Args) -> Self {
        DatabaseConfig {
            is_test_mode: args.test,
            custom_path: args
                .db_path
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
        }
    }
}

pub struct DatabaseFactory;

impl DatabaseFactory {
    pub fn create(config: DatabaseConfig) -> Result<Database> {
        let path = config.get_path();
        info!("Opening session store at {}", path);
        Database::new(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(test: bool, db_path: Option<&str>) -> Args {
        Args {
            test,
            db_path: db_path.map(PathBuf::from),
            override_date: None,
            seed: None,
        }
    }

    #[test]
    fn test_default_path() {
        let config = DatabaseConfig::from(&args(false, None));
        assert_eq!(config.get_path(), "math_drill.db");
    }

    #[test]
    fn test_test_mode_path() {
        let config = DatabaseConfig::from(&args(true, None));
        assert_eq!(config.get_path(), ":memory:");
    }

    #[test]
    fn test_custom_path() {
        let config = DatabaseConfig::from(&args(false, Some("custom.db")));
        assert_eq!(config.get_path(), "custom.db");
    }

    #[test]
    fn test_test_mode_ignores_custom_path() {
        let config = DatabaseConfig::from(&args(true, Some("custom.db")));
        assert_eq!(config.get_path(), ":memory:");
    }

    #[test]
    fn test_create_with_memory_database() {
        let db = DatabaseFactory::create(DatabaseConfig::from(&args(true, None)))
            .expect("Failed to create in-memory database");
        assert_eq!(db.count_sessions().unwrap(), 0);
    }
}
