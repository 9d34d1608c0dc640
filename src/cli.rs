use crate::date_provider::{DateProvider, OverrideDateProvider, SystemDateProvider};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Arithmetic practice: generate problems, type answers, get scored
#[derive(Parser, Debug, Clone)]
#[command(name = "Math Drill")]
#[command(about = "Practice addition, subtraction, multiplication and division", long_about = None)]
#[command(version)]
pub struct Args {
    /// Use in-memory database for testing
    #[arg(long, help = "Use in-memory database for testing")]
    pub test: bool,

    /// Custom database file path
    #[arg(long, value_name = "PATH", help = "Use custom database file path")]
    pub db_path: Option<PathBuf>,

    /// Override current date for testing (YYYY-MM-DD format)
    #[arg(
        long,
        value_name = "DATE",
        help = "Override current date (YYYY-MM-DD format)"
    )]
    pub override_date: Option<String>,

    /// Seed for reproducible problem batches
    #[arg(long, value_name = "SEED", help = "Seed the problem generator")]
    pub seed: Option<u64>,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    pub fn validate_override_date(&self) -> Result<Option<NaiveDate>, String> {
        match &self.override_date {
            Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    format!(
                        "Invalid date format for --override-date: '{}'. Expected YYYY-MM-DD",
                        date_str
                    )
                }),
            None => Ok(None),
        }
    }

    /// Clock for problem ids, banner deadlines and saved-session timestamps
    pub fn date_provider(&self) -> Result<Arc<dyn DateProvider>, String> {
        let provider: Arc<dyn DateProvider> = match self.validate_override_date()? {
            Some(date) => Arc::new(OverrideDateProvider::new(date)),
            None => Arc::new(SystemDateProvider),
        };
        Ok(provider)
    }
}
