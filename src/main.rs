use math_drill::cli::Args;
use math_drill::database_factory::{DatabaseConfig, DatabaseFactory};
use math_drill::gui;
use math_drill::random_source::RngSource;
use math_drill::session::PracticeSession;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse_args();

    let date_provider = args.date_provider()?;
    let db = Arc::new(DatabaseFactory::create(DatabaseConfig::from(&args))?);
    let session = PracticeSession::new(RngSource::from_optional_seed(args.seed), date_provider);

    gui::run_app(db, session)?;

    Ok(())
}
