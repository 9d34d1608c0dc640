use log::{debug, error};
use rusqlite::Connection;
use rusqlite::Result;

refinery::embed_migrations!("migrations");

/// Opens the store and applies any pending migrations
pub fn init_connection(db_path: &str) -> Result<Connection> {
    let mut conn = Connection::open(db_path)?;

    match migrations::runner().run(&mut conn) {
        Ok(report) => {
            debug!(
                "Applied {} migration(s) to {}",
                report.applied_migrations().len(),
                db_path
            );
        }
        Err(e) => {
            error!("Migration error on {}: {}", db_path, e);
            return Err(rusqlite::Error::ExecuteReturnedResults);
        }
    }

    Ok(conn)
}
