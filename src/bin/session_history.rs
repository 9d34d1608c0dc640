use clap::Parser;
use math_drill::database::Database;
use math_drill::report::format_session;

/// Prints every saved practice session
#[derive(Parser, Debug)]
#[command(name = "session_history")]
#[command(about = "List saved math drill sessions", long_about = None)]
struct HistoryArgs {
    /// Path to the SQLite database file
    database_file: String,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    env_logger::init();
    let args = HistoryArgs::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let db = match Database::new(&args.database_file) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            std::process::exit(1);
        }
    };

    let sessions = match db.list_sessions() {
        Ok(sessions) => sessions,
        Err(e) => {
            eprintln!("Error reading saved sessions: {}", e);
            std::process::exit(1);
        }
    };

    if sessions.is_empty() {
        println!("No saved sessions found in the database.");
        return;
    }

    println!("Saved Sessions ({})", sessions.len());
    println!("==================");
    println!();

    for (index, record) in sessions.iter().enumerate() {
        println!("{}", format_session(index, record));
        println!();
    }
}
