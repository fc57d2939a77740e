pub mod add;
pub mod analyze;
pub mod config;
pub mod export;
pub mod history;
pub mod import;
pub mod init;
pub mod recommend;
pub mod search;
pub mod stats;

use std::path::Path;

use tracing::debug;
use wordwise_core::{Config, Database};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the database named by `--db`, or the one from the config.
pub fn open_database(
    db: Option<&Path>,
    config: &Config,
) -> Result<Database, Box<dyn std::error::Error>> {
    let path = match db {
        Some(path) => path.to_path_buf(),
        None => config.database_path()?,
    };
    debug!(path = %path.display(), "opening database");
    Ok(Database::open_at(path)?)
}

/// Format a score as a percentage with one decimal.
pub fn percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}
