use std::path::Path;

use wordwise_core::{AnalysisHistory, Config};

use super::{open_database, percent, CmdResult};

pub fn run(db: Option<&Path>, limit: u32, json: bool) -> CmdResult {
    let config = Config::load_or_default();
    let database = open_database(db, &config)?;
    let history = AnalysisHistory::new(&database);
    let records = history.recent(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No analyses recorded");
        return Ok(());
    }
    for r in &records {
        println!(
            "{}  {:>6}  {} flagged  {}",
            r.timestamp.format("%Y-%m-%d %H:%M:%S"),
            percent(r.efficiency_score),
            r.flagged_words.len(),
            r.query_text
        );
    }
    Ok(())
}
