use std::path::Path;

use wordwise_core::{AnalysisHistory, Config, WordCatalog};

use super::{open_database, percent, CmdResult};

pub fn run(db: Option<&Path>, json: bool) -> CmdResult {
    let config = Config::load_or_default();
    let database = open_database(db, &config)?;
    let catalog = WordCatalog::new(&database);
    let stats = catalog.category_stats()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!(
        "{:<26} {:<9} {:>8} {:>7} {:>10}",
        "category", "polarity", "priority", "words", "avg impact"
    );
    for s in &stats {
        let avg = s
            .avg_impact
            .map_or_else(|| "-".to_string(), |a| format!("{a:+.2}"));
        println!(
            "{:<26} {:<9} {:>8} {:>7} {:>10}",
            s.name,
            s.polarity.as_str(),
            s.priority,
            s.word_count,
            avg
        );
    }

    let history = AnalysisHistory::new(&database);
    println!("Total words: {}", catalog.word_count()?);
    println!("Analyses recorded: {}", history.count()?);
    if let Some(avg) = history.average_score()? {
        println!("Average efficiency: {}", percent(avg));
    }
    Ok(())
}
