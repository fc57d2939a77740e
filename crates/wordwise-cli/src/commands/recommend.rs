use std::path::Path;

use clap::Args;
use wordwise_core::{Config, RecommendationLimits, WordCatalog};

use super::{open_database, CmdResult};

/// Rows shown per list in text output.
const TEXT_PREVIEW: usize = 10;

#[derive(Args)]
pub struct RecommendArgs {
    /// Target efficiency in percent (default: `recommend.target_percentage`)
    #[arg(long)]
    pub target: Option<f64>,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(db: Option<&Path>, args: RecommendArgs) -> CmdResult {
    let config = Config::load_or_default();
    let database = open_database(db, &config)?;
    let catalog = WordCatalog::new(&database);

    let target = args.target.unwrap_or(config.recommend.target_percentage);
    let report =
        catalog.recommendations(target, RecommendationLimits::from(&config.recommend))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Target efficiency: {:.1}%", report.target_efficiency);
    println!();
    println!("Words to avoid ({}):", report.words_to_avoid.len());
    for w in report.words_to_avoid.iter().take(TEXT_PREVIEW) {
        println!("  {:<20} {:<26} {:+.2}", w.word, w.category, w.impact);
    }
    println!();
    println!(
        "Recommended alternatives ({}):",
        report.recommended_alternatives.len()
    );
    for w in report.recommended_alternatives.iter().take(TEXT_PREVIEW) {
        println!("  {:<20} {:<26} {:+.2}", w.word, w.category, w.impact);
    }
    println!();
    println!("Strategy:");
    for hint in &report.strategy {
        println!("  - {hint}");
    }
    Ok(())
}
