//! Text analysis command.

use std::path::Path;

use clap::Args;
use wordwise_core::{AnalysisHistory, AnalysisResult, Config, EfficiencyScorer, WordCatalog};

use super::{open_database, percent, CmdResult};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Text to analyze
    pub text: String,
    /// List every flagged word with its category and impact
    #[arg(long, short)]
    pub verbose: bool,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(db: Option<&Path>, args: AnalyzeArgs) -> CmdResult {
    let config = Config::load_or_default();
    let database = open_database(db, &config)?;
    let catalog = WordCatalog::new(&database);
    let history = AnalysisHistory::new(&database);

    let mut scorer = EfficiencyScorer::new(&catalog);
    if config.analysis.record_history {
        scorer = scorer.with_log(&history);
    }
    let result = scorer.analyze(&args.text)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result, args.verbose);
    }
    Ok(())
}

fn print_result(result: &AnalysisResult, verbose: bool) {
    println!("Efficiency: {}", percent(result.efficiency_score));
    println!(
        "Words: {} total, {} inefficient",
        result.total_word_count, result.inefficient_word_count
    );

    if verbose && !result.flagged.is_empty() {
        println!("Flagged:");
        for f in &result.flagged {
            println!("  {:<16} {:<24} {:+.2}", f.word, f.category, f.impact);
        }
    }

    if !result.suggestions.is_empty() {
        println!("Suggestions:");
        for s in &result.suggestions {
            println!("  - {s}");
        }
    }
}
