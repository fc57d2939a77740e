use std::path::Path;

use clap::Args;
use wordwise_core::catalog::{DEFAULT_EFFICIENT_IMPACT, DEFAULT_INEFFICIENT_IMPACT};
use wordwise_core::{Config, WordCatalog};

use super::{open_database, CmdResult};

#[derive(Args)]
pub struct AddArgs {
    /// Words to add
    #[arg(required = true)]
    pub words: Vec<String>,
    /// Target category
    #[arg(long)]
    pub category: String,
    /// Mark the words as efficient (default: inefficient)
    #[arg(long)]
    pub efficient: bool,
    /// Efficiency impact (default: -0.8, or 0.8 with --efficient)
    #[arg(long, allow_hyphen_values = true)]
    pub impact: Option<f64>,
    /// Optional subcategory
    #[arg(long)]
    pub subcategory: Option<String>,
}

pub fn run(db: Option<&Path>, args: AddArgs) -> CmdResult {
    let config = Config::load_or_default();
    let database = open_database(db, &config)?;
    let catalog = WordCatalog::new(&database);

    let impact = args.impact.unwrap_or(if args.efficient {
        DEFAULT_EFFICIENT_IMPACT
    } else {
        DEFAULT_INEFFICIENT_IMPACT
    });
    let added = catalog.add_words(
        &args.words,
        &args.category,
        args.efficient,
        impact,
        args.subcategory.as_deref(),
    )?;
    println!(
        "Added {added} of {} words to {}",
        args.words.len(),
        args.category
    );
    Ok(())
}
