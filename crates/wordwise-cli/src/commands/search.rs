use std::path::Path;

use clap::Args;
use wordwise_core::{Config, WordCatalog, WordQuery};

use super::{open_database, CmdResult};

#[derive(Args)]
pub struct SearchArgs {
    /// Substring to look for
    pub pattern: String,
    /// Restrict to one category
    #[arg(long)]
    pub category: Option<String>,
    /// Only efficient words
    #[arg(long, conflicts_with = "inefficient")]
    pub efficient: bool,
    /// Only inefficient words
    #[arg(long)]
    pub inefficient: bool,
    /// Print JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(db: Option<&Path>, args: SearchArgs) -> CmdResult {
    let config = Config::load_or_default();
    let database = open_database(db, &config)?;
    let catalog = WordCatalog::new(&database);

    let mut query = WordQuery::new(args.pattern);
    if let Some(category) = args.category {
        query = query.category(category);
    }
    if args.efficient {
        query = query.efficient(true);
    } else if args.inefficient {
        query = query.efficient(false);
    }

    let words = catalog.search(&query)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&words)?);
        return Ok(());
    }

    if words.is_empty() {
        println!("No matching words");
        return Ok(());
    }
    for w in &words {
        let flag = if w.is_efficient { "efficient" } else { "inefficient" };
        println!(
            "{:<20} {:<26} {:>+6.2}  {}",
            w.word, w.category, w.efficiency_impact, flag
        );
    }
    println!("{} words", words.len());
    Ok(())
}
