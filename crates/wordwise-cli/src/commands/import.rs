use std::path::{Path, PathBuf};

use clap::Args;
use tracing::debug;
use wordwise_core::catalog::{DEFAULT_EFFICIENT_IMPACT, DEFAULT_INEFFICIENT_IMPACT};
use wordwise_core::{Config, WordCatalog};

use super::{open_database, CmdResult};

#[derive(Args)]
pub struct ImportArgs {
    /// Plain-text or RTF word list, or a folder tree of word lists
    pub path: PathBuf,
    /// Target category (required for a single file)
    #[arg(long)]
    pub category: Option<String>,
    /// Efficiency impact (default: -0.8, or 0.8 with --efficient)
    #[arg(long, allow_hyphen_values = true)]
    pub impact: Option<f64>,
    /// Mark the words as efficient (default: inefficient)
    #[arg(long)]
    pub efficient: bool,
}

pub fn run(db: Option<&Path>, args: ImportArgs) -> CmdResult {
    if args.path.is_dir() && (args.category.is_some() || args.impact.is_some() || args.efficient) {
        return Err("--category, --impact and --efficient apply to single files; \
                    folder imports take them from the folder names"
            .into());
    }

    let config = Config::load_or_default();
    let database = open_database(db, &config)?;
    let catalog = WordCatalog::new(&database);

    if args.path.is_dir() {
        debug!(path = %args.path.display(), "importing word-list folder");
        let summary = catalog.import_dir(&args.path)?;
        println!(
            "Read {} files from {}, found {} words, added {}",
            summary.files_read,
            args.path.display(),
            summary.words_found,
            summary.words_added
        );
        if summary.files_skipped > 0 {
            println!("Skipped {} unreadable files", summary.files_skipped);
        }
        for category in &summary.categories {
            println!("  {category}");
        }
        return Ok(());
    }

    let category = args
        .category
        .ok_or("--category is required when importing a single file")?;
    let impact = args.impact.unwrap_or(if args.efficient {
        DEFAULT_EFFICIENT_IMPACT
    } else {
        DEFAULT_INEFFICIENT_IMPACT
    });
    let summary = catalog.import_file(&args.path, &category, args.efficient, impact)?;
    println!(
        "Found {} words in {}, added {} to {}",
        summary.words_found,
        args.path.display(),
        summary.words_added,
        category
    );
    Ok(())
}
