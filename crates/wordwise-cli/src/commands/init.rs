use std::path::Path;

use wordwise_core::{Config, SeedData, WordCatalog};

use super::{open_database, CmdResult};

pub fn run(db: Option<&Path>) -> CmdResult {
    let config = Config::load_or_default();
    let database = open_database(db, &config)?;
    let catalog = WordCatalog::new(&database);

    let summary = catalog.initialize(&SeedData::default())?;
    if let Some(path) = database.path() {
        println!("Database: {}", path.display());
    }
    println!(
        "Initialized: {} categories, {} words added ({} words total)",
        summary.categories_added,
        summary.words_added,
        catalog.word_count()?
    );
    Ok(())
}
