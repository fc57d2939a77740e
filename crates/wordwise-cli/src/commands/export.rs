use std::path::{Path, PathBuf};

use clap::Args;
use wordwise_core::{Config, ExportFormat, WordCatalog};

use super::{open_database, CmdResult};

#[derive(Args)]
pub struct ExportArgs {
    /// Output format: csv or json
    pub format: String,
    /// Output file or directory (default: `export.directory`, then the current directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(db: Option<&Path>, args: ExportArgs) -> CmdResult {
    let format: ExportFormat = args.format.parse()?;
    let config = Config::load_or_default();
    let database = open_database(db, &config)?;
    let catalog = WordCatalog::new(&database);

    let output = match args.output {
        Some(path) => Some(path),
        None => match config.export_dir() {
            Some(dir) => {
                // must exist so the export lands inside it with a generated name
                std::fs::create_dir_all(&dir)?;
                Some(dir)
            }
            None => None,
        },
    };
    let path = catalog.export(format, output.as_deref())?;
    println!("Exported {} words to {}", catalog.word_count()?, path.display());
    Ok(())
}
