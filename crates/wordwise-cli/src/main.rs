use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "wordwise", version, about = "Word efficiency analyzer")]
struct Cli {
    /// Database file (overrides `database.path` from the config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database and load the default word lists
    Init,
    /// Score a piece of text
    Analyze(commands::analyze::AnalyzeArgs),
    /// Search the word catalog
    Search(commands::search::SearchArgs),
    /// Per-category statistics
    Stats {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Export the word catalog
    Export(commands::export::ExportArgs),
    /// Words to avoid and efficient alternatives
    Recommend(commands::recommend::RecommendArgs),
    /// Add words to a category
    Add(commands::add::AddArgs),
    /// Import a word-list file, or a folder tree of word lists
    Import(commands::import::ImportArgs),
    /// Recently recorded analyses
    History {
        /// Number of records to show
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let db = cli.db.as_deref();
    let result = match cli.command {
        Commands::Init => commands::init::run(db),
        Commands::Analyze(args) => commands::analyze::run(db, args),
        Commands::Search(args) => commands::search::run(db, args),
        Commands::Stats { json } => commands::stats::run(db, json),
        Commands::Export(args) => commands::export::run(db, args),
        Commands::Recommend(args) => commands::recommend::run(db, args),
        Commands::Add(args) => commands::add::run(db, args),
        Commands::Import(args) => commands::import::run(db, args),
        Commands::History { limit, json } => commands::history::run(db, limit, json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
