//! # Wordwise Core Library
//!
//! This library scores how precisely a piece of text is worded. It keeps a
//! categorized catalog of efficient and inefficient words in SQLite and rates
//! text by how many distinct inefficient words it contains. The `wordwise`
//! CLI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Catalog**: categorized word list with seed data, search, statistics,
//!   CSV/JSON export and word-list import
//! - **Scorer**: tokenizer, score formula and suggestion table
//! - **History**: append-only log of analysis results
//! - **Storage**: SQLite database with versioned migrations and TOML configuration
//!
//! ## Key Components
//!
//! - [`WordCatalog`]: word and category persistence
//! - [`EfficiencyScorer`]: text analysis over a [`WordSource`]
//! - [`AnalysisHistory`]: [`AnalysisLog`] backed by the database
//! - [`Database`]: explicit connection handle shared by the components
//! - [`Config`]: application configuration management

pub mod catalog;
pub mod error;
pub mod history;
pub mod recommend;
pub mod scorer;
pub mod storage;

pub use catalog::{
    Category, CategoryStat, DirImportSummary, ExportFormat, ImportSummary, InitSummary, Polarity,
    RankedWord, SeedData, WordCatalog, WordEntry, WordQuery,
};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use history::{AnalysisHistory, AnalysisLog, AnalysisRecord};
pub use recommend::{RecommendationLimits, Recommendations};
pub use scorer::{AnalysisResult, EfficiencyScorer, FlaggedWord, WordSource};
pub use storage::{Config, Database};
