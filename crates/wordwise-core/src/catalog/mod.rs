//! Categorized word catalog.
//!
//! The catalog owns the `words` and `categories` tables. Words are stored
//! lowercase and are unique; every insert is insert-if-absent so bulk loads
//! can be re-run safely.

mod export;
mod import;
mod seed;

pub use export::{ExportDocument, ExportFormat};
pub use import::{
    extract_words, folder_mapping, DirImportSummary, FolderMapping, ImportSummary,
    FALLBACK_CATEGORY, FALLBACK_IMPACT, FOLDER_MAPPINGS,
};
pub use seed::{SeedData, SeedGroup, DEFAULT_EFFICIENT_IMPACT, DEFAULT_INEFFICIENT_IMPACT};

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use rusqlite::{params, params_from_iter, Row};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, ValidationError};
use crate::scorer::WordSource;
use crate::storage::Database;

/// Max bound parameters per lookup query.
const LOOKUP_CHUNK: usize = 500;

/// Whether a category encourages or discourages its words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Polarity::Positive),
            "negative" => Ok(Polarity::Negative),
            "neutral" => Ok(Polarity::Neutral),
            other => Err(ValidationError::UnknownPolarity(other.to_string())),
        }
    }
}

/// A single catalog word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub efficiency_impact: f64,
    pub is_efficient: bool,
}

/// Category metadata. Drives grouping and reporting only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub description: String,
    pub polarity: Polarity,
    pub priority: i64,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        polarity: Polarity,
        priority: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            polarity,
            priority,
        }
    }
}

/// Per-category aggregate. `avg_impact` is `None` for empty categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub name: String,
    pub description: String,
    pub polarity: Polarity,
    pub priority: i64,
    pub word_count: u64,
    pub avg_impact: Option<f64>,
}

/// Filter for [`WordCatalog::search`].
#[derive(Debug, Clone, Default)]
pub struct WordQuery {
    /// Substring matched anywhere in the word.
    pub pattern: String,
    pub category: Option<String>,
    pub is_efficient: Option<bool>,
}

impl WordQuery {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn efficient(mut self, is_efficient: bool) -> Self {
        self.is_efficient = Some(is_efficient);
        self
    }
}

/// Rows newly inserted by [`WordCatalog::initialize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitSummary {
    pub categories_added: usize,
    pub words_added: usize,
}

/// A word ranked by impact, as listed in recommendation reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedWord {
    pub word: String,
    pub category: String,
    pub impact: f64,
}

fn parse_polarity_fallback(raw: Option<String>) -> Polarity {
    raw.as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or(Polarity::Neutral)
}

fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build a WordEntry from a `word, category, subcategory, efficiency_impact, is_efficient` row
fn row_to_word_entry(row: &Row) -> Result<WordEntry, rusqlite::Error> {
    Ok(WordEntry {
        word: row.get(0)?,
        category: row.get(1)?,
        subcategory: row.get(2)?,
        efficiency_impact: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
        is_efficient: row.get::<_, Option<bool>>(4)?.unwrap_or(true),
    })
}

/// Word catalog backed by a [`Database`].
pub struct WordCatalog<'db> {
    db: &'db Database,
}

impl<'db> WordCatalog<'db> {
    pub fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Load the seed categories and word groups.
    ///
    /// Re-running is harmless: existing categories and words are left as they are.
    ///
    /// # Errors
    /// Returns an error if any insert fails.
    pub fn initialize(&self, seed: &SeedData) -> Result<InitSummary> {
        let categories_added = self.add_categories(&seed.categories)?;
        let mut words_added = 0;
        for group in &seed.groups {
            words_added += self.add_words(
                &group.words,
                &group.category,
                group.is_efficient,
                group.impact,
                None,
            )?;
        }
        info!(categories_added, words_added, "catalog initialized");
        Ok(InitSummary {
            categories_added,
            words_added,
        })
    }

    /// Insert categories that are not already present. Returns how many were added.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn add_categories(&self, categories: &[Category]) -> Result<usize> {
        let tx = self.db.conn().unchecked_transaction()?;
        let mut added = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO categories (name, description, polarity, priority)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for category in categories {
                added += stmt.execute(params![
                    category.name,
                    category.description,
                    category.polarity.as_str(),
                    category.priority,
                ])?;
            }
        }
        tx.commit()?;
        debug!(added, "categories inserted");
        Ok(added)
    }

    /// Insert words into `category`. Returns how many rows were newly added.
    ///
    /// Each word is trimmed and lowercased; blanks are skipped and words that
    /// already exist (in any category) are silently left untouched.
    ///
    /// # Errors
    /// Returns an error if `impact` is not finite or the insert fails.
    pub fn add_words<S: AsRef<str>>(
        &self,
        words: &[S],
        category: &str,
        is_efficient: bool,
        impact: f64,
        subcategory: Option<&str>,
    ) -> Result<usize> {
        if !impact.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: "impact".into(),
                message: format!("{impact} is not a finite number"),
            }
            .into());
        }
        if !(-1.0..=1.0).contains(&impact) {
            warn!(impact, category, "impact outside the conventional [-1, 1] range");
        }

        let tx = self.db.conn().unchecked_transaction()?;
        let mut added = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO words (word, category, subcategory, efficiency_impact, is_efficient)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for word in words {
                let normalized = word.as_ref().trim().to_lowercase();
                if normalized.is_empty() {
                    continue;
                }
                added += stmt.execute(params![
                    normalized,
                    category,
                    subcategory,
                    impact,
                    is_efficient,
                ])?;
            }
        }
        tx.commit()?;
        debug!(added, category, is_efficient, "words inserted");
        Ok(added)
    }

    /// Inefficient entries for the given words, keyed by the stored word.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn lookup(&self, words: &BTreeSet<String>) -> Result<HashMap<String, WordEntry>> {
        let normalized: BTreeSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let candidates: Vec<&String> = normalized.iter().collect();
        let mut found = HashMap::new();

        for chunk in candidates.chunks(LOOKUP_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(",");
            let sql = format!(
                "SELECT word, category, subcategory, efficiency_impact, is_efficient
                 FROM words
                 WHERE word IN ({placeholders}) AND is_efficient = 0"
            );
            let mut stmt = self.db.conn().prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), row_to_word_entry)?;
            for row in rows {
                let entry = row?;
                found.insert(entry.word.clone(), entry);
            }
        }
        Ok(found)
    }

    /// Words containing `query.pattern`, optionally filtered, ordered by word.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn search(&self, query: &WordQuery) -> Result<Vec<WordEntry>> {
        let mut sql = String::from(
            "SELECT word, category, subcategory, efficiency_impact, is_efficient
             FROM words
             WHERE word LIKE ?1 ESCAPE '\\'",
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(format!(
            "%{}%",
            escape_like(&query.pattern.trim().to_lowercase())
        ))];

        if let Some(category) = &query.category {
            params.push(Box::new(category.clone()));
            sql.push_str(&format!(" AND category = ?{}", params.len()));
        }
        if let Some(is_efficient) = query.is_efficient {
            params.push(Box::new(is_efficient));
            sql.push_str(&format!(" AND is_efficient = ?{}", params.len()));
        }
        sql.push_str(" ORDER BY word");

        let mut stmt = self.db.conn().prepare(&sql)?;
        let rows = stmt.query_map(
            params_from_iter(params.iter().map(|p| p.as_ref())),
            row_to_word_entry,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Every word, ordered by category then word.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn all_words(&self) -> Result<Vec<WordEntry>> {
        let mut stmt = self.db.conn().prepare(
            "SELECT word, category, subcategory, efficiency_impact, is_efficient
             FROM words
             ORDER BY category, word",
        )?;
        let rows = stmt.query_map([], row_to_word_entry)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Total number of stored words.
    pub fn word_count(&self) -> Result<u64> {
        let count: i64 = self
            .db
            .conn()
            .query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// All categories, ordered by priority then name.
    pub fn categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self.db.conn().prepare(
            "SELECT name, description, polarity, priority
             FROM categories
             ORDER BY priority, name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                name: row.get(0)?,
                description: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                polarity: parse_polarity_fallback(row.get(2)?),
                priority: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Word counts and mean impact per category.
    ///
    /// Categories without words are included with a zero count.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn category_stats(&self) -> Result<Vec<CategoryStat>> {
        let mut stmt = self.db.conn().prepare(
            "SELECT c.name, c.description, c.polarity, c.priority,
                    COUNT(w.id), AVG(w.efficiency_impact)
             FROM categories c
             LEFT JOIN words w ON c.name = w.category
             GROUP BY c.id
             ORDER BY c.priority, c.name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(CategoryStat {
                name: row.get(0)?,
                description: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                polarity: parse_polarity_fallback(row.get(2)?),
                priority: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                word_count: row.get::<_, i64>(4)? as u64,
                avg_impact: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Words with a given efficiency flag ranked by impact.
    pub(crate) fn ranked_words(
        &self,
        is_efficient: bool,
        ascending: bool,
        limit: u32,
    ) -> Result<Vec<RankedWord>> {
        let order = if ascending { "ASC" } else { "DESC" };
        let sql = format!(
            "SELECT word, category, efficiency_impact
             FROM words
             WHERE is_efficient = ?1
             ORDER BY efficiency_impact {order}, word
             LIMIT ?2"
        );
        let mut stmt = self.db.conn().prepare(&sql)?;
        let rows = stmt.query_map(params![is_efficient, limit], |row| {
            Ok(RankedWord {
                word: row.get(0)?,
                category: row.get(1)?,
                impact: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl WordSource for WordCatalog<'_> {
    fn lookup_inefficient(&self, words: &BTreeSet<String>) -> Result<HashMap<String, WordEntry>> {
        self.lookup(words)
    }
}
