//! Bulk import of word lists from plain-text or RTF files.
//!
//! Single files go into a caller-chosen category. Folder trees are imported
//! with [`WordCatalog::import_dir`], where the top-level folder of each file
//! picks the category and impact from [`FOLDER_MAPPINGS`].

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::{Category, Polarity, WordCatalog};
use crate::error::Result;

static RTF_CONTROL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+\d*\s?").expect("valid regex literal"));
static RTF_BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[{}]").expect("valid regex literal"));
static DIGITS_AND_SEMICOLONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;\d]+").expect("valid regex literal"));
static ALPHA_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z]+\b").expect("valid regex literal"));

/// Tokens left behind by RTF headers (font tables, colour tables, layout).
const RTF_ARTIFACTS: &[&str] = &[
    "rtf", "ansi", "ansicpg", "cocoartf", "fonttbl", "colortbl", "expandedcolortbl", "margl",
    "margr", "vieww", "viewh", "viewkind", "deftab", "pard", "pardeftab", "partightenfactor",
    "expnd", "expndtw", "kerning", "outl", "strokewidth", "strokec", "cf", "froman", "fcharset",
    "times", "roman", "red", "green", "blue", "cssrgb", "fs",
];

/// File extensions picked up by [`WordCatalog::import_dir`].
const WORD_LIST_EXTENSIONS: &[&str] = &["rtf", "txt"];

/// Category used for folders missing from [`FOLDER_MAPPINGS`].
pub const FALLBACK_CATEGORY: &str = "general_inefficient";
pub const FALLBACK_IMPACT: f64 = -0.5;

/// Priority given to categories created by a folder import.
const IMPORTED_CATEGORY_PRIORITY: i64 = 3;

/// How a top-level word-list folder maps onto the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FolderMapping {
    pub folder: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub impact: f64,
}

const fn mapping(
    folder: &'static str,
    category: &'static str,
    description: &'static str,
    impact: f64,
) -> FolderMapping {
    FolderMapping {
        folder,
        category,
        description,
        impact,
    }
}

pub const FOLDER_MAPPINGS: &[FolderMapping] = &[
    mapping("0-words", "general_inefficient", "General inefficient words", -0.7),
    mapping("1-context-dependent-terms", "context_dependent", "Context-dependent high-frequency verbs", -0.8),
    mapping("2-ambiguous-pronouns-references", "ambiguous_pronouns", "Ambiguous pronouns and references", -0.6),
    mapping("3-vague-quantifiers", "vague_quantifiers", "Vague quantity descriptors", -0.8),
    mapping("4-subjective-qualifiers", "subjective_qualifiers", "Opinion-based descriptors", -0.7),
    mapping("5-temporal-ambiguity", "temporal_ambiguity", "Unclear time references", -0.7),
    mapping("6-modal-uncertainty", "modal_uncertainty", "Uncertainty and modal expressions", -0.6),
    mapping("7-hedge-words-uncertainty-markers", "hedge_words", "Hedge words and uncertainty markers", -0.6),
    mapping("ambiguous-polysemous", "ambiguous_polysemous", "Words with multiple meanings", -0.8),
    mapping("domain-specific-jargon", "domain_jargon", "Domain-specific unclear jargon", -0.5),
    mapping("homonyms-homophones", "homonyms_homophones", "Sound-alike confusing words", -0.7),
    mapping("idiomatic-expressions", "idiomatic", "Non-literal expressions", -0.6),
    mapping("negation-iIntensifiers", "negation_intensifiers", "Negation and intensifier words", -0.5),
    mapping("sarcasm-irony-markers", "sarcasm_irony", "Sarcasm and irony markers", -0.8),
    mapping("temporal-conditional-language", "temporal_conditional", "Conditional temporal language", -0.7),
];

/// Mapping for `folder`, if it is a known word-list folder.
pub fn folder_mapping(folder: &str) -> Option<&'static FolderMapping> {
    FOLDER_MAPPINGS.iter().find(|m| m.folder == folder)
}

/// Outcome of [`WordCatalog::import_file`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub words_found: usize,
    pub words_added: usize,
}

/// Outcome of [`WordCatalog::import_dir`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirImportSummary {
    pub files_read: usize,
    /// Files that could not be read; each is logged and skipped.
    pub files_skipped: usize,
    pub words_found: usize,
    pub words_added: usize,
    /// Categories that received words, sorted.
    pub categories: Vec<String>,
}

/// Extract distinct lowercase alphabetic words (two letters or more), sorted.
///
/// RTF control words, braces, digits and header artifacts are removed first,
/// whether or not the content is an RTF document.
pub fn extract_words(content: &str) -> Vec<String> {
    let stripped = RTF_CONTROL.replace_all(content, "");
    let stripped = RTF_BRACES.replace_all(&stripped, "");
    let cleaned = DIGITS_AND_SEMICOLONS.replace_all(&stripped, "");

    ALPHA_WORD
        .find_iter(&cleaned)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| w.len() > 1 && !RTF_ARTIFACTS.contains(&w.as_str()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn read_word_list(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    Ok(extract_words(&String::from_utf8_lossy(&bytes)))
}

fn is_word_list(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| WORD_LIST_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

impl WordCatalog<'_> {
    /// Read a word-list file and add its words to `category`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the insert fails.
    pub fn import_file(
        &self,
        path: impl AsRef<Path>,
        category: &str,
        is_efficient: bool,
        impact: f64,
    ) -> Result<ImportSummary> {
        let path = path.as_ref();
        let words = read_word_list(path)?;
        let words_added = self.add_words(&words, category, is_efficient, impact, None)?;
        info!(
            path = %path.display(),
            category,
            found = words.len(),
            added = words_added,
            "word list imported"
        );
        Ok(ImportSummary {
            words_found: words.len(),
            words_added,
        })
    }

    /// Import every `.rtf`/`.txt` file under `root` as inefficient words.
    ///
    /// The first path component below `root` selects the category and impact
    /// through [`FOLDER_MAPPINGS`]; anything else lands in
    /// [`FALLBACK_CATEGORY`] with [`FALLBACK_IMPACT`]. Missing categories are
    /// created. Unreadable files are logged and skipped.
    ///
    /// # Errors
    /// Returns an error if `root` is not a directory or an insert fails.
    pub fn import_dir(&self, root: impl AsRef<Path>) -> Result<DirImportSummary> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("word-list folder not found: {}", root.display()),
            )
            .into());
        }

        let mut summary = DirImportSummary::default();
        let mut categories = BTreeSet::new();

        let entries = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable folder entry");
                    None
                }
            });

        for entry in entries {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_word_list(path) {
                continue;
            }

            let folder = path
                .strip_prefix(root)
                .ok()
                .and_then(|rel| rel.components().next())
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .unwrap_or_default();
            let (category, description, impact) = match folder_mapping(&folder) {
                Some(m) => (m.category, m.description.to_string(), m.impact),
                None => (
                    FALLBACK_CATEGORY,
                    format!("Words from {folder}"),
                    FALLBACK_IMPACT,
                ),
            };

            let words = match read_word_list(path) {
                Ok(words) => words,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable word list");
                    summary.files_skipped += 1;
                    continue;
                }
            };
            summary.files_read += 1;
            if words.is_empty() {
                debug!(path = %path.display(), "no words extracted");
                continue;
            }

            self.add_categories(&[Category::new(
                category,
                description,
                Polarity::Negative,
                IMPORTED_CATEGORY_PRIORITY,
            )])?;
            let added = self.add_words(&words, category, false, impact, None)?;
            debug!(path = %path.display(), category, found = words.len(), added, "word list loaded");

            summary.words_found += words.len();
            summary.words_added += added;
            categories.insert(category.to_string());
        }

        summary.categories = categories.into_iter().collect();
        info!(
            root = %root.display(),
            files = summary.files_read,
            added = summary.words_added,
            "word-list folder imported"
        );
        Ok(summary)
    }
}
