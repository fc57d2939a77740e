//! Word-efficiency scoring engine.
//!
//! Text is split into lowercase word tokens, the distinct tokens are matched
//! against the inefficient words of a [`WordSource`], and the result is
//! summarized as a score in `[0, 1]`:
//!
//! ```text
//! score = max(0, 1 - distinct_inefficient_matches / total_tokens)
//! ```
//!
//! Empty input scores `1.0`. Each flagged category with an entry in the
//! suggestion table contributes one suggestion.

mod suggestions;

pub use suggestions::{strategy_hints, suggestion_for, SuggestionRule, SUGGESTION_RULES};

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::WordEntry;
use crate::error::Result;
use crate::history::{AnalysisLog, AnalysisRecord};

static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid regex literal"));

/// Source of inefficient word entries.
pub trait WordSource {
    /// Entries with `is_efficient == false` among `words`, keyed by word.
    fn lookup_inefficient(&self, words: &BTreeSet<String>) -> Result<HashMap<String, WordEntry>>;
}

/// A token that matched an inefficient catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FlaggedWordRepr")]
pub struct FlaggedWord {
    pub word: String,
    pub category: String,
    pub impact: f64,
}

/// Accepts both `{word, category, impact}` objects and the
/// `[word, category, impact]` triples found in older history rows.
#[derive(Deserialize)]
#[serde(untagged)]
enum FlaggedWordRepr {
    Object {
        word: String,
        category: String,
        impact: f64,
    },
    Triple(String, String, f64),
}

impl From<FlaggedWordRepr> for FlaggedWord {
    fn from(repr: FlaggedWordRepr) -> Self {
        match repr {
            FlaggedWordRepr::Object {
                word,
                category,
                impact,
            }
            | FlaggedWordRepr::Triple(word, category, impact) => Self {
                word,
                category,
                impact,
            },
        }
    }
}

/// Outcome of [`EfficiencyScorer::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub total_word_count: usize,
    pub inefficient_word_count: usize,
    pub flagged: Vec<FlaggedWord>,
    pub efficiency_score: f64,
    pub efficiency_percentage: f64,
    pub suggestions: Vec<String>,
}

/// Split text into lowercase word tokens, in order, repeats included.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// `max(0, 1 - inefficient / total)`, or `1.0` when there are no tokens.
pub fn efficiency_score(total: usize, inefficient: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (1.0 - inefficient as f64 / total as f64).max(0.0)
}

/// One suggestion per distinct category, in first-flagged order.
fn suggestions_for(flagged: &[FlaggedWord]) -> Vec<String> {
    let mut seen = HashSet::new();
    flagged
        .iter()
        .filter(|f| seen.insert(f.category.as_str()))
        .filter_map(|f| suggestion_for(&f.category))
        .map(str::to_string)
        .collect()
}

/// Scores text against a [`WordSource`] and optionally records each analysis.
pub struct EfficiencyScorer<'a> {
    words: &'a dyn WordSource,
    log: Option<&'a dyn AnalysisLog>,
}

impl<'a> EfficiencyScorer<'a> {
    pub fn new(words: &'a dyn WordSource) -> Self {
        Self { words, log: None }
    }

    /// Append every result to `log`.
    pub fn with_log(mut self, log: &'a dyn AnalysisLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Score `text`.
    ///
    /// Any string is accepted. Failing to record the result is logged and
    /// does not affect the returned value.
    ///
    /// # Errors
    /// Returns an error only if the word lookup fails.
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let tokens = tokenize(text);
        let distinct: BTreeSet<String> = tokens.iter().cloned().collect();
        let matches = if distinct.is_empty() {
            HashMap::new()
        } else {
            self.words.lookup_inefficient(&distinct)?
        };

        let mut seen = HashSet::new();
        let flagged: Vec<FlaggedWord> = tokens
            .iter()
            .filter_map(|token| matches.get(token))
            .filter(|entry| seen.insert(entry.word.as_str()))
            .map(|entry| FlaggedWord {
                word: entry.word.clone(),
                category: entry.category.clone(),
                impact: entry.efficiency_impact,
            })
            .collect();

        let score = efficiency_score(tokens.len(), flagged.len());
        let result = AnalysisResult {
            text: text.to_string(),
            total_word_count: tokens.len(),
            inefficient_word_count: flagged.len(),
            suggestions: suggestions_for(&flagged),
            flagged,
            efficiency_score: score,
            efficiency_percentage: score * 100.0,
        };
        debug!(
            total = result.total_word_count,
            flagged = result.inefficient_word_count,
            score = result.efficiency_score,
            "text analyzed"
        );

        if let Some(log) = self.log {
            if let Err(e) = log.append(&AnalysisRecord::from_result(&result)) {
                warn!(error = %e, "failed to record analysis");
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, DatabaseError};
    use proptest::prelude::*;
    use std::cell::RefCell;

    struct MapSource(HashMap<String, WordEntry>);

    impl MapSource {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(word, category)| {
                        (
                            word.to_string(),
                            WordEntry {
                                word: word.to_string(),
                                category: category.to_string(),
                                subcategory: None,
                                efficiency_impact: -0.8,
                                is_efficient: false,
                            },
                        )
                    })
                    .collect(),
            )
        }
    }

    impl WordSource for MapSource {
        fn lookup_inefficient(
            &self,
            words: &BTreeSet<String>,
        ) -> Result<HashMap<String, WordEntry>> {
            Ok(words
                .iter()
                .filter_map(|w| self.0.get(w).map(|e| (w.clone(), e.clone())))
                .collect())
        }
    }

    #[derive(Default)]
    struct MemoryLog(RefCell<Vec<AnalysisRecord>>);

    impl AnalysisLog for MemoryLog {
        fn append(&self, record: &AnalysisRecord) -> Result<i64> {
            self.0.borrow_mut().push(record.clone());
            Ok(self.0.borrow().len() as i64)
        }
    }

    struct FailingLog;

    impl AnalysisLog for FailingLog {
        fn append(&self, _record: &AnalysisRecord) -> Result<i64> {
            Err(CoreError::Database(DatabaseError::Locked))
        }
    }

    struct FailingSource;

    impl WordSource for FailingSource {
        fn lookup_inefficient(&self, _: &BTreeSet<String>) -> Result<HashMap<String, WordEntry>> {
            Err(CoreError::Database(DatabaseError::QueryFailed("gone".into())))
        }
    }

    fn source() -> MapSource {
        MapSource::new(&[
            ("some", "vague_quantifiers"),
            ("many", "vague_quantifiers"),
            ("later", "temporal_ambiguity"),
            ("basically", "hedge_words"),
        ])
    }

    #[test]
    fn tokenize_discards_punctuation_and_lowercases() {
        assert_eq!(
            tokenize("Can you help me with some stuff later?"),
            vec!["can", "you", "help", "me", "with", "some", "stuff", "later"]
        );
        assert_eq!(tokenize("execute 3 items by 5pm"), vec!["execute", "3", "items", "by", "5pm"]);
        assert!(tokenize("  ...!? ").is_empty());
    }

    #[test]
    fn tokenize_keeps_unicode_words() {
        assert_eq!(tokenize("Café über"), vec!["café", "über"]);
    }

    #[test]
    fn empty_text_is_fully_efficient() {
        let src = source();
        let result = EfficiencyScorer::new(&src).analyze("").unwrap();
        assert_eq!(result.efficiency_score, 1.0);
        assert_eq!(result.efficiency_percentage, 100.0);
        assert_eq!(result.total_word_count, 0);
        assert!(result.flagged.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn flags_one_suggestion_per_category() {
        let src = source();
        let result = EfficiencyScorer::new(&src)
            .analyze("Can you help me with some stuff later?")
            .unwrap();
        assert_eq!(result.total_word_count, 8);
        let words: Vec<_> = result.flagged.iter().map(|f| f.word.as_str()).collect();
        assert_eq!(words, vec!["some", "later"]);
        assert_eq!(
            result.suggestions,
            vec![
                "replace with an exact number or measurement",
                "replace with a specific date/time"
            ]
        );
        assert!((result.efficiency_score - 0.75).abs() < 1e-12);
    }

    #[test]
    fn repeated_words_count_once_in_numerator() {
        let src = source();
        let result = EfficiencyScorer::new(&src)
            .analyze("some some some many")
            .unwrap();
        assert_eq!(result.total_word_count, 4);
        assert_eq!(result.inefficient_word_count, 2);
        assert_eq!(result.suggestions.len(), 1);
        assert!((result.efficiency_score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn categories_without_rules_are_flagged_silently() {
        let src = source();
        let result = EfficiencyScorer::new(&src).analyze("basically done").unwrap();
        assert_eq!(result.inefficient_word_count, 1);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let src = source();
        let scorer = EfficiencyScorer::new(&src);
        let upper = scorer.analyze("SOME text").unwrap();
        let lower = scorer.analyze("some text").unwrap();
        assert_eq!(upper.flagged, lower.flagged);
        assert_eq!(upper.efficiency_score, lower.efficiency_score);
    }

    #[test]
    fn results_are_recorded_to_the_log() {
        let src = source();
        let log = MemoryLog::default();
        let scorer = EfficiencyScorer::new(&src).with_log(&log);
        scorer.analyze("some text").unwrap();
        scorer.analyze("").unwrap();

        let records = log.0.borrow();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].query_text, "some text");
        assert_eq!(records[0].flagged_words.len(), 1);
        assert_eq!(records[1].efficiency_score, 1.0);
    }

    #[test]
    fn log_failure_does_not_fail_analysis() {
        let src = source();
        let scorer = EfficiencyScorer::new(&src).with_log(&FailingLog);
        let result = scorer.analyze("some text").unwrap();
        assert_eq!(result.inefficient_word_count, 1);
    }

    #[test]
    fn lookup_failure_is_surfaced() {
        assert!(EfficiencyScorer::new(&FailingSource).analyze("anything").is_err());
    }

    #[test]
    fn lookup_is_skipped_for_empty_input() {
        let result = EfficiencyScorer::new(&FailingSource).analyze(" ?! ").unwrap();
        assert_eq!(result.efficiency_score, 1.0);
    }

    #[test]
    fn flagged_word_reads_legacy_triples() {
        let parsed: Vec<FlaggedWord> =
            serde_json::from_str(r#"[["some", "vague_quantifiers", -0.8]]"#).unwrap();
        assert_eq!(parsed[0].word, "some");
        assert_eq!(parsed[0].impact, -0.8);

        let round: Vec<FlaggedWord> =
            serde_json::from_str(&serde_json::to_string(&parsed).unwrap()).unwrap();
        assert_eq!(round, parsed);
    }

    proptest! {
        #[test]
        fn score_stays_in_unit_interval(text in "\\PC{0,80}") {
            let src = source();
            let result = EfficiencyScorer::new(&src).analyze(&text).unwrap();
            prop_assert!((0.0..=1.0).contains(&result.efficiency_score));
            prop_assert_eq!(result.efficiency_percentage, result.efficiency_score * 100.0);
            prop_assert!(result.inefficient_word_count <= result.total_word_count);
        }

        #[test]
        fn case_does_not_change_flags(words in proptest::collection::vec("(some|many|later|word|Text|LATER)", 0..12)) {
            let text = words.join(" ");
            let src = source();
            let scorer = EfficiencyScorer::new(&src);
            let a = scorer.analyze(&text.to_uppercase()).unwrap();
            let b = scorer.analyze(&text.to_lowercase()).unwrap();
            prop_assert_eq!(a.flagged, b.flagged);
        }
    }
}
