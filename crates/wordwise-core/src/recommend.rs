//! Read-only recommendation report over the word catalog.

use serde::{Deserialize, Serialize};

use crate::catalog::{RankedWord, WordCatalog};
use crate::error::Result;
use crate::scorer::strategy_hints;
use crate::storage::RecommendConfig;

/// Default efficiency target, in percent.
pub const DEFAULT_TARGET_PERCENTAGE: f64 = 80.0;

/// Sizes of the two word lists in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationLimits {
    pub avoid: u32,
    pub alternatives: u32,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            avoid: 50,
            alternatives: 100,
        }
    }
}

impl From<&RecommendConfig> for RecommendationLimits {
    fn from(cfg: &RecommendConfig) -> Self {
        Self {
            avoid: cfg.avoid_limit,
            alternatives: cfg.alternatives_limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub target_efficiency: f64,
    /// Most damaging inefficient words: impact ascending, then word.
    pub words_to_avoid: Vec<RankedWord>,
    /// Strongest efficient words: impact descending, then word.
    pub recommended_alternatives: Vec<RankedWord>,
    pub strategy: Vec<String>,
}

impl WordCatalog<'_> {
    /// Build a recommendation report for `target_percentage`.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be read.
    pub fn recommendations(
        &self,
        target_percentage: f64,
        limits: RecommendationLimits,
    ) -> Result<Recommendations> {
        Ok(Recommendations {
            target_efficiency: target_percentage,
            words_to_avoid: self.ranked_words(false, true, limits.avoid)?,
            recommended_alternatives: self.ranked_words(true, false, limits.alternatives)?,
            strategy: strategy_hints(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SeedData;
    use crate::history::AnalysisHistory;
    use crate::storage::Database;

    #[test]
    fn report_respects_limits_and_flags() {
        let db = Database::open_memory().unwrap();
        let catalog = WordCatalog::new(&db);
        catalog.initialize(&SeedData::default()).unwrap();

        let report = catalog
            .recommendations(
                DEFAULT_TARGET_PERCENTAGE,
                RecommendationLimits {
                    avoid: 5,
                    alternatives: 3,
                },
            )
            .unwrap();
        assert_eq!(report.target_efficiency, 80.0);
        assert_eq!(report.words_to_avoid.len(), 5);
        assert_eq!(report.recommended_alternatives.len(), 3);
        assert_eq!(report.strategy.len(), 5);

        let inefficient: Vec<String> = catalog
            .search(&crate::catalog::WordQuery::new("").efficient(false))
            .unwrap()
            .into_iter()
            .map(|w| w.word)
            .collect();
        assert!(report
            .words_to_avoid
            .iter()
            .all(|w| inefficient.contains(&w.word)));
    }

    #[test]
    fn most_damaging_words_come_first() {
        let db = Database::open_memory().unwrap();
        let catalog = WordCatalog::new(&db);
        catalog.add_words(&["meh"], "x", false, -0.3, None).unwrap();
        catalog.add_words(&["zap", "awful"], "x", false, -0.9, None).unwrap();
        catalog.add_words(&["exact"], "y", true, 0.4, None).unwrap();
        catalog.add_words(&["precise"], "y", true, 0.9, None).unwrap();

        let report = catalog
            .recommendations(90.0, RecommendationLimits::default())
            .unwrap();
        let avoid: Vec<_> = report.words_to_avoid.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(avoid, vec!["awful", "zap", "meh"]);
        let alternatives: Vec<_> = report
            .recommended_alternatives
            .iter()
            .map(|w| w.word.as_str())
            .collect();
        assert_eq!(alternatives, vec!["precise", "exact"]);
    }

    #[test]
    fn report_does_not_touch_history() {
        let db = Database::open_memory().unwrap();
        let catalog = WordCatalog::new(&db);
        catalog.initialize(&SeedData::default()).unwrap();
        catalog
            .recommendations(DEFAULT_TARGET_PERCENTAGE, RecommendationLimits::default())
            .unwrap();
        assert_eq!(AnalysisHistory::new(&db).count().unwrap(), 0);
    }

    #[test]
    fn limits_follow_config() {
        let cfg = RecommendConfig {
            target_percentage: 70.0,
            avoid_limit: 4,
            alternatives_limit: 9,
        };
        assert_eq!(
            RecommendationLimits::from(&cfg),
            RecommendationLimits {
                avoid: 4,
                alternatives: 9
            }
        );
    }
}
