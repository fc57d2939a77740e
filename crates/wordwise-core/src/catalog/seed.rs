//! Default categories and word lists loaded by `wordwise init`.

use serde::{Deserialize, Serialize};

use super::{Category, Polarity};

/// Impact assigned to the default discouraged words.
pub const DEFAULT_INEFFICIENT_IMPACT: f64 = -0.8;
/// Impact assigned to the default encouraged words.
pub const DEFAULT_EFFICIENT_IMPACT: f64 = 0.8;

/// Words sharing a category, flag and impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedGroup {
    pub category: String,
    pub is_efficient: bool,
    pub impact: f64,
    pub words: Vec<String>,
}

impl SeedGroup {
    pub fn new(category: &str, is_efficient: bool, impact: f64, words: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            is_efficient,
            impact,
            words: words.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// Everything [`super::WordCatalog::initialize`] loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub categories: Vec<Category>,
    pub groups: Vec<SeedGroup>,
}

const CATEGORIES: &[(&str, &str, Polarity, i64)] = &[
    ("ambiguous_polysemous", "Words with multiple meanings that confuse AI", Polarity::Negative, 1),
    ("homonyms_homophones", "Words that sound alike but have different meanings", Polarity::Negative, 2),
    ("context_dependent", "High-frequency verbs with dozens of meanings", Polarity::Negative, 1),
    ("vague_quantifiers", "Imprecise quantity descriptors", Polarity::Negative, 1),
    ("subjective_qualifiers", "Opinion-based descriptors without criteria", Polarity::Negative, 2),
    ("temporal_ambiguity", "Unclear time references", Polarity::Negative, 2),
    ("modal_uncertainty", "Words expressing uncertainty", Polarity::Negative, 1),
    ("clear_single_meaning", "Unambiguous words with precise definitions", Polarity::Positive, 1),
    ("phonetically_distinct", "Words without sound-alikes", Polarity::Positive, 2),
    ("context_independent", "Words maintaining consistent meaning", Polarity::Positive, 1),
    ("literal_expressions", "Direct, non-figurative phrases", Polarity::Positive, 2),
    ("affirmative_intensifiers", "Positive amplifiers and certainty markers", Polarity::Positive, 1),
    ("universal_terms", "Cross-cultural, commonly understood words", Polarity::Positive, 2),
    ("definite_temporal", "Specific time references", Polarity::Positive, 1),
];

const INEFFICIENT: &[(&str, &[&str])] = &[
    (
        "context_dependent",
        &[
            "run", "set", "get", "make", "take", "go", "come", "put", "give", "turn", "call",
            "work", "play", "move", "hold", "bring", "keep", "show", "try", "use", "find", "know",
            "think", "say", "tell", "ask", "look", "seem", "feel", "leave",
        ],
    ),
    (
        "vague_quantifiers",
        &[
            "some", "many", "few", "several", "various", "numerous", "multiple", "countless",
            "tons", "loads", "lots", "plenty", "enough", "sufficient", "adequate", "barely",
            "hardly", "scarcely",
        ],
    ),
    (
        "subjective_qualifiers",
        &[
            "good", "bad", "better", "worse", "best", "worst", "great", "terrible", "excellent",
            "awful", "amazing", "horrible", "wonderful", "dreadful", "fantastic", "pathetic",
        ],
    ),
    (
        "temporal_ambiguity",
        &[
            "soon", "later", "eventually", "ultimately", "finally", "recently", "lately",
            "currently", "presently", "early", "late", "delayed", "ahead", "behind",
        ],
    ),
    (
        "modal_uncertainty",
        &[
            "might", "could", "would", "should", "may", "can", "must", "shall", "will", "ought",
            "supposed to", "expected to", "likely", "unlikely", "possible", "impossible",
        ],
    ),
];

const EFFICIENT: &[(&str, &[&str])] = &[
    (
        "clear_single_meaning",
        &[
            "accelerate", "amplify", "architect", "binary", "calculate", "calibrate", "construct",
            "crystallize", "decode", "diagram", "duplicate", "eliminate", "engineer", "execute",
        ],
    ),
    (
        "phonetically_distinct",
        &[
            "accumulate", "bachelor", "cathedral", "distinguish", "elephant", "fluorescent",
            "gymnasium", "helicopter", "illuminate", "jeopardize", "kaleidoscope", "laboratory",
        ],
    ),
    (
        "context_independent",
        &[
            "breathe", "calculate", "photograph", "sleep", "eat", "drink", "walk", "sit", "stand",
            "jump", "swim", "fly", "drive", "read", "write", "listen", "watch",
        ],
    ),
    (
        "affirmative_intensifiers",
        &[
            "very", "extremely", "highly", "incredibly", "remarkably", "exceptionally",
            "extraordinarily", "tremendously", "immensely", "enormously", "significantly",
        ],
    ),
    (
        "definite_temporal",
        &[
            "now", "immediately", "instantly", "promptly", "quickly", "today", "tomorrow",
            "yesterday", "Monday", "Tuesday", "Wednesday", "January", "February", "2024", "2025",
        ],
    ),
];

impl Default for SeedData {
    fn default() -> Self {
        let categories = CATEGORIES
            .iter()
            .map(|(name, description, polarity, priority)| {
                Category::new(*name, *description, *polarity, *priority)
            })
            .collect();

        let inefficient = INEFFICIENT.iter().map(|(category, words)| {
            SeedGroup::new(category, false, DEFAULT_INEFFICIENT_IMPACT, words)
        });
        let efficient = EFFICIENT.iter().map(|(category, words)| {
            SeedGroup::new(category, true, DEFAULT_EFFICIENT_IMPACT, words)
        });

        Self {
            categories,
            groups: inefficient.chain(efficient).collect(),
        }
    }
}

impl SeedData {
    /// An empty seed, useful as a starting point for custom catalogs.
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_group(mut self, group: SeedGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Number of words across all groups, duplicates included.
    pub fn word_total(&self) -> usize {
        self.groups.iter().map(|g| g.words.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_seed_has_every_category_referenced_by_groups() {
        let seed = SeedData::default();
        for group in &seed.groups {
            assert!(
                seed.categories.iter().any(|c| c.name == group.category),
                "group {} has no category",
                group.category
            );
        }
    }

    #[test]
    fn default_seed_polarity_matches_group_flag() {
        let seed = SeedData::default();
        for group in &seed.groups {
            let category = seed
                .categories
                .iter()
                .find(|c| c.name == group.category)
                .unwrap();
            let expected = if group.is_efficient {
                Polarity::Positive
            } else {
                Polarity::Negative
            };
            assert_eq!(category.polarity, expected);
        }
    }

    #[test]
    fn builder_appends() {
        let seed = SeedData::empty()
            .with_category(Category::new("x", "", Polarity::Neutral, 0))
            .with_group(SeedGroup::new("x", false, -0.5, &["a", "b"]));
        assert_eq!(seed.categories.len(), 1);
        assert_eq!(seed.word_total(), 2);
    }
}
