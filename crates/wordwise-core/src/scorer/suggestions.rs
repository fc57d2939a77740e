//! Category -> suggestion lookup table.

/// One row of the suggestion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionRule {
    pub category: &'static str,
    /// Emitted once per analysis when a word of this category is flagged.
    pub suggestion: &'static str,
    /// General hint listed in recommendation reports.
    pub strategy: &'static str,
}

pub const SUGGESTION_RULES: &[SuggestionRule] = &[
    SuggestionRule {
        category: "context_dependent",
        suggestion: "replace with a more specific action verb",
        strategy: "Replace context-dependent verbs with specific action words",
    },
    SuggestionRule {
        category: "vague_quantifiers",
        suggestion: "replace with an exact number or measurement",
        strategy: "Use exact numbers instead of vague quantifiers",
    },
    SuggestionRule {
        category: "subjective_qualifiers",
        suggestion: "replace with objective, measurable criteria",
        strategy: "Replace subjective qualifiers with measurable criteria",
    },
    SuggestionRule {
        category: "temporal_ambiguity",
        suggestion: "replace with a specific date/time",
        strategy: "Specify exact times instead of temporal ambiguity",
    },
    SuggestionRule {
        category: "modal_uncertainty",
        suggestion: "replace with a definitive statement",
        strategy: "Use definitive statements instead of modal uncertainty",
    },
];

/// Suggestion for `category`, if the category has one.
pub fn suggestion_for(category: &str) -> Option<&'static str> {
    SUGGESTION_RULES
        .iter()
        .find(|rule| rule.category == category)
        .map(|rule| rule.suggestion)
}

/// Strategy hints in table order.
pub fn strategy_hints() -> Vec<String> {
    SUGGESTION_RULES
        .iter()
        .map(|rule| rule.strategy.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_categories_have_suggestions() {
        assert_eq!(
            suggestion_for("vague_quantifiers"),
            Some("replace with an exact number or measurement")
        );
        assert_eq!(
            suggestion_for("temporal_ambiguity"),
            Some("replace with a specific date/time")
        );
    }

    #[test]
    fn other_categories_have_none() {
        assert_eq!(suggestion_for("hedge_words"), None);
        assert_eq!(suggestion_for("Vague_Quantifiers"), None);
    }

    #[test]
    fn one_strategy_hint_per_rule() {
        assert_eq!(strategy_hints().len(), SUGGESTION_RULES.len());
    }
}
