//! Candidate-title extraction from free-form model replies.
//!
//! Each heuristic is a [`TitleExtractor`] strategy. [`TieredExtractor`] runs
//! them in order and returns the output of the first one that finds anything;
//! results from different tiers are never merged.

use regex::Regex;

/// Candidates this short are treated as noise
const MIN_TITLE_CHARS: usize = 4;

/// A strategy that pulls candidate titles out of prose
pub trait TitleExtractor: Send + Sync {
    /// Candidates in first-appearance order. Never fails; no match is an empty list.
    fn extract(&self, text: &str) -> Vec<String>;
}

/// Trim each candidate and drop anything shorter than [`MIN_TITLE_CHARS`]
fn post_filter(candidates: impl Iterator<Item = String>) -> Vec<String> {
    candidates
        .map(|c| c.trim().to_string())
        .filter(|c| c.chars().count() >= MIN_TITLE_CHARS)
        .collect()
}

/// Every span enclosed in a pair of double quotes
pub struct QuotedSpanStrategy {
    pattern: Regex,
}

impl QuotedSpanStrategy {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(r#""([^"]+)""#)?,
        })
    }
}

impl TitleExtractor for QuotedSpanStrategy {
    fn extract(&self, text: &str) -> Vec<String> {
        post_filter(
            self.pattern
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
        )
    }
}

/// Capitalized runs anchored at a line start, an enumeration marker or a colon
///
/// A run stops before `(`, `-`, `.`, `:` or the end of the line. The
/// terminator is left unmatched so a colon can anchor the following run.
pub struct StructuralStrategy {
    pattern: Regex,
}

impl StructuralStrategy {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(
                r"(?m)(?:^[ \t]*\d+\.[ \t]*|^[ \t]*|:[ \t]*)(\p{Lu}[^\n(.:\-]*)",
            )?,
        })
    }
}

impl TitleExtractor for StructuralStrategy {
    fn extract(&self, text: &str) -> Vec<String> {
        post_filter(
            self.pattern
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
        )
    }
}

/// Runs strategies in order; the first non-empty result wins
pub struct TieredExtractor {
    tiers: Vec<Box<dyn TitleExtractor>>,
}

impl TieredExtractor {
    pub fn new(tiers: Vec<Box<dyn TitleExtractor>>) -> Self {
        Self { tiers }
    }

    /// Quoted spans first, structural fallback second
    pub fn standard() -> Result<Self, regex::Error> {
        Ok(Self::new(vec![
            Box::new(QuotedSpanStrategy::new()?),
            Box::new(StructuralStrategy::new()?),
        ]))
    }
}

impl TitleExtractor for TieredExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        for (tier, strategy) in self.tiers.iter().enumerate() {
            let candidates = strategy.extract(text);
            if !candidates.is_empty() {
                tracing::debug!(tier, candidates = candidates.len(), "Titles extracted");
                return candidates;
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> TieredExtractor {
        TieredExtractor::standard().unwrap()
    }

    #[test]
    fn test_quoted_titles_in_order() {
        let text = "You might enjoy \"Coherence\" and, if time travel is your thing, \"Predestination\" too.";
        assert_eq!(extractor().extract(text), vec!["Coherence", "Predestination"]);
    }

    #[test]
    fn test_structural_fallback_without_quotes() {
        let text = "1. Arrival (2016)\n2. Annihilation - a great watch";
        assert_eq!(extractor().extract(text), vec!["Arrival", "Annihilation"]);
    }

    #[test]
    fn test_quoted_tier_wins_over_structural() {
        let text = "1. Arrival (2016)\nAlso consider \"Primer\" if you liked it.";
        assert_eq!(extractor().extract(text), vec!["Primer"]);
    }

    #[test]
    fn test_short_candidates_discarded() {
        let text = "Watch \"Up\" or \"Her\" or \"Moon\" tonight.";
        assert_eq!(extractor().extract(text), vec!["Moon"]);
    }

    #[test]
    fn test_quoted_candidates_trimmed() {
        let text = "Try \"  The Prestige \" next.";
        assert_eq!(extractor().extract(text), vec!["The Prestige"]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let text = "\"Coherence\" is great. Did I mention \"Coherence\"?";
        assert_eq!(extractor().extract(text), vec!["Coherence", "Coherence"]);
    }

    #[test]
    fn test_no_matches_yields_empty() {
        assert!(extractor().extract("").is_empty());
        assert!(extractor().extract("which platforms do you use?").is_empty());
    }

    #[test]
    fn test_structural_after_colon() {
        let text = "my pick: Moon (2009)";
        assert_eq!(StructuralStrategy::new().unwrap().extract(text), vec!["Moon"]);
    }

    #[test]
    fn test_structural_title_after_capitalized_label() {
        let text = "Top pick: Arrival (2016)\nRunner-up: Annihilation - great";
        let titles = StructuralStrategy::new().unwrap().extract(text);

        assert!(titles.contains(&"Arrival".to_string()));
        assert!(titles.contains(&"Annihilation".to_string()));
    }

    #[test]
    fn test_tiered_fallback_keeps_title_after_colon() {
        let titles = extractor().extract("Recommendation: Arrival (2016)");
        assert_eq!(titles, vec!["Recommendation", "Arrival"]);
    }

    #[test]
    fn test_structural_run_stops_at_period() {
        let text = "Primer. A low-budget puzzle box";
        assert_eq!(StructuralStrategy::new().unwrap().extract(text), vec!["Primer"]);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let text = "1. \"Coherence\" (2013)\n2. \"Predestination\" (2014)";
        let extractor = extractor();
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn test_custom_tiers_replace_the_defaults() {
        struct Fixed;
        impl TitleExtractor for Fixed {
            fn extract(&self, _text: &str) -> Vec<String> {
                vec!["Stalker".to_string()]
            }
        }

        let extractor = TieredExtractor::new(vec![Box::new(Fixed)]);
        assert_eq!(extractor.extract("anything"), vec!["Stalker"]);
    }
}
