//! Lexical Scorer

use crate::lexicon::Lexicon;
use crate::normalize::{normalize, normalize_aliases};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A matched rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub pattern: String,
    pub weight: f64,
    pub note: String,
}

/// Score text against the lexicon
///
/// Text that never mentions the target scores `(0, [])`. Otherwise positives
/// are tried before negatives, in store order, and every matching rule adds
/// its signed weight once; a second rule with the same `(pattern, note)` is
/// ignored.
pub fn score(text: &str, lexicon: &Lexicon, aliases: &[String]) -> (f64, Vec<Hit>) {
    let text = normalize(text);
    let aliases = normalize_aliases(aliases);
    if !aliases.iter().any(|alias| text.contains(alias.as_str())) {
        return (0.0, Vec::new());
    }

    let mut raw = 0.0;
    let mut hits = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for matcher in lexicon.iter() {
        if !matcher.matches(&text) {
            continue;
        }
        if !seen.insert(matcher.dedupe_key()) {
            continue;
        }
        raw += matcher.weight;
        hits.push(Hit {
            pattern: matcher.pattern.clone(),
            weight: matcher.weight,
            note: matcher.note.clone(),
        });
    }

    (raw, hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::load_matchers;
    use common::{Polarity, TokenRuleRecord};

    fn aliases() -> Vec<String> {
        vec!["LiteOn".to_string(), "2301".to_string()]
    }

    fn lexicon() -> Lexicon {
        load_matchers(&[
            TokenRuleRecord::literal(Polarity::Positive, "surging profit", 1.5, "profit"),
            TokenRuleRecord::literal(Polarity::Negative, "production halt", 1.5, "halt"),
        ])
    }

    #[test]
    fn test_reference_example() {
        let (raw, hits) = score(
            "LiteOn (2301) reports surging profit this quarter",
            &lexicon(),
            &aliases(),
        );
        assert_eq!(raw, 1.5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].pattern, "surging profit");
    }

    #[test]
    fn test_no_alias_scores_zero() {
        let (raw, hits) = score(
            "Rival reports surging profit and a production halt",
            &lexicon(),
            &aliases(),
        );
        assert_eq!(raw, 0.0);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_same_rule_counted_once() {
        let lexicon = load_matchers(&[
            TokenRuleRecord::literal(Polarity::Positive, "New Order", 1.0, "order"),
            TokenRuleRecord::literal(Polarity::Positive, "new order", 1.0, "order"),
            TokenRuleRecord::literal(Polarity::Positive, "new order", 1.0, "another note"),
        ]);
        let text = "LiteOn wins new order, another NEW ORDER expected";
        let (raw, hits) = score(text, &lexicon, &aliases());
        assert_eq!(hits.len(), 2);
        assert_eq!(raw, 2.0);

        let (_, again) = score(text, &lexicon, &aliases());
        assert_eq!(again, hits);
    }

    #[test]
    fn test_hits_report_positives_then_negatives() {
        let lexicon = load_matchers(&[
            TokenRuleRecord::literal(Polarity::Negative, "halt", 2.0, "halt"),
            TokenRuleRecord::literal(Polarity::Positive, "profit", 1.0, "profit"),
        ]);
        let (raw, hits) = score("2301 profit up despite halt", &lexicon, &aliases());
        assert_eq!(raw, -1.0);
        let notes: Vec<&str> = hits.iter().map(|h| h.note.as_str()).collect();
        assert_eq!(notes, vec!["profit", "halt"]);
    }

    #[test]
    fn test_distinct_patterns_are_not_merged() {
        let lexicon = load_matchers(&[
            TokenRuleRecord::pattern(Polarity::Positive, r"\bup\b", 1.0, ""),
            TokenRuleRecord::pattern(Polarity::Positive, r"\Bup\B", 1.0, ""),
        ]);
        let (raw, hits) = score("2301 shares up, supper", &lexicon, &aliases());
        assert_eq!(hits.len(), 2);
        assert_eq!(raw, 2.0);
    }
}
