//! Context Adjuster - phrase-level dampening and boosting of a raw score

use crate::config::ContextConfig;
use crate::normalize::normalize;

fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| {
        let p = normalize(p);
        !p.is_empty() && text.contains(p.as_str())
    })
}

/// Adjust a raw score for reaffirmation and strong-move language
///
/// The dampener and both boosts are independent and compound.
pub fn adjust(text: &str, raw_score: f64, config: &ContextConfig) -> f64 {
    if raw_score == 0.0 {
        return raw_score;
    }

    let text = normalize(text);
    let mut adjusted = raw_score;

    if contains_any(&text, &config.neutral_phrases) {
        adjusted *= config.dampen_factor;
    }
    if contains_any(&text, &config.strong_positive_phrases) {
        adjusted *= config.boost_factor;
    }
    if contains_any(&text, &config.strong_negative_phrases) {
        adjusted *= config.boost_factor;
    }

    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_positive_boost() {
        let config = ContextConfig::default();
        let adjusted = adjust("LiteOn (2301) reports surging profit this quarter", 1.5, &config);
        assert!(approx(adjusted, 1.95));
    }

    #[test]
    fn test_zero_is_untouched() {
        let config = ContextConfig::default();
        assert_eq!(adjust("shares plunge on layoffs", 0.0, &config), 0.0);
    }

    #[test]
    fn test_dampen_and_boost_compound() {
        let config = ContextConfig::default();
        let adjusted = adjust(
            "Results in line with expectations, shares still plunge",
            -2.0,
            &config,
        );
        assert!(approx(adjusted, -2.0 * 0.4 * 1.3));

        let both = adjust("股價創新高 後 暴跌", 1.0, &config);
        assert!(approx(both, 1.3 * 1.3));
    }

    #[test]
    fn test_plain_text_unchanged() {
        let config = ContextConfig::default();
        assert_eq!(adjust("LiteOn ships new adapters", -0.7, &config), -0.7);
    }
}
