//! Text normalization and relevance filtering

use common::NewsItem;
use std::collections::HashSet;
use tracing::debug;

/// Collapse whitespace runs to one space, trim, lower-case
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalized, non-empty aliases
pub fn normalize_aliases(aliases: &[String]) -> Vec<String> {
    aliases
        .iter()
        .map(|a| normalize(a))
        .filter(|a| !a.is_empty())
        .collect()
}

/// True iff any alias occurs in the normalized text
pub fn is_relevant(text: &str, aliases: &[String]) -> bool {
    let text = normalize(text);
    normalize_aliases(aliases)
        .iter()
        .any(|alias| text.contains(alias.as_str()))
}

/// Keep items whose body mentions the target
///
/// A title that names the target over a body that doesn't is a roundup or a
/// teaser, and is dropped.
pub fn filter_relevant(items: Vec<NewsItem>, aliases: &[String]) -> Vec<NewsItem> {
    items
        .into_iter()
        .filter(|item| {
            let keep = is_relevant(&item.content, aliases);
            if !keep {
                debug!(
                    "Dropping {}/{} (no alias in content): {}",
                    item.source_doc_id, item.field_key, item.title
                );
            }
            keep
        })
        .collect()
}

/// Drop repeated (title, content) pairs, keeping the first occurrence
pub fn dedupe(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert((item.title.clone(), item.content.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::NaiveDate;

    fn item(key: &str, title: &str, content: &str) -> NewsItem {
        NewsItem::new(
            "20251201",
            key,
            title,
            content,
            NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
        )
    }

    fn aliases() -> Vec<String> {
        vec!["光寶科".to_string(), "LiteOn".to_string(), "2301".to_string()]
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  LiteOn \n\t Reports  Profit "), "liteon reports profit");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_is_relevant_case_insensitive() {
        assert!(is_relevant("LITEON wins order", &aliases()));
        assert!(is_relevant("光寶科 營收創新高", &aliases()));
        assert!(!is_relevant("Delta wins order", &aliases()));
        assert!(!is_relevant("anything", &["  ".to_string()]));
    }

    #[test]
    fn test_title_only_match_is_dropped() {
        let items = vec![
            item("news_1", "2301 related sector roundup", "Several suppliers moved today."),
            item("news_2", "Sector roundup", "LiteOn shares rose."),
        ];
        let kept = filter_relevant(items, &aliases());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].field_key, "news_2");
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let items = vec![
            item("news_1", "a", "body"),
            item("news_2", "a", "body"),
            item("news_3", "a", "other body"),
        ];
        let keys: Vec<String> = dedupe(items).into_iter().map(|i| i.field_key).collect();
        assert_eq!(keys, vec!["news_1", "news_3"]);
    }
}
