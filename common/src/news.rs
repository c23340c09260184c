//! News items as delivered by the daily feed

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref SIGNED_DECIMAL: Regex = Regex::new(r"[+-]?\d+(?:\.\d+)?").unwrap();
}

/// Price change as stored next to a news field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPriceChange {
    Number(f64),
    Text(String),
}

impl RawPriceChange {
    /// Numeric value of the change
    ///
    /// Text such as `"+1.23 (+0.85%)"` yields the first signed decimal found,
    /// whether it sits inside or outside the parentheses. Anything unparsable is 0.0.
    pub fn value(&self) -> f64 {
        match self {
            RawPriceChange::Number(n) if n.is_finite() => *n,
            RawPriceChange::Number(_) => 0.0,
            RawPriceChange::Text(text) => parse_signed_decimal(text).unwrap_or(0.0),
        }
    }
}

/// Parsed change for an optional raw value, 0.0 when absent
pub fn parse_price_change(raw: Option<&RawPriceChange>) -> f64 {
    raw.map(RawPriceChange::value).unwrap_or(0.0)
}

fn parse_signed_decimal(text: &str) -> Option<f64> {
    // Quote pages use arrows and the unicode minus for direction
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',')
        .map(|c| match c {
            '▲' => '+',
            '▼' | '−' => '-',
            other => other,
        })
        .collect();

    SIGNED_DECIMAL
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// One news field pulled out of a daily feed document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Daily document id (`YYYYMMDD`)
    pub source_doc_id: String,
    /// Field name inside the document (`news_1`, `news_2`, ...)
    pub field_key: String,
    pub title: String,
    pub content: String,
    pub published_at: NaiveDate,
    #[serde(default)]
    pub raw_price_change: Option<RawPriceChange>,
}

impl NewsItem {
    pub fn new(
        source_doc_id: impl Into<String>,
        field_key: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        published_at: NaiveDate,
    ) -> Self {
        Self {
            source_doc_id: source_doc_id.into(),
            field_key: field_key.into(),
            title: title.into(),
            content: content.into(),
            published_at,
            raw_price_change: None,
        }
    }

    pub fn with_price_change(mut self, change: RawPriceChange) -> Self {
        self.raw_price_change = Some(change);
        self
    }

    /// Parsed price change, 0.0 when absent
    pub fn price_change(&self) -> f64 {
        parse_price_change(self.raw_price_change.as_ref())
    }

    /// Title and body joined, as fed to the scorer
    pub fn full_text(&self) -> String {
        format!("{}\n{}", self.title, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_change_first_signed_decimal() {
        let raw = RawPriceChange::Text("+1.23 (+0.85%)".to_string());
        assert_eq!(raw.value(), 1.23);

        let raw = RawPriceChange::Text("(-0.85%)".to_string());
        assert_eq!(raw.value(), -0.85);

        let raw = RawPriceChange::Text("▼2.50 (1.9%)".to_string());
        assert_eq!(raw.value(), -2.5);
    }

    #[test]
    fn test_price_change_unparsable_is_zero() {
        assert_eq!(RawPriceChange::Text("n/a".to_string()).value(), 0.0);
        assert_eq!(RawPriceChange::Number(f64::NAN).value(), 0.0);
        assert_eq!(RawPriceChange::Number(-0.4).value(), -0.4);

        let item = NewsItem::new("20251201", "news_1", "t", "c", NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(item.price_change(), 0.0);
        assert_eq!(parse_price_change(None), 0.0);
        assert_eq!(
            parse_price_change(Some(&RawPriceChange::Text("+1,234.5".to_string()))),
            1234.5
        );
    }

    #[test]
    fn test_untagged_decoding() {
        let n: RawPriceChange = serde_json::from_str("1.5").unwrap();
        assert_eq!(n, RawPriceChange::Number(1.5));
        let t: RawPriceChange = serde_json::from_str("\"+1.0 (+0.5%)\"").unwrap();
        assert_eq!(t.value(), 1.0);
    }
}
