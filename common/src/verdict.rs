//! Target identity, trend vocabulary and the persisted verdict

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The listed company a run is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Canonical company name
    pub name: String,
    /// Numeric ticker, also the verdict key
    pub stock_id: String,
    /// Short forms and stock designations
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Target {
    pub fn new(name: impl Into<String>, stock_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stock_id: stock_id.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Name, ticker and every alias, without blanks or duplicates
    pub fn alias_set(&self) -> Vec<String> {
        let mut set: Vec<String> = Vec::new();
        for alias in std::iter::once(&self.name)
            .chain(std::iter::once(&self.stock_id))
            .chain(self.aliases.iter())
        {
            let alias = alias.trim();
            if !alias.is_empty() && !set.iter().any(|a| a == alias) {
                set.push(alias.to_string());
            }
        }
        set
    }
}

/// Directional call vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    Up,
    SlightUp,
    SlightDown,
    Down,
    Unclear,
}

impl Trend {
    pub const ALL: [Trend; 5] = [
        Trend::Up,
        Trend::SlightUp,
        Trend::SlightDown,
        Trend::Down,
        Trend::Unclear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "Up",
            Trend::SlightUp => "SlightUp",
            Trend::SlightDown => "SlightDown",
            Trend::Down => "Down",
            Trend::Unclear => "Unclear",
        }
    }

    /// Label used by the downstream trading consumers
    pub fn native_label(&self) -> &'static str {
        match self {
            Trend::Up => "上漲",
            Trend::SlightUp => "微漲",
            Trend::SlightDown => "微跌",
            Trend::Down => "下跌",
            Trend::Unclear => "不明確",
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(self, Trend::Up | Trend::SlightUp)
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final directional call for one target/day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalCall {
    pub trend: Trend,
    pub reason: String,
}

impl FinalCall {
    pub fn new(trend: Trend, reason: impl Into<String>) -> Self {
        Self {
            trend,
            reason: reason.into(),
        }
    }

    pub fn unclear(reason: impl Into<String>) -> Self {
        Self::new(Trend::Unclear, reason)
    }
}

/// Record written once per (target, date)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub timestamp: DateTime<Utc>,
    pub trend: Trend,
    pub reason: String,
    pub stock_id: String,
    /// Native trend label
    pub prediction: String,
    /// Sum of weighted scores over the ranked set
    pub sentiment_score: f64,
    pub divergence: String,
    pub news_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_set_dedupes_and_trims() {
        let target = Target::new("光寶科", "2301")
            .with_alias("光寶")
            .with_alias(" 2301 ")
            .with_alias("");
        assert_eq!(target.alias_set(), vec!["光寶科", "2301", "光寶"]);
    }

    #[test]
    fn test_trend_labels() {
        assert_eq!(Trend::SlightUp.native_label(), "微漲");
        assert!(Trend::SlightUp.is_bullish());
        assert!(!Trend::Unclear.is_bullish());
        assert_eq!(serde_json::to_string(&Trend::SlightDown).unwrap(), "\"SlightDown\"");
    }
}
