//! Polarity token rules as stored by the external rule-management process

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction a token pushes the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// Apply the polarity to a stored weight, ignoring whatever sign it was stored with
    pub fn signed(&self, weight: f64) -> f64 {
        match self {
            Polarity::Positive => weight.abs(),
            Polarity::Negative => -weight.abs(),
        }
    }
}

impl FromStr for Polarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "pos" | "+" => Ok(Polarity::Positive),
            "negative" | "neg" | "-" => Ok(Polarity::Negative),
            other => Err(format!("unknown polarity '{}'", other)),
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => write!(f, "positive"),
            Polarity::Negative => write!(f, "negative"),
        }
    }
}

/// How a token's pattern is tested against text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    /// Case-insensitive substring
    Literal,
    /// Regular expression
    Pattern,
}

impl FromStr for MatchKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "literal" | "keyword" | "substring" | "str" => Ok(MatchKind::Literal),
            "pattern" | "regex" | "re" => Ok(MatchKind::Pattern),
            other => Err(format!("unknown match type '{}'", other)),
        }
    }
}

/// Raw rule document from the token store
///
/// All fields are optional so a half-written document still decodes and can be
/// rejected rule-by-rule by the loader instead of failing the whole read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenRuleRecord {
    /// Store document id, used only for log lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub polarity: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

impl TokenRuleRecord {
    /// Convenience constructor for a literal rule
    pub fn literal(polarity: Polarity, pattern: &str, weight: f64, note: &str) -> Self {
        Self {
            id: None,
            polarity: Some(polarity.to_string()),
            kind: Some("literal".to_string()),
            pattern: Some(pattern.to_string()),
            weight: Some(weight),
            note: Some(note.to_string()),
        }
    }

    /// Convenience constructor for a regex rule
    pub fn pattern(polarity: Polarity, pattern: &str, weight: f64, note: &str) -> Self {
        Self {
            kind: Some("pattern".to_string()),
            ..Self::literal(polarity, pattern, weight, note)
        }
    }
}
