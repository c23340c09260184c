//! Engine configuration
//!
//! Every lexicon and threshold the engine uses lives here and is passed in
//! explicitly. `Default` reproduces the reference constants; a TOML file may
//! override any subset of them.

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Overall engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Recency, density and salience weighting plus top-N selection
    pub ranking: RankingConfig,

    /// Contextual dampening/boosting phrases
    pub context: ContextConfig,

    /// Divergence rule table constants
    pub divergence: DivergenceConfig,
}

/// A phrase with an associated weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPhrase {
    pub phrase: String,
    pub weight: f64,
}

impl WeightedPhrase {
    pub fn new(phrase: &str, weight: f64) -> Self {
        Self {
            phrase: phrase.to_string(),
            weight,
        }
    }
}

/// Weighting & ranking settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Size of the ranked set
    pub top_n: usize,

    /// Recency weight for items dated the day before the run
    pub previous_day_weight: f64,

    /// Density bonus per distinct rule hit
    pub density_step: f64,

    /// Ceiling on the density bonus
    pub density_cap: f64,

    /// Salience bonus per unit of keyword weight
    pub salience_factor: f64,

    /// Domain-salience keywords (confidence only, never polarity)
    pub salience_keywords: Vec<WeightedPhrase>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            previous_day_weight: 0.85,
            density_step: 0.05,
            density_cap: 0.3,
            salience_factor: 0.05,
            salience_keywords: vec![
                WeightedPhrase::new("earnings call", 3.0),
                WeightedPhrase::new("quarterly report", 3.0),
                WeightedPhrase::new("guidance cut", 4.0),
                WeightedPhrase::new("monthly revenue", 2.0),
                WeightedPhrase::new("dividend", 2.0),
                WeightedPhrase::new("法說會", 3.0),
                WeightedPhrase::new("財報", 3.0),
                WeightedPhrase::new("季報", 3.0),
                WeightedPhrase::new("下修財測", 4.0),
                WeightedPhrase::new("月營收", 2.0),
                WeightedPhrase::new("股利", 2.0),
            ],
        }
    }
}

/// Context adjuster settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Reaffirmation / "as expected" language
    pub neutral_phrases: Vec<String>,
    pub strong_positive_phrases: Vec<String>,
    pub strong_negative_phrases: Vec<String>,
    pub dampen_factor: f64,
    pub boost_factor: f64,
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            neutral_phrases: phrases(&[
                "reaffirm",
                "reiterate",
                "in line with expectations",
                "no material impact",
                "符合預期",
                "重申",
                "影響有限",
                "無重大影響",
            ]),
            strong_positive_phrases: phrases(&[
                "record high",
                "all-time high",
                "doubled",
                "doubling",
                "surging profit",
                "創新高",
                "倍增",
                "翻倍",
                "獲利大增",
                "獲利暴增",
            ]),
            strong_negative_phrases: phrases(&[
                "plunge",
                "suspension of operations",
                "suspended operations",
                "downgrade",
                "layoff",
                "暴跌",
                "重挫",
                "停工",
                "降評",
                "裁員",
            ]),
            dampen_factor: 0.4,
            boost_factor: 1.3,
        }
    }
}

/// Divergence detector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DivergenceConfig {
    /// How many top-ranked items feed the assessment
    pub window: usize,

    /// Below this mean strength no assessment is made
    pub min_strength: f64,

    pub strong_threshold: f64,
    pub medium_threshold: f64,
}

impl Default for DivergenceConfig {
    fn default() -> Self {
        Self {
            window: 5,
            min_strength: 0.4,
            strong_threshold: 0.7,
            medium_threshold: 0.35,
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> anyhow::Result<EngineConfig> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading engine config {}", path))?;
    parse_config(&content)
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> anyhow::Result<EngineConfig> {
    let config: EngineConfig = toml::from_str(content).context("parsing engine config")?;
    Ok(config)
}
