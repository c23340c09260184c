//! Divergence Detector - news sentiment against the realized price move

use crate::config::DivergenceConfig;
use crate::weighting::ScoredItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative relationship between sentiment and price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DivergenceVerdict {
    InsufficientSignal,
    /// Bullish news, notably falling price
    StrongPositiveDivergence,
    ModeratePositiveDivergence,
    /// Bearish news, notably rising price
    StrongNegativeDivergence,
    ModerateNegativeDivergence,
    Consistent,
}

impl DivergenceVerdict {
    /// Stable machine-readable key
    pub fn label(&self) -> &'static str {
        match self {
            DivergenceVerdict::InsufficientSignal => "insufficient_signal",
            DivergenceVerdict::StrongPositiveDivergence => "strong_positive_divergence",
            DivergenceVerdict::ModeratePositiveDivergence => "moderate_positive_divergence",
            DivergenceVerdict::StrongNegativeDivergence => "strong_negative_divergence",
            DivergenceVerdict::ModerateNegativeDivergence => "moderate_negative_divergence",
            DivergenceVerdict::Consistent => "consistent",
        }
    }

    pub fn narrative(&self) -> &'static str {
        match self {
            DivergenceVerdict::InsufficientSignal => {
                "insufficient signal strength, no divergence assessment"
            }
            DivergenceVerdict::StrongPositiveDivergence => {
                "strong positive divergence: news is bullish while the price fell notably"
            }
            DivergenceVerdict::ModeratePositiveDivergence => {
                "moderate positive divergence: news is bullish while the price slipped"
            }
            DivergenceVerdict::StrongNegativeDivergence => {
                "strong negative divergence: news is bearish while the price rose notably"
            }
            DivergenceVerdict::ModerateNegativeDivergence => {
                "moderate negative divergence: news is bearish while the price edged up"
            }
            DivergenceVerdict::Consistent => {
                "sentiment and price move are consistent, no material divergence"
            }
        }
    }
}

impl fmt::Display for DivergenceVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.narrative())
    }
}

/// Window averages plus the resulting verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DivergenceAssessment {
    pub verdict: DivergenceVerdict,
    /// Items actually averaged
    pub window: usize,
    pub avg_strength: f64,
    pub avg_sentiment: f64,
    pub avg_price_move: f64,
}

/// The rule table. Strong checks run before medium ones; first match wins.
pub fn classify(
    avg_strength: f64,
    avg_sentiment: f64,
    avg_price_move: f64,
    config: &DivergenceConfig,
) -> DivergenceVerdict {
    let strong = config.strong_threshold;
    let medium = config.medium_threshold;

    if avg_strength < config.min_strength {
        DivergenceVerdict::InsufficientSignal
    } else if avg_sentiment >= strong && avg_price_move <= -medium {
        DivergenceVerdict::StrongPositiveDivergence
    } else if avg_sentiment <= -strong && avg_price_move >= medium {
        DivergenceVerdict::StrongNegativeDivergence
    } else if avg_sentiment >= medium && avg_price_move < 0.0 {
        DivergenceVerdict::ModeratePositiveDivergence
    } else if avg_sentiment <= -medium && avg_price_move > 0.0 {
        DivergenceVerdict::ModerateNegativeDivergence
    } else {
        DivergenceVerdict::Consistent
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Assess the top of the ranked set
pub fn assess(ranked: &[ScoredItem], config: &DivergenceConfig) -> DivergenceAssessment {
    let window = &ranked[..ranked.len().min(config.window)];

    let avg_strength = mean(window.iter().map(ScoredItem::strength));
    let avg_sentiment = mean(window.iter().map(ScoredItem::impact));
    let avg_price_move = mean(window.iter().map(ScoredItem::weighted_price_move));

    let verdict = if window.is_empty() {
        DivergenceVerdict::InsufficientSignal
    } else {
        classify(avg_strength, avg_sentiment, avg_price_move, config)
    };

    DivergenceAssessment {
        verdict,
        window: window.len(),
        avg_strength,
        avg_sentiment,
        avg_price_move,
    }
}

pub fn detect_divergence(ranked: &[ScoredItem], config: &DivergenceConfig) -> DivergenceVerdict {
    assess(ranked, config).verdict
}
