//! Weighting & Ranking
//!
//! Each scored item gets a composite confidence weight:
//! - recency: run date 1.0, previous day 0.85, anything else excluded
//! - density: more distinct rule hits, more confidence (capped)
//! - salience: domain keywords such as earnings calls scale confidence
//!
//! Items are then ranked by weighted absolute impact, direction-agnostic.

use crate::config::{RankingConfig, WeightedPhrase};
use crate::normalize::normalize;
use crate::scorer::Hit;
use chrono::{Duration, NaiveDate};
use common::NewsItem;
use serde::{Deserialize, Serialize};

/// A news item after scoring and weighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item: NewsItem,
    pub raw_score: f64,
    pub hits: Vec<Hit>,
    pub adjusted_score: f64,
    pub recency_weight: f64,
    pub density_weight: f64,
    pub salience_weight: f64,
    /// recency * density * salience
    pub weight: f64,
    pub parsed_price_change: f64,
}

impl ScoredItem {
    /// Signed weighted score
    pub fn impact(&self) -> f64 {
        self.adjusted_score * self.weight
    }

    /// Direction-agnostic weighted score, the ranking key
    pub fn strength(&self) -> f64 {
        self.impact().abs()
    }

    pub fn weighted_price_move(&self) -> f64 {
        self.parsed_price_change * self.weight
    }
}

/// `None` means the item falls outside the two-day window
pub fn recency_weight(item_date: NaiveDate, run_date: NaiveDate, config: &RankingConfig) -> Option<f64> {
    if item_date == run_date {
        Some(1.0)
    } else if item_date == run_date - Duration::days(1) {
        Some(config.previous_day_weight)
    } else {
        None
    }
}

pub fn density_weight(hit_count: usize, config: &RankingConfig) -> f64 {
    1.0 + (hit_count as f64 * config.density_step).min(config.density_cap)
}

pub fn salience_weight(normalized_text: &str, keywords: &[WeightedPhrase], factor: f64) -> f64 {
    let bonus: f64 = keywords
        .iter()
        .filter(|k| {
            let phrase = normalize(&k.phrase);
            !phrase.is_empty() && normalized_text.contains(phrase.as_str())
        })
        .map(|k| k.weight * factor)
        .sum();
    1.0 + bonus
}

/// Weight a scored item, or `None` if it carries no hits or is out of window
pub fn weigh(
    item: NewsItem,
    raw_score: f64,
    hits: Vec<Hit>,
    adjusted_score: f64,
    run_date: NaiveDate,
    config: &RankingConfig,
) -> Option<ScoredItem> {
    if hits.is_empty() {
        return None;
    }
    let recency = recency_weight(item.published_at, run_date, config)?;
    let density = density_weight(hits.len(), config);
    let salience = salience_weight(
        &normalize(&item.full_text()),
        &config.salience_keywords,
        config.salience_factor,
    );
    let parsed_price_change = item.price_change();

    Some(ScoredItem {
        item,
        raw_score,
        hits,
        adjusted_score,
        recency_weight: recency,
        density_weight: density,
        salience_weight: salience,
        weight: recency * density * salience,
        parsed_price_change,
    })
}

/// Sort by strength descending (stable, so ties keep encounter order) and keep the top N
pub fn rank(mut items: Vec<ScoredItem>, top_n: usize) -> Vec<ScoredItem> {
    items.sort_by(|a, b| b.strength().total_cmp(&a.strength()));
    items.truncate(top_n);
    items
}
