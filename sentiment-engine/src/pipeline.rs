//! Analysis pipeline: dedupe, filter, score, adjust, weigh, rank, assess

use crate::config::EngineConfig;
use crate::context::adjust;
use crate::divergence::{assess, DivergenceAssessment};
use crate::lexicon::Lexicon;
use crate::normalize::{dedupe, filter_relevant};
use crate::scorer::{score, Hit};
use crate::weighting::{rank, weigh, ScoredItem};
use chrono::NaiveDate;
use common::{NewsItem, Target};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything one run learned about the day's news
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run_date: NaiveDate,
    /// Items handed in by the feed
    pub considered: usize,
    /// Items left after dedupe and the relevance filter
    pub relevant: usize,
    /// Top-N by weighted absolute impact
    pub ranked: Vec<ScoredItem>,
    /// Sum of weighted scores over the ranked set
    pub aggregate_sentiment: f64,
    pub divergence: DivergenceAssessment,
}

impl AnalysisReport {
    pub fn has_signal(&self) -> bool {
        !self.ranked.is_empty()
    }
}

/// Scores one target's news against a loaded lexicon
pub struct SentimentEngine {
    config: EngineConfig,
    aliases: Vec<String>,
}

impl SentimentEngine {
    pub fn new(target: &Target, config: EngineConfig) -> Self {
        Self {
            config,
            aliases: target.alias_set(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Score a single item without weighting (no recency cutoff, zero hits allowed)
    pub fn score_item(&self, item: &NewsItem, lexicon: &Lexicon) -> (f64, Vec<Hit>, f64) {
        let text = item.full_text();
        let (raw, hits) = score(&text, lexicon, &self.aliases);
        let adjusted = adjust(&text, raw, &self.config.context);
        (raw, hits, adjusted)
    }

    pub fn analyze(&self, items: Vec<NewsItem>, lexicon: &Lexicon, run_date: NaiveDate) -> AnalysisReport {
        let considered = items.len();
        let relevant_items = filter_relevant(dedupe(items), &self.aliases);
        let relevant = relevant_items.len();

        let mut scored = Vec::with_capacity(relevant);
        for item in relevant_items {
            let (raw, hits, adjusted) = self.score_item(&item, lexicon);
            let key = format!("{}/{}", item.source_doc_id, item.field_key);
            match weigh(item, raw, hits, adjusted, run_date, &self.config.ranking) {
                Some(s) => {
                    debug!(
                        "{}: raw {:.3} adjusted {:.3} weight {:.3} ({} hits)",
                        key,
                        s.raw_score,
                        s.adjusted_score,
                        s.weight,
                        s.hits.len()
                    );
                    scored.push(s);
                }
                None => debug!("{}: no hits or outside window, discarded", key),
            }
        }

        let ranked = rank(scored, self.config.ranking.top_n);
        let aggregate_sentiment: f64 = ranked.iter().map(ScoredItem::impact).sum();
        let divergence = assess(&ranked, &self.config.divergence);

        info!(
            "Analysis {}: {} considered, {} relevant, {} ranked, aggregate {:.3}, {}",
            run_date,
            considered,
            relevant,
            ranked.len(),
            aggregate_sentiment,
            divergence.verdict.label()
        );

        AnalysisReport {
            run_date,
            considered,
            relevant,
            ranked,
            aggregate_sentiment,
            divergence,
        }
    }
}
