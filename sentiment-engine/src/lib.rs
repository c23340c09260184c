//! News Sentiment Engine
//!
//! Turns a day's news about one target into a ranked, weighted summary:
//! - Compiles polarity rules from the token store into matchers
//! - Normalizes text, dedupes, and drops items whose body never names the target
//! - Scores items lexically, then adjusts for reaffirmation and strong-move language
//! - Weighs by recency, hit density and domain salience, and keeps the top N
//! - Flags divergence between weighted sentiment and the realized price move

pub mod config;
pub mod context;
pub mod divergence;
pub mod lexicon;
pub mod normalize;
pub mod pipeline;
pub mod scorer;
pub mod weighting;

// Re-export commonly used types
pub use config::{load_config, parse_config, ContextConfig, DivergenceConfig, EngineConfig, RankingConfig, WeightedPhrase};
pub use context::adjust;
pub use divergence::{assess, classify, detect_divergence, DivergenceAssessment, DivergenceVerdict};
pub use lexicon::{load_matchers, Lexicon, Matcher};
pub use normalize::{dedupe, filter_relevant, is_relevant, normalize};
pub use pipeline::{AnalysisReport, SentimentEngine};
pub use scorer::{score, Hit};
pub use weighting::{density_weight, rank, recency_weight, salience_weight, ScoredItem};
