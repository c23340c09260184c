//! Shared domain types for the news sentiment verdict workspace
//!
//! Every crate in the workspace speaks in these types:
//! - Token rules as they come out of the rule store
//! - News items as decoded from the daily feed
//! - The trend vocabulary and the verdict record written per target/day

mod news;
mod token;
mod verdict;

pub use news::{parse_price_change, NewsItem, RawPriceChange};
pub use token::{MatchKind, Polarity, TokenRuleRecord};
pub use verdict::{FinalCall, Target, Trend, VerdictRecord};

// Re-export chrono types used across crate boundaries
pub use chrono::{DateTime, NaiveDate, Utc};
