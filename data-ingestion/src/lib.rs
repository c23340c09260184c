//! Data access for the verdict engine
//!
//! The scoring core only ever sees these narrow interfaces:
//! - `NewsFeed` for the daily news documents of one target
//! - `TokenStore` for the polarity rules
//! - `VerdictSink` for the single verdict write per run
//!
//! Two backends implement all three: an in-memory store for tests and dry runs,
//! and a JSON document tree mirroring a document-store export.

pub mod connectors;
pub mod databases;
pub mod error;

pub use connectors::news_feed::{decode_items, window_dates, NewsDocument, NewsFeed};
pub use connectors::token_store::TokenStore;
pub use databases::json_docs::{CollectionNames, JsonDocumentStore};
pub use databases::memory::InMemoryStore;
pub use databases::VerdictSink;
pub use error::StoreError;
