use crate::error::StoreError;
use async_trait::async_trait;
use common::TokenRuleRecord;

/// Source of polarity rules
///
/// Implementations return every rule document they can decode, in store order.
/// A single undecodable document is dropped by the implementation; only a
/// failure to read the collection as a whole is an error.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn fetch_rules(&self) -> Result<Vec<TokenRuleRecord>, StoreError>;
}
