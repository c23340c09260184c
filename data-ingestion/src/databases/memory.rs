use super::VerdictSink;
use crate::connectors::{NewsDocument, NewsFeed, TokenStore};
use crate::error::StoreError;
use async_trait::async_trait;
use common::{NaiveDate, Target, TokenRuleRecord, VerdictRecord};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory store (for testing and dry runs)
pub struct InMemoryStore {
    documents: RwLock<HashMap<String, NewsDocument>>,
    rules: RwLock<Vec<TokenRuleRecord>>,
    verdicts: RwLock<HashMap<(String, NaiveDate), VerdictRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            rules: RwLock::new(Vec::new()),
            verdicts: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert_document(&self, doc: NewsDocument) {
        self.documents.write().await.insert(doc.doc_id.clone(), doc);
    }

    pub async fn add_rules(&self, rules: impl IntoIterator<Item = TokenRuleRecord>) {
        self.rules.write().await.extend(rules);
    }

    pub async fn verdict(&self, stock_id: &str, date: NaiveDate) -> Option<VerdictRecord> {
        self.verdicts
            .read()
            .await
            .get(&(stock_id.to_string(), date))
            .cloned()
    }

    pub async fn verdict_count(&self) -> usize {
        self.verdicts.read().await.len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsFeed for InMemoryStore {
    async fn fetch_documents(&self, dates: &[NaiveDate]) -> Result<Vec<NewsDocument>, StoreError> {
        let documents = self.documents.read().await;
        Ok(dates
            .iter()
            .filter_map(|d| documents.get(&NewsDocument::doc_id_for(*d)).cloned())
            .collect())
    }
}

#[async_trait]
impl TokenStore for InMemoryStore {
    async fn fetch_rules(&self) -> Result<Vec<TokenRuleRecord>, StoreError> {
        Ok(self.rules.read().await.clone())
    }
}

#[async_trait]
impl VerdictSink for InMemoryStore {
    async fn write_verdict(
        &self,
        target: &Target,
        date: NaiveDate,
        record: &VerdictRecord,
    ) -> Result<(), StoreError> {
        self.verdicts
            .write()
            .await
            .insert((target.stock_id.clone(), date), record.clone());
        Ok(())
    }
}
