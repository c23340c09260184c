use super::VerdictSink;
use crate::connectors::{NewsDocument, NewsFeed, TokenStore};
use crate::error::StoreError;
use async_trait::async_trait;
use common::{NaiveDate, Target, TokenRuleRecord, VerdictRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Collection names inside the document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNames {
    pub news: String,
    pub tokens: String,
    pub verdicts: String,
}

impl CollectionNames {
    /// Default layout for a target: `NEWS_<name>`, `TOKENS`, `VERDICTS`
    pub fn for_target(target_name: &str) -> Self {
        Self {
            news: format!("NEWS_{}", target_name),
            tokens: "TOKENS".to_string(),
            verdicts: "VERDICTS".to_string(),
        }
    }
}

/// Document store laid out as `<root>/<collection>/<doc_id>.json`
///
/// Mirrors a document-store export: one JSON object per document. Token rule
/// documents may also hold an array of rules.
pub struct JsonDocumentStore {
    root: PathBuf,
    collections: CollectionNames,
}

impl JsonDocumentStore {
    pub fn new(root: impl Into<PathBuf>, collections: CollectionNames) -> Self {
        Self {
            root: root.into(),
            collections,
        }
    }

    fn collection_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn verdict_path(&self, target: &Target, date: NaiveDate) -> PathBuf {
        self.collection_dir(&self.collections.verdicts)
            .join(format!("{}_{}.json", target.stock_id, NewsDocument::doc_id_for(date)))
    }
}

async fn read_json(path: &Path) -> Result<Option<Value>, StoreError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            doc: path.display().to_string(),
            source,
        })
}

#[async_trait]
impl NewsFeed for JsonDocumentStore {
    async fn fetch_documents(&self, dates: &[NaiveDate]) -> Result<Vec<NewsDocument>, StoreError> {
        let dir = self.collection_dir(&self.collections.news);
        let mut documents = Vec::new();

        for date in dates {
            let doc_id = NewsDocument::doc_id_for(*date);
            let path = dir.join(format!("{}.json", doc_id));

            // A broken day document costs that day only
            match read_json(&path).await {
                Ok(Some(Value::Object(fields))) => documents.push(NewsDocument::new(doc_id, fields)),
                Ok(Some(_)) => warn!("Skipping news document {}: not a JSON object", path.display()),
                Ok(None) => debug!("No news document for {}", doc_id),
                Err(e) => warn!("Skipping news document: {}", e),
            }
        }

        info!("Loaded {} news documents from {}", documents.len(), dir.display());
        Ok(documents)
    }
}

#[async_trait]
impl TokenStore for JsonDocumentStore {
    async fn fetch_rules(&self) -> Result<Vec<TokenRuleRecord>, StoreError> {
        let dir = self.collection_dir(&self.collections.tokens);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::MissingCollection(dir));
            }
            Err(e) => return Err(StoreError::io(&dir, e)),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| StoreError::io(&dir, e))? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut rules = Vec::new();
        for path in paths {
            let value = match read_json(&path).await {
                Ok(Some(value)) => value,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping token document: {}", e);
                    continue;
                }
            };
            let doc_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            rules.extend(decode_rule_document(&doc_id, value));
        }

        info!("Loaded {} token rules from {}", rules.len(), dir.display());
        Ok(rules)
    }
}

fn decode_rule_document(doc_id: &str, value: Value) -> Vec<TokenRuleRecord> {
    let candidates = match value {
        Value::Array(values) => values,
        other => vec![other],
    };

    candidates
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| match serde_json::from_value::<TokenRuleRecord>(v) {
            Ok(mut rule) => {
                if rule.id.is_none() {
                    rule.id = Some(format!("{}#{}", doc_id, i));
                }
                Some(rule)
            }
            Err(e) => {
                warn!("Skipping token rule {}#{}: {}", doc_id, i, e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl VerdictSink for JsonDocumentStore {
    async fn write_verdict(
        &self,
        target: &Target,
        date: NaiveDate,
        record: &VerdictRecord,
    ) -> Result<(), StoreError> {
        let path = self.verdict_path(target, date);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let body = serde_json::to_string_pretty(record).map_err(|source| StoreError::Encode {
            doc: path.display().to_string(),
            source,
        })?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        info!("Verdict written to {}", path.display());
        Ok(())
    }
}
