use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use common::{NewsItem, RawPriceChange};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

const DOC_ID_FORMAT: &str = "%Y%m%d";

/// One daily document of the news feed
///
/// Keyed by date (`YYYYMMDD`); each field holds one news record with
/// `title`, `content` (or `summary`), optional `published_time` and
/// optional `price_change`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsDocument {
    pub doc_id: String,
    pub fields: Map<String, Value>,
}

impl NewsDocument {
    pub fn new(doc_id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            doc_id: doc_id.into(),
            fields,
        }
    }

    /// Build a daily document from plain records, keyed `news_1..news_n`
    pub fn from_records(doc_id: impl Into<String>, records: Vec<Value>) -> Self {
        let fields = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| (format!("news_{}", i + 1), record))
            .collect();
        Self::new(doc_id, fields)
    }

    pub fn doc_id_for(date: NaiveDate) -> String {
        date.format(DOC_ID_FORMAT).to_string()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.doc_id, DOC_ID_FORMAT).ok()
    }
}

/// Daily news documents for one target
#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// Fetch the documents for the given dates, in the order given.
    /// Dates without a document are simply absent from the result.
    async fn fetch_documents(&self, dates: &[NaiveDate]) -> Result<Vec<NewsDocument>, StoreError>;
}

/// The run date followed by the immediately preceding day
pub fn window_dates(run_date: NaiveDate) -> Vec<NaiveDate> {
    vec![run_date, run_date - Duration::days(1)]
}

/// Turn feed documents into news items, skipping anything malformed
///
/// Fields are visited in natural key order (`news_2` before `news_10`).
pub fn decode_items(documents: &[NewsDocument]) -> Vec<NewsItem> {
    let mut items = Vec::new();

    for doc in documents {
        let doc_date = doc.date();
        let mut fields: Vec<(&String, &Value)> = doc.fields.iter().collect();
        fields.sort_by_key(|(k, _)| natural_key(k));

        for (key, value) in fields {
            match decode_field(&doc.doc_id, doc_date, key, value) {
                Ok(item) => items.push(item),
                Err(reason) => warn!("Skipping {}/{}: {}", doc.doc_id, key, reason),
            }
        }
    }

    debug!("Decoded {} news items from {} documents", items.len(), documents.len());
    items
}

fn decode_field(
    doc_id: &str,
    doc_date: Option<NaiveDate>,
    key: &str,
    value: &Value,
) -> Result<NewsItem, String> {
    let obj = value.as_object().ok_or("field is not a news record")?;

    let content = obj
        .get("content")
        .or_else(|| obj.get("summary"))
        .and_then(Value::as_str)
        .ok_or("missing content")?;
    let title = match obj.get("title") {
        Some(Value::String(s)) => s.as_str(),
        None | Some(Value::Null) => "",
        Some(_) => return Err("title is not a string".to_string()),
    };

    let published_at = obj
        .get("published_time")
        .and_then(Value::as_str)
        .and_then(parse_published_date)
        .or(doc_date)
        .ok_or("no usable date in field or document id")?;

    let mut item = NewsItem::new(doc_id, key, title, content, published_at);
    match obj.get("price_change") {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_f64() {
                item = item.with_price_change(RawPriceChange::Number(v));
            }
        }
        Some(Value::String(s)) => item = item.with_price_change(RawPriceChange::Text(s.clone())),
        _ => {}
    }

    Ok(item)
}

fn parse_published_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

fn natural_key(key: &str) -> (String, u64, String) {
    let digits = key.chars().rev().take_while(|c| c.is_ascii_digit()).count();
    let (prefix, suffix) = key.split_at(key.len() - digits);
    let number = suffix.parse::<u64>().unwrap_or(0);
    (prefix.to_string(), number, key.to_string())
}
