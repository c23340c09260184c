use crate::client::ChatModel;
use crate::prompt::build_prompt;
use crate::reply::parse_reply;
use common::{FinalCall, Target};
use sentiment_engine::AnalysisReport;
use tracing::{info, warn};

pub const NO_NEWS_REASON: &str = "no relevant news in the window";

/// Turns an analysis report into the day's final call
///
/// Never fails: any model or parsing problem degrades to `Unclear` with the cause as the reason.
pub struct Arbiter {
    model: Box<dyn ChatModel>,
}

impl Arbiter {
    pub fn new(model: Box<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn arbitrate(&self, target: &Target, report: &AnalysisReport) -> FinalCall {
        if !report.has_signal() {
            info!("No ranked news for {}, skipping model call", target.stock_id);
            return FinalCall::unclear(NO_NEWS_REASON);
        }

        let prompt = build_prompt(target, report);
        let outcome = match self.model.complete(&prompt).await {
            Ok(reply) => parse_reply(&reply),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(call) => {
                info!("Final call for {}: {} ({})", target.stock_id, call.trend, call.reason);
                call
            }
            Err(e) => {
                warn!("Arbitration failed for {}: {}", target.stock_id, e);
                FinalCall::unclear(format!("arbitration failure: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArbitrationError;
    use async_trait::async_trait;
    use common::{NaiveDate, NewsItem, Trend};
    use sentiment_engine::{assess, DivergenceConfig, ScoredItem};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct ScriptedModel {
        reply: Result<String, ()>,
        calls: Arc<AtomicUsize>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, prompt: &str) -> Result<String, ArbitrationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(|_| ArbitrationError::RateLimited)
        }
    }

    fn arbiter(reply: Result<&str, ()>) -> (Arbiter, Arc<AtomicUsize>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let model = ScriptedModel {
            reply: reply.map(str::to_string),
            calls: calls.clone(),
            prompts: prompts.clone(),
        };
        (Arbiter::new(Box::new(model)), calls, prompts)
    }

    fn report(ranked: Vec<ScoredItem>) -> AnalysisReport {
        let aggregate_sentiment = ranked.iter().map(ScoredItem::impact).sum();
        AnalysisReport {
            run_date: NaiveDate::from_ymd_opt(2025, 12, 2).unwrap(),
            considered: ranked.len(),
            relevant: ranked.len(),
            divergence: assess(&ranked, &DivergenceConfig::default()),
            aggregate_sentiment,
            ranked,
        }
    }

    fn one_item() -> Vec<ScoredItem> {
        vec![ScoredItem {
            item: NewsItem::new(
                "20251202",
                "news_1",
                "LiteOn profit surges",
                "LiteOn reports surging profit",
                NaiveDate::from_ymd_opt(2025, 12, 2).unwrap(),
            ),
            raw_score: 1.5,
            hits: Vec::new(),
            adjusted_score: 1.95,
            recency_weight: 1.0,
            density_weight: 1.05,
            salience_weight: 1.0,
            weight: 1.05,
            parsed_price_change: 0.0,
        }]
    }

    fn target() -> Target {
        Target::new("LiteOn", "2301")
    }

    #[tokio::test]
    async fn test_no_news_skips_model() {
        let (arbiter, calls, _) = arbiter(Ok("Trend: Up"));
        let call = arbiter.arbitrate(&target(), &report(Vec::new())).await;
        assert_eq!(call.trend, Trend::Unclear);
        assert_eq!(call.reason, NO_NEWS_REASON);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_model_reply_becomes_call() {
        let (arbiter, calls, prompts) = arbiter(Ok("Trend: Up\nReason: profit momentum"));
        let call = arbiter.arbitrate(&target(), &report(one_item())).await;
        assert_eq!(call, FinalCall::new(Trend::Up, "profit momentum"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(prompts.lock().unwrap()[0].contains("1. LiteOn profit surges"));
    }

    #[tokio::test]
    async fn test_model_error_degrades_to_unclear() {
        let (arbiter, calls, _) = arbiter(Err(()));
        let call = arbiter.arbitrate(&target(), &report(one_item())).await;
        assert_eq!(call.trend, Trend::Unclear);
        assert!(call.reason.starts_with("arbitration failure: "));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unparsable_reply_degrades_to_unclear() {
        let (arbiter, _, _) = arbiter(Ok("I would rather not say."));
        let call = arbiter.arbitrate(&target(), &report(one_item())).await;
        assert_eq!(call.trend, Trend::Unclear);
        assert!(call.reason.contains("unparsable reply"));
    }
}
