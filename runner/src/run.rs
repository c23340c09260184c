use anyhow::{Context, Result};
use arbitration::Arbiter;
use chrono::{NaiveDate, Utc};
use common::{FinalCall, Target, VerdictRecord};
use data_ingestion::{decode_items, window_dates, NewsFeed, TokenStore, VerdictSink};
use sentiment_engine::{load_matchers, AnalysisReport, EngineConfig, SentimentEngine};
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// What one run produced, besides the stored record
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run_id: Uuid,
    pub report: AnalysisReport,
    pub record: VerdictRecord,
}

/// One target, one date: rules in, news in, one verdict out
pub struct DailyRun {
    target: Target,
    engine: SentimentEngine,
    feed: Arc<dyn NewsFeed>,
    tokens: Arc<dyn TokenStore>,
    sink: Arc<dyn VerdictSink>,
    arbiter: Arbiter,
}

impl DailyRun {
    pub fn new(
        target: Target,
        config: EngineConfig,
        feed: Arc<dyn NewsFeed>,
        tokens: Arc<dyn TokenStore>,
        sink: Arc<dyn VerdictSink>,
        arbiter: Arbiter,
    ) -> Self {
        let engine = SentimentEngine::new(&target, config);
        Self {
            target,
            engine,
            feed,
            tokens,
            sink,
            arbiter,
        }
    }

    pub async fn execute(&self, run_date: NaiveDate) -> Result<RunOutcome> {
        let run_id = Uuid::new_v4();
        let span = info_span!("daily_run", %run_id, stock_id = %self.target.stock_id, %run_date);
        self.run(run_id, run_date).instrument(span).await
    }

    async fn run(&self, run_id: Uuid, run_date: NaiveDate) -> Result<RunOutcome> {
        info!("Starting daily run for {} ({})", self.target.name, self.target.stock_id);

        let rules = self.tokens.fetch_rules().await.context("reading token store")?;
        let lexicon = load_matchers(&rules);
        if lexicon.is_empty() {
            warn!("Token store yielded no usable rules; every item will score zero");
        }

        let dates = window_dates(run_date);
        let documents = self
            .feed
            .fetch_documents(&dates)
            .await
            .context("reading news feed")?;
        let items = decode_items(&documents);
        info!("Decoded {} news items from {} documents", items.len(), documents.len());

        let report = self.engine.analyze(items, &lexicon, run_date);
        let call = self.arbiter.arbitrate(&self.target, &report).await;
        let record = build_record(&self.target, &report, call);

        self.sink
            .write_verdict(&self.target, run_date, &record)
            .await
            .context("writing verdict")?;
        info!(
            "Verdict for {} on {}: {} ({})",
            self.target.stock_id, run_date, record.trend, record.prediction
        );

        Ok(RunOutcome {
            run_id,
            report,
            record,
        })
    }
}

pub fn build_record(target: &Target, report: &AnalysisReport, call: FinalCall) -> VerdictRecord {
    VerdictRecord {
        timestamp: Utc::now(),
        trend: call.trend,
        prediction: call.trend.native_label().to_string(),
        reason: call.reason,
        stock_id: target.stock_id.clone(),
        sentiment_score: report.aggregate_sentiment,
        divergence: report.divergence.verdict.label().to_string(),
        news_count: report.ranked.len(),
    }
}
