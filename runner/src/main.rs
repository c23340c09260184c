use anyhow::{Context, Result};
use arbitration::{Arbiter, ChatCompletionClient};
use data_ingestion::{InMemoryStore, JsonDocumentStore, VerdictSink};
use runner::{resolve_run_date, DailyRun, RunnerConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_CONFIG: &str = "runner.toml";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("RUNNER_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = RunnerConfig::load(&config_path)?;
    let api_key = config.api_key()?;
    let run_date = resolve_run_date(
        std::env::var("RUN_DATE").ok().as_deref(),
        chrono::Local::now().date_naive(),
    )?;

    info!("Loaded {} for {} ({})", config_path, config.target.name, config.target.stock_id);

    let store = Arc::new(JsonDocumentStore::new(
        config.store.root.clone(),
        config.store.collections(&config.target),
    ));
    let sink: Arc<dyn VerdictSink> = if config.dry_run {
        info!("Dry run: verdict stays in memory");
        Arc::new(InMemoryStore::new())
    } else {
        store.clone()
    };

    let model = ChatCompletionClient::new(config.model.clone(), api_key)
        .context("building model client")?;
    let run = DailyRun::new(
        config.target.clone(),
        config.engine.clone(),
        store.clone(),
        store,
        sink,
        Arbiter::new(Box::new(model)),
    );

    let outcome = run.execute(run_date).await?;
    if config.dry_run {
        println!("{}", serde_json::to_string_pretty(&outcome.record)?);
    }
    info!("Run {} finished", outcome.run_id);

    Ok(())
}
