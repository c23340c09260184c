//! Runner configuration (TOML)

use arbitration::ModelConfig;
use chrono::NaiveDate;
use common::Target;
use data_ingestion::CollectionNames;
use sentiment_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("API key env var {0} is not set")]
    MissingApiKey(String),

    #[error("RUN_DATE {0:?} is not a YYYY-MM-DD or YYYYMMDD date")]
    InvalidRunDate(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub root: PathBuf,
    /// Defaults to `NEWS_<target name>`
    pub news_collection: Option<String>,
    pub token_collection: String,
    pub verdict_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
            news_collection: None,
            token_collection: "TOKENS".to_string(),
            verdict_collection: "VERDICTS".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn collections(&self, target: &Target) -> CollectionNames {
        let defaults = CollectionNames::for_target(&target.name);
        CollectionNames {
            news: self.news_collection.clone().unwrap_or(defaults.news),
            tokens: self.token_collection.clone(),
            verdicts: self.verdict_collection.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    pub target: Target,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    /// Keep the verdict in memory and print it instead of writing it
    #[serde(default)]
    pub dry_run: bool,
}

impl RunnerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn api_key(&self) -> Result<String, ConfigError> {
        api_key_from(&self.model.api_key_env, std::env::var(&self.model.api_key_env).ok())
    }
}

fn api_key_from(var: &str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingApiKey(var.to_string())),
    }
}

/// `RUN_DATE` override, or `today` when unset
pub fn resolve_run_date(override_value: Option<&str>, today: NaiveDate) -> Result<NaiveDate, ConfigError> {
    let value = match override_value.map(str::trim) {
        None | Some("") => return Ok(today),
        Some(v) => v,
    };
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .map_err(|_| ConfigError::InvalidRunDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_parses() {
        let config = RunnerConfig::parse(include_str!("../runner.example.toml")).unwrap();
        assert_eq!(config.target.stock_id, "2301");
        assert_eq!(config.target.aliases.len(), 3);
        assert_eq!(config.model.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.engine.ranking.top_n, 10);
        // untouched sections keep their defaults
        assert_eq!(config.engine.ranking.previous_day_weight, 0.85);
        assert!(!config.dry_run);

        let collections = config.store.collections(&config.target);
        assert_eq!(collections.news, "NEWS_光寶科");
        assert_eq!(collections.verdicts, "VERDICTS");
    }

    #[test]
    fn test_minimal_config() {
        let config = RunnerConfig::parse("[target]\nname = \"LiteOn\"\nstock_id = \"2301\"\n").unwrap();
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.model, ModelConfig::default());
        assert!(config.target.aliases.is_empty());
    }

    #[test]
    fn test_missing_target_is_rejected() {
        assert!(matches!(
            RunnerConfig::parse("dry_run = true\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_api_key_must_be_present() {
        assert!(matches!(
            api_key_from("GROQ_API_KEY", None),
            Err(ConfigError::MissingApiKey(v)) if v == "GROQ_API_KEY"
        ));
        assert!(api_key_from("GROQ_API_KEY", Some("  ".to_string())).is_err());
        assert_eq!(api_key_from("K", Some("abc\n".to_string())).unwrap(), "abc");
    }

    #[test]
    fn test_run_date_override() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 2).unwrap();
        assert_eq!(resolve_run_date(None, today).unwrap(), today);
        assert_eq!(resolve_run_date(Some(""), today).unwrap(), today);
        assert_eq!(
            resolve_run_date(Some("2025-11-28"), today).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 28).unwrap()
        );
        assert_eq!(
            resolve_run_date(Some("20251128"), today).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 28).unwrap()
        );
        assert!(matches!(
            resolve_run_date(Some("yesterday"), today),
            Err(ConfigError::InvalidRunDate(_))
        ));
    }
}
