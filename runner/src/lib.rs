//! Daily verdict run: wires the stores, the engine and the arbiter together

pub mod config;
pub mod run;

pub use config::{resolve_run_date, ConfigError, RunnerConfig, StoreConfig};
pub use run::{build_record, DailyRun, RunOutcome};
