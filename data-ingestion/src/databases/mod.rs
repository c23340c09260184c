pub mod json_docs;
pub mod memory;

use crate::error::StoreError;
use async_trait::async_trait;
use common::{NaiveDate, Target, VerdictRecord};

/// Destination for the one verdict written per run
#[async_trait]
pub trait VerdictSink: Send + Sync {
    /// Store the verdict keyed by (target, date), replacing any earlier write for that key
    async fn write_verdict(
        &self,
        target: &Target,
        date: NaiveDate,
        record: &VerdictRecord,
    ) -> Result<(), StoreError>;
}
