use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{ProgressRecord, SurveyDefinition, SurveyKind};

/// Repository trait for per-user survey progress.
///
/// Concurrent turns for the same user are not prevented upstream, so every
/// mutation here is check-before-write and tolerates a stale check:
/// `ensure_row` swallows the duplicate-insert race, and `write_slot` lets
/// the first write win.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Insert the progress row if absent. Idempotent; a concurrent insert
    /// of the same row is not an error.
    async fn ensure_row(&self, user_id: &str, kind: SurveyKind) -> Result<()>;

    /// Materialize the record with one entry per catalog slot (empty where
    /// unwritten). Returns `None` when the row has never been created.
    async fn get_row(
        &self,
        user_id: &str,
        definition: &SurveyDefinition,
    ) -> Result<Option<ProgressRecord>>;

    /// Write one derived score. Write-once: if the slot already holds a
    /// value the call is a no-op and the stored value is untouched. The
    /// caller only invokes this after observing the slot empty; the
    /// adapter adds no further guarantee beyond first-write-wins.
    async fn write_slot(
        &self,
        user_id: &str,
        kind: SurveyKind,
        slot_key: &str,
        value: i32,
    ) -> Result<()>;

    /// Set the completion flag. Called once all slots are observed filled.
    async fn mark_complete(&self, user_id: &str, kind: SurveyKind) -> Result<()>;
}
