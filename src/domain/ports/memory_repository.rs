use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{MemoryLayer, MemoryTurn, NewMemoryTurn};

/// Repository trait for the append-only conversation transcript.
///
/// Ordering derives from timestamps (then insert id), not from any
/// sequencing by the caller, so no locking is required around appends.
#[async_trait]
pub trait MemoryRepository: Send + Sync {
    /// Append one turn. The store assigns id and timestamp.
    async fn append(&self, turn: NewMemoryTurn) -> Result<i64>;

    /// All turns for a user in one layer, ascending replay order, bounded
    /// by `limit` most-recent turns when given.
    async fn history_ascending(
        &self,
        user_id: &str,
        layer: MemoryLayer,
        limit: Option<u32>,
    ) -> Result<Vec<MemoryTurn>>;

    /// The most recent assistant turn in `layer` whose content starts with
    /// one of `prefixes`, or `None`.
    async fn latest_assistant_with_prefix(
        &self,
        user_id: &str,
        layer: MemoryLayer,
        prefixes: &[&str],
    ) -> Result<Option<MemoryTurn>>;

    /// The most recent user turns, newest first, bounded by `limit`. Used
    /// to recover the last posted image reference.
    async fn recent_user_turns(
        &self,
        user_id: &str,
        layer: MemoryLayer,
        limit: u32,
    ) -> Result<Vec<MemoryTurn>>;
}
