use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{ModerationStatus, PhotoAsset, PhotoRole};

/// Repository trait for photo assets.
///
/// Rows are created by the orchestrator with status `pending`; the external
/// moderation worker terminalizes them out-of-band. This side only ever
/// inserts and reads.
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Insert a pending asset unless one already exists for
    /// `(user, storage_path)`. Returns whether a row was inserted.
    async fn insert_if_absent(
        &self,
        user_id: &str,
        storage_path: &str,
        role: PhotoRole,
    ) -> Result<bool>;

    /// Status of the most recently created asset for this user, or `None`
    /// when the user has no assets.
    async fn latest_status(&self, user_id: &str) -> Result<Option<ModerationStatus>>;

    /// The most recently created asset, or `None`.
    async fn latest_asset(&self, user_id: &str) -> Result<Option<PhotoAsset>>;
}
