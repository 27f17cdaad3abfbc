use anyhow::Result;
use async_trait::async_trait;

/// Storage-side move of an uploaded asset from the staging area to the
/// permanent area. Bucket mechanics beyond this one operation are out of
/// scope; implementations only need to resolve a staged source reference
/// and produce the destination path the asset now lives at.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Relocate the asset `source_url` points at. Returns the permanent
    /// storage path. Errors are transport-level (missing source, copy
    /// failure); the caller decides whether they are fatal.
    async fn relocate(&self, source_url: &str) -> Result<String>;
}
