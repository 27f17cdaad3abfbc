use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::ports::AssetStore;

/// Filesystem asset store: staged uploads are moved into the permanent
/// directory. The source reference may be a bare file name, a staging
/// path, or a URL whose last segment names the staged file.
pub struct FsAssetStore {
    staging_dir: PathBuf,
    permanent_dir: PathBuf,
}

impl FsAssetStore {
    pub fn new(staging_dir: impl Into<PathBuf>, permanent_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            permanent_dir: permanent_dir.into(),
        }
    }

    fn staged_file(&self, source_url: &str) -> Result<PathBuf> {
        let name = source_url
            .rsplit('/')
            .next()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let Some(name) = name else {
            bail!("source reference has no file name: {source_url}");
        };
        // Reject anything that would escape the staging directory.
        if name.contains("..") || Path::new(name).is_absolute() {
            bail!("unsafe staged file name: {name}");
        }
        Ok(self.staging_dir.join(name))
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn relocate(&self, source_url: &str) -> Result<String> {
        let source = self.staged_file(source_url)?;
        if !fs::try_exists(&source).await.unwrap_or(false) {
            bail!("staged file not found: {}", source.display());
        }

        fs::create_dir_all(&self.permanent_dir)
            .await
            .context("failed to create permanent directory")?;
        let file_name = source
            .file_name()
            .context("staged path has no file name")?;
        let destination = self.permanent_dir.join(file_name);

        // Copy then remove; rename fails across filesystems.
        fs::copy(&source, &destination)
            .await
            .with_context(|| format!("failed to copy {}", source.display()))?;
        if let Err(err) = fs::remove_file(&source).await {
            debug!(source = %source.display(), error = %err, "staged file left behind");
        }

        Ok(destination.to_string_lossy().into_owned())
    }
}
