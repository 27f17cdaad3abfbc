use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::domain::models::{ModerationStatus, PhotoAsset, PhotoRole};
use crate::domain::ports::PhotoRepository;
use crate::infrastructure::database::utils::parse_datetime;

/// SQLite implementation of the photo asset store. This side only inserts
/// pending rows and reads; the moderation worker terminalizes statuses
/// out-of-band on the same table.
pub struct SqlitePhotoRepository {
    pool: SqlitePool,
}

impl SqlitePhotoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_asset(row: &SqliteRow) -> Result<PhotoAsset> {
    let role: String = row.try_get("role")?;
    let status: String = row.try_get("status")?;
    let vectorized: i64 = row.try_get("vectorized")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(PhotoAsset {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        storage_path: row.try_get("storage_path")?,
        role: role.parse().map_err(anyhow::Error::msg)?,
        status: status.parse().map_err(anyhow::Error::msg)?,
        vectorized: vectorized != 0,
        created_at: parse_datetime(&created_at)?,
    })
}

#[async_trait]
impl PhotoRepository for SqlitePhotoRepository {
    async fn insert_if_absent(
        &self,
        user_id: &str,
        storage_path: &str,
        role: PhotoRole,
    ) -> Result<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO photos (user_id, storage_path, role, status, vectorized, created_at)
            VALUES (?, ?, ?, 'pending', 0, ?)
            ON CONFLICT (user_id, storage_path) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(storage_path)
        .bind(role.as_str())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .context("failed to insert photo asset")?;

        Ok(result.rows_affected() > 0)
    }

    async fn latest_status(&self, user_id: &str) -> Result<Option<ModerationStatus>> {
        let row = sqlx::query(
            r"
            SELECT status FROM photos
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to query latest photo status")?;

        row.map(|r| {
            let status: String = r.try_get("status")?;
            status.parse().map_err(anyhow::Error::msg)
        })
        .transpose()
    }

    async fn latest_asset(&self, user_id: &str) -> Result<Option<PhotoAsset>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, storage_path, role, status, vectorized, created_at
            FROM photos
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to query latest photo asset")?;

        row.as_ref().map(row_to_asset).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_repo() -> SqlitePhotoRepository {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        SqlitePhotoRepository::new(pool)
    }

    #[tokio::test]
    async fn duplicate_path_is_not_reinserted() {
        let repo = test_repo().await;
        assert!(repo
            .insert_if_absent("u1", "/photos/u1/a.png", PhotoRole::SelfPortrait)
            .await
            .unwrap());
        assert!(!repo
            .insert_if_absent("u1", "/photos/u1/a.png", PhotoRole::SelfPortrait)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn new_assets_start_pending() {
        let repo = test_repo().await;
        assert_eq!(repo.latest_status("u1").await.unwrap(), None);

        repo.insert_if_absent("u1", "/photos/u1/a.png", PhotoRole::SelfPortrait)
            .await
            .unwrap();
        assert_eq!(
            repo.latest_status("u1").await.unwrap(),
            Some(ModerationStatus::Pending)
        );

        let asset = repo.latest_asset("u1").await.unwrap().unwrap();
        assert_eq!(asset.storage_path, "/photos/u1/a.png");
        assert!(!asset.vectorized);
    }
}
