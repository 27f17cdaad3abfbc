use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::domain::models::{ProgressRecord, SurveyDefinition, SurveyKind};
use crate::domain::ports::ProgressRepository;

/// SQLite implementation of the survey progress store.
///
/// Write-once slots are enforced by the `(user_id, survey_kind, slot_key)`
/// primary key with `ON CONFLICT DO NOTHING`: a racing duplicate write is
/// silently ignored and the first stored value survives.
pub struct SqliteProgressRepository {
    pool: SqlitePool,
}

impl SqliteProgressRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressRepository for SqliteProgressRepository {
    async fn ensure_row(&self, user_id: &str, kind: SurveyKind) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r"
            INSERT INTO survey_progress (user_id, survey_kind, is_complete, created_at, updated_at)
            VALUES (?, ?, 0, ?, ?)
            ON CONFLICT (user_id, survey_kind) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .context("failed to ensure progress row")?;
        Ok(())
    }

    async fn get_row(
        &self,
        user_id: &str,
        definition: &SurveyDefinition,
    ) -> Result<Option<ProgressRecord>> {
        let header = sqlx::query(
            r"
            SELECT is_complete FROM survey_progress
            WHERE user_id = ? AND survey_kind = ?
            ",
        )
        .bind(user_id)
        .bind(definition.kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .context("failed to query progress row")?;

        let Some(header) = header else {
            return Ok(None);
        };
        let is_complete: i64 = header.try_get("is_complete")?;

        let score_rows = sqlx::query(
            r"
            SELECT slot_key, score FROM survey_scores
            WHERE user_id = ? AND survey_kind = ?
            ",
        )
        .bind(user_id)
        .bind(definition.kind.as_str())
        .fetch_all(&self.pool)
        .await
        .context("failed to query score slots")?;

        let mut stored: HashMap<String, i32> = HashMap::new();
        for row in &score_rows {
            let key: String = row.try_get("slot_key")?;
            let score: i64 = row.try_get("score")?;
            stored.insert(key, i32::try_from(score).unwrap_or_default());
        }

        let mut record = ProgressRecord::empty(user_id, definition);
        record.is_complete = is_complete != 0;
        for item in &definition.items {
            if let Some(score) = stored.get(&item.slot_key) {
                record.slots.insert(item.slot_key.clone(), Some(*score));
            }
        }
        Ok(Some(record))
    }

    async fn write_slot(
        &self,
        user_id: &str,
        kind: SurveyKind,
        slot_key: &str,
        value: i32,
    ) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO survey_scores (user_id, survey_kind, slot_key, score, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (user_id, survey_kind, slot_key) DO NOTHING
            ",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(slot_key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .context("failed to write score slot")?;
        Ok(())
    }

    async fn mark_complete(&self, user_id: &str, kind: SurveyKind) -> Result<()> {
        sqlx::query(
            r"
            UPDATE survey_progress
            SET is_complete = 1, updated_at = ?
            WHERE user_id = ? AND survey_kind = ?
            ",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(user_id)
        .bind(kind.as_str())
        .execute(&self.pool)
        .await
        .context("failed to mark survey complete")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_repo() -> SqliteProgressRepository {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        SqliteProgressRepository::new(pool)
    }

    fn def() -> SurveyDefinition {
        SurveyDefinition::from_items(
            SurveyKind::BigFive,
            &[("a.", false), ("b.", false), ("c.", false)],
        )
    }

    #[tokio::test]
    async fn ensure_row_is_idempotent() {
        let repo = test_repo().await;
        repo.ensure_row("u1", SurveyKind::BigFive).await.unwrap();
        repo.ensure_row("u1", SurveyKind::BigFive).await.unwrap();
        let record = repo.get_row("u1", &def()).await.unwrap().unwrap();
        assert!(!record.is_complete);
        assert_eq!(record.first_empty_position(&def()), 1);
    }

    #[tokio::test]
    async fn missing_row_reads_as_none() {
        let repo = test_repo().await;
        assert!(repo.get_row("nobody", &def()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn first_slot_write_wins() {
        let repo = test_repo().await;
        repo.ensure_row("u1", SurveyKind::BigFive).await.unwrap();
        repo.write_slot("u1", SurveyKind::BigFive, "q2", 4).await.unwrap();
        // A duplicate write must not replace the stored value.
        repo.write_slot("u1", SurveyKind::BigFive, "q2", 1).await.unwrap();

        let record = repo.get_row("u1", &def()).await.unwrap().unwrap();
        assert_eq!(record.slot("q2"), Some(4));
    }

    #[tokio::test]
    async fn fill_order_and_completion() {
        let repo = test_repo().await;
        let def = def();
        repo.ensure_row("u1", SurveyKind::BigFive).await.unwrap();

        repo.write_slot("u1", SurveyKind::BigFive, "q1", 3).await.unwrap();
        let record = repo.get_row("u1", &def).await.unwrap().unwrap();
        assert_eq!(record.first_empty_position(&def), 2);

        repo.write_slot("u1", SurveyKind::BigFive, "q3", 5).await.unwrap();
        let record = repo.get_row("u1", &def).await.unwrap().unwrap();
        assert_eq!(record.first_empty_position(&def), 2);
        assert!(!record.is_fully_filled(&def));

        repo.write_slot("u1", SurveyKind::BigFive, "q2", 2).await.unwrap();
        let record = repo.get_row("u1", &def).await.unwrap().unwrap();
        assert!(record.is_fully_filled(&def));
        assert_eq!(record.first_empty_position(&def), 4);

        repo.mark_complete("u1", SurveyKind::BigFive).await.unwrap();
        let record = repo.get_row("u1", &def).await.unwrap().unwrap();
        assert!(record.is_complete);
    }
}
