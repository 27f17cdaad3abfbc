use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::domain::models::{MemoryLayer, MemoryTurn, NewMemoryTurn};
use crate::domain::ports::MemoryRepository;
use crate::infrastructure::database::utils::parse_datetime;

/// SQLite implementation of the append-only transcript store.
pub struct SqliteMemoryRepository {
    pool: SqlitePool,
}

impl SqliteMemoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_turn(row: &SqliteRow) -> Result<MemoryTurn> {
    let speaker: String = row.try_get("speaker")?;
    let layer: String = row.try_get("layer")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(MemoryTurn {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        speaker: speaker.parse().map_err(anyhow::Error::msg)?,
        content: row.try_get("content")?,
        layer: layer.parse().map_err(anyhow::Error::msg)?,
        created_at: parse_datetime(&created_at)?,
    })
}

#[async_trait]
impl MemoryRepository for SqliteMemoryRepository {
    async fn append(&self, turn: NewMemoryTurn) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO memories (user_id, speaker, content, layer, created_at)
            VALUES (?, ?, ?, ?, ?)
            ",
        )
        .bind(&turn.user_id)
        .bind(turn.speaker.as_str())
        .bind(&turn.content)
        .bind(turn.layer.as_str())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .context("failed to append memory turn")?;

        Ok(result.last_insert_rowid())
    }

    async fn history_ascending(
        &self,
        user_id: &str,
        layer: MemoryLayer,
        limit: Option<u32>,
    ) -> Result<Vec<MemoryTurn>> {
        // The bound applies to the newest turns; the window itself is
        // returned oldest-first for replay.
        let rows = match limit {
            Some(n) => {
                sqlx::query(
                    r"
                    SELECT id, user_id, speaker, content, layer, created_at
                    FROM (
                        SELECT id, user_id, speaker, content, layer, created_at
                        FROM memories
                        WHERE user_id = ? AND layer = ?
                        ORDER BY created_at DESC, id DESC
                        LIMIT ?
                    )
                    ORDER BY created_at ASC, id ASC
                    ",
                )
                .bind(user_id)
                .bind(layer.as_str())
                .bind(i64::from(n))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r"
                    SELECT id, user_id, speaker, content, layer, created_at
                    FROM memories
                    WHERE user_id = ? AND layer = ?
                    ORDER BY created_at ASC, id ASC
                    ",
                )
                .bind(user_id)
                .bind(layer.as_str())
                .fetch_all(&self.pool)
                .await
            }
        }
        .context("failed to query history")?;

        rows.iter().map(row_to_turn).collect()
    }

    async fn latest_assistant_with_prefix(
        &self,
        user_id: &str,
        layer: MemoryLayer,
        prefixes: &[&str],
    ) -> Result<Option<MemoryTurn>> {
        // Prefix sets are tiny (one or two markers); OR'd LIKE terms keep
        // this a single query.
        let like_terms = prefixes
            .iter()
            .map(|_| "content LIKE ? || '%'")
            .collect::<Vec<_>>()
            .join(" OR ");
        let sql = format!(
            r"
            SELECT id, user_id, speaker, content, layer, created_at
            FROM memories
            WHERE user_id = ? AND layer = ? AND speaker = 'assistant'
              AND ({like_terms})
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "
        );
        let mut query = sqlx::query(&sql).bind(user_id).bind(layer.as_str());
        for prefix in prefixes {
            query = query.bind(*prefix);
        }
        let row = query
            .fetch_optional(&self.pool)
            .await
            .context("failed to query latest marked turn")?;

        row.as_ref().map(row_to_turn).transpose()
    }

    async fn recent_user_turns(
        &self,
        user_id: &str,
        layer: MemoryLayer,
        limit: u32,
    ) -> Result<Vec<MemoryTurn>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, speaker, content, layer, created_at
            FROM memories
            WHERE user_id = ? AND layer = ? AND speaker = 'user'
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            ",
        )
        .bind(user_id)
        .bind(layer.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .context("failed to query recent user turns")?;

        rows.iter().map(row_to_turn).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Speaker;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn append_then_replay_in_order() {
        let repo = SqliteMemoryRepository::new(test_pool().await);
        repo.append(NewMemoryTurn::short("u1", Speaker::User, "hello"))
            .await
            .unwrap();
        repo.append(NewMemoryTurn::short("u1", Speaker::Assistant, "hi there"))
            .await
            .unwrap();
        repo.append(NewMemoryTurn::short("u2", Speaker::User, "other user"))
            .await
            .unwrap();

        let history = repo
            .history_ascending("u1", MemoryLayer::Short, None)
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "hello");
        assert_eq!(history[1].speaker, Speaker::Assistant);
    }

    #[tokio::test]
    async fn bounded_history_keeps_the_newest_window() {
        let repo = SqliteMemoryRepository::new(test_pool().await);
        for i in 0..5 {
            repo.append(NewMemoryTurn::short("u1", Speaker::User, format!("m{i}")))
                .await
                .unwrap();
        }
        let history = repo
            .history_ascending("u1", MemoryLayer::Short, Some(2))
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "m3");
        assert_eq!(history[1].content, "m4");
    }

    #[tokio::test]
    async fn latest_prefix_picks_newest_matching_assistant_turn() {
        let repo = SqliteMemoryRepository::new(test_pool().await);
        repo.append(NewMemoryTurn::short("u1", Speaker::Assistant, "[STIMULUS]\nfirst"))
            .await
            .unwrap();
        repo.append(NewMemoryTurn::short("u1", Speaker::User, "[STIMULUS] not assistant"))
            .await
            .unwrap();
        repo.append(NewMemoryTurn::short("u1", Speaker::Assistant, "[STIMULUS]\nsecond"))
            .await
            .unwrap();

        let found = repo
            .latest_assistant_with_prefix("u1", MemoryLayer::Short, &["[STIMULUS]"])
            .await
            .unwrap()
            .expect("marked turn found");
        assert!(found.content.ends_with("second"));
    }

    #[tokio::test]
    async fn recent_user_turns_are_newest_first_and_user_only() {
        let repo = SqliteMemoryRepository::new(test_pool().await);
        repo.append(NewMemoryTurn::short("u1", Speaker::User, "![Image](a.png)"))
            .await
            .unwrap();
        repo.append(NewMemoryTurn::short("u1", Speaker::Assistant, "looks good"))
            .await
            .unwrap();
        repo.append(NewMemoryTurn::short("u1", Speaker::User, "thanks"))
            .await
            .unwrap();

        let recent = repo
            .recent_user_turns("u1", MemoryLayer::Short, 10)
            .await
            .unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "thanks");
        assert_eq!(recent[1].content, "![Image](a.png)");
    }
}
