use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{ScoreRepository, StorageError};

use super::SqliteRepository;

#[async_trait]
impl ScoreRepository for SqliteRepository {
    async fn best_score(&self) -> Result<Option<u32>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT value
            FROM high_score
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let value: i64 = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        u32::try_from(value)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn record_best(&self, score: u32) -> Result<(), StorageError> {
        // MAX() in the upsert keeps the stored best monotonic even if a
        // stale writer hands us an older score.
        sqlx::query(
            r"
            INSERT INTO high_score (id, value, updated_at)
            VALUES (1, ?1, datetime('now'))
            ON CONFLICT(id) DO UPDATE SET
                value = MAX(high_score.value, excluded.value),
                updated_at = excluded.updated_at
            ",
        )
        .bind(i64::from(score))
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
