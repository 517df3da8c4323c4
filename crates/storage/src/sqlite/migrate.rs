use sqlx::SqlitePool;

use super::SqliteInitError;

/// Runs the schema migration: a single-row table holding the best score.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS high_score (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            value INTEGER NOT NULL CHECK (value >= 0),
            updated_at TEXT NOT NULL
        );
        ",
    )
    .execute(pool)
    .await?;

    Ok(())
}
