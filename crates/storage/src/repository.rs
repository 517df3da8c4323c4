use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the persisted best score.
///
/// The best score is a single integer under the game's namespace. It is
/// monotonic: `record_best` must never lower the stored value.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Fetch the best score, `None` when nothing was recorded yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be read.
    async fn best_score(&self) -> Result<Option<u32>, StorageError>;

    /// Record a candidate best score. Values below the stored best are
    /// ignored without error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn record_best(&self, score: u32) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    best: Arc<Mutex<Option<u32>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreRepository for InMemoryRepository {
    async fn best_score(&self) -> Result<Option<u32>, StorageError> {
        let guard = self
            .best
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(*guard)
    }

    async fn record_best(&self, score: u32) -> Result<(), StorageError> {
        let mut guard = self
            .best
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.is_none_or(|current| score > current) {
            *guard = Some(score);
        }
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub scores: Arc<dyn ScoreRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let scores: Arc<dyn ScoreRepository> = Arc::new(repo);
        Self { scores }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty_and_round_trips() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.best_score().await.unwrap(), None);

        repo.record_best(120).await.unwrap();
        assert_eq!(repo.best_score().await.unwrap(), Some(120));
    }

    #[tokio::test]
    async fn record_best_is_monotonic() {
        let repo = InMemoryRepository::new();
        repo.record_best(200).await.unwrap();
        repo.record_best(150).await.unwrap();
        assert_eq!(repo.best_score().await.unwrap(), Some(200));

        repo.record_best(260).await.unwrap();
        assert_eq!(repo.best_score().await.unwrap(), Some(260));
    }
}
