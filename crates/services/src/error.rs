//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionError;
use storage::repository::StorageError;

/// Errors emitted by the game session services.
///
/// User-level oddities (empty input, submitting while not answerable,
/// cancelling an unarmed timer) are silent no-ops, not errors; this
/// enum only covers real failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
