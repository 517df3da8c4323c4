use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Cell, Grid, Topic};

/// Bounds for memory reveal sequences.
pub const MEMORY_SEQ_MIN_LEN: usize = 3;
pub const MEMORY_SEQ_MAX_LEN: usize = 6;
pub const MEMORY_VALUE_MIN: i64 = 3;
pub const MEMORY_VALUE_MAX: i64 = 19;

/// Number of multiple-choice options on a puzzle question.
pub const PUZZLE_OPTION_COUNT: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("tip text must not be empty")]
    EmptyTip,

    #[error("reveal sequence length {len} outside {MEMORY_SEQ_MIN_LEN}..={MEMORY_SEQ_MAX_LEN}")]
    BadSequenceLength { len: usize },

    #[error("reveal value {value} outside {MEMORY_VALUE_MIN}..={MEMORY_VALUE_MAX}")]
    SequenceValueOutOfRange { value: i64 },

    #[error("answer {answer} does not equal sequence sum {sum}")]
    SequenceSumMismatch { answer: i64, sum: i64 },

    #[error("puzzle grid must have exactly one blank cell, found {count}")]
    BadBlankCount { count: usize },

    #[error("puzzle options must contain the answer exactly once")]
    AnswerNotInOptions,

    #[error("puzzle options must be distinct")]
    DuplicateOption,

    #[error("puzzle decoy {value} must be positive")]
    NonPositiveDecoy { value: i64 },
}

/// Identifies which generation rule produced a question.
///
/// Only used to pick tip text and for diagnostics; no behavioral
/// branching happens on the variant elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    AddCompensation,
    SubFrom100,
    MulBy9,
    MulBy11,
    SquareEnding5,
    AddGeneral,
    SubGeneral,
    MulGeneral,
    DivExact,
    SquareAny,
    Cube,
    SqrtPerfect,
    MemorySum,
    Puzzle,
}

/// One generated question, owned by the session for a single round.
///
/// Never mutated after creation; the reveal sequence is consumed by the
/// reveal task and the question is replaced when the next round begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    topic: Topic,
    variant: Variant,
    prompt: String,
    answer: i64,
    tip: String,
    reveal: Option<Vec<i64>>,
    grid: Option<Grid>,
    options: Option<[i64; PUZZLE_OPTION_COUNT]>,
}

impl Question {
    /// A regular prompt-and-type question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyTip` if the tip is blank.
    pub fn plain(
        topic: Topic,
        variant: Variant,
        prompt: impl Into<String>,
        answer: i64,
        tip: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let tip = tip.into();
        if tip.trim().is_empty() {
            return Err(QuestionError::EmptyTip);
        }
        Ok(Self {
            topic,
            variant,
            prompt: prompt.into(),
            answer,
            tip,
            reveal: None,
            grid: None,
            options: None,
        })
    }

    /// A memory question: the sequence is revealed one number at a
    /// time, then the player is asked for the sum.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the sequence violates the length or
    /// value bounds, or the answer is not the sequence sum.
    pub fn memory(reveal: Vec<i64>, tip: impl Into<String>) -> Result<Self, QuestionError> {
        let len = reveal.len();
        if !(MEMORY_SEQ_MIN_LEN..=MEMORY_SEQ_MAX_LEN).contains(&len) {
            return Err(QuestionError::BadSequenceLength { len });
        }
        if let Some(&value) = reveal
            .iter()
            .find(|v| !(MEMORY_VALUE_MIN..=MEMORY_VALUE_MAX).contains(*v))
        {
            return Err(QuestionError::SequenceValueOutOfRange { value });
        }
        let sum: i64 = reveal.iter().sum();

        let tip = tip.into();
        if tip.trim().is_empty() {
            return Err(QuestionError::EmptyTip);
        }

        Ok(Self {
            topic: Topic::Memory,
            variant: Variant::MemorySum,
            // Prompt stays empty until the reveal phase completes.
            prompt: String::new(),
            answer: sum,
            tip,
            reveal: Some(reveal),
            grid: None,
            options: None,
        })
    }

    /// A 3×3 pattern puzzle with four answer options.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the grid does not have exactly one
    /// blank, the options are not distinct, or none of them is the
    /// answer.
    pub fn puzzle(
        grid: Grid,
        options: [i64; PUZZLE_OPTION_COUNT],
        answer: i64,
        tip: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let blank_count = grid.blank_count();
        if blank_count != 1 {
            return Err(QuestionError::BadBlankCount { count: blank_count });
        }
        let matches = options.iter().filter(|&&o| o == answer).count();
        if matches != 1 {
            return Err(QuestionError::AnswerNotInOptions);
        }
        for (i, &a) in options.iter().enumerate() {
            if options[i + 1..].contains(&a) {
                return Err(QuestionError::DuplicateOption);
            }
            if a != answer && a <= 0 {
                return Err(QuestionError::NonPositiveDecoy { value: a });
            }
        }

        let tip = tip.into();
        if tip.trim().is_empty() {
            return Err(QuestionError::EmptyTip);
        }

        Ok(Self {
            topic: Topic::Puzzle,
            variant: Variant::Puzzle,
            prompt: String::new(),
            answer,
            tip,
            reveal: None,
            grid: Some(grid),
            options: Some(options),
        })
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> i64 {
        self.answer
    }

    #[must_use]
    pub fn tip(&self) -> &str {
        &self.tip
    }

    #[must_use]
    pub fn reveal(&self) -> Option<&[i64]> {
        self.reveal.as_deref()
    }

    #[must_use]
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> Option<&[i64; PUZZLE_OPTION_COUNT]> {
        self.options.as_ref()
    }

    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.reveal.is_some()
    }

    #[must_use]
    pub fn is_puzzle(&self) -> bool {
        self.options.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Grid {
        Grid::new([
            [Cell::Value(5), Cell::Value(7), Cell::Value(8)],
            [Cell::Value(6), Cell::Value(4), Cell::Value(10)],
            [Cell::Value(9), Cell::Value(3), Cell::Blank],
        ])
    }

    #[test]
    fn plain_rejects_empty_tip() {
        let err = Question::plain(Topic::Add, Variant::AddGeneral, "1 + 1 = ?", 2, "  ");
        assert_eq!(err.unwrap_err(), QuestionError::EmptyTip);
    }

    #[test]
    fn memory_answer_is_sequence_sum() {
        let q = Question::memory(vec![5, 8, 12], "keep a running total").unwrap();
        assert_eq!(q.answer(), 25);
        assert_eq!(q.reveal(), Some(&[5, 8, 12][..]));
        assert!(q.prompt().is_empty());
        assert!(q.is_memory());
    }

    #[test]
    fn memory_enforces_bounds() {
        assert_eq!(
            Question::memory(vec![5, 8], "tip").unwrap_err(),
            QuestionError::BadSequenceLength { len: 2 }
        );
        assert_eq!(
            Question::memory(vec![5, 8, 20], "tip").unwrap_err(),
            QuestionError::SequenceValueOutOfRange { value: 20 }
        );
    }

    #[test]
    fn puzzle_requires_answer_among_distinct_options() {
        let grid = sample_grid();
        assert!(Question::puzzle(grid, [12, 7, 9, 4], 12, "rows sum").is_ok());
        assert_eq!(
            Question::puzzle(grid, [7, 9, 4, 5], 12, "rows sum").unwrap_err(),
            QuestionError::AnswerNotInOptions
        );
        assert_eq!(
            Question::puzzle(grid, [12, 7, 7, 4], 12, "rows sum").unwrap_err(),
            QuestionError::DuplicateOption
        );
    }

    #[test]
    fn puzzle_requires_single_blank() {
        let grid = Grid::new([
            [Cell::Blank, Cell::Value(7), Cell::Value(8)],
            [Cell::Value(6), Cell::Value(4), Cell::Value(10)],
            [Cell::Value(9), Cell::Value(3), Cell::Blank],
        ]);
        assert_eq!(
            Question::puzzle(grid, [12, 7, 9, 4], 12, "rows sum").unwrap_err(),
            QuestionError::BadBlankCount { count: 2 }
        );
    }
}
