use quiz_core::model::Question;

use super::Screen;

/// Engine-to-renderer notifications.
///
/// The UI consumes these from an unbounded channel and projects them
/// into display state; it never reaches into the engine directly.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ScreenChanged(Screen),
    BestScore(u32),
    RoundStarted {
        round: u64,
        question: Question,
        needs_reveal: bool,
    },
    /// One number of a memory sequence is on display.
    RevealStep { round: u64, value: i64 },
    /// The reveal finished; the question is answerable and timed now.
    RevealEnded { round: u64 },
    /// Countdown refresh, milliseconds left in the budget.
    Tick { remaining_ms: u64 },
    Judged {
        correct: bool,
        expected: i64,
        awarded: u32,
        score: u32,
        streak: u32,
    },
    TimedOut { expected: i64 },
}
