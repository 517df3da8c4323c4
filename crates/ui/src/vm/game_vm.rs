use quiz_core::model::Question;
use quiz_core::scoring::QUESTION_TIME_MS;
use services::{GameEvent, Screen};

/// What the player is told after a round is judged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub expected: i64,
    pub awarded: u32,
}

/// Render-ready projection of the event stream. Pure state, no I/O:
/// `apply` folds each `GameEvent` in and the views read the fields.
#[derive(Clone, Debug, PartialEq)]
pub struct GameVm {
    pub screen: Screen,
    pub best: u32,
    pub score: u32,
    pub streak: u32,
    pub round: u64,
    pub question: Option<Question>,
    pub revealing: bool,
    pub reveal_value: Option<i64>,
    pub remaining_ms: u64,
    pub feedback: Option<FeedbackVm>,
}

impl GameVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Intro,
            best: 0,
            score: 0,
            streak: 0,
            round: 0,
            question: None,
            revealing: false,
            reveal_value: None,
            remaining_ms: QUESTION_TIME_MS.unsigned_abs(),
            feedback: None,
        }
    }

    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ScreenChanged(screen) => {
                self.screen = *screen;
                if *screen != Screen::Game {
                    self.question = None;
                    self.revealing = false;
                    self.reveal_value = None;
                    self.feedback = None;
                }
            }
            GameEvent::BestScore(best) => self.best = *best,
            GameEvent::RoundStarted {
                round,
                question,
                needs_reveal,
            } => {
                self.round = *round;
                self.question = Some(question.clone());
                self.revealing = *needs_reveal;
                self.reveal_value = None;
                self.remaining_ms = QUESTION_TIME_MS.unsigned_abs();
                self.feedback = None;
            }
            GameEvent::RevealStep { round, value } => {
                if *round == self.round {
                    self.reveal_value = Some(*value);
                }
            }
            GameEvent::RevealEnded { round } => {
                if *round == self.round {
                    self.revealing = false;
                    self.reveal_value = None;
                }
            }
            GameEvent::Tick { remaining_ms } => self.remaining_ms = *remaining_ms,
            GameEvent::Judged {
                correct,
                expected,
                awarded,
                score,
                streak,
            } => {
                self.score = *score;
                self.streak = *streak;
                self.feedback = Some(FeedbackVm {
                    correct: *correct,
                    expected: *expected,
                    awarded: *awarded,
                });
            }
            GameEvent::TimedOut { expected } => {
                self.streak = 0;
                self.feedback = Some(FeedbackVm {
                    correct: false,
                    expected: *expected,
                    awarded: 0,
                });
            }
        }
    }

    /// Input is only meaningful on an undecided, fully shown question.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.screen == Screen::Game
            && self.question.is_some()
            && !self.revealing
            && self.feedback.is_none()
    }
}

impl Default for GameVm {
    fn default() -> Self {
        Self::new()
    }
}
