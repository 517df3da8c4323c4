use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::model::{Question, TopicSet};
use quiz_core::{Clock, catalogue, scoring};

use crate::error::GameError;

//
// ─── TYPES ─────────────────────────────────────────────────────────────────────
//

/// Top-level screens of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    Menu,
    Topics,
    Game,
    Summary,
}

/// Outcome of judging one submitted answer (or a timeout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement {
    pub correct: bool,
    pub expected: i64,
    pub awarded: u32,
    pub score: u32,
    pub streak: u32,
}

/// What the orchestrator needs to launch a freshly advanced round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSetup {
    pub round: u64,
    pub question: Question,
    pub needs_reveal: bool,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// The session state machine.
///
/// Owns score, streak, the active question and the answerable flag;
/// every mutation goes through its methods. Purely synchronous: timers
/// and delays live in the orchestration layer, which calls back in via
/// `time_up` and `advance_round`.
///
/// The round counter increments on every `advance_round`; callbacks
/// armed for an older round compare against it and become no-ops.
pub struct GameEngine {
    clock: Clock,
    rng: StdRng,
    topics: TopicSet,
    screen: Screen,
    score: u32,
    streak: u32,
    best_score: u32,
    round: u64,
    current: Option<Question>,
    answerable: bool,
    question_started_at: Option<DateTime<Utc>>,
}

impl GameEngine {
    /// Create an engine on the intro screen with the persisted best.
    #[must_use]
    pub fn new(best_score: u32) -> Self {
        Self {
            clock: Clock::default_clock(),
            rng: StdRng::from_os_rng(),
            topics: TopicSet::new(),
            screen: Screen::Intro,
            score: 0,
            streak: 0,
            best_score,
            round: 0,
            current: None,
            answerable: false,
            question_started_at: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Deterministic question generation for tests.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn is_answerable(&self) -> bool {
        self.answerable
    }

    #[must_use]
    pub fn topics(&self) -> &TopicSet {
        &self.topics
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    //
    // ─── SCREEN TRANSITIONS ────────────────────────────────────────────────
    //

    /// Intro (or topics) back to the main menu.
    pub fn show_menu(&mut self) {
        self.screen = Screen::Menu;
    }

    /// Menu to the topic-selection screen.
    pub fn open_topics(&mut self) {
        if self.screen == Screen::Menu {
            self.screen = Screen::Topics;
        }
    }

    /// Cancel topic selection.
    pub fn back_to_menu(&mut self) {
        if self.screen == Screen::Topics {
            self.screen = Screen::Menu;
        }
    }

    /// Start a fresh run: score and streak reset, the topic selection
    /// is captured and the first round begins.
    ///
    /// # Errors
    ///
    /// Propagates `GameError::Question` from generation.
    pub fn start_game(&mut self, topics: TopicSet) -> Result<RoundSetup, GameError> {
        self.score = 0;
        self.streak = 0;
        self.topics = topics;
        self.screen = Screen::Game;
        self.advance_round()
    }

    /// Re-run with the previously captured topic selection.
    ///
    /// # Errors
    ///
    /// Propagates `GameError::Question` from generation.
    pub fn play_again(&mut self) -> Result<RoundSetup, GameError> {
        let topics = self.topics.clone();
        self.start_game(topics)
    }

    /// Enter the summary screen, folding the run's score into the best.
    /// Returns the (possibly unchanged) best score.
    pub fn show_summary(&mut self) -> u32 {
        self.best_score = self.best_score.max(self.score);
        self.answerable = false;
        self.screen = Screen::Summary;
        self.best_score
    }

    //
    // ─── ROUND LIFECYCLE ───────────────────────────────────────────────────
    //

    /// Generate the next question and make it the active round.
    ///
    /// Memory questions start non-answerable; `begin_timing` flips them
    /// once the reveal has finished. Everything else is answerable and
    /// on the clock immediately.
    ///
    /// # Errors
    ///
    /// Propagates `GameError::Question` from generation.
    pub fn advance_round(&mut self) -> Result<RoundSetup, GameError> {
        let question = catalogue::generate(&self.topics, &mut self.rng)?;
        self.round += 1;

        let needs_reveal = question.is_memory();
        if needs_reveal {
            self.answerable = false;
            self.question_started_at = None;
        } else {
            self.answerable = true;
            self.question_started_at = Some(self.clock.now());
        }
        self.current = Some(question.clone());

        Ok(RoundSetup {
            round: self.round,
            question,
            needs_reveal,
        })
    }

    /// Arm the think-time clock after a memory reveal completes.
    /// No-op unless the active question is still waiting for it.
    pub fn begin_timing(&mut self) {
        if self.current.is_some() && !self.answerable && self.question_started_at.is_none() {
            self.answerable = true;
            self.question_started_at = Some(self.clock.now());
        }
    }

    //
    // ─── JUDGING ───────────────────────────────────────────────────────────
    //

    /// Judge a typed answer. Returns `None` when the submission is
    /// ignored: not answerable, empty input, or a puzzle is active
    /// (puzzles are answered by option choice). Non-numeric non-empty
    /// input counts as a miss.
    pub fn submit_numeric(&mut self, raw: &str) -> Option<Judgement> {
        if !self.answerable {
            return None;
        }
        let question = self.current.as_ref()?;
        if question.is_puzzle() {
            return None;
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let expected = question.answer();
        let correct = parse_answer(trimmed).is_some_and(|n| n == expected);
        Some(self.judge(correct, expected))
    }

    /// Judge a chosen puzzle option. `None` when not answerable or the
    /// active question is not a puzzle.
    pub fn choose_option(&mut self, option: i64) -> Option<Judgement> {
        if !self.answerable {
            return None;
        }
        let question = self.current.as_ref()?;
        if !question.is_puzzle() {
            return None;
        }

        let expected = question.answer();
        Some(self.judge(option == expected, expected))
    }

    /// Timer expiry: a miss with no points. `None` if the round was
    /// already judged (idempotent against late callbacks).
    pub fn time_up(&mut self) -> Option<Judgement> {
        if !self.answerable {
            return None;
        }
        let expected = self.current.as_ref()?.answer();
        Some(self.judge(false, expected))
    }

    fn judge(&mut self, correct: bool, expected: i64) -> Judgement {
        // Flipped before any scoring so a racing callback sees the
        // round as already judged.
        self.answerable = false;

        let awarded = if correct {
            let elapsed = self
                .question_started_at
                .map_or(0, |started| self.clock.elapsed_ms(started));
            let points = scoring::award(elapsed, self.streak);
            self.streak += 1;
            self.score += points;
            points
        } else {
            self.streak = 0;
            0
        };

        Judgement {
            correct,
            expected,
            awarded,
            score: self.score,
            streak: self.streak,
        }
    }
}

/// Parse a typed answer as an integer, also accepting integral float
/// spellings like "25.0" so decimal-point habits are not punished. The
/// round-trip check rejects floats too large to name an exact integer.
fn parse_answer(raw: &str) -> Option<i64> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    let value = raw.parse::<f64>().ok()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let n = value as i64;
    (n as f64 == value).then_some(n)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
