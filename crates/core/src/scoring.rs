//! Points awarded for a correct answer: a flat base plus a speed bonus
//! for answering inside the 20 second budget and a capped streak bonus.

/// Wall-clock budget per question.
pub const QUESTION_TIME_MS: i64 = 20_000;

/// How often the countdown recomputes remaining time.
pub const TICK_INTERVAL_MS: u64 = 60;

/// Dwell time per number during a memory reveal.
pub const REVEAL_DWELL_MS: u64 = 800;

/// Pause between judging a round and starting the next one.
pub const FEEDBACK_DELAY_MS: u64 = 900;

/// One-time intro splash before the menu appears.
pub const INTRO_DELAY_MS: u64 = 2_500;

const BASE_POINTS: u32 = 10;
const SPEED_BONUS_STEP_MS: i64 = 500;
const STREAK_BONUS_CAP: u32 = 10;
const STREAK_BONUS_DIVISOR: u32 = 3;

/// Points for a correct answer given the elapsed think time and the
/// streak count entering this answer. Pure and deterministic.
#[must_use]
pub fn award(elapsed_ms: i64, streak: u32) -> u32 {
    let speed_bonus = ((QUESTION_TIME_MS - elapsed_ms) / SPEED_BONUS_STEP_MS).max(0);

    // safe: bounded by QUESTION_TIME_MS / SPEED_BONUS_STEP_MS == 40
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let speed_bonus = speed_bonus as u32;

    let streak_bonus = (streak / STREAK_BONUS_DIVISOR).min(STREAK_BONUS_CAP);
    BASE_POINTS + speed_bonus + streak_bonus
}
