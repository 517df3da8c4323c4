//! 3×3 pattern puzzles: a grid with one blank cell and four
//! multiple-choice options.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::model::{Cell, Grid, PUZZLE_OPTION_COUNT, Question, QuestionError};

const DECOY_DELTA: i64 = 10;
const DECOY_ATTEMPTS: usize = 64;

struct Pattern {
    grid: Grid,
    answer: i64,
    tip: &'static str,
}

/// Generate a puzzle question, choosing uniformly among the three
/// pattern families.
///
/// # Errors
///
/// Returns `QuestionError` if the assembled question fails validation;
/// the generators below keep the invariants by construction.
pub fn generate(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let pattern = match rng.random_range(0..3_u8) {
        0 => row_sum(rng),
        1 => row_product(rng),
        _ => diagonal_sum(rng),
    };

    let options = build_options(pattern.answer, rng);
    Question::puzzle(pattern.grid, options, pattern.answer, pattern.tip)
}

/// Each row sums to the same target. The third cell of rows 1–2 is
/// derived from the row's own two values; the blank in row 3 is the
/// remainder to the target.
fn row_sum(rng: &mut dyn RngCore) -> Pattern {
    let target = rng.random_range(20..=50_i64);

    let mut rows = [[Cell::Blank; 3]; 2];
    for row in &mut rows {
        let a = rng.random_range(5..=15_i64);
        let b = rng.random_range(5..=15_i64);
        // target - a - b may go negative; displayed as-is.
        *row = [Cell::Value(a), Cell::Value(b), Cell::Value(target - a - b)];
    }

    let c = rng.random_range(5..=15_i64);
    let d = rng.random_range(5..=15_i64);
    Pattern {
        grid: Grid::new([
            rows[0],
            rows[1],
            [Cell::Value(c), Cell::Value(d), Cell::Blank],
        ]),
        answer: target - c - d,
        tip: "Each row sums to the same value",
    }
}

/// Each row nominally multiplies to the same target. The divisors for
/// the derived third cell of rows 1–2 are redrawn independently from
/// the displayed factors, so those rows are not guaranteed consistent.
/// Deliberate: the game rule is the redraw, not the stated pattern.
fn row_product(rng: &mut dyn RngCore) -> Pattern {
    let target = rng.random_range(30..=200_i64);

    let mut rows = [[Cell::Blank; 3]; 2];
    for row in &mut rows {
        let shown_a = rng.random_range(2..=8_i64);
        let shown_b = rng.random_range(2..=8_i64);
        let div_a = rng.random_range(2..=8_i64);
        let div_b = rng.random_range(2..=8_i64);
        *row = [
            Cell::Value(shown_a),
            Cell::Value(shown_b),
            Cell::Value(target / (div_a * div_b)),
        ];
    }

    let a = rng.random_range(2..=8_i64);
    let b = rng.random_range(2..=8_i64);
    Pattern {
        grid: Grid::new([
            rows[0],
            rows[1],
            [Cell::Value(a), Cell::Value(b), Cell::Blank],
        ]),
        // Row 3 uses its own factors, so the blank is self-consistent.
        answer: target / (a * b),
        tip: "Each row multiplies to the same value",
    }
}

/// The main diagonal sums to the target; everything else is noise.
fn diagonal_sum(rng: &mut dyn RngCore) -> Pattern {
    let target = rng.random_range(15..=40_i64);

    let mut cells = [[Cell::Blank; 3]; 3];
    for (r, row) in cells.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            if (r, c) != (2, 2) {
                *cell = Cell::Value(rng.random_range(3..=12_i64));
            }
        }
    }

    let g00 = cells[0][0].value().unwrap_or(0);
    let g11 = cells[1][1].value().unwrap_or(0);
    Pattern {
        grid: Grid::new(cells),
        answer: target - g00 - g11,
        tip: "Main diagonal sums to the same value",
    }
}

/// Three positive, distinct decoys near the answer, then a uniform
/// shuffle of all four options.
fn build_options(answer: i64, rng: &mut dyn RngCore) -> [i64; PUZZLE_OPTION_COUNT] {
    let mut options = vec![answer];

    let mut attempts = 0;
    while options.len() < PUZZLE_OPTION_COUNT && attempts < DECOY_ATTEMPTS {
        attempts += 1;
        let wrong = answer + rng.random_range(-DECOY_DELTA..=DECOY_DELTA);
        if wrong > 0 && !options.contains(&wrong) {
            options.push(wrong);
        }
    }

    // Near-zero answers can exhaust the ±10 window of positive values;
    // fall back to the smallest unused positive integers.
    let mut filler = 1;
    while options.len() < PUZZLE_OPTION_COUNT {
        if !options.contains(&filler) {
            options.push(filler);
        }
        filler += 1;
    }

    options.shuffle(rng);
    [options[0], options[1], options[2], options[3]]
}
