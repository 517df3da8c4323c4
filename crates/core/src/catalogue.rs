//! The question catalogue: one pure generator per rule, each a
//! function of injected entropy only.

use rand::{Rng, RngCore};

use crate::model::{Question, QuestionError, Topic, TopicSet, Variant};
use crate::puzzle;

type Rule = fn(&mut dyn RngCore) -> Result<Question, QuestionError>;

/// Every generation rule with its topic tag, in catalogue order.
const CATALOGUE: [(Topic, Rule); 14] = [
    (Topic::Add, add_compensation),
    (Topic::Sub, sub_from_100),
    (Topic::Mul, mul_by_9),
    (Topic::Mul, mul_by_11),
    (Topic::Square, square_ending_5),
    (Topic::Add, add_general),
    (Topic::Sub, sub_general),
    (Topic::Mul, mul_general),
    (Topic::Div, div_exact),
    (Topic::Square, square_any),
    (Topic::Cube, cube),
    (Topic::Sqrt, sqrt_perfect),
    (Topic::Memory, memory_sum),
    (Topic::Puzzle, puzzle_rule),
];

/// Generate one question, picking uniformly among the rules whose
/// topic is enabled. Consecutive repeats of a topic are allowed.
///
/// # Errors
///
/// Returns `QuestionError` if a generated question fails its own
/// invariants; with the catalogue's numeric domains this does not
/// happen, but the constructors stay the single validation point.
pub fn generate<R: Rng>(topics: &TopicSet, rng: &mut R) -> Result<Question, QuestionError> {
    let eligible: Vec<&(Topic, Rule)> = CATALOGUE
        .iter()
        .filter(|(topic, _)| topics.is_enabled(*topic))
        .collect();

    // Non-empty: an empty selection enables every topic.
    let (_, rule) = eligible[rng.random_range(0..eligible.len())];
    rule(rng)
}

fn add_compensation(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    // 19, 29, ... 99
    let a = rng.random_range(1..=9_i64) * 10 + 9;
    let b = rng.random_range(12..=48_i64);
    Question::plain(
        Topic::Add,
        Variant::AddCompensation,
        format!("{a} + {b} = ?"),
        a + b,
        "Round a number (e.g., 49→50), add, then subtract 1.",
    )
}

fn sub_from_100(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let b = rng.random_range(11..=49_i64);
    Question::plain(
        Topic::Sub,
        Variant::SubFrom100,
        format!("100 - {b} = ?"),
        100 - b,
        "Think in complements to 100.",
    )
}

fn mul_by_9(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let n = rng.random_range(7..=99_i64);
    Question::plain(
        Topic::Mul,
        Variant::MulBy9,
        format!("{n} × 9 = ?"),
        n * 9,
        "Compute 10×n then subtract n.",
    )
}

fn mul_by_11(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let tens = rng.random_range(1..=9_i64);
    let ones = rng.random_range(0..=9_i64);
    let n = tens * 10 + ones;
    Question::plain(
        Topic::Mul,
        Variant::MulBy11,
        format!("{n} × 11 = ?"),
        n * 11,
        "For ab×11 → a(a+b)b; carry if a+b ≥ 10.",
    )
}

fn square_ending_5(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let k = rng.random_range(3..=9_i64) * 10 + 5;
    Question::plain(
        Topic::Square,
        Variant::SquareEnding5,
        format!("{k}² = ?"),
        k * k,
        "For (10n+5)² → n·(n+1) then append 25.",
    )
}

fn add_general(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let a = rng.random_range(10..=999_i64);
    let b = rng.random_range(10..=999_i64);
    Question::plain(
        Topic::Add,
        Variant::AddGeneral,
        format!("{a} + {b} = ?"),
        a + b,
        "Add hundreds, tens, ones separately.",
    )
}

fn sub_general(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let mut a = rng.random_range(10..=999_i64);
    let mut b = rng.random_range(10..=999_i64);
    if b > a {
        std::mem::swap(&mut a, &mut b);
    }
    Question::plain(
        Topic::Sub,
        Variant::SubGeneral,
        format!("{a} - {b} = ?"),
        a - b,
        "Subtract placewise; borrow if needed.",
    )
}

fn mul_general(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let a = rng.random_range(3..=19_i64);
    let b = rng.random_range(3..=19_i64);
    Question::plain(
        Topic::Mul,
        Variant::MulGeneral,
        format!("{a} × {b} = ?"),
        a * b,
        "Break into tens and ones or use known tables.",
    )
}

fn div_exact(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let divisor = rng.random_range(2..=20_i64);
    let quotient = rng.random_range(2..=20_i64);
    let dividend = divisor * quotient;
    Question::plain(
        Topic::Div,
        Variant::DivExact,
        format!("{dividend} ÷ {divisor} = ?"),
        quotient,
        "What times divisor gives dividend?",
    )
}

fn square_any(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let n = rng.random_range(11..=39_i64);
    Question::plain(
        Topic::Square,
        Variant::SquareAny,
        format!("{n}² = ?"),
        n * n,
        "Use (n±1)² = n² ± 2n + 1.",
    )
}

fn cube(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let n = rng.random_range(1..=20_i64);
    Question::plain(
        Topic::Cube,
        Variant::Cube,
        format!("{n}³ = ?"),
        n * n * n,
        "Memorize 1–10; use (a±1)³ for near values.",
    )
}

fn sqrt_perfect(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let base = rng.random_range(4..=35_i64);
    let square = base * base;
    Question::plain(
        Topic::Sqrt,
        Variant::SqrtPerfect,
        format!("√{square} = ?"),
        base,
        "Recall perfect squares up to 35².",
    )
}

fn memory_sum(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    let len = rng.random_range(crate::model::MEMORY_SEQ_MIN_LEN..=crate::model::MEMORY_SEQ_MAX_LEN);
    let numbers = (0..len)
        .map(|_| rng.random_range(crate::model::MEMORY_VALUE_MIN..=crate::model::MEMORY_VALUE_MAX))
        .collect();
    Question::memory(
        numbers,
        "Chunk numbers (e.g., 7+13≈20) and keep a running total.",
    )
}

fn puzzle_rule(rng: &mut dyn RngCore) -> Result<Question, QuestionError> {
    puzzle::generate(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn parse_operands(prompt: &str, op: char) -> (i64, i64) {
        let body = prompt.trim_end_matches(" = ?");
        let mut parts = body.split(op);
        let a = parts.next().unwrap().trim().parse().unwrap();
        let b = parts.next().unwrap().trim().parse().unwrap();
        (a, b)
    }

    #[test]
    fn add_rules_answer_their_own_sum() {
        let mut rng = rng(1);
        for _ in 0..200 {
            let q = add_compensation(&mut rng).unwrap();
            let (a, b) = parse_operands(q.prompt(), '+');
            assert_eq!(q.answer(), a + b);
            assert!(a % 10 == 9 && (19..=99).contains(&a));
            assert!((12..=48).contains(&b));
        }
        for _ in 0..200 {
            let q = add_general(&mut rng).unwrap();
            let (a, b) = parse_operands(q.prompt(), '+');
            assert_eq!(q.answer(), a + b);
        }
    }

    #[test]
    fn sub_general_never_goes_negative() {
        let mut rng = rng(2);
        for _ in 0..200 {
            let q = sub_general(&mut rng).unwrap();
            let (a, b) = parse_operands(q.prompt(), '-');
            assert!(a >= b);
            assert_eq!(q.answer(), a - b);
        }
    }

    #[test]
    fn div_exact_divides_exactly() {
        let mut rng = rng(3);
        for _ in 0..200 {
            let q = div_exact(&mut rng).unwrap();
            let (dividend, divisor) = parse_operands(q.prompt(), '÷');
            assert_eq!(divisor * q.answer(), dividend);
            assert!((2..=20).contains(&divisor));
            assert!((2..=20).contains(&q.answer()));
        }
    }

    #[test]
    fn power_rules_match_their_arithmetic() {
        let mut rng = rng(4);
        for _ in 0..100 {
            let q = square_ending_5(&mut rng).unwrap();
            let k: i64 = q.prompt().trim_end_matches("² = ?").parse().unwrap();
            assert_eq!(k % 10, 5);
            assert_eq!(q.answer(), k * k);

            let q = square_any(&mut rng).unwrap();
            let n: i64 = q.prompt().trim_end_matches("² = ?").parse().unwrap();
            assert_eq!(q.answer(), n * n);

            let q = cube(&mut rng).unwrap();
            let n: i64 = q.prompt().trim_end_matches("³ = ?").parse().unwrap();
            assert_eq!(q.answer(), n * n * n);

            let q = sqrt_perfect(&mut rng).unwrap();
            let sq: i64 = q
                .prompt()
                .trim_start_matches('√')
                .trim_end_matches(" = ?")
                .parse()
                .unwrap();
            assert_eq!(q.answer() * q.answer(), sq);
        }
    }

    #[test]
    fn mul_rules_match_their_arithmetic() {
        let mut rng = rng(5);
        for _ in 0..100 {
            let q = mul_by_9(&mut rng).unwrap();
            let (n, nine) = parse_operands(q.prompt(), '×');
            assert_eq!(nine, 9);
            assert_eq!(q.answer(), n * 9);

            let q = mul_by_11(&mut rng).unwrap();
            let (n, eleven) = parse_operands(q.prompt(), '×');
            assert_eq!(eleven, 11);
            assert!((10..=99).contains(&n));
            assert_eq!(q.answer(), n * 11);

            let q = mul_general(&mut rng).unwrap();
            let (a, b) = parse_operands(q.prompt(), '×');
            assert_eq!(q.answer(), a * b);
        }
    }

    #[test]
    fn memory_sum_matches_sequence() {
        let mut rng = rng(6);
        for _ in 0..200 {
            let q = memory_sum(&mut rng).unwrap();
            let seq = q.reveal().unwrap();
            assert!((3..=6).contains(&seq.len()));
            assert!(seq.iter().all(|v| (3..=19).contains(v)));
            assert_eq!(q.answer(), seq.iter().sum::<i64>());
        }
    }

    #[test]
    fn single_topic_filter_only_yields_that_topic() {
        let topics = TopicSet::from_topics([Topic::Add]);
        let mut rng = rng(7);
        for _ in 0..100 {
            let q = generate(&topics, &mut rng).unwrap();
            assert_eq!(q.topic(), Topic::Add);
        }
    }

    #[test]
    fn empty_selection_draws_from_the_whole_catalogue() {
        let topics = TopicSet::new();
        let mut rng = rng(8);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..500 {
            seen.insert(generate(&topics, &mut rng).unwrap().topic());
        }
        for topic in Topic::ALL {
            assert!(seen.contains(&topic), "missing {topic:?}");
        }
    }

    #[test]
    fn every_question_carries_a_tip() {
        let topics = TopicSet::new();
        let mut rng = rng(9);
        for _ in 0..200 {
            let q = generate(&topics, &mut rng).unwrap();
            assert!(!q.tip().trim().is_empty());
        }
    }
}
