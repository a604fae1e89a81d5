//! Problem Generator — draws one well-formed arithmetic problem for a topic.
//!
//! Flow: pick operand shapes → draw magnitudes → pick operator → assemble.
//!
//! Well-formedness is constructive, never reject-and-resample:
//! - `−` swaps the operands when left < right, so results are never negative
//! - `÷` forces a zero fraction divisor up to 1 (unreachable with the default
//!   bounds, kept so the invariant never depends on the bounds)

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::number::NumberValue;
use crate::models::problem::{OperationMode, Operator, Problem, Topic};

/// Probability that an operand of a mixed-number topic is mixed rather than whole.
const MIXED_SHAPE_PROBABILITY: f64 = 0.85;
/// Probability that `fractions_add_sub` uses a whole number on the right.
const WHOLE_RIGHT_OPERAND_PROBABILITY: f64 = 0.25;

/// Largest accepted value for any bound. Two digits keep the widest problem
/// inside one export column.
pub const MAX_BOUND: u32 = 99;

// ────────────────────────────────────────────────────────────────────────────
// Bounds
// ────────────────────────────────────────────────────────────────────────────

/// Inclusive upper bounds for drawn magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorBounds {
    /// Largest denominator drawn (2..=99).
    pub max_denominator: u32,
    /// Largest fraction numerator drawn, further capped at `2 × denominator`.
    pub max_numerator: u32,
    /// Largest whole number, also the largest whole part of a mixed number.
    pub max_whole: u32,
}

impl Default for GeneratorBounds {
    fn default() -> Self {
        GeneratorBounds {
            max_denominator: 12,
            max_numerator: 12,
            max_whole: 9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Whole,
    Fraction,
    Mixed,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// Generates one problem for `topic` under `mode`.
pub fn generate<R: Rng + ?Sized>(
    topic: Topic,
    mode: OperationMode,
    bounds: &GeneratorBounds,
    rng: &mut R,
) -> Problem {
    let (left_shape, right_shape) = pick_shapes(topic, rng);
    let left = draw_operand(left_shape, bounds, rng);
    let right = draw_operand(right_shape, bounds, rng);

    let operators = mode.operators_for(topic);
    let operator = operators[rng.gen_range(0..operators.len())];

    let problem = assemble(left, operator, right);
    debug!(
        ?topic,
        "generated {} {} {}",
        problem.left,
        problem.operator.symbol(),
        problem.right
    );
    problem
}

/// Applies the well-formedness rules to already drawn operands.
pub fn assemble(left: NumberValue, operator: Operator, right: NumberValue) -> Problem {
    let (left, right) = match operator {
        Operator::Subtract if left.compare(&right).is_lt() => (right, left),
        Operator::Divide => (left, nonzero_divisor(right)),
        _ => (left, right),
    };

    debug_assert!(operator != Operator::Subtract || left.compare(&right).is_ge());
    debug_assert!(operator != Operator::Divide || !right.is_zero());

    Problem {
        left,
        operator,
        right,
    }
}

fn nonzero_divisor(value: NumberValue) -> NumberValue {
    match value {
        NumberValue::Fraction {
            numerator: 0,
            denominator,
        } => NumberValue::Fraction {
            numerator: 1,
            denominator,
        },
        other => other,
    }
}

fn pick_shapes<R: Rng + ?Sized>(topic: Topic, rng: &mut R) -> (Shape, Shape) {
    if topic.uses_mixed_numbers() {
        let mut mixed_or_whole = || {
            if rng.gen_bool(MIXED_SHAPE_PROBABILITY) {
                Shape::Mixed
            } else {
                Shape::Whole
            }
        };
        let left = mixed_or_whole();
        let right = mixed_or_whole();
        return (left, right);
    }

    if topic == Topic::FractionsAddSub && rng.gen_bool(WHOLE_RIGHT_OPERAND_PROBABILITY) {
        return (Shape::Fraction, Shape::Whole);
    }

    (Shape::Fraction, Shape::Fraction)
}

fn draw_operand<R: Rng + ?Sized>(
    shape: Shape,
    bounds: &GeneratorBounds,
    rng: &mut R,
) -> NumberValue {
    match shape {
        Shape::Whole => NumberValue::Whole {
            value: rng.gen_range(1..=bounds.max_whole),
        },
        Shape::Fraction => {
            let denominator = rng.gen_range(2..=bounds.max_denominator);
            let numerator =
                rng.gen_range(1..=bounds.max_numerator.min(denominator.saturating_mul(2)));
            NumberValue::fraction(numerator, denominator)
        }
        Shape::Mixed => {
            let denominator = rng.gen_range(2..=bounds.max_denominator);
            NumberValue::Mixed {
                whole: rng.gen_range(1..=bounds.max_whole),
                numerator: rng.gen_range(1..denominator),
                denominator,
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::number::gcd;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL_TOPICS: [Topic; 6] = [
        Topic::FractionsAddSub,
        Topic::MixedAddSub,
        Topic::FractionsMul,
        Topic::MixedMul,
        Topic::FractionsDiv,
        Topic::MixedDiv,
    ];
    const ALL_MODES: [OperationMode; 4] = [
        OperationMode::Auto,
        OperationMode::All,
        OperationMode::AddSubOnly,
        OperationMode::MulDivOnly,
    ];

    fn check_operand(value: &NumberValue, bounds: &GeneratorBounds) {
        match *value {
            NumberValue::Whole { value } => {
                assert!(value >= 1, "whole must be ≥ 1, got {value}");
            }
            NumberValue::Fraction {
                numerator,
                denominator,
            } => {
                assert!(numerator >= 1);
                assert!(denominator >= 2 && denominator <= bounds.max_denominator);
                assert_eq!(gcd(i64::from(numerator), i64::from(denominator)), 1);
            }
            NumberValue::Mixed {
                whole,
                numerator,
                denominator,
            } => {
                assert!(whole >= 1 && whole <= bounds.max_whole);
                assert!(0 < numerator && numerator < denominator);
                assert!(denominator <= bounds.max_denominator);
            }
        }
    }

    // ── assemble ────────────────────────────────────────────────────────────

    #[test]
    fn test_assemble_keeps_order_when_left_is_larger() {
        let p = assemble(
            NumberValue::fraction(3, 4),
            Operator::Subtract,
            NumberValue::fraction(1, 2),
        );
        assert_eq!(p.left, NumberValue::fraction(3, 4));
        assert_eq!(p.operator, Operator::Subtract);
        assert_eq!(p.right, NumberValue::fraction(1, 2));
    }

    #[test]
    fn test_assemble_swaps_when_left_is_smaller() {
        let p = assemble(
            NumberValue::fraction(1, 3),
            Operator::Subtract,
            NumberValue::Whole { value: 2 },
        );
        assert_eq!(p.left, NumberValue::Whole { value: 2 });
        assert_eq!(p.right, NumberValue::fraction(1, 3));
    }

    #[test]
    fn test_assemble_equal_operands_not_swapped() {
        let left = NumberValue::Fraction {
            numerator: 1,
            denominator: 2,
        };
        let right = NumberValue::Mixed {
            whole: 1,
            numerator: 1,
            denominator: 2,
        };
        // 1/2 < 3/2 → swapped
        let p = assemble(left, Operator::Subtract, right);
        assert_eq!(p.left, right);

        let p = assemble(left, Operator::Subtract, left);
        assert_eq!(p.left, left);
        assert_eq!(p.right, left);
    }

    #[test]
    fn test_assemble_addition_never_swaps() {
        let p = assemble(
            NumberValue::fraction(1, 3),
            Operator::Add,
            NumberValue::Whole { value: 2 },
        );
        assert_eq!(p.left, NumberValue::fraction(1, 3));
    }

    #[test]
    fn test_assemble_forces_zero_divisor_to_one() {
        let zero = NumberValue::Fraction {
            numerator: 0,
            denominator: 5,
        };
        let p = assemble(NumberValue::fraction(2, 3), Operator::Divide, zero);
        assert_eq!(
            p.right,
            NumberValue::Fraction {
                numerator: 1,
                denominator: 5
            }
        );
    }

    // ── generate ────────────────────────────────────────────────────────────

    #[test]
    fn test_generate_auto_uses_topic_operators() {
        let bounds = GeneratorBounds::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = generate(Topic::FractionsMul, OperationMode::Auto, &bounds, &mut rng);
            assert_eq!(p.operator, Operator::Multiply);
            let p = generate(Topic::MixedDiv, OperationMode::Auto, &bounds, &mut rng);
            assert_eq!(p.operator, Operator::Divide);
            let p = generate(Topic::MixedAddSub, OperationMode::Auto, &bounds, &mut rng);
            assert!(matches!(p.operator, Operator::Add | Operator::Subtract));
        }
    }

    #[test]
    fn test_generate_fraction_topics_never_produce_mixed() {
        let bounds = GeneratorBounds::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            for topic in [Topic::FractionsAddSub, Topic::FractionsMul, Topic::FractionsDiv] {
                let p = generate(topic, OperationMode::All, &bounds, &mut rng);
                assert!(!matches!(p.left, NumberValue::Mixed { .. }));
                assert!(!matches!(p.right, NumberValue::Mixed { .. }));
            }
        }
    }

    #[test]
    fn test_generate_mixed_topic_mostly_mixed() {
        let bounds = GeneratorBounds::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mixed = (0..1000)
            .map(|_| generate(Topic::MixedMul, OperationMode::Auto, &bounds, &mut rng))
            .filter(|p| matches!(p.left, NumberValue::Mixed { .. }))
            .count();
        // Expected ≈ 850; wide tolerance keeps the seeded test robust.
        assert!((750..=950).contains(&mixed), "mixed left operands: {mixed}");
    }

    #[test]
    fn test_generate_fractions_add_sub_sometimes_whole_right() {
        let bounds = GeneratorBounds::default();
        let mut rng = StdRng::seed_from_u64(5);
        let wholes = (0..1000)
            .map(|_| generate(Topic::FractionsAddSub, OperationMode::Auto, &bounds, &mut rng))
            .filter(|p| {
                // A subtraction swap can move the whole operand to the left.
                matches!(p.right, NumberValue::Whole { .. })
                    || matches!(p.left, NumberValue::Whole { .. })
            })
            .count();
        assert!(wholes > 150, "expected some whole operands, got {wholes}");
    }

    #[test]
    fn test_generate_at_largest_bounds() {
        let bounds = GeneratorBounds {
            max_denominator: MAX_BOUND,
            max_numerator: MAX_BOUND,
            max_whole: MAX_BOUND,
        };
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..500 {
            for topic in ALL_TOPICS {
                let p = generate(topic, OperationMode::All, &bounds, &mut rng);
                check_operand(&p.left, &bounds);
                check_operand(&p.right, &bounds);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_generated_problems_are_well_formed(seed in any::<u64>()) {
            let bounds = GeneratorBounds::default();
            let mut rng = StdRng::seed_from_u64(seed);
            for topic in ALL_TOPICS {
                for mode in ALL_MODES {
                    let p = generate(topic, mode, &bounds, &mut rng);
                    check_operand(&p.left, &bounds);
                    check_operand(&p.right, &bounds);
                    if p.operator == Operator::Subtract {
                        prop_assert!(p.left.compare(&p.right).is_ge());
                    }
                    if p.operator == Operator::Divide {
                        prop_assert!(!p.right.is_zero());
                    }
                }
            }
        }
    }
}
