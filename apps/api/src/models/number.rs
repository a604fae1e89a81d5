//! Numeric model — the closed set of operand shapes and exact rational helpers.
//!
//! Stored values keep the form they were drawn in (a mixed number keeps its
//! drawn denominator). `Rational` is the improper form used only for ordering
//! and zero checks; it never becomes a stored operand.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Rational helpers
// ────────────────────────────────────────────────────────────────────────────

/// An improper fraction `numerator / denominator`. Not necessarily reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }
}

/// Greatest common divisor of `|a|` and `|b|`. Returns 1 when both are zero.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut x, mut y) = (a.abs(), b.abs());
    while y != 0 {
        (x, y) = (y, x % y);
    }
    if x == 0 {
        1
    } else {
        x
    }
}

/// Reduces `numerator / denominator` to lowest terms with a positive denominator.
///
/// # Panics
/// When `denominator` is zero. The generator never produces one, so reaching
/// this is a programming error rather than bad user input.
pub fn reduce(numerator: i64, denominator: i64) -> Rational {
    assert!(denominator != 0, "reduce called with a zero denominator");
    let g = gcd(numerator, denominator);
    let sign = if denominator < 0 { -1 } else { 1 };
    Rational {
        numerator: sign * numerator / g,
        denominator: sign * denominator / g,
    }
}

/// Exact ordering of two rationals by cross multiplication.
///
/// Assumes positive denominators, which every `to_improper` result has.
pub fn compare_rational(a: Rational, b: Rational) -> Ordering {
    (a.numerator * b.denominator).cmp(&(b.numerator * a.denominator))
}

// ────────────────────────────────────────────────────────────────────────────
// Operand shapes
// ────────────────────────────────────────────────────────────────────────────

/// One operand of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NumberValue {
    /// A whole number ≥ 1.
    Whole { value: u32 },
    /// A reduced fraction with denominator ≥ 2. May be improper (7/4).
    Fraction { numerator: u32, denominator: u32 },
    /// `whole numerator/denominator` with `0 < numerator < denominator`.
    Mixed {
        whole: u32,
        numerator: u32,
        denominator: u32,
    },
}

impl NumberValue {
    /// Builds a reduced fraction. A reduced denominator of 1 collapses to `Whole`
    /// so stored fractions always have a denominator of at least 2.
    pub fn fraction(numerator: u32, denominator: u32) -> Self {
        let r = reduce(i64::from(numerator), i64::from(denominator));
        // Both inputs are non-negative, so the reduced parts fit back into u32.
        let (n, d) = (r.numerator as u32, r.denominator as u32);
        if d == 1 {
            NumberValue::Whole { value: n }
        } else {
            NumberValue::Fraction {
                numerator: n,
                denominator: d,
            }
        }
    }

    pub fn to_improper(&self) -> Rational {
        match *self {
            NumberValue::Whole { value } => Rational {
                numerator: i64::from(value),
                denominator: 1,
            },
            NumberValue::Fraction {
                numerator,
                denominator,
            } => Rational {
                numerator: i64::from(numerator),
                denominator: i64::from(denominator),
            },
            NumberValue::Mixed {
                whole,
                numerator,
                denominator,
            } => Rational {
                numerator: i64::from(whole) * i64::from(denominator) + i64::from(numerator),
                denominator: i64::from(denominator),
            },
        }
    }

    /// Compares the rational values of two operands.
    pub fn compare(&self, other: &NumberValue) -> Ordering {
        compare_rational(self.to_improper(), other.to_improper())
    }

    pub fn is_zero(&self) -> bool {
        self.to_improper().is_zero()
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Whole { value } => write!(f, "{value}"),
            NumberValue::Fraction {
                numerator,
                denominator,
            } => write!(f, "{numerator}/{denominator}"),
            NumberValue::Mixed {
                whole,
                numerator,
                denominator,
            } => write!(f, "{whole} {numerator}/{denominator}"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gcd_basic() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
    }

    #[test]
    fn test_gcd_both_zero_is_one() {
        assert_eq!(gcd(0, 0), 1);
    }

    #[test]
    fn test_reduce_moves_sign_to_numerator() {
        let r = reduce(3, -6);
        assert_eq!(
            r,
            Rational {
                numerator: -1,
                denominator: 2
            }
        );
    }

    #[test]
    fn test_reduce_zero_numerator() {
        let r = reduce(0, 5);
        assert_eq!(r.denominator, 1);
        assert!(r.is_zero());
    }

    #[test]
    #[should_panic(expected = "zero denominator")]
    fn test_reduce_zero_denominator_panics() {
        reduce(1, 0);
    }

    #[test]
    fn test_fraction_constructor_reduces() {
        assert_eq!(
            NumberValue::fraction(6, 8),
            NumberValue::Fraction {
                numerator: 3,
                denominator: 4
            }
        );
    }

    #[test]
    fn test_fraction_constructor_collapses_unit_denominator() {
        assert_eq!(NumberValue::fraction(8, 4), NumberValue::Whole { value: 2 });
    }

    #[test]
    fn test_to_improper_mixed() {
        let m = NumberValue::Mixed {
            whole: 2,
            numerator: 1,
            denominator: 3,
        };
        assert_eq!(
            m.to_improper(),
            Rational {
                numerator: 7,
                denominator: 3
            }
        );
    }

    #[test]
    fn test_to_improper_whole() {
        let w = NumberValue::Whole { value: 5 };
        assert_eq!(
            w.to_improper(),
            Rational {
                numerator: 5,
                denominator: 1
            }
        );
    }

    #[test]
    fn test_compare_across_shapes() {
        let three_quarters = NumberValue::fraction(3, 4);
        let half = NumberValue::fraction(1, 2);
        let one = NumberValue::Whole { value: 1 };
        assert_eq!(three_quarters.compare(&half), Ordering::Greater);
        assert_eq!(half.compare(&one), Ordering::Less);
        assert_eq!(
            NumberValue::fraction(2, 4).compare(&NumberValue::Fraction {
                numerator: 1,
                denominator: 2
            }),
            Ordering::Equal
        );
    }

    #[test]
    fn test_display_shapes() {
        assert_eq!(NumberValue::Whole { value: 4 }.to_string(), "4");
        assert_eq!(NumberValue::fraction(3, 4).to_string(), "3/4");
        let m = NumberValue::Mixed {
            whole: 2,
            numerator: 1,
            denominator: 3,
        };
        assert_eq!(m.to_string(), "2 1/3");
    }

    proptest! {
        #[test]
        fn prop_reduce_is_idempotent_and_coprime(
            n in -10_000i64..=10_000,
            d in (-10_000i64..=10_000).prop_filter("non-zero", |d| *d != 0),
        ) {
            let once = reduce(n, d);
            let twice = reduce(once.numerator, once.denominator);
            prop_assert_eq!(once, twice);
            prop_assert_eq!(gcd(once.numerator, once.denominator), 1);
            prop_assert!(once.denominator > 0);
        }

        #[test]
        fn prop_reduce_preserves_value(
            n in -500i64..=500,
            d in (1i64..=500),
        ) {
            let r = reduce(n, d);
            prop_assert_eq!(
                compare_rational(r, Rational { numerator: n, denominator: d }),
                Ordering::Equal
            );
        }
    }
}
