//! Division with remainder
//!
//! Problem generation for short/long division and the ways a remainder
//! can be reported once a context decides what it means.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::config;
use crate::core::error::{ForgeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DivisionResult {
    pub dividend: u64,
    pub divisor: u64,
    pub quotient: u64,
    pub remainder: u64,
}

impl DivisionResult {
    pub fn is_exact(&self) -> bool {
        self.remainder == 0
    }
}

/// 38 ÷ 5 → quotient 7, remainder 3
pub fn divide_with_remainder(dividend: u64, divisor: u64) -> Result<DivisionResult> {
    if divisor == 0 {
        return Err(ForgeError::DivisionByZero);
    }
    Ok(DivisionResult {
        dividend,
        divisor,
        quotient: dividend / divisor,
        remainder: dividend % divisor,
    })
}

/// Greatest common divisor (Euclid); gcd(0, 0) == 0
pub fn gcd(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn check_ranges(
    min_dividend: u64,
    max_dividend: u64,
    min_divisor: u64,
    max_divisor: u64,
) -> Result<()> {
    if min_divisor == 0 {
        return Err(ForgeError::InvalidInput("divisor range must exclude 0".into()));
    }
    if min_dividend > max_dividend || min_divisor > max_divisor {
        return Err(ForgeError::InvalidInput(format!(
            "empty range: dividend {}..={}, divisor {}..={}",
            min_dividend, max_dividend, min_divisor, max_divisor
        )));
    }
    Ok(())
}

/// A division with no remainder, dividend and divisor inside their ranges.
pub fn generate_exact_division(
    min_dividend: u64,
    max_dividend: u64,
    min_divisor: u64,
    max_divisor: u64,
    rng: &mut impl Rng,
) -> Result<DivisionResult> {
    check_ranges(min_dividend, max_dividend, min_divisor, max_divisor)?;

    let attempts = config().max_division_attempts;
    for _ in 0..attempts {
        let divisor = rng.gen_range(min_divisor..=max_divisor);
        let lowest = min_dividend.div_ceil(divisor);
        let highest = max_dividend / divisor;
        if lowest > highest {
            continue;
        }
        let quotient = rng.gen_range(lowest..=highest);
        return divide_with_remainder(divisor * quotient, divisor);
    }

    // Smallest multiple of the smallest divisor, if the ranges admit one
    let quotient = min_dividend.div_ceil(min_divisor);
    match min_divisor.checked_mul(quotient) {
        Some(dividend) if dividend <= max_dividend => divide_with_remainder(dividend, min_divisor),
        _ => Err(ForgeError::exhausted("exact division", attempts)),
    }
}

/// A division leaving a nonzero remainder.
///
/// When the ranges leave no room for a remainder the draw falls back to a
/// random dividend in range, whose remainder may then be zero.
pub fn generate_division_with_remainder(
    min_dividend: u64,
    max_dividend: u64,
    min_divisor: u64,
    max_divisor: u64,
    rng: &mut impl Rng,
) -> Result<DivisionResult> {
    check_ranges(min_dividend, max_dividend, min_divisor, max_divisor)?;

    let min_divisor = min_divisor.max(2);
    if min_divisor <= max_divisor {
        for _ in 0..config().max_division_attempts {
            let divisor = rng.gen_range(min_divisor..=max_divisor);
            let quotient = rng.gen_range(min_dividend / divisor..=max_dividend / divisor);
            let remainder = rng.gen_range(1..divisor);
            let Some(dividend) = (divisor * quotient).checked_add(remainder) else {
                continue;
            };
            if (min_dividend..=max_dividend).contains(&dividend) {
                return divide_with_remainder(dividend, divisor);
            }
        }
    }

    debug!(
        min_dividend,
        max_dividend, "no remainder-bearing division found, drawing any dividend"
    );
    let divisor = rng.gen_range(min_divisor.min(max_divisor)..=max_divisor);
    let dividend = rng.gen_range(min_dividend..=max_dividend);
    divide_with_remainder(dividend, divisor)
}

/// What the remainder means in the question's story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderContext {
    /// Buses needed, boxes needed: a partial group still needs one more
    RoundUp,
    /// Complete teams, full boxes: the partial group is dropped
    RoundDown,
    /// The remainder is irrelevant to the answer
    Ignore,
    /// Sharing a whole: the remainder becomes a fraction
    AsFraction,
    /// Report quotient and remainder as they are
    ExactRemainder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemainderAnswer {
    Whole {
        value: u64,
    },
    /// `whole` and `numerator/denominator`, fraction in lowest terms
    Mixed {
        whole: u64,
        numerator: u64,
        denominator: u64,
    },
    WithRemainder {
        quotient: u64,
        remainder: u64,
    },
}

pub fn interpret_remainder(result: &DivisionResult, context: RemainderContext) -> RemainderAnswer {
    if result.is_exact() {
        return RemainderAnswer::Whole {
            value: result.quotient,
        };
    }

    match context {
        RemainderContext::RoundUp => RemainderAnswer::Whole {
            value: result.quotient + 1,
        },
        RemainderContext::RoundDown | RemainderContext::Ignore => RemainderAnswer::Whole {
            value: result.quotient,
        },
        RemainderContext::AsFraction => {
            let divisor = gcd(result.remainder, result.divisor);
            RemainderAnswer::Mixed {
                whole: result.quotient,
                numerator: result.remainder / divisor,
                denominator: result.divisor / divisor,
            }
        }
        RemainderContext::ExactRemainder => RemainderAnswer::WithRemainder {
            quotient: result.quotient,
            remainder: result.remainder,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_divide_with_remainder() {
        let result = divide_with_remainder(38, 5).unwrap();
        assert_eq!(result.quotient, 7);
        assert_eq!(result.remainder, 3);
        assert!(!result.is_exact());
        assert!(matches!(
            divide_with_remainder(4, 0),
            Err(ForgeError::DivisionByZero)
        ));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 5), 1);
        assert_eq!(gcd(0, 9), 9);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn test_exact_division_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            let d = generate_exact_division(100, 999, 2, 9, &mut rng).unwrap();
            assert!(d.is_exact());
            assert!((100..=999).contains(&d.dividend));
            assert!((2..=9).contains(&d.divisor));
            assert_eq!(d.quotient * d.divisor, d.dividend);
        }
    }

    #[test]
    fn test_exact_division_impossible_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        // No multiple of 10 lies in 11..=19
        let result = generate_exact_division(11, 19, 10, 10, &mut rng);
        assert!(matches!(result, Err(ForgeError::GenerationExhausted { .. })));
    }

    #[test]
    fn test_division_with_remainder_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            let d = generate_division_with_remainder(20, 99, 3, 9, &mut rng).unwrap();
            assert!(d.remainder >= 1 && d.remainder < d.divisor);
            assert_eq!(d.quotient * d.divisor + d.remainder, d.dividend);
            assert!((20..=99).contains(&d.dividend));
        }
    }

    #[test]
    fn test_division_with_remainder_near_u64_max() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            let d = generate_division_with_remainder(u64::MAX - 10, u64::MAX, 2, 9, &mut rng)
                .unwrap();
            assert!(d.dividend >= u64::MAX - 10);
            assert_eq!(d.dividend - d.remainder, d.quotient * d.divisor);
        }
    }

    #[test]
    fn test_invalid_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(generate_exact_division(50, 10, 2, 5, &mut rng).is_err());
        assert!(generate_division_with_remainder(10, 50, 0, 5, &mut rng).is_err());
    }

    #[test]
    fn test_interpret_remainder() {
        let result = divide_with_remainder(38, 5).unwrap();
        assert_eq!(
            interpret_remainder(&result, RemainderContext::RoundUp),
            RemainderAnswer::Whole { value: 8 }
        );
        assert_eq!(
            interpret_remainder(&result, RemainderContext::RoundDown),
            RemainderAnswer::Whole { value: 7 }
        );
        assert_eq!(
            interpret_remainder(&result, RemainderContext::ExactRemainder),
            RemainderAnswer::WithRemainder {
                quotient: 7,
                remainder: 3
            }
        );

        let halves = divide_with_remainder(14, 4).unwrap();
        assert_eq!(
            interpret_remainder(&halves, RemainderContext::AsFraction),
            RemainderAnswer::Mixed {
                whole: 3,
                numerator: 1,
                denominator: 2
            }
        );

        let exact = divide_with_remainder(40, 5).unwrap();
        assert_eq!(
            interpret_remainder(&exact, RemainderContext::RoundUp),
            RemainderAnswer::Whole { value: 8 }
        );
    }
}
