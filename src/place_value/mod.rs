//! Place value decomposition
//!
//! Splits an integer into one part per nonzero digit, each part being the
//! digit times its positional power of ten: 347 → [300, 40, 7].

pub mod place;

pub use place::{digit_at, place_value_at, Place};

use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};

/// Place value parts of an integer, most significant first
///
/// The parts always sum to `value`. A single-digit value (including 0)
/// decomposes to itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decomposition {
    value: u64,
    parts: Vec<u64>,
}

impl Decomposition {
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// True when the value cannot be split any further
    pub fn is_atomic(&self) -> bool {
        self.parts.len() == 1
    }

    pub fn sum(&self) -> u64 {
        self.parts.iter().sum()
    }

    pub fn into_parts(self) -> Vec<u64> {
        self.parts
    }
}

impl<'a> IntoIterator for &'a Decomposition {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

/// Decompose `n` into its place value parts.
pub fn decompose(n: u64) -> Decomposition {
    if n < 10 {
        return Decomposition {
            value: n,
            parts: vec![n],
        };
    }

    let mut parts = Vec::new();
    let mut power = 10u64.pow(n.ilog10());
    while power > 0 {
        let digit = (n / power) % 10;
        if digit > 0 {
            parts.push(digit * power);
        }
        power /= 10;
    }

    Decomposition { value: n, parts }
}

/// Decompose a signed integer, rejecting negatives.
pub fn decompose_signed(n: i64) -> Result<Decomposition> {
    let n = u64::try_from(n).map_err(|_| {
        ForgeError::InvalidInput(format!("cannot decompose negative number {}", n))
    })?;
    Ok(decompose(n))
}

/// Decimal digits of `n`, most significant first (0 → [0])
pub fn digits(n: u64) -> Vec<u64> {
    if n == 0 {
        return vec![0];
    }
    let mut out = Vec::new();
    let mut rest = n;
    while rest > 0 {
        out.push(rest % 10);
        rest /= 10;
    }
    out.reverse();
    out
}

/// Expanded form written as a sum: 347 → "300 + 40 + 7", 0 → "0"
pub fn expanded_form(n: u64) -> String {
    decompose(n)
        .parts()
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(" + ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_three_digits() {
        assert_eq!(decompose(347).parts(), &[300, 40, 7]);
    }

    #[test]
    fn test_decompose_single_digit() {
        assert_eq!(decompose(5).parts(), &[5]);
        assert_eq!(decompose(0).parts(), &[0]);
        assert!(decompose(5).is_atomic());
    }

    #[test]
    fn test_decompose_skips_zero_digits() {
        assert_eq!(decompose(4005).parts(), &[4000, 5]);
        assert_eq!(decompose(10).parts(), &[10]);
        assert_eq!(decompose(1_000_000).parts(), &[1_000_000]);
    }

    #[test]
    fn test_decompose_sum_matches_value() {
        for n in [0u64, 9, 10, 99, 101, 7_654_321, u64::MAX] {
            assert_eq!(decompose(n).sum(), n, "parts of {} should sum back", n);
        }
    }

    #[test]
    fn test_decompose_signed_rejects_negative() {
        assert!(matches!(
            decompose_signed(-4),
            Err(ForgeError::InvalidInput(_))
        ));
        assert_eq!(decompose_signed(47).unwrap().parts(), &[40, 7]);
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits(407), vec![4, 0, 7]);
        assert_eq!(digits(0), vec![0]);
    }

    #[test]
    fn test_expanded_form() {
        assert_eq!(expanded_form(347), "300 + 40 + 7");
        assert_eq!(expanded_form(0), "0");
        assert_eq!(expanded_form(2030), "2000 + 30");
    }
}
