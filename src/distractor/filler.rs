//! Last-resort offsets around the correct answer

use rand::seq::SliceRandom;
use rand::Rng;

use crate::distractor::answer::Answer;

const INTEGER_OFFSETS: [i64; 4] = [1, 2, 5, 10];
const SMALL_OFFSETS: [u64; 2] = [1, 2];

/// Offsets grow with the answer: 27 moves by 1..10, 1222 by 100..1000.
pub fn offset_scale(value: i64) -> i64 {
    let digits = value.unsigned_abs().checked_ilog10().unwrap_or(0) + 1;
    10_i64.pow(digits.saturating_sub(2))
}

/// A random value near `correct`, of the same shape.
///
/// None when the draw would overflow or leave the valid range; callers
/// simply draw again.
pub fn perturb(correct: &Answer, rng: &mut impl Rng) -> Option<Answer> {
    let up = rng.gen_bool(0.5);
    match correct {
        Answer::Integer(value) => {
            let offset = INTEGER_OFFSETS.choose(rng)?.checked_mul(offset_scale(*value))?;
            let moved = if up {
                value.checked_add(offset)?
            } else {
                value.checked_sub(offset)?
            };
            // Zero and below are never offered as a near miss
            (moved > 0).then_some(Answer::Integer(moved))
        }
        Answer::Parts(parts) => {
            let (&lead, rest) = parts.split_first()?;
            let unit = 10_u64.pow(lead.checked_ilog10().unwrap_or(0));
            let offset = SMALL_OFFSETS.choose(rng)?.checked_mul(unit)?;
            let moved = if up {
                lead.checked_add(offset)?
            } else {
                lead.checked_sub(offset)?
            };
            let mut out = Vec::with_capacity(parts.len());
            out.push(moved);
            out.extend_from_slice(rest);
            Some(Answer::Parts(out))
        }
        Answer::QuotientRemainder {
            quotient,
            remainder,
        } => {
            let offset = *SMALL_OFFSETS.choose(rng)?;
            let moved = if up {
                quotient.checked_add(offset)?
            } else {
                quotient.checked_sub(offset)?
            };
            Some(Answer::QuotientRemainder {
                quotient: moved,
                remainder: *remainder,
            })
        }
    }
}
