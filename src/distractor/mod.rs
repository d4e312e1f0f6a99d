//! Misconception distractors
//!
//! Wrong answers for multiple choice options, each produced by modeling a
//! specific learner error against the structure the question was built
//! from. Offset perturbation only fills the list once the modeled errors
//! run out.

pub mod answer;
pub mod context;
pub mod filler;

pub use answer::{Answer, Distractor, Strategy};
pub use context::DistractorContext;

use ahash::AHashSet;
use rand::Rng;
use tracing::debug;

use crate::core::config::config;

/// Up to `count` distinct wrong answers for `correct`.
///
/// Modeled strategies come first, in the order the context lists them;
/// a value two strategies agree on is kept once under the first. Fewer
/// than `count` come back when the filler budget runs out.
pub fn generate_distractors(
    correct: &Answer,
    context: &DistractorContext<'_>,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Distractor> {
    let mut seen: AHashSet<Answer> = AHashSet::new();
    seen.insert(correct.clone());
    let mut out = Vec::with_capacity(count);

    for (value, strategy) in context.modeled_candidates() {
        if out.len() >= count {
            break;
        }
        if seen.insert(value.clone()) {
            out.push(Distractor { value, strategy });
        }
    }

    let budget = config().max_filler_attempts;
    let mut attempts = 0;
    while out.len() < count && attempts < budget {
        attempts += 1;
        let Some(value) = filler::perturb(correct, rng) else {
            continue;
        };
        if value.is_valid() && seen.insert(value.clone()) {
            out.push(Distractor {
                value,
                strategy: Strategy::OffsetPerturbation,
            });
        }
    }

    if out.len() < count {
        debug!(
            wanted = count,
            found = out.len(),
            attempts,
            "distractor list short after filler budget"
        );
    }

    out
}

/// Distractors against the context's own correct answer; empty when the
/// context does not evaluate.
pub fn distractors_for(
    context: &DistractorContext<'_>,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Distractor> {
    match context.correct_answer() {
        Some(correct) => generate_distractors(&correct, context, count, rng),
        None => Vec::new(),
    }
}
