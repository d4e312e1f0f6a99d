//! Batch generation
//!
//! Synthesizes many independent expressions in parallel. Item `i` draws
//! from stream `i` of the batch seed, so a batch is reproducible no matter
//! how rayon schedules it, and one item failing leaves the rest intact.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::error::Result;
use crate::core::rng::seeded_stream;
use crate::expression::synth::{synthesize_with, Expression, SynthesisRequest};

#[derive(Debug)]
pub struct BatchItem {
    pub index: u64,
    pub result: Result<Expression>,
}

impl BatchItem {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn expression(&self) -> Option<&Expression> {
        self.result.as_ref().ok()
    }

    pub fn to_outcome(&self) -> BatchOutcome {
        match &self.result {
            Ok(expression) => BatchOutcome::Generated {
                index: self.index,
                expression: expression.clone(),
            },
            Err(e) => BatchOutcome::Failed {
                index: self.index,
                error: e.to_string(),
            },
        }
    }
}

/// Serializable view of a [`BatchItem`]
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Generated { index: u64, expression: Expression },
    Failed { index: u64, error: String },
}

/// Synthesize `count` expressions for `request`, in index order.
pub fn synthesize_batch(seed: u64, count: u64, request: &SynthesisRequest) -> Vec<BatchItem> {
    let items: Vec<BatchItem> = (0..count)
        .into_par_iter()
        .map(|index| {
            let mut rng = seeded_stream(seed, index);
            let result = synthesize_with(request, &mut rng);
            if let Err(e) = &result {
                warn!(index, error = %e, "batch item failed");
            }
            BatchItem { index, result }
        })
        .collect();

    debug!(
        seed,
        count,
        generated = items.iter().filter(|item| item.is_ok()).count(),
        "batch complete"
    );
    items
}
