//! Numeracy Forge - constrained arithmetic content generation
//!
//! Place value decomposition, box method grids, bounded expression
//! synthesis and misconception-based distractors for arithmetic practice
//! questions. Every structure guarantees its mathematical invariants;
//! wording and layout are left to the caller.

pub mod batch;
pub mod core;
pub mod distractor;
pub mod division;
pub mod expression;
pub mod grid;
pub mod place_value;
