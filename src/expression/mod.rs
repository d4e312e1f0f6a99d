//! BODMAS expression engine
//!
//! tokenize -> parse -> Expr -> evaluate, plus rejection-sampling
//! synthesis of bounded integer expressions.

pub mod ast;
pub mod eval;
pub mod parser;
pub mod synth;
pub mod token;

pub use ast::{Expr, Op};
pub use eval::{
    apply, evaluate, evaluate_ignoring_brackets, evaluate_left_to_right, evaluate_right_to_left,
    evaluate_str, evaluation_steps, first_step, Step,
};
pub use parser::{parse, parse_tokens};
pub use synth::{
    expression_for_target, synthesize, synthesize_with, BracketPattern, Expression,
    SynthesisRequest,
};
pub use token::{tokenize, Token};
