//! Exact integer evaluation
//!
//! Every division must leave no remainder; overflow and division by zero
//! are errors rather than panics. Besides the correct BODMAS reading, this
//! module evaluates the readings a learner typically gets wrong.

use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};
use crate::expression::ast::{Expr, Op};
use crate::expression::parser::{parse, parse_tokens};
use crate::expression::token::Token;

/// Apply `op` exactly.
pub fn apply(op: Op, left: i64, right: i64) -> Result<i64> {
    let overflow = || ForgeError::Overflow(format!("{} {} {}", left, op, right));
    match op {
        Op::Add => left.checked_add(right).ok_or_else(overflow),
        Op::Sub => left.checked_sub(right).ok_or_else(overflow),
        Op::Mul => left.checked_mul(right).ok_or_else(overflow),
        Op::Div => {
            if right == 0 {
                return Err(ForgeError::DivisionByZero);
            }
            if left.checked_rem(right).ok_or_else(overflow)? != 0 {
                return Err(ForgeError::InexactDivision {
                    dividend: left,
                    divisor: right,
                });
            }
            left.checked_div(right).ok_or_else(overflow)
        }
    }
}

/// Evaluate with brackets first, then × ÷, then + −, each left to right.
pub fn evaluate(expr: &Expr) -> Result<i64> {
    match expr {
        Expr::Num(n) => Ok(*n),
        Expr::Group(inner) => evaluate(inner),
        Expr::Binary { op, left, right } => apply(*op, evaluate(left)?, evaluate(right)?),
    }
}

/// Parse and evaluate a written formula.
pub fn evaluate_str(input: &str) -> Result<i64> {
    evaluate(&parse(input)?)
}

/// Strictly left to right, ignoring both precedence and brackets:
/// `4 + 5 × 3` reads as `(4 + 5) × 3`.
pub fn evaluate_left_to_right(expr: &Expr) -> Result<i64> {
    let (operands, ops) = expr.flatten();
    let mut acc = operands[0];
    for (op, &operand) in ops.iter().zip(&operands[1..]) {
        acc = apply(*op, acc, operand)?;
    }
    Ok(acc)
}

/// Strictly right to left: `a − b + c` reads as `a − (b + c)`.
pub fn evaluate_right_to_left(expr: &Expr) -> Result<i64> {
    let (operands, ops) = expr.flatten();
    let last = operands.len() - 1;
    let mut acc = operands[last];
    for (i, op) in ops.iter().enumerate().rev() {
        acc = apply(*op, operands[i], acc)?;
    }
    Ok(acc)
}

/// Precedence honoured but brackets dropped: `(4 + 5) × 3` reads as
/// `4 + 5 × 3`.
pub fn evaluate_ignoring_brackets(expr: &Expr) -> Result<i64> {
    let (operands, ops) = expr.flatten();
    let mut tokens = Vec::with_capacity(operands.len() + ops.len());
    for (i, &operand) in operands.iter().enumerate() {
        tokens.push(Token::Num(operand));
        if let Some(op) = ops.get(i) {
            tokens.push(Token::Op(*op));
        }
    }
    evaluate(&parse_tokens(&tokens)?)
}

/// One binary operation in the order BODMAS performs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub left: i64,
    pub op: Op,
    pub right: i64,
    pub value: i64,
}

impl Step {
    /// "4 + 5"
    pub fn calculation(&self) -> String {
        format!("{} {} {}", self.left, self.op, self.right)
    }
}

/// The operations of `expr` in evaluation order.
pub fn evaluation_steps(expr: &Expr) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    collect_steps(expr, &mut steps)?;
    Ok(steps)
}

fn collect_steps(expr: &Expr, steps: &mut Vec<Step>) -> Result<i64> {
    match expr {
        Expr::Num(n) => Ok(*n),
        Expr::Group(inner) => collect_steps(inner, steps),
        Expr::Binary { op, left, right } => {
            let l = collect_steps(left, steps)?;
            let r = collect_steps(right, steps)?;
            let value = apply(*op, l, r)?;
            steps.push(Step {
                left: l,
                op: *op,
                right: r,
                value,
            });
            Ok(value)
        }
    }
}

/// The calculation to do first, or None for a bare number.
pub fn first_step(expr: &Expr) -> Result<Option<Step>> {
    Ok(evaluation_steps(expr)?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(formula: &str) -> Expr {
        parse(formula).unwrap()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate_str("4 + 5 × 3").unwrap(), 19);
        assert_eq!(evaluate_str("(4 + 5) × 3").unwrap(), 27);
        assert_eq!(evaluate_str("20 - 6 ÷ 2 × 3").unwrap(), 11);
        assert_eq!(evaluate_str("10 - 4 - 3").unwrap(), 3);
    }

    #[test]
    fn test_inexact_division_rejected() {
        assert!(matches!(
            evaluate_str("7 ÷ 2"),
            Err(ForgeError::InexactDivision {
                dividend: 7,
                divisor: 2
            })
        ));
        // 3 ÷ 2 × 4 == 6 over the rationals but the first step is inexact
        assert!(evaluate_str("3 ÷ 2 × 4").is_err());
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            evaluate_str("5 ÷ (3 - 3)"),
            Err(ForgeError::DivisionByZero)
        ));
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(matches!(
            evaluate_str("9223372036854775807 + 1"),
            Err(ForgeError::Overflow(_))
        ));
    }

    #[test]
    fn test_left_to_right_reading() {
        assert_eq!(evaluate_left_to_right(&parsed("4 + 5 × 3")).unwrap(), 27);
        assert_eq!(evaluate_left_to_right(&parsed("2 + 3 × 4 - 5")).unwrap(), 15);
    }

    #[test]
    fn test_right_to_left_reading() {
        assert_eq!(evaluate_right_to_left(&parsed("10 - 4 + 3")).unwrap(), 3);
        assert_eq!(evaluate_right_to_left(&parsed("4 × 5 + 3")).unwrap(), 32);
    }

    #[test]
    fn test_ignoring_brackets_reading() {
        assert_eq!(evaluate_ignoring_brackets(&parsed("(4 + 5) × 3")).unwrap(), 19);
        assert_eq!(evaluate_ignoring_brackets(&parsed("4 + 5 × 3")).unwrap(), 19);
    }

    #[test]
    fn test_evaluation_steps_follow_bodmas() {
        let steps = evaluation_steps(&parsed("2 + 3 × 4 - 5")).unwrap();
        let calcs: Vec<String> = steps.iter().map(|s| s.calculation()).collect();
        assert_eq!(calcs, vec!["3 × 4", "2 + 12", "14 - 5"]);
        assert_eq!(steps.last().unwrap().value, 9);
    }

    #[test]
    fn test_first_step_is_bracket() {
        let step = first_step(&parsed("6 × (7 - 2) + 1")).unwrap().unwrap();
        assert_eq!(step.calculation(), "7 - 2");
        assert_eq!(step.value, 5);

        assert_eq!(first_step(&parsed("12")).unwrap(), None);
    }
}
