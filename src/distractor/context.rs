//! What a question was built from, and the wrong answers each
//! misconception would give for it

use crate::distractor::answer::{Answer, Strategy};
use crate::division::DivisionResult;
use crate::expression::ast::Expr;
use crate::expression::eval::{
    evaluate, evaluate_ignoring_brackets, evaluate_left_to_right, evaluate_right_to_left,
};
use crate::grid::model::Grid;
use crate::place_value::{decompose, digits};

#[derive(Debug, Clone, Copy)]
pub enum DistractorContext<'a> {
    /// "Partition 347": answer is the place value parts
    Decomposition(u64),
    /// "47 × 26 = ?" worked on a grid
    Product(&'a Grid),
    Expression(&'a Expr),
    Division(DivisionResult),
}

impl<'a> DistractorContext<'a> {
    /// The correct answer for this context, None if it does not evaluate.
    pub fn correct_answer(&self) -> Option<Answer> {
        match self {
            DistractorContext::Decomposition(n) => Some(Answer::Parts(decompose(*n).into_parts())),
            DistractorContext::Product(grid) => i64::try_from(grid.total()).ok().map(Answer::Integer),
            DistractorContext::Expression(expr) => evaluate(expr).ok().map(Answer::Integer),
            DistractorContext::Division(result) => Some(Answer::QuotientRemainder {
                quotient: result.quotient,
                remainder: result.remainder,
            }),
        }
    }

    /// Candidates from the modeled misconceptions, in priority order.
    ///
    /// Misreadings that fail to evaluate, or would give a negative or
    /// otherwise impossible value, are left out.
    pub fn modeled_candidates(&self) -> Vec<(Answer, Strategy)> {
        let candidates = match self {
            DistractorContext::Decomposition(n) => decomposition_candidates(*n),
            DistractorContext::Product(grid) => product_candidates(grid),
            DistractorContext::Expression(expr) => expression_candidates(expr),
            DistractorContext::Division(result) => division_candidates(result),
        };
        candidates
            .into_iter()
            .filter(|(answer, _)| answer.is_valid())
            .collect()
    }
}

fn decomposition_candidates(n: u64) -> Vec<(Answer, Strategy)> {
    let parts = decompose(n).into_parts();
    let mut out = Vec::new();

    // 47 → [4, 7]
    let raw: Vec<u64> = digits(n).into_iter().filter(|&d| d > 0).collect();
    out.push((Answer::Parts(raw), Strategy::DigitDecomposition));

    // 47 → [400, 70]
    let scaled: Option<Vec<u64>> = parts.iter().map(|p| p.checked_mul(10)).collect();
    if let Some(scaled) = scaled {
        out.push((Answer::Parts(scaled), Strategy::MagnitudeError));
    }

    // 347 → [30, 40, 7]
    if let Some(&lead) = parts.first() {
        if lead >= 10 {
            let mut shrunk = parts.clone();
            shrunk[0] = lead / 10;
            out.push((Answer::Parts(shrunk), Strategy::MagnitudeError));
        }
    }

    out.push((Answer::Parts(vec![n]), Strategy::Omission));
    out
}

fn digit_sum(n: u64) -> u64 {
    digits(n).iter().sum()
}

fn product_candidates(grid: &Grid) -> Vec<(Answer, Strategy)> {
    let total = grid.total();
    let products = grid.products();
    let mut out = Vec::new();

    let mut push = |value: Option<u64>, strategy: Strategy| {
        if let Some(value) = value.and_then(|v| i64::try_from(v).ok()) {
            out.push((Answer::Integer(value), strategy));
        }
    };

    // Every cell worked as digit × digit
    push(
        digit_sum(grid.a()).checked_mul(digit_sum(grid.b())),
        Strategy::DigitDecomposition,
    );

    // Smallest partial product written ten times too large
    if let Some(&smallest) = products.iter().min() {
        push(
            smallest.checked_mul(9).and_then(|extra| total.checked_add(extra)),
            Strategy::MagnitudeError,
        );
    }

    // Largest partial product written a tenth of its size
    if let Some(&largest) = products.iter().filter(|&&p| p % 10 == 0).max() {
        push(Some(total - largest + largest / 10), Strategy::MagnitudeError);
    }

    // One cell forgotten in the final sum
    if products.len() > 1 {
        if let Some(&smallest) = products.iter().min() {
            push(Some(total - smallest), Strategy::Omission);
        }
    }

    out
}

fn expression_candidates(expr: &Expr) -> Vec<(Answer, Strategy)> {
    [
        (evaluate_left_to_right(expr), Strategy::LeftToRight),
        (evaluate_ignoring_brackets(expr), Strategy::BracketIgnored),
        (evaluate_right_to_left(expr), Strategy::RightToLeft),
    ]
    .into_iter()
    .filter_map(|(value, strategy)| value.ok().map(|v| (Answer::Integer(v), strategy)))
    .collect()
}

fn division_candidates(result: &DivisionResult) -> Vec<(Answer, Strategy)> {
    let DivisionResult {
        divisor,
        quotient,
        remainder,
        ..
    } = *result;
    let qr = |quotient, remainder| Answer::QuotientRemainder {
        quotient,
        remainder,
    };
    let mut out = vec![(qr(quotient, 0), Strategy::NoRemainder)];

    // With no remainder the swap would report the divisor itself
    if let Some(swapped) = divisor.checked_sub(remainder).filter(|&r| r > 0 && r < divisor) {
        out.push((qr(quotient, swapped), Strategy::SwappedRemainder));
    }

    // The old quotient only reads as a remainder when it is below the divisor
    if quotient < divisor {
        out.push((qr(remainder, quotient), Strategy::QuotientRemainderSwap));
    }

    // One quotient short; the upward version would need a negative remainder
    if let Some(short) = quotient.checked_sub(1) {
        if let Some(widened) = remainder.checked_add(divisor) {
            out.push((qr(short, widened), Strategy::OffByOneQuotient));
        }
    }

    out
}
