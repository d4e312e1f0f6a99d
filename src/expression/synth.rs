//! Expression synthesis by bounded rejection sampling
//!
//! Candidates are drawn from a small operand range, bracketed by one of a
//! few canonical patterns, evaluated exactly, and kept only when the
//! result is a non-negative integer within the magnitude cap.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::config::config;
use crate::core::error::{ForgeError, Result};
use crate::expression::ast::{Expr, Op};
use crate::expression::eval::evaluate;
use crate::expression::parser::{parse, parse_tokens};
use crate::expression::token::Token;
use crate::grid::gaps::select_positions;

/// Where brackets go, in terms of operand positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketPattern {
    /// `a + b × c`
    None,
    /// `(a + b) × c`
    FirstPair,
    /// `a + (b × c)`
    SecondPair,
    /// `a + b × (c − d)`
    ThirdPair,
    /// `(a + b) × (c − d) + e`
    SplitPairs,
    /// `((a + b) × c) − d`
    Nested,
    /// Brackets that follow none of the layouts above (parsed formulas only)
    Irregular,
}

impl BracketPattern {
    /// Fewest operators the pattern can be laid over
    pub fn min_operators(&self) -> usize {
        match self {
            BracketPattern::None => 1,
            BracketPattern::FirstPair | BracketPattern::SecondPair => 2,
            BracketPattern::ThirdPair | BracketPattern::SplitPairs | BracketPattern::Nested => 3,
            BracketPattern::Irregular => usize::MAX,
        }
    }

    /// Irregular never fits: it cannot be laid out from operands alone.
    pub fn fits(&self, operator_count: usize) -> bool {
        operator_count >= self.min_operators()
    }

    /// Bracketed patterns drawn at random for `operator_count` operators.
    /// Nested brackets are only produced on request.
    pub fn candidates(operator_count: usize) -> Vec<BracketPattern> {
        [
            BracketPattern::FirstPair,
            BracketPattern::SecondPair,
            BracketPattern::ThirdPair,
            BracketPattern::SplitPairs,
        ]
        .into_iter()
        .filter(|p| p.fits(operator_count))
        .collect()
    }

    /// Operand ranges (inclusive) to wrap, outermost first
    fn groups(&self) -> &'static [(usize, usize)] {
        match self {
            BracketPattern::None | BracketPattern::Irregular => &[],
            BracketPattern::FirstPair => &[(0, 1)],
            BracketPattern::SecondPair => &[(1, 2)],
            BracketPattern::ThirdPair => &[(2, 3)],
            BracketPattern::SplitPairs => &[(0, 1), (2, 3)],
            BracketPattern::Nested => &[(0, 2), (0, 1)],
        }
    }
}

/// A synthesized formula together with its exact result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    /// Written form, e.g. "(4 + 5) × 3"
    pub formula: String,
    pub tree: Expr,
    pub operands: Vec<i64>,
    pub operators: Vec<Op>,
    pub pattern: BracketPattern,
    pub result: i64,
}

impl Expression {
    /// Lay `operators` between `operands`, bracket per `pattern`, evaluate.
    ///
    /// No acceptance test beyond exact evaluation is applied here.
    pub fn build(operands: &[i64], operators: &[Op], pattern: BracketPattern) -> Result<Self> {
        if operands.len() != operators.len() + 1 {
            return Err(ForgeError::InvalidInput(format!(
                "{} operands cannot take {} operators",
                operands.len(),
                operators.len()
            )));
        }
        if !pattern.fits(operators.len()) {
            return Err(ForgeError::InvalidInput(format!(
                "{:?} needs at least {} operators, got {}",
                pattern,
                pattern.min_operators(),
                operators.len()
            )));
        }
        if let Some(n) = operands.iter().find(|n| **n < 0) {
            return Err(ForgeError::InvalidInput(format!(
                "operand {} is negative",
                n
            )));
        }

        let groups = pattern.groups();
        let mut tokens = Vec::with_capacity(operands.len() * 2 + groups.len() * 2);
        for (i, &operand) in operands.iter().enumerate() {
            for _ in groups.iter().filter(|(start, _)| *start == i) {
                tokens.push(Token::LParen);
            }
            tokens.push(Token::Num(operand));
            for _ in groups.iter().filter(|(_, end)| *end == i) {
                tokens.push(Token::RParen);
            }
            if let Some(op) = operators.get(i) {
                tokens.push(Token::Op(*op));
            }
        }

        let tree = parse_tokens(&tokens)?;
        let result = evaluate(&tree)?;

        Ok(Self {
            formula: tree.to_string(),
            tree,
            operands: operands.to_vec(),
            operators: operators.to_vec(),
            pattern,
            result,
        })
    }

    /// Wrap a hand-written formula, recognising the canonical layouts.
    pub fn parse(formula: &str) -> Result<Self> {
        let tree = parse(formula)?;
        let result = evaluate(&tree)?;
        let (operands, operators) = tree.flatten();
        let pattern = detect_pattern(&tree, &operands, &operators);

        Ok(Self {
            formula: tree.to_string(),
            tree,
            operands,
            operators,
            pattern,
            result,
        })
    }

    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }

    pub fn has_division(&self) -> bool {
        self.operators.contains(&Op::Div)
    }

    /// Operator positions to blank out for a "missing operator" question
    pub fn select_operator_gaps(&self, desired: usize, rng: &mut impl Rng) -> Vec<usize> {
        select_positions(self.operators.len(), desired, rng)
    }
}

/// Match a parsed tree against the canonical layouts.
fn detect_pattern(tree: &Expr, operands: &[i64], operators: &[Op]) -> BracketPattern {
    if !tree.has_brackets() {
        return BracketPattern::None;
    }
    [
        BracketPattern::FirstPair,
        BracketPattern::SecondPair,
        BracketPattern::ThirdPair,
        BracketPattern::SplitPairs,
        BracketPattern::Nested,
    ]
    .into_iter()
    .filter(|p| p.fits(operators.len()))
    .find(|p| {
        Expression::build(operands, operators, *p)
            .map(|e| e.tree == *tree)
            .unwrap_or(false)
    })
    .unwrap_or(BracketPattern::Irregular)
}

/// Parameters for [`synthesize_with`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub operator_count: usize,
    pub use_brackets: bool,
    pub allow_division: bool,
    pub max_magnitude: i64,
    /// Force one layout instead of drawing from [`BracketPattern::candidates`]
    pub pattern: Option<BracketPattern>,
    pub operand_min: i64,
    pub operand_max: i64,
    pub max_attempts: u32,
}

impl SynthesisRequest {
    /// Request with bounds taken from the global config
    pub fn new(operator_count: usize) -> Self {
        let cfg = config();
        Self {
            operator_count,
            use_brackets: false,
            allow_division: false,
            max_magnitude: cfg.default_max_magnitude,
            pattern: None,
            operand_min: cfg.operand_min,
            operand_max: cfg.operand_max,
            max_attempts: cfg.max_synthesis_attempts,
        }
    }

    pub fn with_brackets(mut self, use_brackets: bool) -> Self {
        self.use_brackets = use_brackets;
        self
    }

    pub fn with_division(mut self, allow_division: bool) -> Self {
        self.allow_division = allow_division;
        self
    }

    pub fn with_max_magnitude(mut self, max_magnitude: i64) -> Self {
        self.max_magnitude = max_magnitude;
        self
    }

    pub fn with_pattern(mut self, pattern: BracketPattern) -> Self {
        self.use_brackets = pattern != BracketPattern::None;
        self.pattern = Some(pattern);
        self
    }

    pub fn with_operand_range(mut self, min: i64, max: i64) -> Self {
        self.operand_min = min;
        self.operand_max = max;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.operator_count == 0 {
            return Err(ForgeError::InvalidInput(
                "an expression needs at least one operator".into(),
            ));
        }
        if self.operand_min < 0 || self.operand_min > self.operand_max {
            return Err(ForgeError::InvalidInput(format!(
                "operand range {}..={} is empty or negative",
                self.operand_min, self.operand_max
            )));
        }
        if self.max_magnitude < 0 {
            return Err(ForgeError::InvalidInput(format!(
                "max_magnitude {} is negative",
                self.max_magnitude
            )));
        }
        if self.max_attempts == 0 {
            return Err(ForgeError::InvalidInput("max_attempts must be positive".into()));
        }
        if let Some(pattern) = self.pattern {
            if !pattern.fits(self.operator_count) {
                return Err(ForgeError::InvalidInput(format!(
                    "{:?} does not fit {} operators",
                    pattern, self.operator_count
                )));
            }
        } else if self.use_brackets && BracketPattern::candidates(self.operator_count).is_empty() {
            return Err(ForgeError::InvalidInput(format!(
                "no bracket pattern fits {} operator(s)",
                self.operator_count
            )));
        }
        Ok(())
    }

    fn accepts(&self, expression: &Expression) -> bool {
        expression.result >= 0 && expression.result <= self.max_magnitude
    }
}

/// Synthesize an expression with `operator_count` operators.
pub fn synthesize(
    operator_count: usize,
    use_brackets: bool,
    allow_division: bool,
    max_magnitude: i64,
    rng: &mut impl Rng,
) -> Result<Expression> {
    let request = SynthesisRequest::new(operator_count)
        .with_brackets(use_brackets)
        .with_division(allow_division)
        .with_max_magnitude(max_magnitude);
    synthesize_with(&request, rng)
}

/// Synthesize per `request`, giving up after `request.max_attempts` draws.
pub fn synthesize_with(request: &SynthesisRequest, rng: &mut impl Rng) -> Result<Expression> {
    request.validate()?;

    let ops: &[Op] = if request.allow_division {
        &Op::ALL
    } else {
        &Op::WITHOUT_DIVISION
    };
    let candidates = BracketPattern::candidates(request.operator_count);

    for attempt in 1..=request.max_attempts {
        let operands: Vec<i64> = (0..=request.operator_count)
            .map(|_| rng.gen_range(request.operand_min..=request.operand_max))
            .collect();
        let operators: Vec<Op> = (0..request.operator_count)
            .map(|_| ops[rng.gen_range(0..ops.len())])
            .collect();
        let pattern = match request.pattern {
            Some(pattern) => pattern,
            None if request.use_brackets => *candidates
                .choose(rng)
                .unwrap_or(&BracketPattern::None),
            None => BracketPattern::None,
        };

        match Expression::build(&operands, &operators, pattern) {
            Ok(expression) if request.accepts(&expression) => {
                trace!(attempt, formula = %expression.formula, "expression accepted");
                return Ok(expression);
            }
            Ok(_)
            | Err(ForgeError::InexactDivision { .. })
            | Err(ForgeError::DivisionByZero)
            | Err(ForgeError::Overflow(_)) => continue,
            Err(e) => return Err(e),
        }
    }

    warn!(
        operators = request.operator_count,
        division = request.allow_division,
        max_magnitude = request.max_magnitude,
        "expression synthesis exhausted its attempt budget"
    );
    Err(ForgeError::exhausted("expression", request.max_attempts))
}

/// A two-operand expression equal to `target`: either `a + b` or
/// `f × g` with a factor no larger than the configured cap.
pub fn expression_for_target(target: i64, rng: &mut impl Rng) -> Result<Expression> {
    if target < 0 {
        return Err(ForgeError::InvalidInput(format!(
            "target {} is negative",
            target
        )));
    }

    let use_add = target < 2 || rng.gen_bool(0.5);
    if use_add {
        let a = if target < 2 { 0 } else { rng.gen_range(1..target) };
        return Expression::build(&[a, target - a], &[Op::Add], BracketPattern::None);
    }

    let cap = config().max_target_factor.min(target);
    let factors: Vec<i64> = (2..=cap).filter(|f| target % f == 0).collect();
    match factors.choose(rng) {
        Some(&factor) => {
            Expression::build(&[factor, target / factor], &[Op::Mul], BracketPattern::None)
        }
        None => Expression::build(&[target, 1], &[Op::Mul], BracketPattern::None),
    }
}
