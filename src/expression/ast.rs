//! Expression tree for integer arithmetic
//!
//! Only the four operators and explicit bracket groups exist. Groups are
//! kept as nodes so a formula prints back with the brackets it was
//! written with, and so "ignore the brackets" can be modeled.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub const WITHOUT_DIVISION: [Op; 3] = [Op::Add, Op::Sub, Op::Mul];
    pub const ALL: [Op; 4] = [Op::Add, Op::Sub, Op::Mul, Op::Div];

    /// Binding strength: × and ÷ before + and −
    pub fn precedence(&self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "×",
            Op::Div => "÷",
        }
    }

    pub fn is_multiplicative(&self) -> bool {
        self.precedence() == 2
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A non-negative integer literal
    Num(i64),
    /// left op right
    Binary {
        op: Op,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// An explicit pair of brackets
    Group(Box<Expr>),
}

impl Expr {
    pub fn num(value: i64) -> Self {
        Expr::Num(value)
    }

    pub fn binary(op: Op, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn group(inner: Expr) -> Self {
        Expr::Group(Box::new(inner))
    }

    /// Operands and operators in written order, brackets dropped
    pub fn flatten(&self) -> (Vec<i64>, Vec<Op>) {
        let mut operands = Vec::new();
        let mut ops = Vec::new();
        self.flatten_into(&mut operands, &mut ops);
        (operands, ops)
    }

    fn flatten_into(&self, operands: &mut Vec<i64>, ops: &mut Vec<Op>) {
        match self {
            Expr::Num(n) => operands.push(*n),
            Expr::Binary { op, left, right } => {
                left.flatten_into(operands, ops);
                ops.push(*op);
                right.flatten_into(operands, ops);
            }
            Expr::Group(inner) => inner.flatten_into(operands, ops),
        }
    }

    pub fn operator_count(&self) -> usize {
        match self {
            Expr::Num(_) => 0,
            Expr::Binary { left, right, .. } => 1 + left.operator_count() + right.operator_count(),
            Expr::Group(inner) => inner.operator_count(),
        }
    }

    pub fn has_brackets(&self) -> bool {
        match self {
            Expr::Num(_) => false,
            Expr::Binary { left, right, .. } => left.has_brackets() || right.has_brackets(),
            Expr::Group(_) => true,
        }
    }

    pub fn contains_op(&self, target: Op) -> bool {
        match self {
            Expr::Num(_) => false,
            Expr::Binary { op, left, right } => {
                *op == target || left.contains_op(target) || right.contains_op(target)
            }
            Expr::Group(inner) => inner.contains_op(target),
        }
    }

    /// Precedence of the top-level operator; literals and groups bind tightest
    fn binding(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Num(_) | Expr::Group(_) => u8::MAX,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{}", n),
            Expr::Group(inner) => write!(f, "({})", inner),
            Expr::Binary { op, left, right } => {
                // Hand-built trees may nest without Group nodes; add the
                // brackets needed to keep the printed form faithful.
                if left.binding() < op.precedence() {
                    write!(f, "({})", left)?;
                } else {
                    write!(f, "{}", left)?;
                }
                write!(f, " {} ", op)?;
                if right.binding() <= op.precedence() {
                    write!(f, "({})", right)
                } else {
                    write!(f, "{}", right)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_group() {
        let expr = Expr::binary(
            Op::Mul,
            Expr::group(Expr::binary(Op::Add, Expr::num(4), Expr::num(5))),
            Expr::num(3),
        );
        assert_eq!(expr.to_string(), "(4 + 5) × 3");
    }

    #[test]
    fn test_display_adds_needed_brackets() {
        let expr = Expr::binary(
            Op::Sub,
            Expr::num(10),
            Expr::binary(Op::Sub, Expr::num(4), Expr::num(3)),
        );
        assert_eq!(expr.to_string(), "10 - (4 - 3)");

        let expr = Expr::binary(
            Op::Mul,
            Expr::binary(Op::Add, Expr::num(1), Expr::num(2)),
            Expr::num(3),
        );
        assert_eq!(expr.to_string(), "(1 + 2) × 3");
    }

    #[test]
    fn test_display_precedence_needs_no_brackets() {
        let expr = Expr::binary(
            Op::Add,
            Expr::num(4),
            Expr::binary(Op::Mul, Expr::num(5), Expr::num(3)),
        );
        assert_eq!(expr.to_string(), "4 + 5 × 3");
    }

    #[test]
    fn test_flatten_drops_groups() {
        let expr = Expr::binary(
            Op::Div,
            Expr::group(Expr::binary(Op::Add, Expr::num(6), Expr::num(2))),
            Expr::num(4),
        );
        let (operands, ops) = expr.flatten();
        assert_eq!(operands, vec![6, 2, 4]);
        assert_eq!(ops, vec![Op::Add, Op::Div]);
        assert_eq!(expr.operator_count(), 2);
        assert!(expr.has_brackets());
        assert!(expr.contains_op(Op::Div));
        assert!(!expr.contains_op(Op::Sub));
    }
}
