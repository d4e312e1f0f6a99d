//! Precedence-climbing parser over [`Token`]s

use crate::core::error::{ForgeError, Result};
use crate::expression::ast::Expr;
use crate::expression::token::{tokenize, Token};

/// Parse a written formula such as `"(4 + 5) × 3"`.
pub fn parse(input: &str) -> Result<Expr> {
    let tokens = tokenize(input)?;
    parse_tokens(&tokens)
}

/// Parse an already tokenized formula.
pub fn parse_tokens(tokens: &[Token]) -> Result<Expr> {
    if tokens.is_empty() {
        return Err(ForgeError::Parse("empty expression".into()));
    }

    let mut stream = TokenStream { tokens, pos: 0 };
    let expr = stream.expression(0)?;

    if let Some(token) = stream.peek() {
        return Err(ForgeError::Parse(format!(
            "unexpected {:?} at token {}",
            token, stream.pos
        )));
    }
    Ok(expr)
}

struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenStream<'a> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    /// Operators of equal precedence associate to the left.
    fn expression(&mut self, min_precedence: u8) -> Result<Expr> {
        let mut left = self.primary()?;

        while let Some(Token::Op(op)) = self.peek() {
            if op.precedence() < min_precedence {
                break;
            }
            self.pos += 1;
            let right = self.expression(op.precedence() + 1)?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn primary(&mut self) -> Result<Expr> {
        match self.next() {
            Some(Token::Num(n)) => Ok(Expr::Num(n)),
            Some(Token::LParen) => {
                let inner = self.expression(0)?;
                match self.next() {
                    Some(Token::RParen) => Ok(Expr::group(inner)),
                    _ => Err(ForgeError::Parse("unclosed bracket".into())),
                }
            }
            Some(token) => Err(ForgeError::Parse(format!(
                "expected a number or '(', found {:?}",
                token
            ))),
            None => Err(ForgeError::Parse("unexpected end of expression".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::ast::Op;

    #[test]
    fn test_mul_binds_tighter_than_add() {
        let expr = parse("4 + 5 × 3").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                Op::Add,
                Expr::num(4),
                Expr::binary(Op::Mul, Expr::num(5), Expr::num(3))
            )
        );
    }

    #[test]
    fn test_brackets_override_precedence() {
        let expr = parse("(4 + 5) × 3").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                Op::Mul,
                Expr::group(Expr::binary(Op::Add, Expr::num(4), Expr::num(5))),
                Expr::num(3)
            )
        );
    }

    #[test]
    fn test_left_associative_subtraction() {
        let expr = parse("10 - 4 - 3").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                Op::Sub,
                Expr::binary(Op::Sub, Expr::num(10), Expr::num(4)),
                Expr::num(3)
            )
        );
    }

    #[test]
    fn test_round_trip_display() {
        for formula in [
            "(4 + 5) × 3",
            "4 + 5 × 3",
            "((2 + 3) × 4) - 1",
            "(6 - 2) ÷ (3 - 1) + 7",
            "12 ÷ 4 ÷ 3",
        ] {
            assert_eq!(parse(formula).unwrap().to_string(), formula);
        }
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(parse(""), Err(ForgeError::Parse(_))));
        assert!(matches!(parse("(4 + 5"), Err(ForgeError::Parse(_))));
        assert!(matches!(parse("4 +"), Err(ForgeError::Parse(_))));
        assert!(matches!(parse("4 5"), Err(ForgeError::Parse(_))));
        assert!(matches!(parse(")"), Err(ForgeError::Parse(_))));
    }
}
