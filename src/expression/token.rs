//! Tokenizer for arithmetic formulas
//!
//! Accepts digits, `+`, `-`/`−`, `×`/`*`, `÷`/`/`, brackets and
//! whitespace. Anything else is a parse error.

use nom::branch::alt;
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{all_consuming, map_res, value};
use nom::multi::many0;
use nom::sequence::delimited;
use nom::{IResult, Parser};

use crate::core::error::{ForgeError, Result};
use crate::expression::ast::Op;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Num(i64),
    Op(Op),
    LParen,
    RParen,
}

fn number(input: &str) -> IResult<&str, Token> {
    map_res(digit1, |digits: &str| digits.parse::<i64>().map(Token::Num)).parse(input)
}

fn operator(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Op(Op::Add), char('+')),
        value(Token::Op(Op::Sub), alt((char('-'), char('−')))),
        value(Token::Op(Op::Mul), alt((char('×'), char('*')))),
        value(Token::Op(Op::Div), alt((char('÷'), char('/')))),
    ))
    .parse(input)
}

fn bracket(input: &str) -> IResult<&str, Token> {
    alt((value(Token::LParen, char('(')), value(Token::RParen, char(')')))).parse(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    delimited(multispace0, alt((number, operator, bracket)), multispace0).parse(input)
}

/// Split a formula into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let (_, tokens) = all_consuming(delimited(multispace0, many0(token), multispace0))
        .parse(input)
        .map_err(|e| ForgeError::Parse(format!("unrecognised input in {:?}: {}", input, e)))?;
    Ok(tokens)
}
