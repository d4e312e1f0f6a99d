//! Answer values and the misconceptions that produce wrong ones

use std::fmt;

use serde::{Deserialize, Serialize};

/// A question's answer in whichever shape the question asks for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Integer(i64),
    /// A decomposition, most significant part first
    Parts(Vec<u64>),
    QuotientRemainder { quotient: u64, remainder: u64 },
}

impl Answer {
    /// Integers must be >= 0, parts nonzero.
    pub fn is_valid(&self) -> bool {
        match self {
            Answer::Integer(value) => *value >= 0,
            Answer::Parts(parts) => !parts.is_empty() && parts.iter().all(|&p| p > 0),
            Answer::QuotientRemainder { .. } => true,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Integer(value) => write!(f, "{}", value),
            Answer::Parts(parts) => {
                let joined: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", joined.join(" + "))
            }
            Answer::QuotientRemainder {
                quotient,
                remainder: 0,
            } => write!(f, "{}", quotient),
            Answer::QuotientRemainder {
                quotient,
                remainder,
            } => write!(f, "{} r {}", quotient, remainder),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// 47 split as [4, 7] rather than [40, 7]
    DigitDecomposition,
    /// A part or partial product out by a factor of ten
    MagnitudeError,
    /// Number left whole, or a partial product forgotten
    Omission,
    /// Operators applied in reading order, precedence ignored
    LeftToRight,
    /// Precedence honoured but brackets dropped
    BracketIgnored,
    /// Operators grouped from the right
    RightToLeft,
    NoRemainder,
    /// Remainder reported as `divisor - remainder`
    SwappedRemainder,
    QuotientRemainderSwap,
    /// Quotient one short, remainder absorbing the divisor
    OffByOneQuotient,
    /// Filler near the correct value
    OffsetPerturbation,
}

impl Strategy {
    pub fn tag(&self) -> &'static str {
        match self {
            Strategy::DigitDecomposition => "digit_decomposition",
            Strategy::MagnitudeError => "magnitude_error",
            Strategy::Omission => "omission",
            Strategy::LeftToRight => "left_to_right",
            Strategy::BracketIgnored => "bracket_ignored",
            Strategy::RightToLeft => "right_to_left",
            Strategy::NoRemainder => "no_remainder",
            Strategy::SwappedRemainder => "swapped_remainder",
            Strategy::QuotientRemainderSwap => "quotient_remainder_swap",
            Strategy::OffByOneQuotient => "off_by_one_quotient",
            Strategy::OffsetPerturbation => "offset_perturbation",
        }
    }

    /// True for strategies that model a specific learner error.
    pub fn is_modeled(&self) -> bool {
        !matches!(self, Strategy::OffsetPerturbation)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distractor {
    pub value: Answer,
    pub strategy: Strategy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_display() {
        assert_eq!(Answer::Integer(27).to_string(), "27");
        assert_eq!(Answer::Parts(vec![300, 40, 7]).to_string(), "300 + 40 + 7");
        assert_eq!(
            Answer::QuotientRemainder {
                quotient: 7,
                remainder: 2
            }
            .to_string(),
            "7 r 2"
        );
        assert_eq!(
            Answer::QuotientRemainder {
                quotient: 7,
                remainder: 0
            }
            .to_string(),
            "7"
        );
    }

    #[test]
    fn test_validity() {
        assert!(Answer::Integer(0).is_valid());
        assert!(!Answer::Integer(-3).is_valid());
        assert!(!Answer::Parts(vec![40, 0]).is_valid());
        assert!(!Answer::Parts(vec![]).is_valid());
    }

    #[test]
    fn test_strategy_serializes_as_tag() {
        for strategy in [
            Strategy::LeftToRight,
            Strategy::SwappedRemainder,
            Strategy::OffsetPerturbation,
        ] {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.tag()));
        }
        assert!(!Strategy::OffsetPerturbation.is_modeled());
        assert!(Strategy::Omission.is_modeled());
    }
}
