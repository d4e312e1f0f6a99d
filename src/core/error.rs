use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Generation exhausted: no valid {what} found after {attempts} attempts")]
    GenerationExhausted { what: String, attempts: u32 },

    #[error("Unsolvable gap request: a structure with {cells} cell(s) cannot hide any of them")]
    UnsolvableGapRequest { cells: usize },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Inexact division: {dividend} is not divisible by {divisor}")]
    InexactDivision { dividend: i64, divisor: i64 },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Arithmetic overflow while evaluating {0}")]
    Overflow(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl ForgeError {
    pub fn exhausted(what: impl Into<String>, attempts: u32) -> Self {
        ForgeError::GenerationExhausted {
            what: what.into(),
            attempts,
        }
    }

    /// True for failures a caller can sidestep by retrying with looser bounds.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ForgeError::GenerationExhausted { .. } | ForgeError::UnsolvableGapRequest { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ForgeError>;
