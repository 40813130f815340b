use iostim_parser::ParseError;
use thiserror::Error;

use super::unsupported::UnsupportedConstruct;

/// Failure while parsing, lowering or evaluating one expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("invalid expression: {0}")]
    InvalidExpression(#[from] ParseError),

    /// Integer literal that does not fit in 64 bits, or a malformed digit group
    #[error("invalid integer literal '{0}'")]
    InvalidLiteral(String),

    #[error("unknown name: {0}")]
    UnknownIdentifier(String),

    #[error(transparent)]
    UnsupportedConstruct(#[from] UnsupportedConstruct),

    #[error("division by zero")]
    DivisionByZero,

    #[error("negative shift count {0}")]
    NegativeShift(i64),

    #[error("integer overflow")]
    Overflow,
}

/// An [`EvalError`] together with the text it came from.
///
/// `normalized` is exactly the text handed to the parser, so spans inside
/// `error` index into it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to evaluate '{expr}' -> '{normalized}': {error}")]
pub struct EvalFailure {
    pub expr: String,
    pub normalized: String,
    pub error: EvalError,
}

impl EvalFailure {
    pub fn new(expr: impl Into<String>, normalized: impl Into<String>, error: EvalError) -> Self {
        Self {
            expr: expr.into(),
            normalized: normalized.into(),
            error,
        }
    }
}
