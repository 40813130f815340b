use std::path::PathBuf;

use thiserror::Error;

use super::eval::{EvalError, EvalFailure};

/// Fatal error that aborts a compile run.
///
/// Errors raised while scanning carry the 1-based line number of the
/// statement (for a multi-line loop block, the line holding `for`).
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("line {line}: failed to evaluate '{expr}' -> '{normalized}': {source}")]
    Expression {
        line: usize,
        expr: String,
        normalized: String,
        #[source]
        source: EvalError,
    },

    #[error("line {line}: invalid port '{token}'")]
    InvalidPort { line: usize, token: String },

    #[error("line {line}: for-loop increment evaluated to 0")]
    ZeroStepLoop { line: usize },

    #[error("line {line}: unsupported increment expression '{increment}'")]
    UnsupportedIncrement { line: usize, increment: String },

    #[error("line {line}: descending loop (step {step}) is not supported")]
    DescendingLoop { line: usize, step: i64 },

    #[error("invalid configuration '{}': {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    /// Attach a line number to an expression failure.
    pub fn expression(line: usize, failure: EvalFailure) -> Self {
        CompileError::Expression {
            line,
            expr: failure.expr,
            normalized: failure.normalized,
            source: failure.error,
        }
    }

    /// Input line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            CompileError::Expression { line, .. }
            | CompileError::InvalidPort { line, .. }
            | CompileError::ZeroStepLoop { line }
            | CompileError::UnsupportedIncrement { line, .. }
            | CompileError::DescendingLoop { line, .. } => Some(*line),
            CompileError::Config { .. } | CompileError::Io { .. } => None,
        }
    }

    /// Caret diagnostic under the offending part of a normalized expression.
    pub fn context(&self) -> Option<String> {
        let CompileError::Expression {
            normalized, source, ..
        } = self
        else {
            return None;
        };
        match source {
            EvalError::InvalidExpression(parse_error) => {
                Some(parse_error.format_with_context(normalized))
            }
            EvalError::UnsupportedConstruct(unsupported) => {
                let as_parse = iostim_parser::ParseError::unexpected_token(
                    unsupported.kind.to_string(),
                    "arithmetic expression",
                    unsupported.span,
                );
                Some(as_parse.format_with_context(normalized))
            }
            _ => None,
        }
    }
}

/// Result type for compile operations
pub type CompileResult<T> = Result<T, CompileError>;
