//! Parse errors

use thiserror::Error;

use crate::span::Span;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token '{found}' at {span}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        span: Span,
    },

    #[error("unexpected end of input at {span}, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    /// `(`, `[` or `{` without its closing partner
    #[error("unclosed delimiter '{delimiter}' at {span}")]
    UnclosedDelimiter { delimiter: char, span: Span },

    /// Text no token matches, such as a Verilog literal that was not normalized
    #[error("unrecognized character '{text}' at {span}")]
    InvalidCharacter { text: String, span: Span },

    #[error("expression nested deeper than {limit} levels at {span}")]
    NestingTooDeep { limit: usize, span: Span },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::UnclosedDelimiter { span, .. }
            | ParseError::InvalidCharacter { span, .. }
            | ParseError::NestingTooDeep { span, .. } => span,
        }
    }

    pub fn unexpected_token(
        found: impl Into<String>,
        expected: impl Into<String>,
        span: Span,
    ) -> Self {
        ParseError::UnexpectedToken {
            found: found.into(),
            expected: expected.into(),
            span,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
            span,
        }
    }

    /// The source line holding the error with carets under the span.
    ///
    /// Returns an empty string when the span lies outside `source`.
    pub fn format_with_context(&self, source: &str) -> String {
        let span = self.span();
        let Some(text) = source.lines().nth(span.line.saturating_sub(1)) else {
            return String::new();
        };

        let column = span.column.saturating_sub(1).min(text.len());
        let width = span.len().clamp(1, (text.len() - column).max(1));
        let gutter = span.line.to_string();

        format!(
            "  {} | {}\n  {} | {}{}",
            gutter,
            text,
            " ".repeat(gutter.len()),
            " ".repeat(column),
            "^".repeat(width)
        )
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
