//! iostim_parser
//!
//! Lexer, expression parser and Verilog literal normalizer for iostim
//! stimulus scripts.
//!
//! The parser accepts a generic C-like expression grammar and produces a
//! concrete syntax tree. Deciding which constructs are allowed is left to
//! the consumer.
//!
//! # Example
//!
//! ```
//! use iostim_parser::{normalize_literals, parse_expression, NodeKind};
//!
//! let text = normalize_literals("8'hF0 | i");
//! let cst = parse_expression(&text).expect("parse failed");
//!
//! assert_eq!(cst.kind, NodeKind::BinaryExpression);
//! assert_eq!(cst.operator(), Some("|"));
//! ```

pub mod cst;
pub mod error;
pub mod lexer;
pub mod literal;
pub mod node_kind;
pub mod parser;
pub mod span;
pub mod token;

// Re-exports
pub use cst::CstNode;
pub use error::{ParseError, ParseResult};
pub use lexer::{LexResult, Lexer, SpannedToken};
pub use literal::{normalize_literals, parse_integer_literal, strip_terminators};
pub use node_kind::NodeKind;
pub use parser::{Parser, MAX_NESTING_DEPTH};
pub use span::{SourceMap, Span};
pub use token::{Associativity, Precedence, Token};

/// Parse expression text into a CST
///
/// The whole input must form one expression; trailing tokens are an error.
///
/// # Example
///
/// ```
/// use iostim_parser::{parse_expression, NodeKind};
///
/// let cst = parse_expression("(1 << 4) | 1").unwrap();
/// assert_eq!(cst.kind, NodeKind::BinaryExpression);
/// ```
pub fn parse_expression(source: &str) -> ParseResult<CstNode> {
    parser::parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        let cst = parse_expression("42").unwrap();
        assert_eq!(cst.kind, NodeKind::IntegerLiteral);
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(matches!(
            parse_expression(""),
            Err(ParseError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_parse_error_carries_context() {
        let err = parse_expression("1 +").unwrap_err();
        assert_eq!(err.format_with_context("1 +"), "  1 | 1 +\n    |    ^");
    }
}
