//! Expression parser
//!
//! A Pratt parser over the token stream. The grammar is deliberately wider
//! than what the evaluator runs (calls, indexing, comparison, ternary, ...)
//! so that consumers can reject a construct by name instead of failing
//! with a syntax error.

mod expressions;
mod postfix;
mod primary;

use crate::cst::CstNode;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, SpannedToken};
use crate::span::{SourceMap, Span};
use crate::token::Token;

/// Deepest operator or delimiter nesting accepted in one expression
pub const MAX_NESTING_DEPTH: usize = 128;

#[derive(Debug)]
pub struct Parser<'a> {
    pub(crate) source: &'a str,
    pub(crate) lexer: Lexer<'a>,
    pub(crate) source_map: SourceMap,
    /// Token under the cursor; `None` at end of input
    pub(crate) current: Option<SpannedToken<'a>>,
    /// Invalid characters skipped while advancing
    pub(crate) lex_errors: Vec<ParseError>,
    /// Current nesting level, bounded by [`MAX_NESTING_DEPTH`]
    pub(crate) depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let lexer = Lexer::new(source);
        let source_map = lexer.source_map().clone();
        Self {
            source,
            lexer,
            source_map,
            current: None,
            lex_errors: Vec::new(),
            depth: 0,
        }
    }

    /// Parse the whole input as exactly one expression.
    pub fn parse(mut self) -> ParseResult<CstNode> {
        self.advance();
        let parsed = self.parse_expression();

        // An invalid character precedes whatever the parser tripped over
        if !self.lex_errors.is_empty() {
            return Err(self.lex_errors.swap_remove(0));
        }
        let node = parsed?;

        match &self.current {
            Some(extra) => Err(ParseError::unexpected_token(
                extra.text,
                "end of expression",
                extra.span,
            )),
            None => Ok(node),
        }
    }

    /// Move to the next valid token and return the one that was current.
    pub(crate) fn advance(&mut self) -> Option<SpannedToken<'a>> {
        let previous = self.current.take();
        self.current = loop {
            match self.lexer.next() {
                Some(Ok(token)) => break Some(token),
                Some(Err(e)) => self.lex_errors.push(e),
                None => break None,
            }
        };
        previous
    }

    pub(crate) fn check(&self, expected: &Token) -> bool {
        matches!(&self.current, Some(t) if &t.token == expected)
    }

    /// Consume the current token if it is `expected`.
    pub(crate) fn expect(&mut self, expected: Token) -> ParseResult<SpannedToken<'a>> {
        let span = self.current_span();
        match &self.current {
            Some(t) if t.token == expected => self
                .advance()
                .ok_or_else(|| ParseError::unexpected_eof(expected.describe(), span)),
            Some(t) => Err(ParseError::unexpected_token(
                t.text,
                expected.describe(),
                t.span,
            )),
            None => Err(ParseError::unexpected_eof(expected.describe(), span)),
        }
    }

    /// Span of the current token, or an empty span at end of input
    pub(crate) fn current_span(&self) -> Span {
        match &self.current {
            Some(t) => t.span,
            None => self.source_map.span(self.source.len(), self.source.len()),
        }
    }

    /// Descend one nesting level at `span`.
    pub(crate) fn enter_nesting(&mut self, span: Span) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Parse `item, item, ...` up to and including `close`.
    ///
    /// The opening delimiter must already be consumed. Returns the items,
    /// the end offset of `close` and whether the list had a trailing comma.
    pub(crate) fn parse_delimited(
        &mut self,
        open: char,
        open_span: Span,
        close: Token,
    ) -> ParseResult<(Vec<CstNode>, usize, bool)> {
        let unclosed = ParseError::UnclosedDelimiter {
            delimiter: open,
            span: open_span,
        };
        let mut items = Vec::new();
        let mut trailing_comma = false;

        while !self.check(&close) {
            if self.is_at_end() {
                return Err(unclosed);
            }
            items.push(self.parse_expression()?);
            trailing_comma = self.check(&Token::Comma);
            if !trailing_comma {
                break;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(unclosed);
        }
        let close_token = self.expect(close)?;
        Ok((items, close_token.span.end, trailing_comma))
    }
}

/// Parse expression source into a CST
pub fn parse(source: &str) -> ParseResult<CstNode> {
    Parser::new(source).parse()
}
