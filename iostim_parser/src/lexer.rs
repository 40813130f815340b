//! Expression lexer
//!
//! A thin layer over the logos-generated [`Token`] lexer that attaches spans
//! and source text to every token.

use logos::Logos;

use crate::error::ParseError;
use crate::span::{SourceMap, Span};
use crate::token::Token;

/// One lexed token or the error for text no token matches
pub type LexResult<'a> = Result<SpannedToken<'a>, ParseError>;

#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken<'a> {
    pub token: Token,
    pub span: Span,
    pub text: &'a str,
}

/// Token stream over one expression.
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, Token>,
    source_map: SourceMap,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("source", &self.source)
            .field("offset", &self.inner.span().end)
            .finish_non_exhaustive()
    }
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: Token::lexer(source),
            source_map: SourceMap::new(source),
        }
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexResult<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.inner.next()?;
        let range = self.inner.span();
        let span = self.source_map.span(range.start, range.end);
        let text = &self.source[range];

        Some(match token {
            Ok(token) => Ok(SpannedToken { token, span, text }),
            Err(()) => Err(ParseError::InvalidCharacter {
                text: text.to_string(),
                span,
            }),
        })
    }
}
