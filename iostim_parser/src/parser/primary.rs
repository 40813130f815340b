//! Primary expression parsers

use crate::cst::CstNode;
use crate::error::{ParseError, ParseResult};
use crate::node_kind::NodeKind;
use crate::token::Token;

use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Parse a primary expression (literals, identifiers, grouping, collections)
    pub(crate) fn parse_primary(&mut self) -> ParseResult<CstNode> {
        let Some(token) = self.current.as_ref() else {
            return Err(ParseError::unexpected_eof("expression", self.current_span()));
        };

        let kind = match token.token {
            t if t.is_integer_literal() => NodeKind::IntegerLiteral,
            Token::FloatLiteral => NodeKind::FloatLiteral,
            Token::StringLiteral => NodeKind::StringLiteral,
            Token::Identifier => NodeKind::Identifier,
            Token::LParen => return self.parse_parenthesized_or_tuple(),
            Token::LBracket => return self.parse_collection(Token::LBracket),
            Token::LBrace => return self.parse_collection(Token::LBrace),
            _ => {
                return Err(ParseError::unexpected_token(
                    token.text,
                    "expression",
                    token.span,
                ))
            }
        };

        match self.advance() {
            Some(token) => Ok(CstNode::leaf(kind, token.span, token.text)),
            None => Err(ParseError::unexpected_eof("expression", self.current_span())),
        }
    }

    /// Parse `(expr)`, `()` or `(a, b, ...)`
    fn parse_parenthesized_or_tuple(&mut self) -> ParseResult<CstNode> {
        let open = self.expect(Token::LParen)?;
        let (mut items, end, trailing_comma) = self.parse_delimited('(', open.span, Token::RParen)?;
        let span = self.source_map.span(open.span.start, end);

        if items.len() == 1 && !trailing_comma {
            let inner = items.remove(0);
            return Ok(CstNode::with_children(
                NodeKind::ParenthesizedExpression,
                span,
                vec![inner],
            ));
        }
        Ok(CstNode::with_children(NodeKind::TupleExpression, span, items))
    }

    /// Parse `[a, b]` or `{a, b}`
    fn parse_collection(&mut self, open_token: Token) -> ParseResult<CstNode> {
        let (open_char, close, kind) = match open_token {
            Token::LBrace => ('{', Token::RBrace, NodeKind::BraceExpression),
            _ => ('[', Token::RBracket, NodeKind::VectorExpression),
        };
        let open = self.expect(open_token)?;
        let (items, end, _) = self.parse_delimited(open_char, open.span, close)?;
        let span = self.source_map.span(open.span.start, end);
        Ok(CstNode::with_children(kind, span, items))
    }
}
