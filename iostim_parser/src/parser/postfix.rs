//! Postfix operations: call, index and field access

use crate::cst::CstNode;
use crate::error::{ParseError, ParseResult};
use crate::node_kind::NodeKind;
use crate::token::Token;

use crate::parser::Parser;

impl<'a> Parser<'a> {
    /// Try to parse one postfix operation applied to `left`.
    ///
    /// Returns `Ok(None)` when the current token does not start a postfix operation.
    pub(crate) fn try_parse_postfix(&mut self, left: &CstNode) -> ParseResult<Option<CstNode>> {
        let Some(token) = self.current.as_ref() else {
            return Ok(None);
        };

        match token.token {
            Token::LParen => {
                let open = self.expect(Token::LParen)?;
                let (args, end, _) = self.parse_delimited('(', open.span, Token::RParen)?;
                let span = self.source_map.span(left.span.start, end);
                let mut children = vec![left.clone()];
                children.extend(args);
                Ok(Some(CstNode::with_children(
                    NodeKind::CallExpression,
                    span,
                    children,
                )))
            }
            Token::LBracket => {
                let open = self.expect(Token::LBracket)?;
                let (indices, end, _) = self.parse_delimited('[', open.span, Token::RBracket)?;
                let span = self.source_map.span(left.span.start, end);
                let mut children = vec![left.clone()];
                children.extend(indices);
                Ok(Some(CstNode::with_children(
                    NodeKind::IndexExpression,
                    span,
                    children,
                )))
            }
            Token::Dot => {
                self.advance();
                if !self.check(&Token::Identifier) {
                    return Err(match self.current.as_ref() {
                        Some(t) => ParseError::unexpected_token(t.text, "field name", t.span),
                        None => ParseError::unexpected_eof("field name", self.current_span()),
                    });
                }
                let field = self.expect(Token::Identifier)?;
                let span = self.source_map.span(left.span.start, field.span.end);
                let name = CstNode::leaf(NodeKind::Identifier, field.span, field.text);
                Ok(Some(CstNode::with_children(
                    NodeKind::FieldExpression,
                    span,
                    vec![left.clone(), name],
                )))
            }
            _ => Ok(None),
        }
    }
}
