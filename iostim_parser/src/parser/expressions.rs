//! Operator expressions
//!
//! Precedence climbing for binary operators, prefix operators and the
//! `cond ? a : b` conditional.

use crate::cst::CstNode;
use crate::error::{ParseError, ParseResult};
use crate::lexer::SpannedToken;
use crate::node_kind::NodeKind;
use crate::token::{Associativity, Precedence, Token};

use super::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expression(&mut self) -> ParseResult<CstNode> {
        self.parse_expression_with_precedence(Precedence::Lowest)
    }

    /// Parse operators binding at least as tightly as `min_prec`.
    pub(crate) fn parse_expression_with_precedence(
        &mut self,
        min_prec: Precedence,
    ) -> ParseResult<CstNode> {
        let mut lhs = self.parse_prefix()?;
        // Each operator folded into `lhs` deepens the tree by one level
        let mut levels = 0;

        loop {
            if min_prec <= Precedence::Conditional && self.check(&Token::Question) {
                self.enter_nesting(self.current_span())?;
                levels += 1;
                lhs = self.parse_ternary(lhs)?;
                continue;
            }

            let Some((prec, assoc)) = self.current_binary_operator() else {
                break;
            };
            if prec < min_prec {
                break;
            }
            self.enter_nesting(self.current_span())?;
            levels += 1;
            let Some(op) = self.advance() else {
                break;
            };

            // Left-associative operators only accept strictly tighter operands on the right
            let rhs_prec = match assoc {
                Associativity::Left => Precedence::try_from(prec as i8 + 1).unwrap_or(prec),
                Associativity::Right => prec,
            };
            let rhs = self.parse_expression_with_precedence(rhs_prec)?;
            lhs = self.operator_node(NodeKind::BinaryExpression, Some(lhs), op, rhs);
        }

        self.depth -= levels;
        Ok(lhs)
    }

    fn current_binary_operator(&self) -> Option<(Precedence, Associativity)> {
        self.current.as_ref()?.token.binary_precedence()
    }

    /// Prefix operator or primary expression with its postfix chain.
    pub(crate) fn parse_prefix(&mut self) -> ParseResult<CstNode> {
        self.enter_nesting(self.current_span())?;
        let node = self.parse_prefix_inner();
        self.depth -= 1;
        node
    }

    fn parse_prefix_inner(&mut self) -> ParseResult<CstNode> {
        let Some(current) = &self.current else {
            return Err(ParseError::unexpected_eof("expression", self.current_span()));
        };

        if let Some(prec) = current.token.unary_precedence() {
            let Some(op) = self.advance() else {
                return Err(ParseError::unexpected_eof("expression", self.current_span()));
            };
            // `-x ** 2` is `-(x ** 2)`
            let operand = self.parse_expression_with_precedence(prec)?;
            return Ok(self.operator_node(NodeKind::UnaryExpression, None, op, operand));
        }

        let mut node = self.parse_primary()?;
        let mut levels = 0;
        while let Some(extended) = self.try_parse_postfix(&node)? {
            self.enter_nesting(extended.span)?;
            levels += 1;
            node = extended;
        }
        self.depth -= levels;
        Ok(node)
    }

    /// `cond ? then : else` with `cond` already parsed
    fn parse_ternary(&mut self, condition: CstNode) -> ParseResult<CstNode> {
        self.expect(Token::Question)?;
        let then_branch = self.parse_expression_with_precedence(Precedence::LazyOr)?;
        self.expect(Token::Colon)?;
        let else_branch = self.parse_expression_with_precedence(Precedence::Conditional)?;

        let span = self
            .source_map
            .span(condition.span.start, else_branch.span.end);
        Ok(CstNode::with_children(
            NodeKind::TernaryExpression,
            span,
            vec![condition, then_branch, else_branch],
        ))
    }

    /// Build `[lhs] op rhs` with the operator kept as an `Operator` leaf.
    fn operator_node(
        &self,
        kind: NodeKind,
        lhs: Option<CstNode>,
        op: SpannedToken<'a>,
        rhs: CstNode,
    ) -> CstNode {
        let start = lhs.as_ref().map_or(op.span.start, |l| l.span.start);
        let span = self.source_map.span(start, rhs.span.end);
        let op = CstNode::leaf(NodeKind::Operator, op.span, op.text);
        let children = lhs.into_iter().chain([op, rhs]).collect();
        CstNode::with_children(kind, span, children)
    }
}
