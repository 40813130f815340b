//! Concrete syntax tree

use std::fmt::Write;

use crate::node_kind::NodeKind;
use crate::span::Span;

/// A CST node. Leaves carry their source text, interior nodes carry children.
#[derive(Debug, Clone, PartialEq)]
pub struct CstNode {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<CstNode>,
    pub text: Option<String>,
}

impl CstNode {
    pub fn leaf(kind: NodeKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            text: Some(text.into()),
        }
    }

    pub fn with_children(kind: NodeKind, span: Span, children: Vec<CstNode>) -> Self {
        Self {
            kind,
            span,
            children,
            text: None,
        }
    }

    pub fn child(&self, index: usize) -> Option<&CstNode> {
        self.children.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn text_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Symbol of the `Operator` child of a unary or binary expression
    pub fn operator(&self) -> Option<&str> {
        self.children
            .iter()
            .find(|c| c.kind == NodeKind::Operator)
            .and_then(CstNode::text_str)
    }

    /// Indented tree dump, one node per line:
    ///
    /// ```text
    /// BinaryExpression
    ///   IntegerLiteral = "1"
    ///   Operator = "+"
    ///   Identifier = "i"
    /// ```
    pub fn debug_ast_string(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            let _ = write!(out, "{:width$}{:?}", "", node.kind, width = depth * 2);
            if let Some(text) = &node.text {
                let _ = write!(out, " = {:?}", text);
            }
            out.push('\n');
            stack.extend(node.children.iter().rev().map(|c| (c, depth + 1)));
        }
        out
    }
}
