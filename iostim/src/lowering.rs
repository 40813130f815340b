//! CST lowering
//!
//! Turns the generic expression CST from `iostim_parser` into [`Expr`],
//! rejecting every node kind and operator outside the arithmetic/bitwise
//! whitelist.

use iostim_parser::{parse_integer_literal, CstNode, NodeKind};

use crate::error::{ConstructKind, EvalError, UnsupportedConstruct};
use crate::ir::{BinaryOp, Expr, UnaryOp};

pub type LowerResult<T> = Result<T, EvalError>;

/// Lower one CST expression node.
pub fn lower_expr(node: &CstNode) -> LowerResult<Expr> {
    match node.kind {
        NodeKind::IntegerLiteral => lower_integer(node),
        NodeKind::Identifier => Ok(Expr::Var(leaf_text(node).to_string())),
        NodeKind::ParenthesizedExpression => match node.child(0) {
            Some(inner) => lower_expr(inner),
            None => Err(unsupported(node, ConstructKind::TupleExpression)),
        },
        NodeKind::BinaryExpression => lower_binary(node),
        NodeKind::UnaryExpression => lower_unary(node),

        NodeKind::FloatLiteral => Err(unsupported(node, ConstructKind::FloatLiteral)),
        NodeKind::StringLiteral => Err(unsupported(node, ConstructKind::StringLiteral)),
        NodeKind::TernaryExpression => Err(unsupported(node, ConstructKind::TernaryExpression)),
        NodeKind::TupleExpression => Err(unsupported(node, ConstructKind::TupleExpression)),
        NodeKind::VectorExpression => Err(unsupported(node, ConstructKind::VectorExpression)),
        NodeKind::BraceExpression => Err(unsupported(node, ConstructKind::BraceExpression)),
        NodeKind::CallExpression => Err(unsupported(node, ConstructKind::CallExpression)),
        NodeKind::IndexExpression => Err(unsupported(node, ConstructKind::IndexExpression)),
        NodeKind::FieldExpression => Err(unsupported(node, ConstructKind::FieldExpression)),
        // Operators only appear as children of unary/binary nodes
        NodeKind::Operator => Err(unsupported(
            node,
            ConstructKind::Operator(leaf_text(node).to_string()),
        )),
    }
}

fn lower_integer(node: &CstNode) -> LowerResult<Expr> {
    let text = leaf_text(node);
    parse_integer_literal(text)
        .map(Expr::Literal)
        .ok_or_else(|| EvalError::InvalidLiteral(text.to_string()))
}

fn lower_binary(node: &CstNode) -> LowerResult<Expr> {
    let (Some(lhs), Some(op_node), Some(rhs)) = (node.child(0), node.child(1), node.child(2))
    else {
        return Err(unsupported(node, operator_kind(node)));
    };
    let op = map_binary_op(leaf_text(op_node))
        .ok_or_else(|| unsupported(op_node, operator_kind(node)))?;
    Ok(Expr::binary(op, lower_expr(lhs)?, lower_expr(rhs)?))
}

fn lower_unary(node: &CstNode) -> LowerResult<Expr> {
    let (Some(op_node), Some(operand)) = (node.child(0), node.child(1)) else {
        return Err(unsupported(node, operator_kind(node)));
    };
    let op =
        map_unary_op(leaf_text(op_node)).ok_or_else(|| unsupported(op_node, operator_kind(node)))?;
    Ok(Expr::unary(op, lower_expr(operand)?))
}

/// Map a binary operator symbol to [`BinaryOp`].
pub(crate) fn map_binary_op(op: &str) -> Option<BinaryOp> {
    Some(match op {
        "+" => BinaryOp::Add,
        "-" => BinaryOp::Sub,
        "*" => BinaryOp::Mul,
        "/" | "//" => BinaryOp::FloorDiv,
        "%" => BinaryOp::Mod,
        "<<" => BinaryOp::Shl,
        ">>" => BinaryOp::Shr,
        "&" => BinaryOp::BitAnd,
        "|" => BinaryOp::BitOr,
        "^" => BinaryOp::BitXor,
        _ => return None,
    })
}

/// Map a unary operator symbol to [`UnaryOp`].
pub(crate) fn map_unary_op(op: &str) -> Option<UnaryOp> {
    Some(match op {
        "-" => UnaryOp::Neg,
        "+" => UnaryOp::Pos,
        "~" => UnaryOp::BitNot,
        _ => return None,
    })
}

fn leaf_text(node: &CstNode) -> &str {
    node.text_str().unwrap_or_default()
}

fn operator_kind(node: &CstNode) -> ConstructKind {
    ConstructKind::Operator(node.operator().unwrap_or("?").to_string())
}

fn unsupported(node: &CstNode, kind: ConstructKind) -> EvalError {
    UnsupportedConstruct::new(kind, node.span).into()
}
