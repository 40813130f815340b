//! Node kinds for the expression CST

/// CST node kinds
///
/// The parser produces every kind listed here; which of them are
/// meaningful for evaluation is decided downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // ==================== Literals ====================
    /// 42, 0xff, 0b101, 0o17
    IntegerLiteral,
    /// 1.5, 1e3
    FloatLiteral,
    /// "text"
    StringLiteral,

    // ==================== Names ====================
    /// i, vdp_io0
    Identifier,
    /// Operator leaf inside a unary or binary expression
    Operator,

    // ==================== Operators ====================
    /// a + b, a < b, a && b
    BinaryExpression,
    /// -a, ~a, !a
    UnaryExpression,
    /// cond ? a : b
    TernaryExpression,

    // ==================== Grouping & Collections ====================
    /// (expr)
    ParenthesizedExpression,
    /// (a, b) or ()
    TupleExpression,
    /// [a, b]
    VectorExpression,
    /// {a, b}
    BraceExpression,

    // ==================== Postfix ====================
    /// f(a, b)
    CallExpression,
    /// a[0]
    IndexExpression,
    /// a.b
    FieldExpression,
}
