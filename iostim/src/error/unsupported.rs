use iostim_parser::Span;

/// A syntactically valid construct that the evaluator refuses to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructKind {
    /// An operator outside the arithmetic/bitwise whitelist (`**`, `<`, `&&`, ...)
    Operator(String),
    CallExpression,
    IndexExpression,
    FieldExpression,
    TupleExpression,
    VectorExpression,
    BraceExpression,
    TernaryExpression,
    FloatLiteral,
    StringLiteral,
}

impl std::fmt::Display for ConstructKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operator(op) => write!(f, "operator `{}`", op),
            Self::CallExpression => write!(f, "function call"),
            Self::IndexExpression => write!(f, "indexing"),
            Self::FieldExpression => write!(f, "field access"),
            Self::TupleExpression => write!(f, "tuple"),
            Self::VectorExpression => write!(f, "vector literal"),
            Self::BraceExpression => write!(f, "brace expression"),
            Self::TernaryExpression => write!(f, "conditional expression"),
            Self::FloatLiteral => write!(f, "floating-point literal"),
            Self::StringLiteral => write!(f, "string literal"),
        }
    }
}

/// Where in the normalized expression text a rejected construct sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedConstruct {
    pub kind: ConstructKind,
    pub span: Span,
}

impl UnsupportedConstruct {
    pub fn new(kind: ConstructKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl std::fmt::Display for UnsupportedConstruct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported {} at column {}", self.kind, self.span.column)
    }
}

impl std::error::Error for UnsupportedConstruct {}
