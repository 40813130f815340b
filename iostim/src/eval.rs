//! Expression evaluation
//!
//! `evaluate` runs the full text path: literal normalization, terminator
//! stripping, parsing, lowering and evaluation. Loop bodies go through
//! [`CompiledExpr`] instead so the text is parsed and lowered once and only
//! the IR is re-run per iteration.

use iostim_parser::{normalize_literals, parse_expression, strip_terminators};

use crate::error::{EvalError, EvalFailure};
use crate::ir::{BinaryOp, Expr, UnaryOp};
use crate::lowering::lower_expr;

/// Variable bindings visible to an expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    vars: Vec<(String, i64)>,
}

impl Bindings {
    /// No variables bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings holding a single variable.
    pub fn with(name: impl Into<String>, value: i64) -> Self {
        let mut bindings = Self::new();
        bindings.set(name, value);
        bindings
    }

    /// Bind `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: i64) {
        let name = name.into();
        match self.vars.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.vars.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }
}

/// Expression text that has been normalized, parsed and lowered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledExpr {
    expr: Option<Expr>,
    source: String,
    normalized: String,
}

impl CompiledExpr {
    /// Compile expression text. Empty text (after normalization) compiles
    /// to an expression that evaluates to `0`.
    pub fn compile(text: &str) -> Result<Self, EvalFailure> {
        let normalized = normalize_text(text);
        let fail = |error: EvalError| EvalFailure::new(text, normalized.as_str(), error);

        let expr = if normalized.is_empty() {
            None
        } else {
            let cst = parse_expression(&normalized).map_err(|e| fail(e.into()))?;
            Some(lower_expr(&cst).map_err(fail)?)
        };

        Ok(Self {
            expr,
            source: text.to_string(),
            normalized,
        })
    }

    /// Evaluate against `bindings`.
    pub fn eval(&self, bindings: &Bindings) -> Result<i64, EvalFailure> {
        match &self.expr {
            Some(expr) => evaluate_expr(expr, bindings)
                .map_err(|e| EvalFailure::new(self.source.as_str(), self.normalized.as_str(), e)),
            None => Ok(0),
        }
    }

    /// The expression as C source; empty text renders as `0`.
    pub fn c_expression(&self) -> String {
        self.expr
            .as_ref()
            .map_or_else(|| "0".to_string(), crate::emit::c_expression)
    }
}

/// Evaluate expression text to an integer.
///
/// # Example
///
/// ```
/// use iostim::eval::{evaluate, Bindings};
///
/// assert_eq!(evaluate("(1 << 4) | 8'h01", &Bindings::new()).unwrap(), 17);
/// assert_eq!(evaluate("i * 2", &Bindings::with("i", 21)).unwrap(), 42);
/// ```
pub fn evaluate(text: &str, bindings: &Bindings) -> Result<i64, EvalFailure> {
    CompiledExpr::compile(text)?.eval(bindings)
}

/// Normalize literals, strip `;` and trim.
pub fn normalize_text(text: &str) -> String {
    let literals = normalize_literals(text);
    strip_terminators(&literals).trim().to_string()
}

/// Evaluate lowered IR.
pub fn evaluate_expr(expr: &Expr, bindings: &Bindings) -> Result<i64, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(*value),
        Expr::Var(name) => bindings
            .get(name)
            .ok_or_else(|| EvalError::UnknownIdentifier(name.clone())),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = evaluate_expr(lhs, bindings)?;
            let rhs = evaluate_expr(rhs, bindings)?;
            apply_binary(*op, lhs, rhs)
        }
        Expr::Unary { op, operand } => {
            let value = evaluate_expr(operand, bindings)?;
            match op {
                UnaryOp::Neg => value.checked_neg().ok_or(EvalError::Overflow),
                UnaryOp::Pos => Ok(value),
                UnaryOp::BitNot => Ok(!value),
            }
        }
    }
}

fn apply_binary(op: BinaryOp, lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    match op {
        BinaryOp::Add => lhs.checked_add(rhs).ok_or(EvalError::Overflow),
        BinaryOp::Sub => lhs.checked_sub(rhs).ok_or(EvalError::Overflow),
        BinaryOp::Mul => lhs.checked_mul(rhs).ok_or(EvalError::Overflow),
        BinaryOp::FloorDiv => floor_div(lhs, rhs),
        BinaryOp::Mod => floor_mod(lhs, rhs),
        BinaryOp::Shl => shift_left(lhs, rhs),
        BinaryOp::Shr => shift_right(lhs, rhs),
        BinaryOp::BitAnd => Ok(lhs & rhs),
        BinaryOp::BitOr => Ok(lhs | rhs),
        BinaryOp::BitXor => Ok(lhs ^ rhs),
    }
}

/// Quotient rounded toward negative infinity.
fn floor_div(lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    if rhs == 0 {
        return Err(EvalError::DivisionByZero);
    }
    let quotient = lhs.checked_div(rhs).ok_or(EvalError::Overflow)?;
    if lhs % rhs != 0 && ((lhs < 0) != (rhs < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Remainder with the sign of the divisor.
fn floor_mod(lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    if rhs == 0 {
        return Err(EvalError::DivisionByZero);
    }
    // i64::MIN % -1 overflows in hardware but is mathematically 0
    if rhs == -1 {
        return Ok(0);
    }
    let remainder = lhs % rhs;
    if remainder != 0 && ((remainder < 0) != (rhs < 0)) {
        Ok(remainder + rhs)
    } else {
        Ok(remainder)
    }
}

fn shift_left(lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    if rhs < 0 {
        return Err(EvalError::NegativeShift(rhs));
    }
    if lhs == 0 {
        return Ok(0);
    }
    if rhs >= i64::from(i64::BITS) {
        return Err(EvalError::Overflow);
    }
    let shifted = lhs << rhs;
    if shifted >> rhs != lhs {
        return Err(EvalError::Overflow);
    }
    Ok(shifted)
}

fn shift_right(lhs: i64, rhs: i64) -> Result<i64, EvalError> {
    if rhs < 0 {
        return Err(EvalError::NegativeShift(rhs));
    }
    if rhs >= i64::from(i64::BITS) {
        return Ok(if lhs < 0 { -1 } else { 0 });
    }
    Ok(lhs >> rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConstructKind;

    fn eval(text: &str) -> Result<i64, EvalError> {
        evaluate(text, &Bindings::new()).map_err(|f| f.error)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("1+2*3"), Ok(7));
        assert_eq!(eval("(1<<4)|1"), Ok(17));
        assert_eq!(eval("1 << 2 + 1"), Ok(8));
        assert_eq!(eval("0xff & 0x0f ^ 0x3"), Ok(0x0c));
    }

    #[test]
    fn test_floor_division_and_modulo() {
        assert_eq!(eval("10 // 3"), Ok(3));
        assert_eq!(eval("10 / 3"), Ok(3));
        assert_eq!(eval("-7 // 2"), Ok(-4));
        assert_eq!(eval("7 // -2"), Ok(-4));
        assert_eq!(eval("-7 % 3"), Ok(2));
        assert_eq!(eval("7 % -3"), Ok(-2));
        assert_eq!(eval("6 % 3"), Ok(0));
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval("-5 + +2"), Ok(-3));
        assert_eq!(eval("~0"), Ok(-1));
        assert_eq!(eval("--3"), Ok(3));
    }

    #[test]
    fn test_verilog_literals() {
        assert_eq!(eval("8'hFF"), Ok(255));
        assert_eq!(eval("'d25"), Ok(25));
        assert_eq!(eval("16'd1_000"), Ok(1000));
        assert_eq!(eval("'h40000 + 1"), Ok(0x40001));
    }

    #[test]
    fn test_terminators_and_empty() {
        assert_eq!(eval("3;"), Ok(3));
        assert_eq!(eval(""), Ok(0));
        assert_eq!(eval("  ;  "), Ok(0));
    }

    #[test]
    fn test_bindings() {
        assert_eq!(evaluate("i + 1", &Bindings::with("i", 41)).unwrap(), 42);
        assert_eq!(eval("j+1"), Err(EvalError::UnknownIdentifier("j".into())));

        let mut bindings = Bindings::with("i", 1);
        bindings.set("i", 2);
        assert_eq!(bindings.get("i"), Some(2));
    }

    #[test]
    fn test_arithmetic_errors() {
        assert_eq!(eval("1 // 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("1 % 0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("1 << -1"), Err(EvalError::NegativeShift(-1)));
        assert_eq!(eval("1 << 63 << 1"), Err(EvalError::Overflow));
        assert_eq!(eval("0x7fffffffffffffff + 1"), Err(EvalError::Overflow));
    }

    #[test]
    fn test_shift_edges() {
        assert_eq!(eval("0 << 100"), Ok(0));
        assert_eq!(eval("-1 >> 100"), Ok(-1));
        assert_eq!(eval("256 >> 4"), Ok(16));
    }

    #[test]
    fn test_unsupported_constructs() {
        for src in ["f(1)", "1 < 2", "a.b", "(1, 2)", "c ? 1 : 2", "1.5", "2 ** 3"] {
            assert!(
                matches!(eval(src), Err(EvalError::UnsupportedConstruct(_))),
                "{} should be rejected",
                src
            );
        }
        match eval("2 ** 3") {
            Err(EvalError::UnsupportedConstruct(u)) => {
                assert_eq!(u.kind, ConstructKind::Operator("**".into()))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(eval("1 +"), Err(EvalError::InvalidExpression(_))));
        assert!(matches!(eval("i = 3"), Err(EvalError::InvalidExpression(_))));
    }

    #[test]
    fn test_failure_carries_both_texts() {
        let failure = evaluate("8'h10 + j", &Bindings::new()).unwrap_err();
        assert_eq!(failure.expr, "8'h10 + j");
        assert_eq!(failure.normalized, "0x10 + j");
        assert_eq!(
            failure.to_string(),
            "failed to evaluate '8'h10 + j' -> '0x10 + j': unknown name: j"
        );
    }

    #[test]
    fn test_compiled_expr_reuse() {
        let compiled = CompiledExpr::compile("(i * 3) & 0xff").unwrap();
        let values: Vec<i64> = (0..4)
            .map(|i| compiled.eval(&Bindings::with("i", i)).unwrap())
            .collect();
        assert_eq!(values, vec![0, 3, 6, 9]);
        assert_eq!(compiled.c_expression(), "((i * 3) & 0xff)");
    }
}
