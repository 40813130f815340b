//! Event rendering
//!
//! One event renders to one output line, except [`Event::CompactLoop`] which
//! renders to a short C fragment. Rendering never fails.

use std::fmt;

use crate::ir::{BinaryOp, Expr, UnaryOp};

/// One compiled output event, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Bus write
    Io { port: u16, value: u8 },
    /// Passthrough annotation (comments and unrecognized statements)
    Info { text: String },
    /// Loop too large to unroll, re-emitted as a parameterized loop
    CompactLoop {
        port: u16,
        /// Port as written in the input
        port_token: String,
        start: i64,
        end: i64,
        step: i64,
        /// Body as a C expression, see [`c_expression`]
        body_expression: String,
    },
}

impl Event {
    pub fn io(port: u16, value: i64) -> Self {
        Event::Io {
            port,
            value: (value & 0xFF) as u8,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Event::Info { text: text.into() }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Event::Io { .. })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Io { port, value } => write!(f, "IO,0x{:02x},0x{:02x}", port, value),
            Event::Info { text } => write!(f, "INFO,\"{}\"", text.replace('"', "\"\"")),
            Event::CompactLoop {
                port,
                port_token,
                start,
                end,
                step,
                body_expression,
            } => {
                let (start, end) = (*start, *end);
                let (start_hex, end_hex) = (signed_hex(start), signed_hex(end));
                writeln!(
                    f,
                    "// Generated C loop for {} : {} .. {} step {}",
                    port_token, start_hex, end_hex, step
                )?;
                writeln!(
                    f,
                    "for ({} i = {}; i < {}; i += {}) {{",
                    c_index_type(start, end),
                    start_hex,
                    end_hex,
                    step
                )?;
                writeln!(f, "    uint8_t v = (uint8_t)({} & 0xff);", body_expression)?;
                writeln!(f, "    vdp_cartridge_write_io(0x{:02x}, v);", port)?;
                write!(f, "}}")
            }
        }
    }
}

/// Render events, one per line, with a trailing newline.
pub fn render(events: &[Event]) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for event in events {
        let _ = writeln!(out, "{}", event);
    }
    out
}

/// C source for a lowered expression, every operation parenthesized.
///
/// `/` and `%` render as the C operators, which truncate toward zero. They
/// agree with the floor semantics of [`crate::eval`] for non-negative
/// operands only.
pub fn c_expression(expr: &Expr) -> String {
    let mut out = String::new();
    write_c(expr, &mut out);
    out
}

fn write_c(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Literal(value) => out.push_str(&c_literal(*value)),
        Expr::Var(name) => out.push_str(name),
        Expr::Binary { op, lhs, rhs } => {
            out.push('(');
            write_c(lhs, out);
            out.push(' ');
            out.push_str(c_binary_op(*op));
            out.push(' ');
            write_c(rhs, out);
            out.push(')');
        }
        Expr::Unary { op, operand } => {
            out.push('(');
            out.push(match op {
                UnaryOp::Neg => '-',
                UnaryOp::Pos => '+',
                UnaryOp::BitNot => '~',
            });
            write_c(operand, out);
            out.push(')');
        }
    }
}

fn c_binary_op(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::FloorDiv => "/",
        BinaryOp::Mod => "%",
        BinaryOp::Shl => "<<",
        BinaryOp::Shr => ">>",
        BinaryOp::BitAnd => "&",
        BinaryOp::BitOr => "|",
        BinaryOp::BitXor => "^",
    }
}

fn c_literal(value: i64) -> String {
    match value {
        0..=9 => value.to_string(),
        v if v < 0 => format!("({})", signed_hex(v)),
        v => format!("{:#x}", v),
    }
}

/// Loop counter type wide enough for both bounds
fn c_index_type(start: i64, end: i64) -> &'static str {
    if start >= 0 && end <= i64::from(u32::MAX) {
        "uint32_t"
    } else {
        "int64_t"
    }
}

/// `0x`-prefixed hex with an explicit sign for negative values
fn signed_hex(value: i64) -> String {
    if value < 0 {
        format!("-{:#x}", value.unsigned_abs())
    } else {
        format!("{:#x}", value)
    }
}
