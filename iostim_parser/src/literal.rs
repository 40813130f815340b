//! Verilog numeric literal normalization
//!
//! Rewrites sized and unsized Verilog literals (`8'hFF`, `16'd1_000`,
//! `'h40000`, `'d25`) into plain integer literal text that the expression
//! lexer understands. The declared width is ignored: `4'hFFF` is `0xfff`.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SIZED_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]+'h([0-9A-Fa-f_]+)\b").expect("sized hex pattern"));
static SIZED_DEC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]+'d([0-9_]+)\b").expect("sized decimal pattern"));
static UNSIZED_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'h([0-9A-Fa-f_]+)\b").expect("unsized hex pattern"));
static UNSIZED_DEC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'d([0-9_]+)\b").expect("unsized decimal pattern"));

/// Normalize every Verilog literal in `text`.
///
/// Passes run in a fixed order (sized hex, sized decimal, unsized hex,
/// unsized decimal) because the unsized patterns are suffixes of the sized
/// ones. Text that matches no pattern is returned untouched, and a digit
/// group too large to represent is left verbatim for the evaluator to reject.
pub fn normalize_literals(text: &str) -> Cow<'_, str> {
    if memchr::memchr(b'\'', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }

    let passes: [(&Regex, u32); 4] = [
        (&SIZED_HEX, 16),
        (&SIZED_DEC, 10),
        (&UNSIZED_HEX, 16),
        (&UNSIZED_DEC, 10),
    ];

    let mut out = text.to_string();
    for (pattern, radix) in passes {
        let replaced = match pattern.replace_all(&out, |caps: &Captures<'_>| rewrite(caps, radix)) {
            Cow::Borrowed(_) => None,
            Cow::Owned(s) => Some(s),
        };
        if let Some(s) = replaced {
            out = s;
        }
    }
    Cow::Owned(out)
}

fn rewrite(caps: &Captures<'_>, radix: u32) -> String {
    let digits: String = caps[1].chars().filter(|c| *c != '_').collect();
    match u128::from_str_radix(&digits, radix) {
        Ok(value) if radix == 16 => format!("{:#x}", value),
        Ok(value) => value.to_string(),
        Err(_) => caps[0].to_string(),
    }
}

/// Replace statement terminators with spaces.
///
/// Kept separate from literal handling: callers decide when a trailing `;`
/// is part of the statement rather than the expression.
pub fn strip_terminators(text: &str) -> Cow<'_, str> {
    if memchr::memchr(b';', text.as_bytes()).is_none() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.replace(';', " "))
    }
}

/// Parse a plain integer literal: decimal, `0x`, `0b` or `0o`, with `_` separators.
///
/// Returns `None` for anything else, including values outside `i64`.
pub fn parse_integer_literal(text: &str) -> Option<i64> {
    let (digits, radix) = match text.get(..2) {
        Some("0x") | Some("0X") => (&text[2..], 16),
        Some("0b") | Some("0B") => (&text[2..], 2),
        Some("0o") | Some("0O") => (&text[2..], 8),
        _ => (text, 10),
    };
    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
        || digits.starts_with(['+', '-'])
    {
        return None;
    }
    let cleaned: Cow<'_, str> = if digits.contains('_') {
        Cow::Owned(digits.replace('_', ""))
    } else {
        Cow::Borrowed(digits)
    };
    i64::from_str_radix(&cleaned, radix).ok()
}
