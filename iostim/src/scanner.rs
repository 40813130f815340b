//! Block scanner
//!
//! Walks the input one statement at a time and recognizes these shapes:
//!
//! - `// text` comments
//! - `repeat(N) write_io(port, expr);` on one line
//! - `repeat(N)` followed by a write on the next non-blank line
//! - `for (i = a; i < b; incr) begin write_io(port, expr) end`, possibly
//!   spread over several lines up to the first line containing `end`
//! - bare `write_io(port, expr);`
//!
//! Anything else passes through as [`Event::Info`]. Expression, port and
//! loop-header errors inside a recognized shape are fatal.

use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::config::Config;
use crate::emit::Event;
use crate::error::{CompileError, CompileResult, EvalError, EvalFailure};
use crate::eval::{evaluate, Bindings, CompiledExpr};
use crate::expand::{expand_loop, ExpandConfig, LoopDescriptor};

const PORT: &str = r"[A-Za-z_][A-Za-z0-9_]*|0[xX][0-9A-Fa-f]+|[0-9]+";

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^//\s*(.*)$").unwrap());

static WRITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"write_io\s*\(\s*({PORT})\s*,\s*(.+?)\s*\)\s*;")).unwrap()
});

static REPEAT_INLINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^repeat\s*\(\s*([0-9]+)\s*\)\s*write_io\s*\(\s*({PORT})\s*,\s*(.+?)\s*\)\s*;"
    ))
    .unwrap()
});

static REPEAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"repeat\s*\(\s*([0-9]+)\s*\)").unwrap());

// A `for (` line opens a block even when `begin` is missing or on a later line
static FOR_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^for\s*\(").unwrap());

static FOR_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)for\s*\(\s*i\s*=\s*(.+?)\s*;\s*i\s*<\s*(.+?)\s*;\s*(.+?)\s*\)\s*begin")
        .unwrap()
});

static LOOP_BODY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)begin\s*(.*?)\s*end").unwrap());

// The trailing `;` is optional inside a loop body
static BODY_WRITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?s)write_io\s*\(\s*({PORT})\s*,\s*(.+?)\s*\)\s*(?:;|$)")).unwrap()
});

static INCREMENT_UNIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^i\s*\+\+$").unwrap());
static INCREMENT_ADD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^i\s*\+=\s*(.+)$").unwrap());
static INCREMENT_ASSIGN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^i\s*=\s*i\s*\+\s*(.+)$").unwrap());

/// `write_io(port, expr)` as matched in the input
#[derive(Debug, Clone, Copy)]
struct WriteCall<'t> {
    port: &'t str,
    expr: &'t str,
}

impl<'t> WriteCall<'t> {
    fn from_captures(caps: &Captures<'t>, port: usize, expr: usize) -> Option<Self> {
        Some(Self {
            port: caps.get(port)?.as_str(),
            expr: caps.get(expr)?.as_str(),
        })
    }
}

/// Single-pass statement scanner.
#[derive(Debug)]
pub struct Scanner<'a> {
    lines: Vec<&'a str>,
    /// Index of the next unread line
    cursor: usize,
    config: &'a Config,
    expand: ExpandConfig,
    events: Vec<Event>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, config: &'a Config) -> Self {
        Self {
            lines: source.lines().collect(),
            cursor: 0,
            config,
            expand: config.expand_config(),
            events: Vec::new(),
        }
    }

    /// Scan the whole input and return the events in input order.
    pub fn run(mut self) -> CompileResult<Vec<Event>> {
        while let Some((line_no, raw)) = self.next_line() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            self.statement(line_no, raw, line)?;
        }
        Ok(self.events)
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = self.lines.get(self.cursor).copied()?;
        self.cursor += 1;
        Some((self.cursor, line))
    }

    fn statement(&mut self, line_no: usize, raw: &'a str, line: &'a str) -> CompileResult<()> {
        if let Some(caps) = COMMENT.captures(line) {
            trace!("line {}: comment", line_no);
            let text = caps.get(1).map_or("", |m| m.as_str()).trim();
            self.events.push(Event::info(text));
            return Ok(());
        }

        if let Some(caps) = REPEAT_INLINE.captures(line) {
            trace!("line {}: inline repeat", line_no);
            let count = repeat_count(&caps[1], line_no)?;
            if let Some(write) = WriteCall::from_captures(&caps, 2, 3) {
                self.repeat_write(line_no, count, write)?;
            }
            return Ok(());
        }

        if (line.contains("for") && line.contains("begin")) || FOR_START.is_match(line) {
            trace!("line {}: for block", line_no);
            return self.for_block(line_no, raw);
        }

        if let Some(caps) = WRITE.captures(line) {
            trace!("line {}: write", line_no);
            if let Some(write) = WriteCall::from_captures(&caps, 1, 2) {
                self.repeat_write(line_no, 1, write)?;
            }
            return Ok(());
        }

        if let Some(caps) = REPEAT.captures(line) {
            trace!("line {}: standalone repeat", line_no);
            let count = repeat_count(&caps[1], line_no)?;
            return self.standalone_repeat(count, line);
        }

        debug!("line {}: passing through unrecognized statement", line_no);
        self.events.push(Event::info(line));
        Ok(())
    }

    /// Evaluate the write once and emit it `count` times.
    fn repeat_write(
        &mut self,
        line_no: usize,
        count: u64,
        write: WriteCall<'_>,
    ) -> CompileResult<()> {
        let value = evaluate(write.expr, &Bindings::new())
            .map_err(|failure| CompileError::expression(line_no, failure))?;
        let port = self.resolve_port(line_no, write.port)?;
        let event = Event::io(port, value);
        for _ in 0..count {
            self.events.push(event.clone());
        }
        Ok(())
    }

    fn standalone_repeat(&mut self, count: u64, repeat_line: &str) -> CompileResult<()> {
        while self
            .lines
            .get(self.cursor)
            .is_some_and(|l| l.trim().is_empty())
        {
            self.cursor += 1;
        }

        let Some((next_no, next_raw)) = self.next_line() else {
            debug!("repeat at end of input, passing through");
            self.events.push(Event::info(repeat_line));
            return Ok(());
        };
        let next = next_raw.trim();

        match WRITE
            .captures(next)
            .and_then(|caps| WriteCall::from_captures(&caps, 1, 2))
        {
            Some(write) => self.repeat_write(next_no, count, write),
            None => {
                debug!("line {}: repeat not followed by a write, passing through", next_no);
                self.events.push(Event::info(format!("{}\n{}", repeat_line, next)));
                Ok(())
            }
        }
    }

    fn for_block(&mut self, line_no: usize, first: &'a str) -> CompileResult<()> {
        let mut block = first.to_string();
        if !first.contains("end") {
            while let Some((_, raw)) = self.next_line() {
                block.push('\n');
                block.push_str(raw);
                if raw.contains("end") {
                    break;
                }
            }
        }

        let Some(header) = FOR_HEADER.captures(&block) else {
            debug!("line {}: malformed for header, passing through", line_no);
            self.events.push(Event::info(block.trim()));
            return Ok(());
        };
        let body = LOOP_BODY
            .captures(&block)
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str());
        let Some(write) = BODY_WRITE
            .captures(body)
            .and_then(|caps| WriteCall::from_captures(&caps, 1, 2))
        else {
            debug!("line {}: for body has no write, passing through", line_no);
            self.events.push(Event::info(block.trim()));
            return Ok(());
        };

        let no_bindings = Bindings::new();
        let eval = |text: &str| -> CompileResult<i64> {
            evaluate(text.trim(), &no_bindings)
                .map_err(|failure| CompileError::expression(line_no, failure))
        };
        let start = eval(&header[1])?;
        let end = eval(&header[2])?;
        let step = parse_increment(&header[3], line_no)?;

        let descriptor = LoopDescriptor {
            start,
            end,
            step,
            body: CompiledExpr::compile(write.expr)
                .map_err(|failure| CompileError::expression(line_no, failure))?,
            port: self.resolve_port(line_no, write.port)?,
            port_token: write.port.to_string(),
            line: line_no,
        };
        expand_loop(&descriptor, &self.expand, &mut self.events)
    }

    fn resolve_port(&self, line_no: usize, token: &str) -> CompileResult<u16> {
        self.config
            .ports
            .resolve(token)
            .map_err(|e| CompileError::InvalidPort {
                line: line_no,
                token: e.token,
            })
    }
}

fn repeat_count(digits: &str, line_no: usize) -> CompileResult<u64> {
    digits.parse().map_err(|_| {
        CompileError::expression(
            line_no,
            EvalFailure::new(digits, digits, EvalError::InvalidLiteral(digits.to_string())),
        )
    })
}

/// Reduce a for-loop increment clause to its step.
///
/// Accepts `i++`, `i += expr` and `i = i + expr`.
pub fn parse_increment(text: &str, line_no: usize) -> CompileResult<i64> {
    let text = text.trim();
    if INCREMENT_UNIT.is_match(text) {
        return Ok(1);
    }
    let step_expr = INCREMENT_ADD
        .captures(text)
        .or_else(|| INCREMENT_ASSIGN.captures(text))
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| CompileError::UnsupportedIncrement {
            line: line_no,
            increment: text.to_string(),
        })?;
    evaluate(step_expr.as_str(), &Bindings::new())
        .map_err(|failure| CompileError::expression(line_no, failure))
}
