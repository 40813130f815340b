//! Loop expansion
//!
//! Decides between unrolling a for-loop into individual writes and emitting
//! a single [`Event::CompactLoop`].

use log::{debug, info};

use crate::emit::Event;
use crate::error::{CompileError, CompileResult};
use crate::eval::{Bindings, CompiledExpr};

/// Name of the only loop variable
pub const LOOP_VARIABLE: &str = "i";

const PREALLOCATE_LIMIT: u64 = 1 << 20;

/// A fully evaluated `for (i = start; i < end; i += step)` header plus its
/// body write.
#[derive(Debug, Clone)]
pub struct LoopDescriptor {
    pub start: i64,
    pub end: i64,
    pub step: i64,
    pub body: CompiledExpr,
    pub port: u16,
    pub port_token: String,
    /// Input line of the `for` header
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandConfig {
    pub expand_threshold: u64,
    pub allow_compact: bool,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            expand_threshold: crate::config::DEFAULT_EXPAND_THRESHOLD,
            allow_compact: false,
        }
    }
}

/// `ceil((end - start) / step)` for ascending loops, `0` otherwise.
pub fn iteration_count(start: i64, end: i64, step: i64) -> u64 {
    if end <= start || step <= 0 {
        return 0;
    }
    let span = i128::from(end) - i128::from(start);
    let step = i128::from(step);
    let count = (span + step - 1) / step;
    u64::try_from(count).unwrap_or(u64::MAX)
}

/// Append the events for one loop to `out`.
///
/// Nothing is appended when the step is rejected or when any iteration
/// fails to evaluate.
pub fn expand_loop(
    descriptor: &LoopDescriptor,
    config: &ExpandConfig,
    out: &mut Vec<Event>,
) -> CompileResult<()> {
    let LoopDescriptor {
        start,
        end,
        step,
        line,
        ..
    } = *descriptor;

    if step == 0 {
        return Err(CompileError::ZeroStepLoop { line });
    }
    if step < 0 {
        return Err(CompileError::DescendingLoop { line, step });
    }

    let total = iteration_count(start, end, step);
    if total > config.expand_threshold && config.allow_compact {
        info!(
            "line {}: compacting loop of {} iterations (threshold {})",
            line, total, config.expand_threshold
        );
        out.push(Event::CompactLoop {
            port: descriptor.port,
            port_token: descriptor.port_token.clone(),
            start,
            end,
            step,
            body_expression: descriptor.body.c_expression(),
        });
        return Ok(());
    }

    debug!("line {}: unrolling loop of {} iterations", line, total);
    let capacity = usize::try_from(total.min(PREALLOCATE_LIMIT)).unwrap_or(0);
    let mut events = Vec::with_capacity(capacity);
    let mut bindings = Bindings::new();
    let mut iv = start;
    while iv < end {
        bindings.set(LOOP_VARIABLE, iv);
        let value = descriptor
            .body
            .eval(&bindings)
            .map_err(|failure| CompileError::expression(line, failure))?;
        events.push(Event::io(descriptor.port, value));
        iv = match iv.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    out.append(&mut events);
    Ok(())
}
