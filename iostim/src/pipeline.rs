//! Compile pipeline
//!
//! Stimulus source → Scanner → `Vec<Event>` → rendered text

use log::debug;

use crate::config::Config;
use crate::emit::{render, Event};
use crate::error::CompileResult;
use crate::scanner::Scanner;

/// Compile stimulus source into events.
///
/// # Example
///
/// ```
/// use iostim::{compile, Config, Event};
///
/// let events = compile("repeat(2) write_io(vdp_io0, 8'h01);", &Config::default()).unwrap();
/// assert_eq!(events, vec![Event::io(0x88, 1), Event::io(0x88, 1)]);
/// ```
pub fn compile(source: &str, config: &Config) -> CompileResult<Vec<Event>> {
    let events = Scanner::new(source, config).run()?;
    debug!("compiled {} events", events.len());
    Ok(events)
}

/// Compile stimulus source straight to output text.
pub fn compile_to_string(source: &str, config: &Config) -> CompileResult<String> {
    compile(source, config).map(|events| render(&events))
}
