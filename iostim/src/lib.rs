//! iostim
//!
//! Compiles Verilog-flavoured stimulus scripts (`write_io`, `repeat`,
//! counting `for` loops) into a flat trace of bus I/O events:
//!
//! ```text
//! IO,0x88,0x01
//! INFO,"comment text"
//! ```
//!
//! Loops above a configurable size can instead be emitted as a compact C
//! loop fragment.

// Library code logs through `log`; only the binary writes to the terminal.
#![deny(clippy::print_stderr)]

pub mod config;
pub mod emit;
pub mod error;
pub mod eval;
pub mod expand;
pub mod ir;
pub mod lowering;
pub mod pipeline;
pub mod ports;
pub mod scanner;

pub use config::Config;
pub use emit::{render, Event};
pub use error::{CompileError, CompileResult, EvalError};
pub use eval::{evaluate, Bindings};
pub use expand::{expand_loop, ExpandConfig, LoopDescriptor};
pub use pipeline::{compile, compile_to_string};
pub use ports::PortMap;
pub use scanner::Scanner;
