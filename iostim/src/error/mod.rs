pub mod compile;
pub mod eval;
pub mod unsupported;

pub use compile::{CompileError, CompileResult};
pub use eval::{EvalError, EvalFailure};
pub use unsupported::{ConstructKind, UnsupportedConstruct};
