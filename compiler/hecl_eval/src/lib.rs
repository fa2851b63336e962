//! Hecl Eval - the command-evaluation runtime for Hecl scripts.
//!
//! # Architecture
//!
//! - [`Interpreter`]: owns the variable frames, command table, result slot
//!   and print handler; evaluates parsed [`CodeBlock`](hecl_ir::CodeBlock)s
//! - [`Environment`]: stack of variable frames, one per procedure call
//! - [`ControlAction`]: typed non-local exits (`Error`, `Return`, `Break`,
//!   `Continue`) carried in the `Err` side of every evaluation result
//! - [`CommandSpec`] / [`CommandFamily`]: native command tables loaded per
//!   interpreter
//! - [`Procedure`]: script-defined commands created by `proc`
//!
//! # Example
//!
//! ```text
//! let mut interp = Interpreter::builder().print_handler(buffer_handler()).build();
//! interp.eval_script("proc greet {who} {puts \"hello $who\"}\ngreet world")?;
//! assert_eq!(interp.print_output(), "hello world\n");
//! ```

mod commands;
mod environment;
pub mod errors;
mod interpreter;
mod print_handler;
mod procedure;
mod stack;

use std::sync::Once;

pub use hecl_ir::{CodeBlock, Thing};

pub use commands::{CommandFamily, CommandFn, CommandSpec, CORE, DEFAULT_FAMILIES, HASH, LIST};
pub use environment::Environment;
pub use errors::{
    BacktraceFrame, CmdResult, ControlAction, EvalBacktrace, EvalError, EvalErrorKind, EvalResult,
    Signal,
};
pub use interpreter::{
    compile, Command, Interpreter, InterpreterBuilder, ScopedInterpreter, DEFAULT_MAX_DEPTH,
};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use procedure::{Procedure, VARARGS_NAME};
pub use stack::StackPolicy;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
/// Enable with e.g. `RUST_LOG=hecl_eval=debug` or `RUST_LOG=hecl_parse=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
