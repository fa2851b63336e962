//! Native command table entries and the built-in command families.
//!
//! A [`CommandSpec`] pairs a command name with a plain function and its
//! accepted argument range. Argument counts exclude the command name. The
//! interpreter checks the range before calling the function, so command
//! bodies may index `argv` up to `min_args` freely.
//!
//! Commands are grouped into [`CommandFamily`] tables that an interpreter
//! loads and unloads as a unit:
//!
//! | Family | Commands |
//! |--------|----------|
//! | `core` | `set unset copy puts proc eval catch eq incr return break continue foreach if while` |
//! | `list` | `list llen lindex lappend` |
//! | `hash` | `hash hget hset hkeys hclear hremove` |

mod base;
mod control;
mod hash;
mod list;

use hecl_ir::Thing;

use crate::errors::{not_an_integer, wrong_args, CmdResult, EvalError};
use crate::interpreter::Interpreter;

pub use base::CORE;
pub use hash::HASH;
pub use list::LIST;

/// Signature of a native command. `argv[0]` is the command name; the
/// value is returned through [`Interpreter::set_result`].
pub type CommandFn = fn(&mut Interpreter, &[Thing]) -> CmdResult;

#[derive(Clone, Copy, Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub min_args: usize,
    /// `None` for no upper bound.
    pub max_args: Option<usize>,
    /// Shown in "wrong # args" errors.
    pub usage: &'static str,
    pub func: CommandFn,
}

impl CommandSpec {
    pub const fn new(
        name: &'static str,
        min_args: usize,
        max_args: Option<usize>,
        usage: &'static str,
        func: CommandFn,
    ) -> Self {
        CommandSpec {
            name,
            min_args,
            max_args,
            usage,
            func,
        }
    }

    /// Fail with an `ARITY_ERROR` unless `argv` has an accepted length.
    pub fn check_arity(&self, argv: &[Thing]) -> Result<(), EvalError> {
        let given = argv.len().saturating_sub(1);
        let too_many = self.max_args.is_some_and(|max| given > max);
        if given < self.min_args || too_many {
            return Err(wrong_args(self.usage));
        }
        Ok(())
    }
}

/// A named table of commands loaded together.
#[derive(Debug)]
pub struct CommandFamily {
    pub name: &'static str,
    pub commands: &'static [CommandSpec],
}

/// Families an interpreter loads unless told otherwise.
pub static DEFAULT_FAMILIES: [&CommandFamily; 3] = [&CORE, &LIST, &HASH];

/// Read an argument as an integer.
pub(crate) fn int_arg(value: &Thing) -> Result<i64, EvalError> {
    value
        .as_int()
        .ok_or_else(|| not_an_integer(&value.as_str()))
}

/// A length as a script integer.
pub(crate) fn int_len(len: usize) -> Thing {
    Thing::int(i64::try_from(len).unwrap_or(i64::MAX))
}
