//! `InterpreterBuilder` for creating configured Interpreter instances.

use rustc_hash::FxHashMap;

use hecl_ir::Thing;

use super::Interpreter;
use crate::commands::{self, CommandFamily};
use crate::environment::Environment;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::stack::StackPolicy;

/// Procedure-call depth allowed unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Builder for [`Interpreter`].
///
/// Defaults: stdout output, the `core`, `list` and `hash` command
/// families, a call depth limit of [`DEFAULT_MAX_DEPTH`].
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_depth: usize,
    stack_policy: StackPolicy,
    families: Vec<&'static CommandFamily>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            max_depth: DEFAULT_MAX_DEPTH,
            stack_policy: StackPolicy::default(),
            families: commands::DEFAULT_FAMILIES.to_vec(),
        }
    }

    /// Where `puts` writes. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Deepest allowed procedure nesting; deeper calls fail with
    /// `STACK_OVERFLOW`.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn stack_policy(mut self, policy: StackPolicy) -> Self {
        self.stack_policy = policy;
        self
    }

    /// Load an additional command family. Later families override earlier
    /// ones on name clashes.
    #[must_use]
    pub fn family(mut self, family: &'static CommandFamily) -> Self {
        self.families.push(family);
        self
    }

    /// Start from an empty command table.
    #[must_use]
    pub fn without_defaults(mut self) -> Self {
        self.families.clear();
        self
    }

    pub fn build(self) -> Interpreter {
        let mut interpreter = Interpreter {
            env: Environment::new(),
            commands: FxHashMap::default(),
            result: Thing::empty(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            max_depth: self.max_depth,
            stack_policy: self.stack_policy,
        };
        for family in self.families {
            interpreter.load(family);
        }
        interpreter
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
