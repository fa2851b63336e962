//! The Hecl interpreter.
//!
//! An [`Interpreter`] owns everything a script can touch: the variable
//! frames, the command table, the result slot and the output handler.
//! Nothing is process-global, so independent interpreters can coexist.
//!
//! # Evaluation
//!
//! [`Interpreter::eval`] runs a [`CodeBlock`] stanza by stanza. Each
//! stanza's arguments are resolved left to right (variable reads, nested
//! `[...]` blocks, group concatenation) and the resulting argument vector
//! is dispatched on its first element. The block's value is the value of
//! its last stanza. A [`ControlAction`] from any stanza stops the block
//! and propagates.

mod builder;
mod scope_guard;

use std::borrow::Cow;
use std::mem;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use hecl_ir::{CodeBlock, Stanza, Subst, Thing};

use crate::commands::{CommandFamily, CommandSpec};
use crate::environment::Environment;
use crate::errors::{undefined_variable, unknown_command, ControlAction, EvalError, EvalResult};
use crate::print_handler::SharedPrintHandler;
use crate::procedure::Procedure;
use crate::stack::StackPolicy;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_DEPTH};
pub use scope_guard::ScopedInterpreter;

/// An entry in the command table.
#[derive(Clone)]
pub enum Command {
    /// A built-in or embedder-provided native command.
    Native(CommandSpec),
    /// A procedure defined by `proc`.
    Proc(Rc<Procedure>),
}

pub struct Interpreter {
    pub(crate) env: Environment,
    commands: FxHashMap<String, Command>,
    result: Thing,
    print_handler: SharedPrintHandler,
    max_depth: usize,
    stack_policy: StackPolicy,
}

impl Interpreter {
    /// An interpreter with the default command families and stdout output.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    // Variables

    /// Read a variable from the innermost frame.
    pub fn get_var(&self, name: &str) -> Result<Thing, EvalError> {
        self.env
            .lookup(name)
            .cloned()
            .ok_or_else(|| undefined_variable(name))
    }

    /// Create or overwrite a variable in the innermost frame.
    pub fn set_var(&mut self, name: impl Into<String>, value: Thing) {
        self.env.define(name, value);
    }

    pub fn unset_var(&mut self, name: &str) -> Option<Thing> {
        self.env.remove(name)
    }

    pub fn var_exists(&self, name: &str) -> bool {
        self.env.contains(name)
    }

    /// Mutable access to a variable's value, for in-place updates.
    ///
    /// Mutating through the returned reference goes through the value's
    /// copy-on-write accessors, so other holders of the value are unaffected.
    pub fn var_mut(&mut self, name: &str) -> Result<&mut Thing, EvalError> {
        self.env
            .lookup_mut(name)
            .ok_or_else(|| undefined_variable(name))
    }

    /// Mutable access to a variable, creating it with `init` if missing.
    pub fn var_or_insert(&mut self, name: &str, init: impl FnOnce() -> Thing) -> &mut Thing {
        self.env.lookup_or_define(name, init)
    }

    /// Push a variable frame. Prefer [`scoped`](Self::scoped), which pops
    /// the frame on every exit path.
    pub fn stack_push(&mut self) {
        self.env.push_scope();
    }

    pub fn stack_pop(&mut self) {
        self.env.pop_scope();
    }

    /// Current number of procedure frames above the global frame.
    pub fn call_depth(&self) -> usize {
        self.env.depth() - 1
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    // Result slot

    /// Set the value the running command returns.
    #[inline]
    pub fn set_result(&mut self, value: Thing) {
        self.result = value;
    }

    #[inline]
    pub fn result(&self) -> &Thing {
        &self.result
    }

    // Command table

    /// Add a native command, replacing any command of the same name.
    pub fn register(&mut self, spec: CommandSpec) {
        self.commands
            .insert(spec.name.to_string(), Command::Native(spec));
    }

    pub(crate) fn define_proc(&mut self, name: impl Into<String>, procedure: Procedure) {
        self.commands
            .insert(name.into(), Command::Proc(Rc::new(procedure)));
    }

    /// Register every command of a family.
    pub fn load(&mut self, family: &CommandFamily) {
        debug!(family = family.name, commands = family.commands.len(), "load");
        for spec in family.commands {
            self.register(*spec);
        }
    }

    /// Remove a family's commands. Names since redefined by `proc` stay.
    pub fn unload(&mut self, family: &CommandFamily) {
        debug!(family = family.name, "unload");
        for spec in family.commands {
            if matches!(self.commands.get(spec.name), Some(Command::Native(_))) {
                self.commands.remove(spec.name);
            }
        }
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Remove a single command of any kind.
    pub fn remove_command(&mut self, name: &str) -> bool {
        self.commands.remove(name).is_some()
    }

    /// Names of all registered commands, sorted.
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    // Output

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Output captured so far; empty unless printing to a buffer.
    pub fn print_output(&self) -> String {
        self.print_handler.output()
    }

    // Evaluation

    /// Parse and run a script at the top level.
    ///
    /// `return` ends the script with its value. `break` or `continue`
    /// outside of a loop is an error.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn eval_script(&mut self, source: &str) -> Result<Thing, EvalError> {
        let block = hecl_parse::parse(source)?;
        self.eval(&block).or_else(ControlAction::into_top_level)
    }

    /// Run a block in the current frame.
    pub fn eval(&mut self, block: &CodeBlock) -> EvalResult {
        let policy = self.stack_policy;
        policy.run(|| self.eval_stanzas(block))
    }

    /// Run a value as a script: code runs directly, anything else is
    /// parsed from its text first.
    pub fn eval_thing(&mut self, script: &Thing) -> EvalResult {
        let block = compile(script)?;
        self.eval(&block)
    }

    fn eval_stanzas(&mut self, block: &CodeBlock) -> EvalResult {
        let mut last = Thing::empty();
        for stanza in block.stanzas() {
            last = self
                .eval_stanza(stanza)
                .map_err(|action| action.at_line(stanza.line()))?;
        }
        Ok(last)
    }

    fn eval_stanza(&mut self, stanza: &Stanza) -> EvalResult {
        let mut argv: SmallVec<[Thing; 4]> = SmallVec::with_capacity(stanza.len());
        for arg in stanza.args() {
            argv.push(self.resolve(arg)?);
        }
        self.dispatch(&argv)
    }

    /// Replace a substitution marker by its current value.
    pub(crate) fn resolve(&mut self, arg: &Thing) -> EvalResult {
        match arg {
            Thing::Subst(subst) => match &**subst {
                Subst::Var(name) => Ok(self.get_var(name)?),
                Subst::Command(block) => self.eval(block),
            },
            Thing::Group(parts) => {
                let mut text = String::new();
                for part in parts.iter() {
                    text.push_str(&self.resolve(part)?.as_str());
                }
                Ok(Thing::string(text))
            }
            other => Ok(other.clone()),
        }
    }

    /// Invoke the command named by `argv[0]`.
    pub fn dispatch(&mut self, argv: &[Thing]) -> EvalResult {
        let Some(first) = argv.first() else {
            return Ok(Thing::empty());
        };
        let name = first.as_str();
        // Cloned so the command may redefine or remove itself while running
        let Some(command) = self.commands.get(&*name).cloned() else {
            return Err(unknown_command(&name).into());
        };
        trace!(command = %name, argc = argv.len() - 1, "dispatch");
        match command {
            Command::Native(spec) => {
                spec.check_arity(argv)?;
                self.result = Thing::empty();
                (spec.func)(self, argv)?;
                Ok(mem::take(&mut self.result))
            }
            Command::Proc(procedure) => procedure.call(self, argv),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// A value as runnable code: borrowed when it already is code, parsed
/// from its text otherwise.
pub fn compile(script: &Thing) -> Result<Cow<'_, CodeBlock>, EvalError> {
    match script {
        Thing::Code(block) => Ok(Cow::Borrowed(&**block)),
        other => Ok(Cow::Owned(hecl_parse::parse(&other.as_str())?)),
    }
}

#[cfg(test)]
mod tests;
