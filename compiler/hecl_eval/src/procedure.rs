//! Script-defined procedures.
//!
//! `proc name params body` creates a [`Procedure`]. The parameter list is a
//! list of names; when the last one is literally `args`, the procedure
//! takes any number of extra arguments, collected into a list bound to
//! `args`. The body is compiled once, when the procedure is defined.
//!
//! A call pushes a fresh variable frame, binds the parameters, runs the
//! body and pops the frame again, whichever way the body exits.

use hecl_ir::{CodeBlock, Thing};

use crate::errors::{
    not_enough_args, stack_overflow, too_many_args, ControlAction, EvalError, EvalResult,
};
use crate::interpreter::{compile, Interpreter};

/// Trailing parameter name that collects extra arguments.
pub const VARARGS_NAME: &str = "args";

#[derive(Clone, Debug)]
pub struct Procedure {
    /// Required parameter names, `args` excluded.
    params: Vec<String>,
    varargs: bool,
    body: CodeBlock,
}

impl Procedure {
    /// Build a procedure from its parameter list and body.
    pub fn new(params: &Thing, body: &Thing) -> Result<Self, EvalError> {
        let mut params: Vec<String> = params
            .as_list()?
            .iter()
            .map(|param| param.as_str().into_owned())
            .collect();
        let varargs = params.last().is_some_and(|last| last == VARARGS_NAME);
        if varargs {
            params.pop();
        }
        Ok(Procedure {
            params,
            varargs,
            body: compile(body)?.into_owned(),
        })
    }

    /// Number of arguments a call must supply at least.
    #[inline]
    pub fn required(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_varargs(&self) -> bool {
        self.varargs
    }

    pub fn body(&self) -> &CodeBlock {
        &self.body
    }

    /// Invoke with `argv[0]` as the name the procedure was called by.
    #[tracing::instrument(level = "debug", skip_all, fields(required = self.params.len()))]
    pub fn call(&self, interp: &mut Interpreter, argv: &[Thing]) -> EvalResult {
        let invoked = argv.first().map(Thing::as_str).unwrap_or_default();
        let actual = argv.get(1..).unwrap_or_default();

        if actual.len() < self.params.len() {
            return Err(not_enough_args(&invoked).into());
        }
        if actual.len() > self.params.len() && !self.varargs {
            return Err(too_many_args(&invoked).into());
        }

        let outcome = {
            let mut scoped = interp.scoped();
            if scoped.call_depth() > scoped.max_depth() {
                let limit = scoped.max_depth();
                Err(stack_overflow(limit).into())
            } else {
                let (required, extra) = actual.split_at(self.params.len());
                for (param, value) in self.params.iter().zip(required) {
                    scoped.set_var(param.as_str(), value.clone());
                }
                if self.varargs {
                    scoped.set_var(VARARGS_NAME, Thing::list(extra.to_vec()));
                }
                scoped.eval(&self.body)
            }
        };

        match outcome {
            Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
            Err(ControlAction::Error(mut error)) => {
                error.push_frame(invoked);
                Err(ControlAction::Error(error))
            }
            Err(signal) => Err(signal),
        }
    }
}

#[cfg(test)]
mod tests;
