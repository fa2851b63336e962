//! RAII guard for variable frames.
//!
//! [`ScopedInterpreter`] pushes a frame when created and pops it when
//! dropped, on success, on an unwinding `ControlAction`, and on panic. It
//! derefs to the interpreter so the body runs against the new frame.
//!
//! ```text
//! let mut scoped = interpreter.scoped();
//! scoped.set_var("x", value);
//! scoped.eval(&body)?;
//! // frame popped here
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;

pub struct ScopedInterpreter<'a> {
    interpreter: &'a mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a variable frame that is popped when the guard is dropped.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` in a fresh variable frame.
    pub fn with_scope<T>(&mut self, f: impl FnOnce(&mut ScopedInterpreter<'_>) -> T) -> T {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }
}
