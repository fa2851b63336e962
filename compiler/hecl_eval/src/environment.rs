//! Variable frames for the interpreter.
//!
//! The environment is a stack of frames. The bottom frame holds global
//! variables; every procedure call pushes a fresh frame and pops it on
//! exit. Lookups see the innermost frame only: a procedure body cannot
//! read its caller's variables.

use rustc_hash::FxHashMap;

use hecl_ir::Thing;

#[derive(Clone, Debug, Default)]
struct Frame {
    vars: FxHashMap<String, Thing>,
}

/// Stack of variable frames, innermost last.
#[derive(Clone, Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// An environment holding only the global frame.
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame::default()],
        }
    }

    /// Number of frames, the global frame included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Pop the innermost frame. The global frame is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    fn current(&self) -> &Frame {
        // `frames` is never empty: `pop_scope` keeps the global frame
        &self.frames[self.frames.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<&Thing> {
        self.current().vars.get(name)
    }

    #[inline]
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Thing> {
        self.current_mut().vars.get_mut(name)
    }

    /// Create or overwrite a variable in the innermost frame.
    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Thing) {
        self.current_mut().vars.insert(name.into(), value);
    }

    /// The variable's value, defining it with `init()` first if missing.
    pub fn lookup_or_define(&mut self, name: &str, init: impl FnOnce() -> Thing) -> &mut Thing {
        self.current_mut()
            .vars
            .entry(name.to_string())
            .or_insert_with(init)
    }

    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Thing> {
        self.current_mut().vars.remove(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.current().vars.contains_key(name)
    }

    /// Variable names visible in the innermost frame, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.current().vars.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
