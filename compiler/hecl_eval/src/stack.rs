//! Stack growth for deeply nested evaluation.
//!
//! Script evaluation recurses on the native stack (procedure calls, loop
//! bodies, `[...]` substitutions). Each code block runs through
//! [`StackPolicy::run`], which uses `stacker` to switch to a fresh stack
//! segment when the remaining space drops below the red zone.
//!
//! On wasm32 `stacker` is unavailable and the closure runs directly.

/// Sizes used when growing the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackPolicy {
    /// Minimum free stack to keep before calling into a block.
    pub red_zone: usize,
    /// Size of each newly allocated segment.
    pub segment: usize,
}

impl StackPolicy {
    pub const DEFAULT_RED_ZONE: usize = 100 * 1024;
    pub const DEFAULT_SEGMENT: usize = 1024 * 1024;

    pub const fn new(red_zone: usize, segment: usize) -> Self {
        StackPolicy { red_zone, segment }
    }

    /// Run `f`, growing the stack first if needed.
    #[inline]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run<R>(self, f: impl FnOnce() -> R) -> R {
        stacker::maybe_grow(self.red_zone, self.segment, f)
    }

    #[inline]
    #[cfg(target_arch = "wasm32")]
    pub fn run<R>(self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

impl Default for StackPolicy {
    fn default() -> Self {
        StackPolicy::new(Self::DEFAULT_RED_ZONE, Self::DEFAULT_SEGMENT)
    }
}
