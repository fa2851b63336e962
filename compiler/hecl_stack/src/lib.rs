//! Stack growth for deep recursion.
//!
//! Nested `[...]` substitutions make the parser recurse once per level, and
//! the resulting code blocks nest just as deeply. Both walks go through
//! [`ensure_sufficient_stack`], which moves onto a fresh stack segment when
//! the current one runs low.
//!
//! On wasm32 `stacker` is unavailable and the closure runs directly.

/// Grow the stack when less than this much remains (100KB).
pub const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated segment (1MB).
pub const SEGMENT: usize = 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
