//! Hecl IR - values and compiled code for the Hecl interpreter.
//!
//! This crate is shared by the parser and the evaluator:
//! - [`Thing`]: the copy-on-write value type (string, list, hash, code,
//!   and the parser's substitution markers)
//! - [`Heap`]: the reference-counted payload wrapper behind every `Thing`
//! - [`Stanza`] / [`CodeBlock`]: a parsed script, one argument vector per
//!   command line

mod code;
mod errors;
mod heap;
mod thing;

pub use code::{CodeBlock, Stanza};
pub use errors::ConvError;
pub use heap::Heap;
pub use thing::{is_bare_var_name, is_var_char, quote_element, Subst, Thing};
