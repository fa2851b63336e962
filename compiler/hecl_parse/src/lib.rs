//! Parser for Hecl scripts.
//!
//! Turns script text into a [`hecl_ir::CodeBlock`]. Parsing is a single
//! pass over characters with one character of lookback; there is no
//! separate lexer. See [`Parser`] for the word grammar.

mod error;
mod parser;
mod state;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse, Parser};
pub use state::{ParseState, EOF_CHAR};
