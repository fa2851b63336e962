//! Parse error types.
//!
//! Every parse failure carries the line it was detected on. For unbalanced
//! delimiters that is the line where the group opened, which is where a
//! reader has to look.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unbalanced {{}}")]
    UnbalancedBraces,
    #[error("unbalanced []")]
    UnbalancedBrackets,
    #[error("extra characters after close-brace")]
    ExtraAfterCloseBrace,
    #[error("open brace in the middle of a word")]
    BraceInWord,
    #[error("illegal unicode escape: \\u{digits}")]
    IllegalUnicodeEscape { digits: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} (line {line})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: u32,
}

impl ParseError {
    /// Error code reported to scripts for every parse failure.
    pub const CODE: &'static str = "PARSE_ERROR";

    #[cold]
    pub fn new(kind: ParseErrorKind, line: u32) -> Self {
        ParseError { kind, line }
    }

    #[inline]
    pub fn code(&self) -> &'static str {
        Self::CODE
    }
}
