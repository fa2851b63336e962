//! Errors raised while converting a value between representations.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConvError {
    #[error("unbalanced braces in list")]
    UnbalancedBraces,
    #[error("unterminated quote in list")]
    UnterminatedQuote,
    #[error("list element in braces followed by \"{0}\" instead of space")]
    ExtraAfterBrace(char),
    #[error("list must have an even number of elements to be used as a hash (got {0})")]
    OddMapList(usize),
}
