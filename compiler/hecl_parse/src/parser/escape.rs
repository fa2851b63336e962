//! Backslash escapes.

use super::word::WordBuilder;
use super::Parser;
use crate::error::{ParseError, ParseErrorKind};

/// What a backslash sequence turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Escape {
    /// A character was appended to the word.
    Char,
    /// `\` followed by a line break: ends the word, not the command.
    LineContinuation,
    /// `\` was the last character of the input.
    AtEnd,
}

const MAX_UNICODE_DIGITS: usize = 4;

impl Parser<'_> {
    /// Handle the character after a `\`.
    pub(super) fn parse_escape(&mut self, word: &mut WordBuilder) -> Result<Escape, ParseError> {
        let ch = self.state.next_char();
        if self.state.is_done() {
            return Ok(Escape::AtEnd);
        }
        match ch {
            '\n' => return Ok(Escape::LineContinuation),
            '\r' => {
                if self.state.peek() == Some('\n') {
                    self.state.next_char();
                }
                return Ok(Escape::LineContinuation);
            }
            'n' => word.push('\n'),
            't' => word.push('\t'),
            'u' => word.push(self.parse_unicode_escape()?),
            other => word.push(other),
        }
        Ok(Escape::Char)
    }

    /// `\uXXXX`: up to four hex digits, stopping early at a non-hex char.
    fn parse_unicode_escape(&mut self) -> Result<char, ParseError> {
        let mut digits = String::with_capacity(MAX_UNICODE_DIGITS);
        while digits.len() < MAX_UNICODE_DIGITS {
            let ch = self.state.next_char();
            if self.state.is_done() {
                break;
            }
            if !ch.is_ascii_hexdigit() {
                self.state.rewind();
                break;
            }
            digits.push(ch);
        }
        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error(ParseErrorKind::IllegalUnicodeEscape { digits }))
    }
}
