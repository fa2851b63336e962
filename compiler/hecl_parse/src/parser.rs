//! Character-driven parser for Hecl scripts.
//!
//! A script is a sequence of commands separated by newlines or `;`. Each
//! command is a sequence of words separated by spaces or tabs. Words come
//! in four shapes:
//!
//! - `{...}` literal block: text kept verbatim, braces nest, no
//!   substitution. Must be followed by whitespace, `;` or end of input.
//! - `"..."` quoted word: spaces and newlines are literal, `$` and `[`
//!   still substitute.
//! - bare word: runs up to the next space or command terminator.
//! - `#...` comment: only where a word would start, runs to end of line.
//!
//! Inside quoted and bare words `$name`, `${name}` and `[script]`
//! substitute. The substitution is not performed here: the parser records
//! a marker (see [`hecl_ir::Subst`]) and the evaluator resolves it each
//! time the stanza runs. Bracketed scripts are parsed on the spot into
//! their own [`CodeBlock`], keeping the line numbers of the outer text.

mod escape;
mod word;

use hecl_ir::{is_var_char, CodeBlock, Stanza, Thing};
use hecl_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};
use crate::state::ParseState;
use escape::Escape;
use word::WordBuilder;

/// Delimiter pair of a nested group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delim {
    Brace,
    Bracket,
}

impl Delim {
    fn pair(self) -> (char, char) {
        match self {
            Delim::Brace => ('{', '}'),
            Delim::Bracket => ('[', ']'),
        }
    }

    fn unbalanced(self) -> ParseErrorKind {
        match self {
            Delim::Brace => ParseErrorKind::UnbalancedBraces,
            Delim::Bracket => ParseErrorKind::UnbalancedBrackets,
        }
    }
}

pub struct Parser<'a> {
    state: ParseState<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            state: ParseState::new(input),
        }
    }

    /// A parser for a fragment that begins on `line` of some larger text.
    pub fn starting_at_line(input: &'a str, line: u32) -> Self {
        Parser {
            state: ParseState::starting_at_line(input, line),
        }
    }

    /// Whether input remains.
    #[inline]
    pub fn more(&self) -> bool {
        !self.state.is_done()
    }

    /// Current line of the underlying cursor.
    #[inline]
    pub fn line(&self) -> u32 {
        self.state.line()
    }

    /// Parse the whole input into a block.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_to_code(mut self) -> Result<CodeBlock, ParseError> {
        let mut stanzas = Vec::new();
        while self.more() {
            let line = self.state.line();
            if let Some(words) = self.parse_one_stanza()? {
                stanzas.push(Stanza::new(words, line));
            }
        }
        trace!(stanzas = stanzas.len(), "parsed block");
        Ok(CodeBlock::new(self.state.input(), stanzas))
    }

    /// Parse the next command.
    ///
    /// Returns `None` for blank lines and comments.
    pub fn parse_one_stanza(&mut self) -> Result<Option<Vec<Thing>>, ParseError> {
        self.state.begin_command();
        let mut words = Vec::new();
        self.parse_line(&mut words)?;
        Ok((!words.is_empty()).then_some(words))
    }

    #[cold]
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.state.line())
    }

    fn parse_line(&mut self, words: &mut Vec<Thing>) -> Result<(), ParseError> {
        loop {
            if self.state.is_end_of_command() {
                return Ok(());
            }
            let ch = self.state.next_char();
            if self.state.is_done() {
                return Ok(());
            }
            let mut word = WordBuilder::default();
            match ch {
                ' ' | '\t' => continue,
                '\r' | '\n' | ';' => return Ok(()),
                '#' => {
                    self.skip_comment();
                    return Ok(());
                }
                '{' => {
                    let mut text = String::new();
                    self.parse_group(&mut text, Delim::Brace)?;
                    self.check_after_brace()?;
                    words.push(Thing::string(text));
                    continue;
                }
                '"' => {
                    word = WordBuilder::quoted();
                    self.parse_quoted(&mut word)?;
                }
                '\\' => match self.parse_escape(&mut word)? {
                    Escape::Char => self.parse_word(&mut word)?,
                    Escape::LineContinuation | Escape::AtEnd => continue,
                },
                '[' => {
                    let command = self.parse_command()?;
                    word.splice(command);
                    self.parse_word(&mut word)?;
                }
                '$' => {
                    self.parse_dollar(&mut word)?;
                    self.parse_word(&mut word)?;
                }
                other => {
                    word.push(other);
                    self.parse_word(&mut word)?;
                }
            }
            words.push(word.finish());
        }
    }

    /// Rest of a bare word. Consumes the terminating space or line break.
    fn parse_word(&mut self, word: &mut WordBuilder) -> Result<(), ParseError> {
        loop {
            let ch = self.state.next_char();
            if self.state.is_done() {
                return Ok(());
            }
            match ch {
                ' ' | '\t' => return Ok(()),
                '\r' | '\n' | ';' => {
                    self.state.end_command();
                    return Ok(());
                }
                '[' => {
                    let command = self.parse_command()?;
                    word.splice(command);
                }
                '$' => self.parse_dollar(word)?,
                '\\' => match self.parse_escape(word)? {
                    Escape::Char => {}
                    Escape::LineContinuation | Escape::AtEnd => return Ok(()),
                },
                '{' => return Err(self.error(ParseErrorKind::BraceInWord)),
                other => word.push(other),
            }
        }
    }

    /// Body of a `"..."` word. An unterminated quote ends at end of input.
    fn parse_quoted(&mut self, word: &mut WordBuilder) -> Result<(), ParseError> {
        loop {
            let ch = self.state.next_char();
            if self.state.is_done() {
                return Ok(());
            }
            match ch {
                '"' => return Ok(()),
                '[' => {
                    let command = self.parse_command()?;
                    word.splice(command);
                }
                '$' => self.parse_dollar(word)?,
                '\\' => {
                    self.parse_escape(word)?;
                }
                other => word.push(other),
            }
        }
    }

    /// After `$`: a `${...}` name, a run of variable-name characters, or a
    /// literal `$` when neither follows.
    fn parse_dollar(&mut self, word: &mut WordBuilder) -> Result<(), ParseError> {
        let mut ch = self.state.next_char();
        if self.state.is_done() {
            word.push('$');
            return Ok(());
        }
        let mut name = String::new();
        if ch == '{' {
            self.parse_group(&mut name, Delim::Brace)?;
        } else {
            while is_var_char(ch) {
                name.push(ch);
                ch = self.state.next_char();
                if self.state.is_done() {
                    break;
                }
            }
            if !self.state.is_done() {
                self.state.rewind();
            }
            if name.is_empty() {
                word.push('$');
                return Ok(());
            }
        }
        word.splice(Thing::var_ref(name));
        Ok(())
    }

    /// After `[`: parse the bracketed text as a script of its own.
    ///
    /// Each nesting level recurses, so the nested parse runs under
    /// `ensure_sufficient_stack`.
    fn parse_command(&mut self) -> Result<Thing, ParseError> {
        let line = self.state.line();
        let mut text = String::new();
        self.parse_group(&mut text, Delim::Bracket)?;
        let nested = Parser::starting_at_line(&text, line);
        let block = ensure_sufficient_stack(|| nested.parse_to_code())?.into_substitution();
        Ok(Thing::command(block))
    }

    /// Collect text up to the matching close delimiter, which is consumed
    /// but not copied. Only the group's own delimiter kind is counted.
    fn parse_group(&mut self, out: &mut String, delim: Delim) -> Result<(), ParseError> {
        let (open, close) = delim.pair();
        let start_line = self.state.line();
        let mut depth = 1usize;
        loop {
            let ch = self.state.next_char();
            if self.state.is_done() {
                return Err(ParseError::new(delim.unbalanced(), start_line));
            }
            if ch == open {
                depth += 1;
            } else if ch == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            out.push(ch);
        }
    }

    /// A literal block must end its word.
    fn check_after_brace(&mut self) -> Result<(), ParseError> {
        let ch = self.state.next_char();
        if self.state.is_done() {
            return Ok(());
        }
        match ch {
            ' ' | '\t' | '\r' | '\n' | ';' => {
                self.state.rewind();
                Ok(())
            }
            _ => Err(self.error(ParseErrorKind::ExtraAfterCloseBrace)),
        }
    }

    fn skip_comment(&mut self) {
        loop {
            let ch = self.state.next_char();
            if self.state.is_done() || ch == '\n' || ch == '\r' {
                return;
            }
        }
    }
}

/// Parse a complete script.
pub fn parse(source: &str) -> Result<CodeBlock, ParseError> {
    Parser::new(source).parse_to_code()
}
