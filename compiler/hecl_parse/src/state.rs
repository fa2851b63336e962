//! Character cursor over script text.
//!
//! `ParseState` hands out one `char` at a time and remembers enough about
//! the last one to step back over it, which is all the lookahead the
//! parser needs. Once the input is exhausted it returns [`EOF_CHAR`] and
//! reports [`is_done`](ParseState::is_done).
//!
//! Line numbers start at one and advance on `\n` and `\r`; a `\r\n` pair
//! counts as a single line break.

/// Sentinel returned by [`ParseState::next_char`] once input is exhausted.
pub const EOF_CHAR: char = '\0';

#[derive(Clone, Copy, Debug)]
struct Consumed {
    width: usize,
    bumped_line: bool,
}

#[derive(Clone, Debug)]
pub struct ParseState<'a> {
    input: &'a str,
    offset: usize,
    line: u32,
    /// The last character handed out, if it can still be rewound.
    last: Option<Consumed>,
    /// Previous character was `\r` (so a following `\n` is the same break).
    after_cr: bool,
    eof: bool,
    eoc: bool,
}

impl<'a> ParseState<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::starting_at_line(input, 1)
    }

    /// A cursor whose line counter starts at `line`, for nested fragments.
    pub fn starting_at_line(input: &'a str, line: u32) -> Self {
        ParseState {
            input,
            offset: 0,
            line,
            last: None,
            after_cr: false,
            eof: false,
            eoc: false,
        }
    }

    /// Consume and return the next character, or [`EOF_CHAR`] at the end.
    pub fn next_char(&mut self) -> char {
        let Some(c) = self.input[self.offset..].chars().next() else {
            self.eof = true;
            self.last = None;
            return EOF_CHAR;
        };
        let bumped_line = match c {
            '\r' => true,
            '\n' => !self.after_cr,
            _ => false,
        };
        if bumped_line {
            self.line += 1;
        }
        self.after_cr = c == '\r';
        self.offset += c.len_utf8();
        self.last = Some(Consumed {
            width: c.len_utf8(),
            bumped_line,
        });
        c
    }

    /// Step back over the character returned by the last `next_char`.
    ///
    /// Only one step is remembered; a second call, or a call after the
    /// sentinel was returned, does nothing.
    pub fn rewind(&mut self) {
        if let Some(consumed) = self.last.take() {
            self.offset -= consumed.width;
            if consumed.bumped_line {
                self.line -= 1;
            }
            self.after_cr = self.input[..self.offset].ends_with('\r');
        }
    }

    /// Next character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.input[self.offset..].chars().next()
    }

    /// True once `next_char` has run past the end of the input.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.eof
    }

    /// Record that the current command ended inside a word.
    #[inline]
    pub fn end_command(&mut self) {
        self.eoc = true;
    }

    #[inline]
    pub fn is_end_of_command(&self) -> bool {
        self.eoc
    }

    /// Clear the end-of-command flag before parsing the next stanza.
    #[inline]
    pub fn begin_command(&mut self) {
        self.eoc = false;
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn input(&self) -> &'a str {
        self.input
    }
}
