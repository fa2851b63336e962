//! Evaluation errors and control-flow signals.
//!
//! A command either succeeds or unwinds with a [`ControlAction`]. Three of
//! the actions are not failures: `Return`, `Break` and `Continue` travel up
//! the Rust call stack until the construct that understands them (a
//! procedure call or a loop) consumes them. Everything else is an
//! [`EvalError`] and propagates to the embedding caller.
//!
//! Factory functions (`undefined_variable()`, `too_many_args()`, ...) are the
//! public way to build errors. They fill in the structured kind, the
//! message, and the machine-readable code scripts see.

use std::fmt;

use hecl_ir::{ConvError, Thing};
use hecl_parse::{ParseError, ParseErrorKind};

/// Result of evaluating a script, stanza, or procedure.
pub type EvalResult = Result<Thing, ControlAction>;

/// Result of a built-in command; the value travels through the
/// interpreter's result slot.
pub type CmdResult = Result<(), ControlAction>;

/// Non-local exit from an evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    /// A real failure.
    Error(Box<EvalError>),
    /// `return ?value?`: leave the enclosing procedure with a value.
    Return(Thing),
    /// `break`: leave the enclosing loop.
    Break,
    /// `continue`: start the enclosing loop's next iteration.
    Continue,
}

impl ControlAction {
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, ControlAction::Error(_))
    }

    /// Record the stanza line an error passed through.
    ///
    /// The first line recorded is the innermost failing stanza. Once a
    /// procedure frame has been pushed, the next line seen is that frame's
    /// call site.
    #[must_use]
    pub(crate) fn at_line(self, line: u32) -> Self {
        match self {
            ControlAction::Error(mut error) => {
                error.note_line(line);
                ControlAction::Error(error)
            }
            other => other,
        }
    }

    /// Settle an action that escaped to the top level of a script.
    ///
    /// `return` ends the script with its value; `break` and `continue`
    /// outside of any loop are errors.
    pub fn into_top_level(self) -> Result<Thing, EvalError> {
        match self {
            ControlAction::Return(value) => Ok(value),
            ControlAction::Break => Err(outside_loop(Signal::Break)),
            ControlAction::Continue => Err(outside_loop(Signal::Continue)),
            ControlAction::Error(error) => Err(*error),
        }
    }
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(error: EvalError) -> Self {
        ControlAction::Error(Box::new(error))
    }
}

impl From<ConvError> for ControlAction {
    fn from(error: ConvError) -> Self {
        EvalError::from(error).into()
    }
}

impl From<ParseError> for ControlAction {
    fn from(error: ParseError) -> Self {
        EvalError::from(error).into()
    }
}

/// Loop signals that can escape their loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Break,
    Continue,
}

impl Signal {
    pub fn name(self) -> &'static str {
        match self {
            Signal::Break => "break",
            Signal::Continue => "continue",
        }
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Parse
    Parse(ParseErrorKind),

    // Arity
    NotEnoughArgs { proc_name: String },
    TooManyArgs { proc_name: String },
    WrongArgs { usage: String },
    ForeachMismatch,

    // Lookup
    UndefinedVariable { name: String },
    UnknownCommand { name: String },
    KeyNotFound { key: String },

    // Type
    NotAnInteger { value: String },
    Conversion(ConvError),
    IntegerOverflow,

    // Resources
    StackOverflow { depth: usize },

    /// `break` / `continue` reached the top level.
    OutsideLoop(Signal),

    /// Raised by embedders with their own message and code.
    Custom { message: String },
}

impl EvalErrorKind {
    /// Machine-readable code reported to scripts.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Parse(_) => Some(ParseError::CODE),
            Self::NotEnoughArgs { .. }
            | Self::TooManyArgs { .. }
            | Self::WrongArgs { .. }
            | Self::ForeachMismatch => Some("ARITY_ERROR"),
            Self::UndefinedVariable { .. }
            | Self::UnknownCommand { .. }
            | Self::KeyNotFound { .. } => Some("LOOKUP_ERROR"),
            Self::NotAnInteger { .. } | Self::Conversion(_) | Self::IntegerOverflow => {
                Some("TYPE_ERROR")
            }
            Self::StackOverflow { .. } => Some("STACK_OVERFLOW"),
            Self::OutsideLoop(Signal::Break) => Some("BREAK"),
            Self::OutsideLoop(Signal::Continue) => Some("CONTINUE"),
            Self::Custom { .. } => None,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(kind) => write!(f, "{kind}"),

            Self::NotEnoughArgs { proc_name } => {
                write!(f, "proc {proc_name} doesn't have enough arguments")
            }
            Self::TooManyArgs { proc_name } => write!(f, "proc {proc_name} has too many arguments"),
            Self::WrongArgs { usage } => write!(f, "wrong # args: should be \"{usage}\""),
            Self::ForeachMismatch => {
                write!(f, "foreach argument list does not match list length")
            }

            Self::UndefinedVariable { name } => write!(f, "variable {name} does not exist"),
            Self::UnknownCommand { name } => write!(f, "command {name} does not exist"),
            Self::KeyNotFound { key } => write!(f, "key not found: {key}"),

            Self::NotAnInteger { value } => write!(f, "expected integer but got \"{value}\""),
            Self::Conversion(error) => write!(f, "{error}"),
            Self::IntegerOverflow => write!(f, "integer overflow"),

            Self::StackOverflow { depth } => {
                write!(f, "too many nested procedure calls (limit: {depth})")
            }

            Self::OutsideLoop(signal) => {
                write!(f, "invoked \"{}\" outside of a loop", signal.name())
            }

            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// One procedure frame an error unwound through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Name the procedure was invoked as.
    pub name: String,
    /// Line of the stanza that called it, once known.
    pub line: Option<u32>,
}

/// Procedure frames, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "procedure backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(line) = frame.line {
                write!(f, " called at line {line}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Machine-readable code, e.g. `ARITY_ERROR`.
    pub code: Option<String>,
    /// Line of the innermost stanza that raised the error.
    pub line: Option<u32>,
    /// Procedure frames unwound while propagating.
    pub backtrace: EvalBacktrace,
}

impl EvalError {
    /// An error with a free-form message and no code.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::from_kind(EvalErrorKind::Custom { message })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            message: kind.to_string(),
            code: kind.code().map(str::to_owned),
            kind,
            line: None,
            backtrace: EvalBacktrace::default(),
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    #[inline]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Push the frame of a procedure this error is leaving.
    pub(crate) fn push_frame(&mut self, name: impl Into<String>) {
        self.backtrace.frames.push(BacktraceFrame {
            name: name.into(),
            line: None,
        });
    }

    fn note_line(&mut self, line: u32) {
        if self.line.is_none() {
            self.line = Some(line);
            return;
        }
        if let Some(frame) = self.backtrace.frames.last_mut() {
            if frame.line.is_none() {
                frame.line = Some(line);
            }
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

impl From<ParseError> for EvalError {
    fn from(error: ParseError) -> Self {
        EvalError::from_kind(EvalErrorKind::Parse(error.kind)).with_line(error.line)
    }
}

impl From<ConvError> for EvalError {
    fn from(error: ConvError) -> Self {
        EvalError::from_kind(EvalErrorKind::Conversion(error))
    }
}

// Arity errors

/// Procedure called with fewer arguments than it requires.
#[cold]
pub fn not_enough_args(proc_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotEnoughArgs {
        proc_name: proc_name.to_string(),
    })
}

/// Non-varargs procedure called with extra arguments.
#[cold]
pub fn too_many_args(proc_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyArgs {
        proc_name: proc_name.to_string(),
    })
}

/// Built-in command called outside its declared argument range.
#[cold]
pub fn wrong_args(usage: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongArgs {
        usage: usage.to_string(),
    })
}

#[cold]
pub fn foreach_mismatch() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ForeachMismatch)
}

// Lookup errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn unknown_command(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownCommand {
        name: name.to_string(),
    })
}

#[cold]
pub fn key_not_found(key: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::KeyNotFound {
        key: key.to_string(),
    })
}

// Type errors

#[cold]
pub fn not_an_integer(value: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnInteger {
        value: value.to_string(),
    })
}

#[cold]
pub fn integer_overflow() -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow)
}

// Resource and control-flow errors

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

/// A loop signal escaped every loop.
#[cold]
pub fn outside_loop(signal: Signal) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OutsideLoop(signal))
}

#[cfg(test)]
mod tests;
