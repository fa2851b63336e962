//! Compiled script fragments.
//!
//! The parser turns script text into a [`CodeBlock`]: an ordered list of
//! [`Stanza`]s, one per command line, each remembering the source line it
//! started on. Blocks are immutable once built and are evaluated top to
//! bottom.

use smallvec::SmallVec;

use crate::thing::Thing;

/// One parsed command line: the argument vector plus its starting line.
///
/// `args[0]` is the command name. Arguments may still contain substitution
/// markers; the evaluator resolves them left to right before dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct Stanza {
    args: SmallVec<[Thing; 4]>,
    line: u32,
}

impl Stanza {
    pub fn new(args: impl IntoIterator<Item = Thing>, line: u32) -> Self {
        let args: SmallVec<[Thing; 4]> = args.into_iter().collect();
        debug_assert!(!args.is_empty(), "a stanza always has a command word");
        Stanza { args, line }
    }

    #[inline]
    pub fn args(&self) -> &[Thing] {
        &self.args
    }

    /// Line (starting at one) on which the stanza began.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// An ordered sequence of stanzas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CodeBlock {
    stanzas: Vec<Stanza>,
    /// Text the block was parsed from; this is its textual form.
    source: String,
    /// Set for blocks parsed out of `[...]`.
    substitution: bool,
}

impl CodeBlock {
    pub fn new(source: impl Into<String>, stanzas: Vec<Stanza>) -> Self {
        CodeBlock {
            stanzas,
            source: source.into(),
            substitution: false,
        }
    }

    /// Mark the block as the body of a `[...]` command substitution.
    #[must_use]
    pub fn into_substitution(mut self) -> Self {
        self.substitution = true;
        self
    }

    #[inline]
    pub fn is_substitution(&self) -> bool {
        self.substitution
    }

    #[inline]
    pub fn stanzas(&self) -> &[Stanza] {
        &self.stanzas
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stanzas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stanzas.is_empty()
    }
}

/// `[...]` markers nest one block per level, so releasing a block recurses
/// as deep as the script's brackets do.
impl Drop for CodeBlock {
    fn drop(&mut self) {
        let stanzas = std::mem::take(&mut self.stanzas);
        if !stanzas.is_empty() {
            hecl_stack::ensure_sufficient_stack(move || drop(stanzas));
        }
    }
}
