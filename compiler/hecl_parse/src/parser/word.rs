//! Accumulates the pieces of one word while it is being scanned.

use std::mem;

use hecl_ir::Thing;

/// Literal text plus substitution markers, in source order.
#[derive(Default)]
pub(super) struct WordBuilder {
    parts: Vec<Thing>,
    text: String,
    quoted: bool,
}

impl WordBuilder {
    pub(super) fn quoted() -> Self {
        WordBuilder {
            quoted: true,
            ..WordBuilder::default()
        }
    }

    #[inline]
    pub(super) fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Append a `$var` or `[cmd]` marker after the pending literal text.
    pub(super) fn splice(&mut self, marker: Thing) {
        self.flush();
        self.parts.push(marker);
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            self.parts.push(Thing::string(mem::take(&mut self.text)));
        }
    }

    /// Produce the word's value.
    ///
    /// A lone unquoted marker stays a raw marker so that `$list` passes the
    /// variable's value through unchanged. A quoted word always yields text,
    /// so a lone marker inside quotes is wrapped in a group.
    pub(super) fn finish(mut self) -> Thing {
        self.flush();
        if self.parts.len() > 1 {
            return Thing::group(self.parts);
        }
        match self.parts.pop() {
            None => Thing::empty(),
            Some(part) if self.quoted && part.is_marker() => Thing::group(vec![part]),
            Some(part) => part,
        }
    }
}
