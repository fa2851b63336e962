//! Runtime values for the Hecl interpreter.
//!
//! A [`Thing`] is a tagged handle over one of six representations. All
//! payloads sit behind [`Heap`], so cloning a `Thing` is a reference-count
//! bump and aliases share storage until one of them is mutated.
//!
//! # Textual and structured forms
//!
//! Hecl values are strings as far as scripts are concerned. A list or map
//! can be read back from its text, and any structured value can be
//! rendered as text through `Display`. Conversions happen on demand:
//!
//! ```text
//! Thing::string("a {b c} d").as_list()   // three elements
//! Thing::list(items).to_string()         // "a {b c} d"
//! ```
//!
//! Commands that mutate in place call [`Thing::list_mut`] or
//! [`Thing::map_mut`], which first convert the handle to the structured
//! form and then detach it from any other owner.
//!
//! # Substitution markers
//!
//! `Group` and `Subst` are produced by the parser only. They stand for text
//! that still has to be resolved against the interpreter (variable reads,
//! nested commands) and never reach a command's argument vector.

mod list;

use std::borrow::Cow;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::code::CodeBlock;
use crate::errors::ConvError;
use crate::heap::Heap;

pub use list::{is_bare_var_name, is_var_char, quote_element};

/// A deferred substitution recorded by the parser.
#[derive(Clone, Debug, PartialEq)]
pub enum Subst {
    /// `$name` or `${name}`: read a variable at evaluation time.
    Var(String),
    /// `[script]`: run the nested block and use its result.
    Command(CodeBlock),
}

/// A Hecl value.
#[derive(Clone, PartialEq)]
pub enum Thing {
    /// Plain text.
    Str(Heap<String>),
    /// Ordered list of values.
    List(Heap<Vec<Thing>>),
    /// String-keyed hash table.
    Map(Heap<FxHashMap<String, Thing>>),
    /// A compiled script fragment.
    Code(Heap<CodeBlock>),
    /// A word assembled from literal text and substitutions, concatenated
    /// when resolved.
    Group(Heap<Vec<Thing>>),
    /// A variable reference or nested command awaiting resolution.
    Subst(Heap<Subst>),
}

// Factory methods (the only way to build heap payloads)

impl Thing {
    /// The empty string.
    #[inline]
    pub fn empty() -> Self {
        Thing::Str(Heap::new(String::new()))
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Thing::Str(Heap::new(s.into()))
    }

    /// Integers are stored in their decimal text form.
    #[inline]
    pub fn int(n: i64) -> Self {
        Thing::Str(Heap::new(n.to_string()))
    }

    /// `1` or `0`.
    #[inline]
    pub fn boolean(b: bool) -> Self {
        Thing::int(i64::from(b))
    }

    #[inline]
    pub fn list(items: Vec<Thing>) -> Self {
        Thing::List(Heap::new(items))
    }

    #[inline]
    pub fn map(entries: FxHashMap<String, Thing>) -> Self {
        Thing::Map(Heap::new(entries))
    }

    #[inline]
    pub fn code(block: CodeBlock) -> Self {
        Thing::Code(Heap::new(block))
    }

    #[inline]
    pub fn group(parts: Vec<Thing>) -> Self {
        Thing::Group(Heap::new(parts))
    }

    #[inline]
    pub fn var_ref(name: impl Into<String>) -> Self {
        Thing::Subst(Heap::new(Subst::Var(name.into())))
    }

    #[inline]
    pub fn command(block: CodeBlock) -> Self {
        Thing::Subst(Heap::new(Subst::Command(block)))
    }
}

impl Default for Thing {
    fn default() -> Self {
        Thing::empty()
    }
}

impl From<&str> for Thing {
    fn from(s: &str) -> Self {
        Thing::string(s)
    }
}

impl From<String> for Thing {
    fn from(s: String) -> Self {
        Thing::string(s)
    }
}

// Queries and conversions

impl Thing {
    /// Name of the current representation, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Thing::Str(_) => "string",
            Thing::List(_) => "list",
            Thing::Map(_) => "hash",
            Thing::Code(_) => "code",
            Thing::Group(_) => "group",
            Thing::Subst(_) => "substitution",
        }
    }

    /// Whether this value still has to be resolved by the evaluator.
    #[inline]
    pub fn is_marker(&self) -> bool {
        matches!(self, Thing::Group(_) | Thing::Subst(_))
    }

    /// Textual form, borrowed when the value already is a string.
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Thing::Str(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Read the value as a list.
    ///
    /// Lists are returned as-is (shared), maps flatten to key/value pairs in
    /// key order, everything else is parsed from its text.
    pub fn as_list(&self) -> Result<Heap<Vec<Thing>>, ConvError> {
        match self {
            Thing::List(items) => Ok(items.clone()),
            Thing::Map(entries) => {
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();
                let mut flat = Vec::with_capacity(entries.len() * 2);
                for key in keys {
                    flat.push(Thing::string(key.as_str()));
                    flat.push(entries[key].clone());
                }
                Ok(Heap::new(flat))
            }
            other => list::parse_list(&other.as_str()).map(Heap::new),
        }
    }

    /// Read the value as a hash table built from alternating keys and values.
    pub fn as_map(&self) -> Result<Heap<FxHashMap<String, Thing>>, ConvError> {
        if let Thing::Map(entries) = self {
            return Ok(entries.clone());
        }
        let items = self.as_list()?;
        if items.len() % 2 != 0 {
            return Err(ConvError::OddMapList(items.len()));
        }
        let mut entries = FxHashMap::default();
        for pair in items.chunks_exact(2) {
            entries.insert(pair[0].as_str().into_owned(), pair[1].clone());
        }
        Ok(Heap::new(entries))
    }

    /// Parse the textual form as a decimal integer.
    pub fn as_int(&self) -> Option<i64> {
        self.as_str().trim().parse().ok()
    }

    /// Truth value used by conditionals: a non-zero integer or `true`.
    pub fn is_true(&self) -> bool {
        let text = self.as_str();
        let text = text.trim();
        match text.parse::<i64>() {
            Ok(n) => n != 0,
            Err(_) => text.eq_ignore_ascii_case("true"),
        }
    }

    /// Convert to a list in place and return unique mutable access to it.
    pub fn list_mut(&mut self) -> Result<&mut Vec<Thing>, ConvError> {
        if !matches!(self, Thing::List(_)) {
            *self = Thing::List(self.as_list()?);
        }
        let Thing::List(items) = self else {
            unreachable!("value was converted to a list above")
        };
        Ok(items.make_mut())
    }

    /// Convert to a hash table in place and return unique mutable access to it.
    pub fn map_mut(&mut self) -> Result<&mut FxHashMap<String, Thing>, ConvError> {
        if !matches!(self, Thing::Map(_)) {
            *self = Thing::Map(self.as_map()?);
        }
        let Thing::Map(entries) = self else {
            unreachable!("value was converted to a hash above")
        };
        Ok(entries.make_mut())
    }

    /// A private copy of every container level.
    ///
    /// Plain clones already isolate writers through copy-on-write; this
    /// additionally guarantees the result shares no allocation with `self`.
    #[must_use]
    pub fn deep_copy(&self) -> Thing {
        match self {
            Thing::Str(s) => Thing::string(s.as_str()),
            Thing::List(items) => Thing::list(items.iter().map(Thing::deep_copy).collect()),
            Thing::Map(entries) => Thing::map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.deep_copy()))
                    .collect(),
            ),
            Thing::Code(block) => Thing::code((**block).clone()),
            Thing::Group(parts) => Thing::group(parts.iter().map(Thing::deep_copy).collect()),
            Thing::Subst(subst) => Thing::Subst(Heap::new((**subst).clone())),
        }
    }
}

impl fmt::Display for Thing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thing::Str(s) => f.write_str(s),
            Thing::List(items) => {
                let mut out = String::new();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    quote_element(&item.as_str(), &mut out);
                }
                f.write_str(&out)
            }
            Thing::Map(_) => match self.as_list() {
                Ok(flat) => fmt::Display::fmt(&Thing::List(flat), f),
                Err(_) => Ok(()),
            },
            Thing::Code(block) => f.write_str(block.source()),
            Thing::Group(parts) => parts.iter().try_for_each(|part| write!(f, "{part}")),
            Thing::Subst(subst) => match &**subst {
                Subst::Var(name) if is_bare_var_name(name) => write!(f, "${name}"),
                Subst::Var(name) => write!(f, "${{{name}}}"),
                Subst::Command(block) => write!(f, "[{}]", block.source()),
            },
        }
    }
}

impl fmt::Debug for Thing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Thing::Str(s) => write!(f, "Str({:?})", &**s),
            Thing::List(items) => f.debug_tuple("List").field(&**items).finish(),
            Thing::Map(entries) => f.debug_tuple("Map").field(&**entries).finish(),
            Thing::Code(block) => write!(f, "Code({:?})", block.source()),
            Thing::Group(parts) => f.debug_tuple("Group").field(&**parts).finish(),
            Thing::Subst(subst) => f.debug_tuple("Subst").field(&**subst).finish(),
        }
    }
}

#[cfg(test)]
mod tests;
