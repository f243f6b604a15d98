//! String interning.
//!
//! The interner doubles as the language's string table: literals,
//! identifiers, and runtime-built strings all intern through it and are
//! addressed by [`Name`] everywhere else. It is append-only for the
//! lifetime of the interpreter, so interned text is leaked into `'static`
//! storage and handed out as plain references.

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Stable index of an interned string.
///
/// Two `Name`s are equal exactly when the strings they were interned from
/// are equal. The wrapped index is 0-based and assigned in insertion order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Name(u32);

impl Name {
    /// Position of this name in its interner's table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Default)]
struct Inner {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Value-deduplicating, append-only string table.
///
/// Interning the same text twice returns the same [`Name`]. Lookup of a
/// `Name` produced by this interner always succeeds; passing a `Name`
/// from a different interner is a logic error.
#[derive(Default)]
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `text`, returning its stable name.
    pub fn intern(&self, text: &str) -> Name {
        if let Some(&idx) = self.inner.read().map.get(text) {
            return Name(idx);
        }
        let mut inner = self.inner.write();
        // Re-check: another caller may have interned between the locks.
        if let Some(&idx) = inner.map.get(text) {
            return Name(idx);
        }
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        Self::insert(&mut inner, leaked)
    }

    /// Intern an owned string without copying when it is new.
    pub fn intern_owned(&self, text: String) -> Name {
        if let Some(&idx) = self.inner.read().map.get(text.as_str()) {
            return Name(idx);
        }
        let mut inner = self.inner.write();
        if let Some(&idx) = inner.map.get(text.as_str()) {
            return Name(idx);
        }
        let leaked: &'static str = Box::leak(text.into_boxed_str());
        Self::insert(&mut inner, leaked)
    }

    fn insert(inner: &mut Inner, leaked: &'static str) -> Name {
        let idx = inner.strings.len() as u32;
        inner.strings.push(leaked);
        inner.map.insert(leaked, idx);
        Name(idx)
    }

    /// Resolve a name back to its text.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.inner.read().strings[name.index()]
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cheaply cloneable handle to a [`StringInterner`].
///
/// Every phase of one interpreter instance shares a single interner
/// through this handle, so a literal lexed on line 1 and an identifier
/// resolved at runtime agree on their [`Name`]s.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
