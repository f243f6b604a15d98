//! Append-only arenas for runtime entities.
//!
//! Functions, classes, objects and element lists all live in per-kind
//! tables owned by the interpreter. Values refer to them by dense `u32`
//! index, which keeps [`crate::Value`] `Copy` and makes reference
//! equality an integer compare. Entries are never removed, so an index
//! stays valid for the life of the interpreter.

use std::rc::Rc;

use rustc_hash::FxHashMap;

/// One arena. Inserting the same `Rc` twice yields the same index;
/// allocation identity, not structural equality, is what dedups.
pub struct Table<T> {
    entries: Vec<Rc<T>>,
    index: FxHashMap<*const T, u32>,
}

impl<T> Table<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Add an entry, returning its index. Re-inserting an `Rc` that
    /// already lives here returns the existing index.
    pub fn insert(&mut self, entry: Rc<T>) -> u32 {
        let key = Rc::as_ptr(&entry);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.entries.len() as u32;
        self.entries.push(entry);
        self.index.insert(key, id);
        id
    }

    /// Fetch by index. Out-of-range indices yield `None`; they can only
    /// come from a foreign interpreter's values.
    pub fn get(&self, id: u32) -> Option<Rc<T>> {
        self.entries.get(id as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
