//! Fixed-length value sequences backing `[a, b, c]` literals.

use std::cell::RefCell;

use crate::value::Value;

/// An element list. Length is fixed at construction; slots are mutable
/// through shared references, which is how `xs[i] = v` reaches a list
/// that several values alias.
pub struct Elements {
    items: RefCell<Vec<Value>>,
}

impl Elements {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: RefCell::new(items),
        }
    }

    /// Read slot `index`, `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.items.borrow().get(index).copied()
    }

    /// Write slot `index`; reports whether the index was in range.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.items.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}
