//! Scope frames.
//!
//! An environment is a chain of frames, each a name→value map with an
//! optional outer frame. Frames are shared by reference: a closure holds
//! the frame it was defined in, an object holds the frame its members live
//! in, and several closures can alias one frame. The `this` self-reference
//! cycle routes through the object table rather than frame-to-frame, so
//! plain `Rc` reference counting suffices.
//!
//! Each frame also carries an operand stack, used only to pass arguments
//! to native functions (see [`crate::NativeFn`]).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use skiff_ir::Name;

use crate::Value;

struct Env {
    bindings: FxHashMap<Name, Value>,
    outer: Option<EnvRef>,
    stack: Vec<Value>,
}

impl Env {
    fn new(outer: Option<EnvRef>) -> Self {
        Self {
            bindings: FxHashMap::default(),
            outer,
            stack: Vec::new(),
        }
    }
}

/// Shared handle to one scope frame.
///
/// Cloning the handle aliases the frame; it never copies bindings.
#[derive(Clone)]
pub struct EnvRef(Rc<RefCell<Env>>);

impl EnvRef {
    /// A fresh frame with no outer scope.
    pub fn root() -> Self {
        Self(Rc::new(RefCell::new(Env::new(None))))
    }

    /// A fresh frame whose lookups fall through to this one.
    #[must_use]
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Env::new(Some(self.clone())))))
    }

    /// Bind `name` in this frame, shadowing any outer binding.
    pub fn define(&self, name: Name, value: Value) {
        self.0.borrow_mut().bindings.insert(name, value);
    }

    /// Assign `name`: write into the nearest frame that already owns it,
    /// or create the binding here when no frame does.
    pub fn set(&self, name: Name, value: Value) {
        match self.owner(name) {
            Some(frame) => frame.define(name, value),
            None => self.define(name, value),
        }
    }

    /// Resolve `name` through the outer chain.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        let mut frame = self.clone();
        loop {
            let next = {
                let env = frame.0.borrow();
                if let Some(value) = env.bindings.get(&name) {
                    return Some(*value);
                }
                env.outer.clone()
            };
            frame = next?;
        }
    }

    /// The nearest frame (this one included) that owns `name` directly.
    pub fn owner(&self, name: Name) -> Option<EnvRef> {
        let mut frame = self.clone();
        loop {
            if frame.0.borrow().bindings.contains_key(&name) {
                return Some(frame);
            }
            let next = frame.0.borrow().outer.clone();
            frame = next?;
        }
    }

    /// Whether `name` is bound in this frame itself, not an outer one.
    pub fn owns(&self, name: Name) -> bool {
        self.0.borrow().bindings.contains_key(&name)
    }

    /// Push a value onto this frame's operand stack.
    pub fn push(&self, value: Value) {
        self.0.borrow_mut().stack.push(value);
    }

    /// Pop the top of this frame's operand stack.
    pub fn pop(&self) -> Option<Value> {
        self.0.borrow_mut().stack.pop()
    }

    /// Depth of the operand stack.
    pub fn stack_len(&self) -> usize {
        self.0.borrow().stack.len()
    }

    /// Frame identity: both handles alias the same frame.
    pub fn same_frame(&self, other: &EnvRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EnvRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env = self.0.borrow();
        f.debug_struct("EnvRef")
            .field("bindings", &env.bindings.len())
            .field("stack", &env.stack.len())
            .field("has_outer", &env.outer.is_some())
            .finish()
    }
}
