//! Classes and their instances.
//!
//! A class records its body and the frame it was declared in. `New`
//! evaluates the body chain (root base first) into a single fresh frame;
//! the object is nothing more than that frame. Members therefore share
//! one flat namespace, and a derived class body overrides a base member
//! by assigning over it.

use std::rc::Rc;

use skiff_ir::{Name, NodeId, SyntaxTree};

use crate::env::EnvRef;
use crate::value::{ClassId, Value};

/// A declared class.
pub struct Class {
    pub name: Name,
    /// Base class, resolved at declaration time.
    pub base: Option<ClassId>,
    /// Frame the declaration ran in; instance frames are children of it.
    pub env: EnvRef,
    /// Class body node, resolved against `tree`.
    pub body: NodeId,
    pub tree: Rc<SyntaxTree>,
}

/// An instance: one member frame shared by every reference to it.
pub struct Object {
    env: EnvRef,
}

impl Object {
    pub(crate) fn new(env: EnvRef) -> Self {
        Self { env }
    }

    /// The member frame. Method calls capture this via `this`.
    pub(crate) fn env(&self) -> &EnvRef {
        &self.env
    }

    /// Read a member. Only names the instance frame itself owns count;
    /// bindings visible through the outer chain are not members.
    pub fn member(&self, name: Name) -> Option<Value> {
        if self.env.owns(name) {
            self.env.lookup(name)
        } else {
            None
        }
    }

    /// Overwrite an existing member. Fails when the instance frame does
    /// not own `name`; member writes never create bindings.
    pub fn set_member(&self, name: Name, value: Value) -> bool {
        if self.env.owns(name) {
            self.env.define(name, value);
            true
        } else {
            false
        }
    }
}
