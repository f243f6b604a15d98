//! Callable entries in the function table.

use std::rc::Rc;

use skiff_ir::{Name, NodeId, SyntaxTree};

use crate::env::EnvRef;
use crate::interp::Interpreter;

/// Callback signature for native functions.
///
/// Arguments arrive on the operand stack of `env` (the function's home
/// frame): the caller pushes each argument left to right, then the
/// argument count as a `Number`. The callback pops the count, then the
/// arguments (topmost is the last argument), and may push at most one
/// result. The return value says whether it did; when `false` the call
/// yields `Nil`.
pub type NativeFn = fn(&Interpreter, &EnvRef) -> bool;

/// A callable value.
///
/// Interpreted functions keep a handle to the tree their body lives in,
/// so a call can evaluate the body even when the caller is running a
/// different program against the same interpreter.
pub enum Function {
    /// Declared in source with `fn`.
    Interpreted {
        /// `None` for anonymous function expressions.
        name: Option<Name>,
        /// The frame the function was declared in; calls extend it.
        env: EnvRef,
        params: Vec<Name>,
        /// Body block node, resolved against `tree`.
        body: NodeId,
        tree: Rc<SyntaxTree>,
    },
    /// Registered from the host.
    Native {
        name: Name,
        /// Home frame whose operand stack carries the arguments.
        env: EnvRef,
        callback: NativeFn,
    },
}

impl Function {
    /// Source-level name, if the function has one.
    pub fn name(&self) -> Option<Name> {
        match self {
            Self::Interpreted { name, .. } => *name,
            Self::Native { name, .. } => Some(*name),
        }
    }
}
