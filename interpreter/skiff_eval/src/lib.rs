//! Tree-walking evaluator for the Skiff scripting language.
//!
//! An [`Interpreter`] owns everything one script run needs: the string
//! interner shared with the analysis phases, the function/class/object/
//! elements arena tables, the root [`EnvRef`] scope, and the print handler.
//! Instances are fully isolated; nothing is process-global.
//!
//! Runtime failures are not host errors: they travel as the sentinel
//! [`Value::Error`], and every statement list (program, block, class body)
//! halts at the first Error it sees. Lexical and syntactic failures never
//! reach this crate — the parser refuses to hand over a broken tree.
//!
//! Hosts extend the language through [`Interpreter::register_native`]; a
//! native exchanges arguments and its optional result over the operand
//! stack of its defining environment (see [`NativeFn`]).

mod class;
mod elements;
mod env;
mod eval;
mod function;
mod interp;
mod print;
mod table;
mod value;

pub use class::{Class, Object};
pub use elements::Elements;
pub use env::EnvRef;
pub use function::{Function, NativeFn};
pub use interp::Interpreter;
pub use print::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use table::Table;
pub use value::{ClassId, ElemsId, FuncId, ObjId, Value};
