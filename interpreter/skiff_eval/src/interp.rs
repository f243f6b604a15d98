//! The interpreter context: interner, arena tables, root scope, output.

use std::cell::RefCell;
use std::rc::Rc;

use skiff_ir::{Name, SharedInterner, StringInterner, SyntaxTree};
use tracing::debug;

use crate::class::{Class, Object};
use crate::elements::Elements;
use crate::env::EnvRef;
use crate::eval::Evaluator;
use crate::function::{Function, NativeFn};
use crate::print::{stdout_handler, SharedPrintHandler};
use crate::table::Table;
use crate::value::{ClassId, ElemsId, FuncId, ObjId, Value};

/// Pre-interned names for instantiation and self-reference dispatch.
///
/// Interned once at construction so the evaluator recognizes `.New` and
/// binds `this` by comparing `Name` values instead of strings.
#[derive(Clone, Copy)]
pub(crate) struct DispatchNames {
    pub(crate) this: Name,
    pub(crate) new: Name,
}

impl DispatchNames {
    fn new(interner: &StringInterner) -> Self {
        Self {
            this: interner.intern("this"),
            new: interner.intern("New"),
        }
    }
}

/// One isolated script runtime.
///
/// Owns the arena tables and the root scope; several trees may be
/// evaluated against the same interpreter, and bindings made by one
/// survive into the next. The interner is shared with the lexer and
/// parser that produced the trees, so `Name`s agree across phases.
///
/// Values holding table indices are only meaningful against the
/// interpreter that produced them.
pub struct Interpreter {
    pub(crate) interner: SharedInterner,
    pub(crate) funcs: RefCell<Table<Function>>,
    pub(crate) classes: RefCell<Table<Class>>,
    pub(crate) objects: RefCell<Table<Object>>,
    pub(crate) elements: RefCell<Table<Elements>>,
    /// Global scope; natives and top-level bindings live here.
    pub(crate) root: EnvRef,
    pub(crate) print: SharedPrintHandler,
    pub(crate) names: DispatchNames,
}

impl Interpreter {
    /// Create an interpreter printing to stdout.
    pub fn new(interner: SharedInterner) -> Self {
        Self::with_print_handler(interner, stdout_handler())
    }

    /// Create an interpreter with a specific print destination.
    pub fn with_print_handler(interner: SharedInterner, print: SharedPrintHandler) -> Self {
        let names = DispatchNames::new(&interner);
        let interp = Self {
            interner,
            funcs: RefCell::new(Table::new()),
            classes: RefCell::new(Table::new()),
            objects: RefCell::new(Table::new()),
            elements: RefCell::new(Table::new()),
            root: EnvRef::root(),
            print,
            names,
        };
        interp.register_native("print", native_print);
        interp
    }

    /// Evaluate a program tree, returning the last top-level result.
    ///
    /// Runs against the root scope: top-level bindings persist and are
    /// visible to trees evaluated later.
    pub fn eval(&self, tree: &Rc<SyntaxTree>) -> Value {
        debug!(nodes = tree.len(), "eval program");
        Evaluator::new(self, tree).eval(tree.root(), &self.root)
    }

    /// Register a host function under `name` in the root scope.
    ///
    /// The callback exchanges arguments and its optional result over the
    /// root scope's operand stack; see [`NativeFn`] for the protocol.
    pub fn register_native(&self, name: &str, callback: NativeFn) {
        let name = self.interner.intern(name);
        let id = self.add_function(Function::Native {
            name,
            env: self.root.clone(),
            callback,
        });
        self.root.define(name, Value::Function(id));
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// The global scope frame.
    #[inline]
    pub fn root_env(&self) -> &EnvRef {
        &self.root
    }

    /// The configured print destination.
    #[inline]
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    pub(crate) fn add_function(&self, function: Function) -> FuncId {
        FuncId::new(self.funcs.borrow_mut().insert(Rc::new(function)))
    }

    pub(crate) fn function(&self, id: FuncId) -> Option<Rc<Function>> {
        self.funcs.borrow().get(id.raw())
    }

    pub(crate) fn add_class(&self, class: Class) -> ClassId {
        ClassId::new(self.classes.borrow_mut().insert(Rc::new(class)))
    }

    pub(crate) fn class(&self, id: ClassId) -> Option<Rc<Class>> {
        self.classes.borrow().get(id.raw())
    }

    pub(crate) fn add_object(&self, object: Object) -> ObjId {
        ObjId::new(self.objects.borrow_mut().insert(Rc::new(object)))
    }

    pub(crate) fn object(&self, id: ObjId) -> Option<Rc<Object>> {
        self.objects.borrow().get(id.raw())
    }

    pub(crate) fn add_elements(&self, elements: Elements) -> ElemsId {
        ElemsId::new(self.elements.borrow_mut().insert(Rc::new(elements)))
    }

    pub(crate) fn elements(&self, id: ElemsId) -> Option<Rc<Elements>> {
        self.elements.borrow().get(id.raw())
    }
}

/// The built-in `print`: renders each argument, joins them with single
/// spaces, and writes one line to the configured handler. Pushes no
/// result, so a `print(..)` call evaluates to `Nil`.
fn native_print(interp: &Interpreter, env: &EnvRef) -> bool {
    let argc = env.pop().map_or(0, |count| count.numeric() as usize);
    let mut args = Vec::with_capacity(argc);
    for _ in 0..argc {
        args.push(env.pop().unwrap_or(Value::Nil));
    }
    args.reverse();
    let line = args
        .iter()
        .map(|value| value.render(interp.interner()))
        .collect::<Vec<_>>()
        .join(" ");
    interp.print.println(&line);
    false
}
