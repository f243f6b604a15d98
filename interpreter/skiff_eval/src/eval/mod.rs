//! Node evaluation.
//!
//! One match arm per node kind; each composite form gets a small helper.
//! The evaluator borrows the interpreter context plus the tree it is
//! walking. Calls into a function declared under a different tree recurse
//! through a fresh `Evaluator` borrowing the callee's tree, so node ids
//! are always resolved against the arena that produced them.
//!
//! Runtime failures produce [`Value::Error`] and emit a `tracing` event at
//! the failure site; nothing in here returns a host-level `Result`.

use std::rc::Rc;

use skiff_ir::{BinaryOp, Name, NodeId, NodeKind, NodeRange, SyntaxTree, UnaryOp};
use tracing::error;

use crate::class::{Class, Object};
use crate::elements::Elements;
use crate::env::EnvRef;
use crate::function::Function;
use crate::interp::Interpreter;
use crate::value::{ClassId, Value};

#[cfg(test)]
mod tests;

/// Walks one syntax tree against an interpreter context.
pub(crate) struct Evaluator<'a> {
    interp: &'a Interpreter,
    tree: &'a Rc<SyntaxTree>,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(interp: &'a Interpreter, tree: &'a Rc<SyntaxTree>) -> Self {
        Self { interp, tree }
    }

    /// Evaluate one node in `env`.
    #[tracing::instrument(level = "trace", skip(self, env))]
    pub(crate) fn eval(&self, node: NodeId, env: &EnvRef) -> Value {
        match *self.tree.kind(node) {
            NodeKind::Nil => Value::Nil,
            NodeKind::Bool(value) => Value::Bool(value),
            NodeKind::Number(value) => Value::Number(value),
            NodeKind::Str(text) => Value::Str(text),
            NodeKind::Ident(name) => self.eval_ident(node, name, env),
            NodeKind::Unary { op, operand } => self.eval_unary(op, operand, env),
            NodeKind::Binary { op, lhs, rhs } => self.eval_binary(op, lhs, rhs, env),
            NodeKind::Assign { target, value } => self.eval_assign(target, value, env),
            NodeKind::Member { object, field } => self.eval_member(node, object, field, env),
            NodeKind::Call { callee, args } => self.eval_call(node, callee, args, env),
            NodeKind::Index { object, index } => self.eval_index(node, object, index, env),
            NodeKind::Elements { items } => self.eval_elements(items, env),
            NodeKind::Function { name, params, body } => {
                self.eval_function(name, params, body, env)
            }
            NodeKind::If {
                cond,
                then_block,
                else_branch,
            } => self.eval_if(cond, then_block, else_branch, env),
            NodeKind::While { cond, body } => self.eval_while(cond, body, env),
            NodeKind::Return { value } => match value {
                Some(expr) => self.eval(expr, env),
                None => Value::Nil,
            },
            NodeKind::Block { body } => self.eval_block(body, env),
            NodeKind::Class { name, base, body } => {
                self.eval_class_decl(node, name, base, body, env)
            }
            NodeKind::ClassBody { members } | NodeKind::Program { body: members } => {
                self.eval_sequence(members, env)
            }
        }
    }

    fn eval_ident(&self, node: NodeId, name: Name, env: &EnvRef) -> Value {
        match env.lookup(name) {
            Some(value) => value,
            None => {
                error!(
                    line = self.tree.line(node),
                    ident = self.interp.interner().lookup(name),
                    "unknown identifier"
                );
                Value::Error
            }
        }
    }

    /// Run a statement list, stopping at the first Error result.
    fn eval_sequence(&self, body: NodeRange, env: &EnvRef) -> Value {
        let mut result = Value::Nil;
        for &child in self.tree.list(body) {
            result = self.eval(child, env);
            if result.is_error() {
                return result;
            }
        }
        result
    }

    /// Run a block: a statement list where a `return` child additionally
    /// ends the block at once with its value. The early exit is local —
    /// enclosing ifs, loops, and calls see an ordinary value.
    fn eval_block(&self, body: NodeRange, env: &EnvRef) -> Value {
        let mut result = Value::Nil;
        for &child in self.tree.list(body) {
            result = self.eval(child, env);
            if result.is_error() {
                return result;
            }
            if matches!(self.tree.kind(child), NodeKind::Return { .. }) {
                return result;
            }
        }
        result
    }

    fn eval_unary(&self, op: UnaryOp, operand: NodeId, env: &EnvRef) -> Value {
        let value = self.eval(operand, env);
        if value.is_error() {
            return value;
        }
        match op {
            UnaryOp::Neg => Value::Number(-value.numeric()),
        }
    }

    fn eval_binary(&self, op: BinaryOp, lhs: NodeId, rhs: NodeId, env: &EnvRef) -> Value {
        let left = self.eval(lhs, env);
        let right = self.eval(rhs, env);
        match op {
            // Equality consumes Errors: an Error operand compares unequal
            // to everything, including another Error.
            BinaryOp::Eq => Value::Bool(left == right),
            BinaryOp::NotEq => Value::Bool(left != right),
            _ if left.is_error() => left,
            _ if right.is_error() => right,
            BinaryOp::Add => self.eval_add(left, right),
            BinaryOp::Sub => Value::Number(left.numeric() - right.numeric()),
            BinaryOp::Mul => Value::Number(left.numeric() * right.numeric()),
            BinaryOp::Div => Value::Number(left.numeric() / right.numeric()),
            BinaryOp::Mod => Value::Number(left.numeric() % right.numeric()),
            BinaryOp::Lt => Value::Bool(left.numeric() < right.numeric()),
            BinaryOp::LtEq => Value::Bool(left.numeric() <= right.numeric()),
            BinaryOp::Gt => Value::Bool(left.numeric() > right.numeric()),
            BinaryOp::GtEq => Value::Bool(left.numeric() >= right.numeric()),
            // The remaining lexable operators are not part of the language
            // yet; they evaluate to false.
            _ => Value::Bool(false),
        }
    }

    /// `+` concatenates when either side is a String; otherwise it adds
    /// the numeric readings.
    fn eval_add(&self, left: Value, right: Value) -> Value {
        if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
            let interner = self.interp.interner();
            let text = format!("{}{}", left.render(interner), right.render(interner));
            Value::Str(interner.intern_owned(text))
        } else {
            Value::Number(left.numeric() + right.numeric())
        }
    }

    fn eval_assign(&self, target: NodeId, value: NodeId, env: &EnvRef) -> Value {
        match *self.tree.kind(target) {
            NodeKind::Ident(name) => {
                let value = self.eval(value, env);
                if value.is_error() {
                    return value;
                }
                env.set(name, value);
                value
            }
            NodeKind::Member { object, field } => {
                self.assign_member(target, object, field, value, env)
            }
            NodeKind::Index { object, index } => {
                self.assign_index(target, object, index, value, env)
            }
            _ => {
                error!(line = self.tree.line(target), "invalid assignment target");
                Value::Error
            }
        }
    }

    /// `obj.field = value`. Member writes only overwrite: the member must
    /// already exist in the object's own frame.
    fn assign_member(
        &self,
        node: NodeId,
        object: NodeId,
        field: Name,
        value: NodeId,
        env: &EnvRef,
    ) -> Value {
        let receiver = self.eval(object, env);
        if receiver.is_error() {
            return receiver;
        }
        let Value::Object(id) = receiver else {
            error!(
                line = self.tree.line(node),
                member = self.interp.interner().lookup(field),
                receiver = receiver.type_name(),
                "member assignment on a non-object"
            );
            return Value::Error;
        };
        let value = self.eval(value, env);
        if value.is_error() {
            return value;
        }
        let Some(obj) = self.interp.object(id) else {
            error!(line = self.tree.line(node), "object index out of table range");
            return Value::Error;
        };
        if obj.set_member(field, value) {
            value
        } else {
            error!(
                line = self.tree.line(node),
                member = self.interp.interner().lookup(field),
                "unknown member"
            );
            Value::Error
        }
    }

    /// `xs[i] = value`, bounds-checked.
    fn assign_index(
        &self,
        node: NodeId,
        object: NodeId,
        index: NodeId,
        value: NodeId,
        env: &EnvRef,
    ) -> Value {
        let receiver = self.eval(object, env);
        if receiver.is_error() {
            return receiver;
        }
        let Value::Elements(id) = receiver else {
            error!(
                line = self.tree.line(node),
                receiver = receiver.type_name(),
                "index assignment on a non-elements value"
            );
            return Value::Error;
        };
        let position = self.eval(index, env);
        if position.is_error() {
            return position;
        }
        let value = self.eval(value, env);
        if value.is_error() {
            return value;
        }
        let Some(elems) = self.interp.elements(id) else {
            error!(line = self.tree.line(node), "elements index out of table range");
            return Value::Error;
        };
        let Some(slot) = Self::element_position(position) else {
            error!(line = self.tree.line(node), "negative element index");
            return Value::Error;
        };
        if elems.set(slot, value) {
            value
        } else {
            error!(
                line = self.tree.line(node),
                index = slot,
                len = elems.len(),
                "element index out of range"
            );
            Value::Error
        }
    }

    fn eval_member(&self, node: NodeId, object: NodeId, field: Name, env: &EnvRef) -> Value {
        let receiver = self.eval(object, env);
        if receiver.is_error() {
            return receiver;
        }
        self.member_of(node, receiver, field)
    }

    /// Member read on an already-evaluated receiver. Only names owned by
    /// the object's own frame are members; a method read yields a Function
    /// closed over that frame.
    fn member_of(&self, node: NodeId, receiver: Value, field: Name) -> Value {
        let Value::Object(id) = receiver else {
            error!(
                line = self.tree.line(node),
                member = self.interp.interner().lookup(field),
                receiver = receiver.type_name(),
                "member access on a non-object"
            );
            return Value::Error;
        };
        let Some(obj) = self.interp.object(id) else {
            error!(line = self.tree.line(node), "object index out of table range");
            return Value::Error;
        };
        match obj.member(field) {
            Some(value) => value,
            None => {
                error!(
                    line = self.tree.line(node),
                    member = self.interp.interner().lookup(field),
                    "unknown member"
                );
                Value::Error
            }
        }
    }

    /// Evaluate a call. A callee of the form `expr.New` where `expr` is a
    /// Class instantiates; everything else resolves through the function
    /// table.
    #[tracing::instrument(level = "debug", skip_all)]
    fn eval_call(&self, node: NodeId, callee: NodeId, args: NodeRange, env: &EnvRef) -> Value {
        if let NodeKind::Member { object, field } = *self.tree.kind(callee) {
            if field == self.interp.names.new {
                let receiver = self.eval(object, env);
                if receiver.is_error() {
                    return receiver;
                }
                if let Value::Class(class_id) = receiver {
                    return self.instantiate(node, class_id, args, env);
                }
                // Not a class: `New` is an ordinary member on this receiver.
                let callee_value = self.member_of(callee, receiver, field);
                return self.call_value(node, callee_value, args, env);
            }
        }
        let callee_value = self.eval(callee, env);
        self.call_value(node, callee_value, args, env)
    }

    /// Call an already-evaluated callee.
    fn call_value(&self, node: NodeId, callee: Value, args: NodeRange, env: &EnvRef) -> Value {
        if callee.is_error() {
            return callee;
        }
        let Value::Function(id) = callee else {
            error!(
                line = self.tree.line(node),
                callee = callee.type_name(),
                "call target is not a function"
            );
            return Value::Error;
        };
        let Some(function) = self.interp.function(id) else {
            error!(line = self.tree.line(node), "function index out of table range");
            return Value::Error;
        };

        // Arguments evaluate left to right before anything binds.
        let mut values = Vec::with_capacity(args.len());
        for &arg in self.tree.list(args) {
            let value = self.eval(arg, env);
            if value.is_error() {
                return value;
            }
            values.push(value);
        }

        match &*function {
            Function::Interpreted {
                env: captured,
                params,
                body,
                tree,
                ..
            } => {
                // Positional binding: missing arguments become Nil, excess
                // arguments were evaluated above and are dropped here.
                let frame = captured.child();
                for (slot, &param) in params.iter().enumerate() {
                    frame.define(param, values.get(slot).copied().unwrap_or(Value::Nil));
                }
                Evaluator::new(self.interp, tree).eval(*body, &frame)
            }
            Function::Native {
                env: home,
                callback,
                ..
            } => {
                for &value in &values {
                    home.push(value);
                }
                home.push(Value::Number(values.len() as f64));
                if callback(self.interp, home) {
                    home.pop().unwrap_or(Value::Nil)
                } else {
                    Value::Nil
                }
            }
        }
    }

    /// `Class.New(..)`: allocate the instance frame as a child of the
    /// class's defining environment, bind `this`, then run the class
    /// bodies root base first so derived members overwrite inherited ones
    /// in the same flat frame.
    fn instantiate(&self, node: NodeId, class_id: ClassId, args: NodeRange, env: &EnvRef) -> Value {
        // Constructor arguments evaluate for their effects; nothing binds
        // them.
        for &arg in self.tree.list(args) {
            let value = self.eval(arg, env);
            if value.is_error() {
                return value;
            }
        }

        let Some(class) = self.interp.class(class_id) else {
            error!(line = self.tree.line(node), "class index out of table range");
            return Value::Error;
        };
        let Some(chain) = self.class_chain(node, class_id) else {
            return Value::Error;
        };

        let frame = class.env.child();
        let object = Value::Object(self.interp.add_object(Object::new(frame.clone())));
        frame.define(self.interp.names.this, object);

        for ancestor in &chain {
            let result = Evaluator::new(self.interp, &ancestor.tree).eval(ancestor.body, &frame);
            if result.is_error() {
                return result;
            }
        }
        object
    }

    /// Ancestors of `class_id` including itself, root base first. Chains
    /// are finite: a base must already be bound when its subclass is
    /// declared, so no class can reach itself.
    fn class_chain(&self, node: NodeId, class_id: ClassId) -> Option<Vec<Rc<Class>>> {
        let mut chain = Vec::new();
        let mut next = Some(class_id);
        while let Some(id) = next {
            let Some(class) = self.interp.class(id) else {
                error!(line = self.tree.line(node), "class index out of table range");
                return None;
            };
            next = class.base;
            chain.push(class);
        }
        chain.reverse();
        Some(chain)
    }

    fn eval_index(&self, node: NodeId, object: NodeId, index: NodeId, env: &EnvRef) -> Value {
        let receiver = self.eval(object, env);
        if receiver.is_error() {
            return receiver;
        }
        let Value::Elements(id) = receiver else {
            error!(
                line = self.tree.line(node),
                receiver = receiver.type_name(),
                "index access on a non-elements value"
            );
            return Value::Error;
        };
        let position = self.eval(index, env);
        if position.is_error() {
            return position;
        }
        let Some(elems) = self.interp.elements(id) else {
            error!(line = self.tree.line(node), "elements index out of table range");
            return Value::Error;
        };
        let Some(slot) = Self::element_position(position) else {
            error!(line = self.tree.line(node), "negative element index");
            return Value::Error;
        };
        match elems.get(slot) {
            Some(value) => value,
            None => {
                error!(
                    line = self.tree.line(node),
                    index = slot,
                    len = elems.len(),
                    "element index out of range"
                );
                Value::Error
            }
        }
    }

    fn eval_elements(&self, items: NodeRange, env: &EnvRef) -> Value {
        let mut values = Vec::with_capacity(items.len());
        for &item in self.tree.list(items) {
            let value = self.eval(item, env);
            if value.is_error() {
                return value;
            }
            values.push(value);
        }
        Value::Elements(self.interp.add_elements(Elements::new(values)))
    }

    /// `fn` creates the Function value; a named one also binds directly in
    /// the current frame (shadowing, never an outer-chain walk), which is
    /// how class bodies turn functions into members.
    fn eval_function(
        &self,
        name: Option<Name>,
        params: NodeRange,
        body: NodeId,
        env: &EnvRef,
    ) -> Value {
        let params = self.param_names(params);
        let value = Value::Function(self.interp.add_function(Function::Interpreted {
            name,
            env: env.clone(),
            params,
            body,
            tree: Rc::clone(self.tree),
        }));
        if let Some(name) = name {
            env.define(name, value);
        }
        value
    }

    /// Parameter names from a parser-built range of `Ident` nodes.
    fn param_names(&self, params: NodeRange) -> Vec<Name> {
        self.tree
            .list(params)
            .iter()
            .filter_map(|&param| match *self.tree.kind(param) {
                NodeKind::Ident(name) => Some(name),
                // The parser only emits Ident nodes into a param range.
                _ => None,
            })
            .collect()
    }

    fn eval_if(
        &self,
        cond: NodeId,
        then_block: NodeId,
        else_branch: Option<NodeId>,
        env: &EnvRef,
    ) -> Value {
        if self.eval(cond, env).is_truthy() {
            self.eval(then_block, env)
        } else {
            match else_branch {
                Some(branch) => self.eval(branch, env),
                None => Value::Nil,
            }
        }
    }

    /// The loop exits only through its condition (an Error condition is
    /// falsy). The result is the last body evaluation, Nil when the body
    /// never ran.
    fn eval_while(&self, cond: NodeId, body: NodeId, env: &EnvRef) -> Value {
        let mut result = Value::Nil;
        while self.eval(cond, env).is_truthy() {
            result = self.eval(body, env);
        }
        result
    }

    /// `class` resolves its optional base to an existing Class, records
    /// the declaration, and binds the class name in the current frame.
    fn eval_class_decl(
        &self,
        node: NodeId,
        name: Name,
        base: Option<Name>,
        body: NodeId,
        env: &EnvRef,
    ) -> Value {
        let base = match base {
            Some(base_name) => match env.lookup(base_name) {
                Some(Value::Class(id)) => Some(id),
                Some(other) => {
                    error!(
                        line = self.tree.line(node),
                        base = self.interp.interner().lookup(base_name),
                        found = other.type_name(),
                        "base is not a class"
                    );
                    return Value::Error;
                }
                None => {
                    error!(
                        line = self.tree.line(node),
                        base = self.interp.interner().lookup(base_name),
                        "unknown base class"
                    );
                    return Value::Error;
                }
            },
            None => None,
        };
        let value = Value::Class(self.interp.add_class(Class {
            name,
            base,
            env: env.clone(),
            body,
            tree: Rc::clone(self.tree),
        }));
        env.define(name, value);
        value
    }

    /// Numeric reading of an index expression, truncated; negatives are
    /// rejected.
    fn element_position(value: Value) -> Option<usize> {
        usize::try_from(value.numeric() as i64).ok()
    }
}
