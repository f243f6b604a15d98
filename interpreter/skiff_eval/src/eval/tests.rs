use std::rc::Rc;

use pretty_assertions::assert_eq;
use skiff_ir::SharedInterner;

use crate::env::EnvRef;
use crate::interp::Interpreter;
use crate::print::silent_handler;
use crate::value::Value;

fn interp() -> Interpreter {
    Interpreter::with_print_handler(SharedInterner::new(), silent_handler())
}

fn eval_in(interp: &Interpreter, source: &str) -> Value {
    let tree = match skiff_parse::parse_source(source, interp.interner()) {
        Ok(tree) => Rc::new(tree),
        Err(diag) => panic!("parsing {source:?} failed: {diag}"),
    };
    interp.eval(&tree)
}

fn result_of(source: &str) -> Value {
    eval_in(&interp(), source)
}

fn rendered(source: &str) -> String {
    let interp = interp();
    let value = eval_in(&interp, source);
    value.render(interp.interner())
}

// Literals and sequencing

#[test]
fn empty_program_is_nil() {
    assert_eq!(result_of(""), Value::Nil);
}

#[test]
fn literals_evaluate_to_themselves() {
    assert_eq!(result_of("nil;"), Value::Nil);
    assert_eq!(result_of("true;"), Value::Bool(true));
    assert_eq!(result_of("false;"), Value::Bool(false));
    assert_eq!(result_of("42;"), Value::Number(42.0));
    assert_eq!(rendered("\"hi\";"), "hi");
}

#[test]
fn program_yields_its_last_statement() {
    assert_eq!(result_of("1; 2; 3;"), Value::Number(3.0));
}

// Operators

#[test]
fn arithmetic_respects_precedence() {
    assert_eq!(result_of("2 + 3 * 4;"), Value::Number(14.0));
    assert_eq!(result_of("(2 + 3) * 4;"), Value::Number(20.0));
    assert_eq!(result_of("7 / 2;"), Value::Number(3.5));
    assert_eq!(result_of("7 % 3;"), Value::Number(1.0));
}

#[test]
fn unary_minus_negates_the_numeric_reading() {
    assert_eq!(result_of("-(3 + 4);"), Value::Number(-7.0));
    assert_eq!(result_of("-true;"), Value::Number(-1.0));
    assert_eq!(result_of("1 - -2;"), Value::Number(3.0));
}

#[test]
fn comparisons_yield_booleans() {
    assert_eq!(result_of("1 < 2;"), Value::Bool(true));
    assert_eq!(result_of("2 <= 2;"), Value::Bool(true));
    assert_eq!(result_of("3 > 4;"), Value::Bool(false));
    assert_eq!(result_of("3 >= 4;"), Value::Bool(false));
    assert_eq!(result_of("1 == 1;"), Value::Bool(true));
    assert_eq!(result_of("1 ~= 2;"), Value::Bool(true));
}

#[test]
fn numeric_equality_tolerates_epsilon() {
    assert_eq!(result_of("0.1 + 0.2 == 0.3;"), Value::Bool(true));
}

#[test]
fn booleans_compare_through_their_numeric_reading() {
    assert_eq!(result_of("true == 1;"), Value::Bool(false));
    assert_eq!(result_of("true == true;"), Value::Bool(true));
}

#[test]
fn plus_concatenates_when_either_side_is_a_string() {
    assert_eq!(rendered("\"a\" + 1;"), "a1");
    assert_eq!(rendered("1 + \"a\";"), "1a");
    assert_eq!(rendered("\"x\" + true;"), "xtrue");
    assert_eq!(rendered("\"ab\" + \"cd\";"), "abcd");
}

#[test]
fn concatenation_reuses_the_interned_string() {
    let interp = interp();
    let first = eval_in(&interp, "\"a\" + 1;");
    let second = eval_in(&interp, "\"a\" + 1;");
    match (first, second) {
        (Value::Str(a), Value::Str(b)) => assert_eq!(a, b),
        other => panic!("expected two string values, got {other:?}"),
    }
}

#[test]
fn unimplemented_operators_evaluate_to_false() {
    assert_eq!(result_of("1 && 2;"), Value::Bool(false));
    assert_eq!(result_of("0 || 1;"), Value::Bool(false));
    assert_eq!(result_of("1 << 2;"), Value::Bool(false));
    assert_eq!(result_of("6 & 3;"), Value::Bool(false));
}

#[test]
fn compound_assignment_is_not_an_assignment() {
    let interp = interp();
    assert_eq!(eval_in(&interp, "x = 1; x += 1;"), Value::Bool(false));
    assert_eq!(eval_in(&interp, "x;"), Value::Number(1.0));
}

// Identifiers and assignment

#[test]
fn assignment_yields_the_assigned_value_and_binds() {
    let interp = interp();
    assert_eq!(eval_in(&interp, "x = 5;"), Value::Number(5.0));
    assert_eq!(eval_in(&interp, "x;"), Value::Number(5.0));
}

#[test]
fn assignment_writes_into_the_owning_frame() {
    let interp = interp();
    assert_eq!(
        eval_in(&interp, "x = 1; fn bump() { x = x + 1; } bump(); x;"),
        Value::Number(2.0)
    );
}

#[test]
fn assignment_without_an_owner_stays_local_to_the_call() {
    let interp = interp();
    assert_eq!(eval_in(&interp, "fn local() { y = 7; } local();"), Value::Number(7.0));
    assert_eq!(eval_in(&interp, "y;"), Value::Error);
}

#[test]
fn unknown_identifier_is_an_error() {
    assert_eq!(result_of("ghost;"), Value::Error);
}

#[test]
fn literal_assignment_targets_are_errors() {
    assert_eq!(result_of("1 = 2;"), Value::Error);
}

// Error propagation

#[test]
fn arithmetic_propagates_an_error_operand() {
    assert_eq!(result_of("1 + ghost;"), Value::Error);
    assert_eq!(result_of("ghost * 2;"), Value::Error);
    assert_eq!(result_of("-ghost;"), Value::Error);
}

#[test]
fn equality_consumes_errors() {
    assert_eq!(result_of("ghost == 1;"), Value::Bool(false));
    assert_eq!(result_of("ghost ~= 1;"), Value::Bool(true));
    assert_eq!(result_of("ghost == ghost;"), Value::Bool(false));
}

#[test]
fn a_statement_list_halts_at_the_first_error() {
    let interp = interp();
    assert_eq!(eval_in(&interp, "x = 1; ghost; x = 2;"), Value::Error);
    // The statement after the error never ran.
    assert_eq!(eval_in(&interp, "x;"), Value::Number(1.0));
}

#[test]
fn an_erroring_assignment_does_not_write() {
    let interp = interp();
    assert_eq!(eval_in(&interp, "x = 1; x = ghost;"), Value::Error);
    assert_eq!(eval_in(&interp, "x;"), Value::Number(1.0));
}

// Conditionals and loops

#[test]
fn if_takes_the_truthy_branch() {
    assert_eq!(result_of("if (1 < 2) { 10; } else { 20; }"), Value::Number(10.0));
    assert_eq!(result_of("if (1 > 2) { 10; } else { 20; }"), Value::Number(20.0));
}

#[test]
fn if_without_else_yields_nil_on_false() {
    assert_eq!(result_of("if (false) { 10; }"), Value::Nil);
}

#[test]
fn else_if_chains() {
    let source = "x = 2;
        if (x == 1) { 10; } else if (x == 2) { 20; } else { 30; }";
    assert_eq!(result_of(source), Value::Number(20.0));
}

#[test]
fn nil_and_error_conditions_are_falsy() {
    assert_eq!(result_of("if (nil) { 1; } else { 2; }"), Value::Number(2.0));
    assert_eq!(result_of("if (ghost) { 1; } else { 2; }"), Value::Number(2.0));
}

#[test]
fn truthiness_is_not_numerically_zero() {
    assert_eq!(result_of("if (0.5) { 1; } else { 2; }"), Value::Number(1.0));
    // Below the equality epsilon counts as zero.
    assert_eq!(result_of("if (0.000000001) { 1; } else { 2; }"), Value::Number(2.0));
}

#[test]
fn while_counts_up() {
    assert_eq!(
        result_of("x = 1; while (x < 4) { x = x + 1; } x;"),
        Value::Number(4.0)
    );
}

#[test]
fn while_never_entered_is_nil() {
    assert_eq!(result_of("while (false) { 1; }"), Value::Nil);
}

#[test]
fn while_yields_the_last_body_value() {
    let source = "i = 0; total = 0;
        while (i < 3) { i = i + 1; total = total + 10; }";
    assert_eq!(result_of(source), Value::Number(30.0));
}

#[test]
fn while_exits_only_through_its_condition() {
    let interp = interp();
    // The body errors every pass but the loop still runs to completion;
    // the while's value is the failing body's Error.
    assert_eq!(
        eval_in(&interp, "i = 0; while (i < 2) { i = i + 1; ghost; }"),
        Value::Error
    );
    assert_eq!(eval_in(&interp, "i;"), Value::Number(2.0));
}

// Functions

#[test]
fn call_binds_parameters_positionally() {
    assert_eq!(
        result_of("fn add(a, b) { return a + b; } add(2, 3);"),
        Value::Number(5.0)
    );
}

#[test]
fn missing_arguments_bind_to_nil() {
    assert_eq!(result_of("fn id(a) { return a; } id();"), Value::Nil);
}

#[test]
fn excess_arguments_evaluate_for_their_effects() {
    assert_eq!(
        result_of("fn zero() { return 0; } x = 1; zero(x = 5); x;"),
        Value::Number(5.0)
    );
}

#[test]
fn declaration_binds_and_yields_the_function() {
    let interp = interp();
    let declared = eval_in(&interp, "fn f() { return 1; }");
    let looked_up = eval_in(&interp, "f;");
    assert_eq!(declared, looked_up);
    match declared {
        Value::Function(_) => {}
        other => panic!("expected a function value, got {other:?}"),
    }
}

#[test]
fn anonymous_functions_are_values() {
    assert_eq!(
        result_of("double = fn(a) { return a * 2; }; double(21);"),
        Value::Number(42.0)
    );
}

#[test]
fn return_exits_only_its_own_block() {
    assert_eq!(
        result_of("fn f() { if (true) { return 1; } return 2; } f();"),
        Value::Number(2.0)
    );
}

#[test]
fn bare_return_yields_nil() {
    assert_eq!(result_of("fn f() { return; } f();"), Value::Nil);
}

#[test]
fn recursion_resolves_through_the_declaring_frame() {
    assert_eq!(
        result_of("fn fact(n) { if (n < 2) { return 1; } return n * fact(n - 1); } fact(5);"),
        Value::Number(120.0)
    );
}

#[test]
fn closures_share_their_defining_frame() {
    let source = "fn make() { c = 0; fn inc() { c = c + 1; return c; } return inc; }
        f = make(); f(); f();";
    assert_eq!(result_of(source), Value::Number(2.0));
}

#[test]
fn each_closure_gets_its_own_frame() {
    let source = "fn make() { c = 0; fn inc() { c = c + 1; return c; } return inc; }
        f = make(); g = make(); f(); f(); g();";
    assert_eq!(result_of(source), Value::Number(1.0));
}

#[test]
fn calling_a_non_function_is_an_error() {
    assert_eq!(result_of("x = 1; x();"), Value::Error);
    assert_eq!(result_of("ghost();"), Value::Error);
}

#[test]
fn erroring_arguments_abort_the_call() {
    let interp = interp();
    assert_eq!(
        eval_in(&interp, "fn f(a) { x = 2; return a; } x = 1; f(ghost);"),
        Value::Error
    );
    // The body never ran.
    assert_eq!(eval_in(&interp, "x;"), Value::Number(1.0));
}

// Classes and objects

#[test]
fn class_declaration_yields_a_class_value() {
    match result_of("class A { v = 1; }") {
        Value::Class(_) => {}
        other => panic!("expected a class value, got {other:?}"),
    }
}

#[test]
fn instantiation_runs_bodies_root_base_first() {
    let interp = interp();
    eval_in(
        &interp,
        "class A { v = 1; } class B : A { w = 2; } b = B.New();",
    );
    assert_eq!(eval_in(&interp, "b.v;"), Value::Number(1.0));
    assert_eq!(eval_in(&interp, "b.w;"), Value::Number(2.0));
}

#[test]
fn derived_members_overwrite_inherited_ones() {
    assert_eq!(
        result_of("class A { v = 1; } class B : A { v = 2; } B.New().v;"),
        Value::Number(2.0)
    );
}

#[test]
fn methods_read_fields_through_this() {
    let source = "class C { x = 5; fn get() { return this.x; } }
        c = C.New(); c.get();";
    assert_eq!(result_of(source), Value::Number(5.0));
}

#[test]
fn methods_also_reach_fields_through_the_scope_chain() {
    let source = "class C { x = 5; fn get() { return x; } }
        C.New().get();";
    assert_eq!(result_of(source), Value::Number(5.0));
}

#[test]
fn member_writes_are_visible_to_methods() {
    let interp = interp();
    eval_in(
        &interp,
        "class C { x = 5; fn get() { return this.x; } } c = C.New();",
    );
    assert_eq!(eval_in(&interp, "c.x = 9;"), Value::Number(9.0));
    assert_eq!(eval_in(&interp, "c.get();"), Value::Number(9.0));
}

#[test]
fn a_method_is_a_closure_over_its_object() {
    let source = "class C { x = 5; fn get() { return this.x; } }
        c = C.New(); m = c.get; c.x = 6; m();";
    assert_eq!(result_of(source), Value::Number(6.0));
}

#[test]
fn methods_can_call_sibling_methods() {
    let source = "class C { x = 3;
            fn get() { return this.x; }
            fn double() { return this.get() + this.get(); } }
        C.New().double();";
    assert_eq!(result_of(source), Value::Number(6.0));
}

#[test]
fn unknown_members_are_errors() {
    let interp = interp();
    eval_in(&interp, "class C { x = 1; } c = C.New();");
    assert_eq!(eval_in(&interp, "c.zzz;"), Value::Error);
    assert_eq!(eval_in(&interp, "c.zzz = 2;"), Value::Error);
    // Writes never create members.
    assert_eq!(eval_in(&interp, "c.zzz;"), Value::Error);
}

#[test]
fn outer_bindings_are_not_members() {
    let interp = interp();
    eval_in(&interp, "g = 10; class C { x = 1; } c = C.New();");
    // `g` is visible to method bodies but is not a member of `c`.
    assert_eq!(eval_in(&interp, "c.g;"), Value::Error);
}

#[test]
fn member_access_on_non_objects_is_an_error() {
    assert_eq!(result_of("x = 1; x.y;"), Value::Error);
    assert_eq!(result_of("class A { } A.v;"), Value::Error);
    assert_eq!(result_of("class A { } A.New;"), Value::Error);
}

#[test]
fn unknown_or_mistyped_bases_are_errors() {
    assert_eq!(result_of("class D : Ghost { }"), Value::Error);
    assert_eq!(result_of("x = 1; class D : x { }"), Value::Error);
}

#[test]
fn shadowing_field_initializers_write_the_outer_binding() {
    let interp = interp();
    eval_in(&interp, "x = 1; class S { x = 5; } s = S.New();");
    // The initializer's assignment walked to the global; the instance
    // frame never acquired an `x` member.
    assert_eq!(eval_in(&interp, "x;"), Value::Number(5.0));
    assert_eq!(eval_in(&interp, "s.x;"), Value::Error);
}

#[test]
fn constructor_arguments_evaluate_for_their_effects() {
    assert_eq!(
        result_of("class A { } x = 1; a = A.New(x = 3); x;"),
        Value::Number(3.0)
    );
}

#[test]
fn erroring_initializers_abort_instantiation() {
    assert_eq!(result_of("class A { v = ghost; } A.New();"), Value::Error);
}

#[test]
fn instances_are_independent() {
    let interp = interp();
    eval_in(
        &interp,
        "class C { x = 1; } a = C.New(); b = C.New(); a.x = 9;",
    );
    assert_eq!(eval_in(&interp, "b.x;"), Value::Number(1.0));
    assert_eq!(eval_in(&interp, "a == b;"), Value::Bool(false));
    assert_eq!(eval_in(&interp, "a == a;"), Value::Bool(true));
}

// Elements

#[test]
fn elements_literals_index_by_position() {
    assert_eq!(result_of("[10, 20][1];"), Value::Number(20.0));
    assert_eq!(result_of("[[1, 2], [3]][0][1];"), Value::Number(2.0));
}

#[test]
fn element_indices_truncate_their_numeric_reading() {
    assert_eq!(result_of("[10, 20][1.9];"), Value::Number(20.0));
}

#[test]
fn out_of_range_and_negative_indices_are_errors() {
    assert_eq!(result_of("[1][5];"), Value::Error);
    assert_eq!(result_of("xs = [1]; xs[0 - 1];"), Value::Error);
}

#[test]
fn element_writes_are_bounds_checked() {
    let interp = interp();
    assert_eq!(eval_in(&interp, "xs = [1, 2]; xs[0] = 9;"), Value::Number(9.0));
    assert_eq!(eval_in(&interp, "xs[0];"), Value::Number(9.0));
    assert_eq!(eval_in(&interp, "xs[7] = 0;"), Value::Error);
}

#[test]
fn element_lists_are_shared_by_reference() {
    assert_eq!(
        result_of("a = [1]; b = a; b[0] = 5; a[0];"),
        Value::Number(5.0)
    );
}

#[test]
fn indexing_a_non_elements_value_is_an_error() {
    assert_eq!(result_of("x = 1; x[0];"), Value::Error);
}

#[test]
fn erroring_items_abort_the_literal() {
    assert_eq!(result_of("[1, ghost, 2];"), Value::Error);
}

// Natives

fn native_sum(_: &Interpreter, env: &EnvRef) -> bool {
    let argc = env.pop().map_or(0, |count| count.numeric() as usize);
    let mut total = 0.0;
    for _ in 0..argc {
        total += env.pop().map_or(0.0, Value::numeric);
    }
    env.push(Value::Number(total));
    true
}

fn native_last(_: &Interpreter, env: &EnvRef) -> bool {
    let argc = env.pop().map_or(0, |count| count.numeric() as usize);
    let mut last = Value::Nil;
    for popped in 0..argc {
        let value = env.pop().unwrap_or(Value::Nil);
        // The first pop is the final argument.
        if popped == 0 {
            last = value;
        }
    }
    env.push(last);
    true
}

fn native_silent(_: &Interpreter, env: &EnvRef) -> bool {
    let argc = env.pop().map_or(0, |count| count.numeric() as usize);
    for _ in 0..argc {
        env.pop();
    }
    false
}

#[test]
fn natives_receive_arguments_over_the_operand_stack() {
    let interp = interp();
    interp.register_native("sum", native_sum);
    assert_eq!(eval_in(&interp, "sum(1, 2, 3);"), Value::Number(6.0));
    assert_eq!(interp.root_env().stack_len(), 0);
}

#[test]
fn native_arguments_pop_in_reverse_push_order() {
    let interp = interp();
    interp.register_native("last", native_last);
    assert_eq!(eval_in(&interp, "last(1, 2, 3);"), Value::Number(3.0));
}

#[test]
fn a_native_without_a_result_yields_nil() {
    let interp = interp();
    interp.register_native("swallow", native_silent);
    assert_eq!(eval_in(&interp, "swallow(1, 2);"), Value::Nil);
    assert_eq!(interp.root_env().stack_len(), 0);
}

#[test]
fn natives_compose_with_script_expressions() {
    let interp = interp();
    interp.register_native("sum", native_sum);
    assert_eq!(
        eval_in(&interp, "fn twice(n) { return n * 2; } twice(sum(1, 2));"),
        Value::Number(6.0)
    );
}

// Cross-tree evaluation

#[test]
fn root_bindings_persist_across_programs() {
    let interp = interp();
    assert_eq!(eval_in(&interp, "x = 10;"), Value::Number(10.0));
    assert_eq!(eval_in(&interp, "x + 5;"), Value::Number(15.0));
}

#[test]
fn functions_outlive_the_program_that_declared_them() {
    let interp = interp();
    eval_in(&interp, "fn inc(n) { return n + 1; }");
    // The call runs against the declaring program's tree.
    assert_eq!(eval_in(&interp, "inc(41);"), Value::Number(42.0));
}

#[test]
fn classes_outlive_the_program_that_declared_them() {
    let interp = interp();
    eval_in(&interp, "class P { v = 7; }");
    assert_eq!(eval_in(&interp, "P.New().v;"), Value::Number(7.0));
}
