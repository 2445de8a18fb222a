//! Runtime and Evaluator Integration Tests
//!
//! Drives script functions and generators through an evaluator made of
//! hand-written bodies, the way a bytecode interpreter would.

use std::rc::Rc;

use core_types::ErrorKind;
use integration_tests::ScriptBodies;
use runtime::{Completion, Context, ContextConfig, Resume, Value, ValueKind};

fn context(bodies: ScriptBodies) -> Context {
    let _ = env_logger::builder().is_test(true).try_init();
    Context::with_evaluator(ContextConfig::default(), Rc::new(bodies)).unwrap()
}

/// `function* range(n) { for (let i = 0; i < n; i++) yield i; }`
/// The loop counter lives on the operand stack between yields.
fn range_program() -> ScriptBodies {
    ScriptBodies::new().define("range.js", 0, |ctx, frame| {
        if let Resume::Throw(value) = frame.resume {
            return Err(ctx.throw_value(value));
        }
        let limit = frame.arguments[0];
        let i = match frame.stack.first() {
            Some(previous) => ctx.inc(*previous)?,
            None => ctx.create_number(0.0),
        };
        if ctx.compare(runtime::Relation::Lt, i, limit)? {
            Ok(Completion::Yield {
                value: i,
                pc: 1,
                stack: vec![i],
            })
        } else {
            Ok(Completion::Return(ctx.create_undefined()))
        }
    })
}

fn collect_numbers(ctx: &mut Context, generator: Value) -> Vec<f64> {
    let next = ctx.get_field(generator, "next").unwrap();
    let mut seen = Vec::new();
    loop {
        let result = ctx.call(next, generator, &[]).unwrap();
        let done = ctx.get_field(result, "done").unwrap();
        if ctx.as_bool(done) == Some(true) {
            return seen;
        }
        let value = ctx.get_field(result, "value").unwrap();
        seen.push(ctx.as_f64(value).unwrap());
    }
}

/// Test: a generator's state survives between resumptions
#[test]
fn test_generator_counts_through_its_range() {
    let mut ctx = context(range_program());
    let range = ctx
        .create_generator_function("range", "range.js", 0, &[])
        .unwrap();
    let undefined = ctx.create_undefined();
    let four = ctx.create_number(4.0);
    let generator = ctx.call(range, undefined, &[four]).unwrap();
    assert_eq!(collect_numbers(&mut ctx, generator), vec![0.0, 1.0, 2.0, 3.0]);
}

/// Test: several generators from one function run independently
#[test]
fn test_interleaved_generators_do_not_share_state() {
    let mut ctx = context(range_program());
    let range = ctx
        .create_generator_function("range", "range.js", 0, &[])
        .unwrap();
    let undefined = ctx.create_undefined();
    let three = ctx.create_number(3.0);
    let first = ctx.call(range, undefined, &[three]).unwrap();
    let second = ctx.call(range, undefined, &[three]).unwrap();

    let next = ctx.get_field(first, "next").unwrap();
    ctx.call(next, first, &[]).unwrap();
    ctx.call(next, first, &[]).unwrap();
    assert_eq!(collect_numbers(&mut ctx, second), vec![0.0, 1.0, 2.0]);
    assert_eq!(collect_numbers(&mut ctx, first), vec![2.0]);
}

/// Test: the generator's iterator protocol returns the generator itself
#[test]
fn test_generator_is_its_own_iterator() {
    let mut ctx = context(range_program());
    let range = ctx
        .create_generator_function("range", "range.js", 0, &[])
        .unwrap();
    let undefined = ctx.create_undefined();
    let generator = ctx.call(range, undefined, &[undefined]).unwrap();
    let key = ctx.well_known_symbol("iterator").unwrap();
    let method = ctx.get_member(generator, key).unwrap();
    let iterator = ctx.call(method, generator, &[]).unwrap();
    assert!(ctx.is_strict_equal(iterator, generator));
}

/// Test: closures share bindings with the scope that created them
#[test]
fn test_counter_closure_shares_binding() {
    let bodies = ScriptBodies::new().define("counter.js", 0, |ctx, _frame| {
        let count = ctx.query_value("count")?;
        let next = ctx.inc(count)?;
        ctx.assign_value(count, next)?;
        Ok(Completion::Return(next))
    });
    let mut ctx = context(bodies);
    ctx.push_scope();
    let zero = ctx.create_number(0.0);
    let count = ctx.declare("count", zero);
    let local = ctx
        .create_function("tick", "counter.js", 0, &[("count", count)])
        .unwrap();
    let inner = ctx.set_scope(ctx.root_scope());
    let tick = ctx.clone_value(local).unwrap();
    ctx.set_scope(inner);
    ctx.pop_scope();

    let undefined = ctx.create_undefined();
    for expected in 1..=3 {
        let result = ctx.call(tick, undefined, &[]).unwrap();
        assert_eq!(ctx.as_f64(result), Some(expected as f64));
    }
}

/// Test: recursion through the evaluator unwinds the call stack on error
#[test]
fn test_recursive_body_hits_depth_limit() {
    let bodies = ScriptBodies::new().define("loop.js", 0, |ctx, frame| {
        let me = ctx.query_value("again")?;
        let result = ctx.call(me, frame.self_value, &[])?;
        Ok(Completion::Return(result))
    });
    let _ = env_logger::builder().is_test(true).try_init();
    let mut ctx = Context::with_evaluator(
        ContextConfig::default().with_max_call_depth(16),
        Rc::new(bodies),
    )
    .unwrap();
    let again = ctx.create_function("again", "loop.js", 0, &[]).unwrap();
    ctx.declare("again", again);
    let undefined = ctx.create_undefined();
    let err = ctx.call(again, undefined, &[]).unwrap_err();
    let error = ctx.exception_error(err).unwrap();
    assert_eq!(error.kind, ErrorKind::RangeError);
    assert_eq!(error.message, "Maximum call stack size exceeded");
    assert_eq!(error.stack.len(), 16);
    assert_eq!(ctx.call_depth(), 1);
}

/// Test: an object built by a script constructor reports its class
#[test]
fn test_script_constructor_builds_instances() {
    let bodies = ScriptBodies::new().define("point.js", 0, |ctx, frame| {
        ctx.set_field(frame.self_value, "x", frame.arguments[0])?;
        ctx.set_field(frame.self_value, "y", frame.arguments[1])?;
        Ok(Completion::Return(ctx.create_undefined()))
    });
    let mut ctx = context(bodies);
    let point = ctx.create_function("Point", "point.js", 0, &[]).unwrap();
    let one = ctx.create_number(1.0);
    let two = ctx.create_number(2.0);
    let p = ctx.construct(point, &[one, two]).unwrap();
    assert_eq!(ctx.kind(p), ValueKind::Object);
    assert_eq!(ctx.object_to_string(p), "[object Point]");
    let keys = ctx.get_own_keys(p).unwrap();
    assert_eq!(ctx.to_string(keys).unwrap(), "x,y");
}
