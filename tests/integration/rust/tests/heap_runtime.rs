//! Heap and Runtime Integration Tests
//!
//! Tests the integration between memory_manager and runtime components.
//! Verifies that scope disposal and cycle collection release exactly the
//! payloads no outer scope can reach.

use memory_manager::Heap;
use runtime::{Context, ContextConfig, ValueKind};

fn context() -> Context {
    let _ = env_logger::builder().is_test(true).try_init();
    Context::new(ContextConfig::default()).unwrap()
}

/// Test: B allocated in an inner scope survives through A, then dies with A
#[test]
fn test_inner_object_outlives_its_scope_through_outer_reference() {
    let mut ctx = context();
    let baseline = ctx.live_atoms();

    ctx.push_scope();
    let a = ctx.create_object();
    ctx.push_scope();
    let b = ctx.create_object();
    let marker = ctx.create_number(7.0);
    ctx.set_field(b, "marker", marker).unwrap();
    ctx.set_field(a, "b", b).unwrap();
    ctx.pop_scope();

    let reached = ctx.get_field(a, "b").unwrap();
    let marker = ctx.get_field(reached, "marker").unwrap();
    assert_eq!(ctx.as_f64(marker), Some(7.0));

    ctx.pop_scope();
    ctx.collect_garbage();
    assert_eq!(ctx.live_atoms(), baseline, "B must be collected with A");
}

/// Test: A <-> B with no scope names left is reclaimed in one pass
#[test]
fn test_two_object_cycle_is_reclaimed_in_one_pass() {
    let mut ctx = Context::new(ContextConfig::default().with_collect_on_scope_exit(false)).unwrap();
    let baseline = ctx.live_atoms();

    ctx.push_scope();
    let a = ctx.create_object();
    let b = ctx.create_object();
    ctx.set_field(a, "peer", b).unwrap();
    ctx.set_field(b, "peer", a).unwrap();
    ctx.pop_scope();
    assert!(ctx.live_atoms() > baseline);

    let stats = ctx.collect_garbage();
    assert!(stats.atoms_reclaimed >= 2);
    assert_eq!(ctx.live_atoms(), baseline);
}

/// Test: a long chain of nested scopes leaves nothing behind
#[test]
fn test_nested_scopes_unwind_cleanly() {
    let mut ctx = context();
    let baseline = ctx.live_atoms();
    for depth in 0..32 {
        ctx.push_scope();
        let obj = ctx.create_object();
        let n = ctx.create_number(depth as f64);
        ctx.set_field(obj, "depth", n).unwrap();
        ctx.declare("obj", obj);
    }
    let innermost = ctx.query_value("obj").unwrap();
    let depth = ctx.get_field(innermost, "depth").unwrap();
    assert_eq!(ctx.as_f64(depth), Some(31.0));
    for _ in 0..32 {
        ctx.pop_scope();
    }
    assert_eq!(ctx.live_atoms(), baseline);
}

/// Test: clone compares equal but is a different atom
#[test]
fn test_clone_is_equal_but_distinct() {
    let mut ctx = context();
    let values = [
        ctx.create_number(3.5),
        ctx.create_string("text"),
        ctx.create_boolean(false),
        ctx.create_object(),
    ];
    for value in values {
        let copy = ctx.clone_value(value).unwrap();
        assert_ne!(copy.atom(), value.atom());
        assert!(ctx.is_strict_equal(copy, value));
    }
}

/// Test: the raw heap and the runtime agree on cycle reclamation
#[test]
fn test_heap_cycle_matches_runtime_behaviour() {
    let mut heap = Heap::new();
    let scope = heap.alloc_anchor();
    let a = heap.alloc("a");
    let b = heap.alloc("b");
    heap.add_child(scope, a).unwrap();
    heap.add_child(scope, b).unwrap();
    heap.add_child(a, b).unwrap();
    heap.add_child(b, a).unwrap();

    heap.dispose(scope).unwrap();
    let stats = heap.collect();
    assert_eq!(stats.atoms_reclaimed, 2);
    assert_eq!(heap.live_atoms(), 0);
}

/// Test: values bound in the root scope stay until the context is dropped
#[test]
fn test_root_bindings_survive_collection() {
    let mut ctx = context();
    let kept = ctx.create_object();
    ctx.declare("kept", kept);
    for _ in 0..3 {
        ctx.collect_garbage();
    }
    let again = ctx.query_value("kept").unwrap();
    assert_eq!(ctx.kind(again), ValueKind::Object);
    assert!(ctx.is_live(kept));
}
