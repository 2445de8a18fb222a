//! Unit tests for scope lifetime and cycle collection through the Context

use runtime::{Context, ContextConfig, ValueKind};

fn context() -> Context {
    let _ = env_logger::builder().is_test(true).try_init();
    Context::new(ContextConfig::default()).unwrap()
}

#[cfg(test)]
mod scope_tests {
    use super::*;

    #[test]
    fn test_inner_value_survives_through_outer_reference() {
        let mut ctx = context();
        let baseline = ctx.live_atoms();

        ctx.push_scope();
        let a = ctx.create_object();
        ctx.push_scope();
        let b = ctx.create_object();
        let tag = ctx.create_string("inner");
        ctx.set_field(b, "tag", tag).unwrap();
        ctx.set_field(a, "b", b).unwrap();
        ctx.pop_scope();
        ctx.collect_garbage();

        let b_again = ctx.get_field(a, "b").unwrap();
        assert_eq!(ctx.kind(b_again), ValueKind::Object);
        let tag = ctx.get_field(b_again, "tag").unwrap();
        assert_eq!(ctx.to_string(tag).unwrap(), "inner");

        ctx.pop_scope();
        ctx.collect_garbage();
        assert_eq!(ctx.live_atoms(), baseline);
    }

    #[test]
    fn test_locals_are_released_on_pop() {
        let mut ctx = context();
        let baseline = ctx.live_atoms();
        ctx.push_scope();
        for i in 0..16 {
            let obj = ctx.create_object();
            let n = ctx.create_number(i as f64);
            ctx.set_field(obj, "n", n).unwrap();
        }
        assert!(ctx.live_atoms() > baseline);
        ctx.pop_scope();
        assert_eq!(ctx.live_atoms(), baseline);
    }

    #[test]
    fn test_set_scope_swaps_and_restores() {
        let mut ctx = context();
        let outer = ctx.push_scope();
        let inner = ctx.push_scope();
        let previous = ctx.set_scope(outer);
        assert_eq!(previous, inner);
        assert_eq!(ctx.current_scope(), outer);
        ctx.set_scope(inner);
        ctx.pop_scope();
        assert_eq!(ctx.current_scope(), outer);
    }

    #[test]
    fn test_collection_can_be_deferred() {
        let mut ctx =
            Context::new(ContextConfig::default().with_collect_on_scope_exit(false)).unwrap();
        let baseline = ctx.live_atoms();
        ctx.push_scope();
        let obj = ctx.create_object();
        let other = ctx.create_object();
        ctx.set_field(obj, "other", other).unwrap();
        ctx.pop_scope();
        assert!(ctx.live_atoms() > baseline);
        let stats = ctx.collect_garbage();
        assert!(stats.atoms_reclaimed > 0);
        assert_eq!(ctx.live_atoms(), baseline);
    }
}

#[cfg(test)]
mod cycle_tests {
    use super::*;

    #[test]
    fn test_mutual_references_are_collected() {
        let mut ctx = context();
        let baseline = ctx.live_atoms();
        ctx.push_scope();
        let a = ctx.create_object();
        let b = ctx.create_object();
        ctx.set_field(a, "b", b).unwrap();
        ctx.set_field(b, "a", a).unwrap();
        ctx.pop_scope();
        assert_eq!(ctx.live_atoms(), baseline);
    }

    #[test]
    fn test_self_reference_is_collected() {
        let mut ctx = context();
        let baseline = ctx.live_atoms();
        ctx.push_scope();
        let obj = ctx.create_object();
        ctx.set_field(obj, "me", obj).unwrap();
        ctx.pop_scope();
        assert_eq!(ctx.live_atoms(), baseline);
    }

    #[test]
    fn test_closure_capturing_itself_is_collected() {
        let mut ctx = context();
        let baseline = ctx.live_atoms();
        ctx.push_scope();
        let holder = ctx.create_undefined();
        ctx.declare("recur", holder);
        let func = ctx
            .create_function("recur", "app.js", 0, &[("recur", holder)])
            .unwrap();
        ctx.assign_value(holder, func).unwrap();
        assert!(ctx.same_value(holder, func));
        ctx.pop_scope();
        assert_eq!(ctx.live_atoms(), baseline);
    }

    #[test]
    fn test_reassigned_binding_drops_old_object() {
        let mut ctx = context();
        ctx.push_scope();
        let binding = ctx.create_object();
        let field = ctx.create_object();
        ctx.set_field(binding, "field", field).unwrap();
        let zero = ctx.create_number(0.0);
        let before = ctx.live_atoms();

        ctx.assign_value(binding, zero).unwrap();
        ctx.collect_garbage();
        assert!(ctx.live_atoms() < before);
        assert_eq!(ctx.kind(binding), ValueKind::Number);
        ctx.pop_scope();
    }
}
