//! Unit tests for exception values, thrown values and traces

use core_types::ErrorKind;
use runtime::{Context, ContextConfig, ValueKind};

fn context() -> Context {
    Context::new(ContextConfig::default()).unwrap()
}

#[cfg(test)]
mod trace_tests {
    use super::*;

    #[test]
    fn test_trace_lists_innermost_frame_first() {
        let mut ctx = context();
        let fail = ctx
            .create_native_function("fail", |ctx, _this, _args| Err(ctx.type_error("boom")))
            .unwrap();
        ctx.set_position(Some("app.js"), 3, 7);
        let undefined = ctx.create_undefined();
        let err = ctx.call(fail, undefined, &[]).unwrap_err();
        let error = ctx.exception_error(err).unwrap();
        assert_eq!(
            error.to_string(),
            "TypeError: boom\n  at fail(<internal>)\n  at <main>(app.js:3:7)\n"
        );
    }

    #[test]
    fn test_nested_calls_unwind_the_stack() {
        let mut ctx = context();
        let inner = ctx
            .create_native_function("inner", |ctx, _this, _args| Err(ctx.range_error("deep")))
            .unwrap();
        ctx.declare("inner", inner);
        let outer = ctx
            .create_native_function("outer", |ctx, this, _args| {
                let inner = ctx.query_value("inner")?;
                ctx.call(inner, this, &[])
            })
            .unwrap();
        let undefined = ctx.create_undefined();
        let err = ctx.call(outer, undefined, &[]).unwrap_err();
        let names: Vec<_> = ctx
            .exception_error(err)
            .unwrap()
            .stack
            .iter()
            .map(|frame| frame.function_name.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["<main>", "outer", "inner"]);
        assert_eq!(ctx.call_depth(), 1);
    }

    #[test]
    fn test_explicit_call_stack_frames() {
        let mut ctx = context();
        ctx.push_call_stack(Some("app.js"), "run", 1, 1).unwrap();
        let trace = ctx.trace(Some("lib.js"), 4, 2);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[1].to_string(), "run(lib.js:4:2)");
        ctx.pop_call_stack();
        assert_eq!(ctx.call_depth(), 1);
    }
}

#[cfg(test)]
mod thrown_value_tests {
    use super::*;

    #[test]
    fn test_thrown_value_is_caught_unchanged() {
        let mut ctx = context();
        let payload = ctx.create_object();
        let code = ctx.create_number(404.0);
        ctx.set_field(payload, "code", code).unwrap();
        let exception = ctx.throw_value(payload);
        assert_eq!(ctx.kind(exception.value()), ValueKind::Exception);

        let caught = ctx.caught_value(exception).unwrap();
        assert!(ctx.same_value(caught, payload));
        let code = ctx.get_field(caught, "code").unwrap();
        assert_eq!(ctx.as_f64(code), Some(404.0));
    }

    #[test]
    fn test_runtime_exception_is_its_own_catch_value() {
        let mut ctx = context();
        let exception = ctx.type_error("bad");
        let caught = ctx.caught_value(exception).unwrap();
        assert_eq!(ctx.kind(caught), ValueKind::Exception);
        let name = ctx.get_field(caught, "name").unwrap();
        assert_eq!(ctx.to_string(name).unwrap(), "TypeError");
        let message = ctx.get_field(caught, "message").unwrap();
        assert_eq!(ctx.to_string(message).unwrap(), "bad");
        let stack = ctx.get_field(caught, "stack").unwrap();
        assert!(ctx.to_string(stack).unwrap().starts_with("TypeError: bad\n"));
    }

    #[test]
    fn test_rethrowing_an_exception_keeps_it() {
        let mut ctx = context();
        let original = ctx.range_error("once");
        let again = ctx.throw_value(original.value());
        assert!(ctx.same_value(again.value(), original.value()));
        assert_eq!(ctx.exception_error(again).unwrap().kind, ErrorKind::RangeError);
    }

    #[test]
    fn test_thrown_value_survives_the_callee_scope() {
        let mut ctx = context();
        let thrower = ctx
            .create_native_function("thrower", |ctx, _this, _args| {
                let detail = ctx.create_string("lost?");
                Err(ctx.throw_value(detail))
            })
            .unwrap();
        let undefined = ctx.create_undefined();
        let err = ctx.call(thrower, undefined, &[]).unwrap_err();
        ctx.collect_garbage();
        let caught = ctx.caught_value(err).unwrap();
        assert_eq!(ctx.to_string(caught).unwrap(), "lost?");
    }
}

#[cfg(test)]
mod binding_tests {
    use super::*;

    #[test]
    fn test_uninitialized_binding_raises_reference_error() {
        let mut ctx = context();
        let hole = ctx.create_uninitialized();
        ctx.declare("later", hole);
        let read = ctx.query_value("later").unwrap();
        let err = ctx.check_initialized(read).unwrap_err();
        let error = ctx.exception_error(err).unwrap();
        assert_eq!(error.kind, ErrorKind::ReferenceError);
        assert_eq!(error.message, "Cannot access variable before initialization");
    }

    #[test]
    fn test_undeclared_name_raises_reference_error() {
        let mut ctx = context();
        let err = ctx.query_value("nowhere").unwrap_err();
        let error = ctx.exception_error(err).unwrap();
        assert_eq!(error.kind, ErrorKind::ReferenceError);
        assert_eq!(error.message, "'nowhere' is not defined");
    }

    #[test]
    fn test_const_binding_assigned_once() {
        let mut ctx = context();
        let slot = ctx.create_uninitialized().with_const(true);
        let one = ctx.create_number(1.0);
        ctx.assign_value(slot, one).unwrap();
        assert_eq!(ctx.as_f64(slot), Some(1.0));

        let two = ctx.create_number(2.0);
        let err = ctx.assign_value(slot, two).unwrap_err();
        let error = ctx.exception_error(err).unwrap();
        assert_eq!(error.kind, ErrorKind::TypeError);
        assert_eq!(error.message, "Assignment to constant variable.");
        assert_eq!(ctx.as_f64(slot), Some(1.0));
    }

    #[test]
    fn test_globals_resolve_through_the_global_object() {
        let mut ctx = context();
        let object = ctx.query_value("Object").unwrap();
        assert!(ctx.kind(object).is_callable());
        let global = ctx.query_value("global").unwrap();
        assert!(ctx.same_value(global, ctx.global()));
    }
}
