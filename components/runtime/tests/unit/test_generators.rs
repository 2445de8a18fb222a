//! Unit tests for generator suspension, resumption and completion

use std::rc::Rc;

use core_types::ErrorKind;
use runtime::{
    Completion, Context, ContextConfig, EvalFrame, Evaluator, GeneratorResume, JsResult,
    ProgramId, Resume, Value, ValueKind,
};

const COUNTER: usize = 0;
const REENTRANT: usize = 10;
const KEEPER: usize = 20;

/// `function* counter(start) { let n = yield start; yield start + 1; return n ?? "done"; }`
/// spelled out as a small state machine over the resume address.
struct Scripted;

impl Evaluator for Scripted {
    fn lookup(&self, path: &str) -> Option<ProgramId> {
        (path == "counter.js").then_some(ProgramId(7))
    }

    fn eval(&self, ctx: &mut Context, _program: ProgramId, frame: EvalFrame) -> JsResult<Completion> {
        if let Resume::Throw(value) = frame.resume {
            return Err(ctx.throw_value(value));
        }
        match frame.pc {
            COUNTER => Ok(Completion::Yield {
                value: frame.arguments[0],
                pc: COUNTER + 1,
                stack: vec![frame.arguments[0]],
            }),
            pc if pc == COUNTER + 1 => {
                let next = ctx.inc(frame.stack[0])?;
                let sent = match frame.resume {
                    Resume::Next(value) => value,
                    _ => ctx.create_undefined(),
                };
                Ok(Completion::Yield {
                    value: next,
                    pc: COUNTER + 2,
                    stack: vec![sent],
                })
            }
            pc if pc == COUNTER + 2 => {
                let sent = frame.stack[0];
                if ctx.kind(sent) == ValueKind::Undefined {
                    Ok(Completion::Return(ctx.create_string("done")))
                } else {
                    Ok(Completion::Return(sent))
                }
            }
            REENTRANT => {
                let me = ctx.query_value("me")?;
                let next = ctx.get_field(me, "next")?;
                ctx.call(next, me, &[])?;
                Ok(Completion::Return(ctx.create_undefined()))
            }
            KEEPER => {
                let holder = ctx.query_value("holder")?;
                Ok(Completion::Yield {
                    value: holder,
                    pc: KEEPER + 1,
                    stack: Vec::new(),
                })
            }
            pc if pc == KEEPER + 1 => Ok(Completion::Return(ctx.query_value("holder")?)),
            _ => Err(ctx.internal_error("bad address")),
        }
    }
}

fn context() -> Context {
    let _ = env_logger::builder().is_test(true).try_init();
    Context::with_evaluator(ContextConfig::default(), Rc::new(Scripted)).unwrap()
}

fn start(ctx: &mut Context, first: f64) -> Value {
    let gen_fn = ctx
        .create_generator_function("counter", "counter.js", COUNTER, &[])
        .unwrap();
    let undefined = ctx.create_undefined();
    let first = ctx.create_number(first);
    ctx.call(gen_fn, undefined, &[first]).unwrap()
}

fn next(ctx: &mut Context, generator: Value) -> JsResult<(Value, bool)> {
    let method = ctx.get_field(generator, "next")?;
    let result = ctx.call(method, generator, &[])?;
    unpack(ctx, result)
}

fn unpack(ctx: &mut Context, result: Value) -> JsResult<(Value, bool)> {
    let value = ctx.get_field(result, "value")?;
    let done = ctx.get_field(result, "done")?;
    Ok((value, ctx.as_bool(done) == Some(true)))
}

#[cfg(test)]
mod resume_tests {
    use super::*;

    #[test]
    fn test_next_runs_to_completion() {
        let mut ctx = context();
        let generator = start(&mut ctx, 10.0);

        let (value, done) = next(&mut ctx, generator).unwrap();
        assert_eq!((ctx.as_f64(value), done), (Some(10.0), false));
        let (value, done) = next(&mut ctx, generator).unwrap();
        assert_eq!((ctx.as_f64(value), done), (Some(11.0), false));
        let (value, done) = next(&mut ctx, generator).unwrap();
        assert_eq!((ctx.to_string(value).unwrap(), done), ("done".to_string(), true));

        let (value, done) = next(&mut ctx, generator).unwrap();
        assert_eq!(ctx.kind(value), ValueKind::Undefined);
        assert!(done);
    }

    #[test]
    fn test_next_delivers_sent_value() {
        let mut ctx = context();
        let generator = start(&mut ctx, 1.0);
        next(&mut ctx, generator).unwrap();
        let sent = ctx.create_string("sent");
        let result = ctx
            .generator_resume(generator, GeneratorResume::Next(sent))
            .unwrap();
        let (value, _) = unpack(&mut ctx, result).unwrap();
        assert_eq!(ctx.as_f64(value), Some(2.0));
        let undefined = ctx.create_undefined();
        let result = ctx
            .generator_resume(generator, GeneratorResume::Next(undefined))
            .unwrap();
        let (value, done) = unpack(&mut ctx, result).unwrap();
        assert_eq!(ctx.to_string(value).unwrap(), "sent");
        assert!(done);
    }

    #[test]
    fn test_return_finishes_early() {
        let mut ctx = context();
        let generator = start(&mut ctx, 1.0);
        next(&mut ctx, generator).unwrap();
        let early = ctx.create_number(42.0);
        let result = ctx
            .generator_resume(generator, GeneratorResume::Return(early))
            .unwrap();
        let (value, done) = unpack(&mut ctx, result).unwrap();
        assert_eq!((ctx.as_f64(value), done), (Some(42.0), true));

        let (_, done) = next(&mut ctx, generator).unwrap();
        assert!(done);
    }

    #[test]
    fn test_throw_before_start_finishes() {
        let mut ctx = context();
        let generator = start(&mut ctx, 1.0);
        let boom = ctx.create_string("boom");
        let err = ctx
            .generator_resume(generator, GeneratorResume::Throw(boom))
            .unwrap_err();
        let thrown = ctx.caught_value(err).unwrap();
        assert_eq!(ctx.to_string(thrown).unwrap(), "boom");
        let (_, done) = next(&mut ctx, generator).unwrap();
        assert!(done);
    }

    #[test]
    fn test_throw_into_suspended_body() {
        let mut ctx = context();
        let generator = start(&mut ctx, 1.0);
        next(&mut ctx, generator).unwrap();
        let throw = ctx.get_field(generator, "throw").unwrap();
        let boom = ctx.create_number(13.0);
        let err = ctx.call(throw, generator, &[boom]).unwrap_err();
        let thrown = ctx.caught_value(err).unwrap();
        assert_eq!(ctx.as_f64(thrown), Some(13.0));
        let (_, done) = next(&mut ctx, generator).unwrap();
        assert!(done);
    }

    #[test]
    fn test_reentry_is_refused() {
        let mut ctx = context();
        let gen_fn = ctx
            .create_generator_function("loop", "counter.js", REENTRANT, &[])
            .unwrap();
        let undefined = ctx.create_undefined();
        let generator = ctx.call(gen_fn, undefined, &[]).unwrap();
        ctx.declare("me", generator);

        let err = next(&mut ctx, generator).unwrap_err();
        let error = ctx.exception_error(err).unwrap();
        assert_eq!(error.kind, ErrorKind::TypeError);
        assert_eq!(error.message, "Generator is already running");
    }

    #[test]
    fn test_incompatible_receiver() {
        let mut ctx = context();
        let plain = ctx.create_object();
        let undefined = ctx.create_undefined();
        let err = ctx
            .generator_resume(plain, GeneratorResume::Next(undefined))
            .unwrap_err();
        assert_eq!(ctx.exception_error(err).unwrap().kind, ErrorKind::TypeError);
    }
}

#[cfg(test)]
mod lifetime_tests {
    use super::*;

    #[test]
    fn test_finished_generator_is_collected() {
        let mut ctx = context();
        let baseline = ctx.live_atoms();
        ctx.push_scope();
        let generator = start(&mut ctx, 3.0);
        while !next(&mut ctx, generator).unwrap().1 {}
        ctx.pop_scope();
        ctx.collect_garbage();
        assert_eq!(ctx.live_atoms(), baseline);
    }

    #[test]
    fn test_suspended_stack_survives_collection() {
        let mut ctx = context();
        let generator = start(&mut ctx, 5.0);
        next(&mut ctx, generator).unwrap();
        ctx.collect_garbage();
        let (value, _) = next(&mut ctx, generator).unwrap();
        assert_eq!(ctx.as_f64(value), Some(6.0));
    }

    /// `let holder; function* keeper() { yield holder; return holder; } holder = keeper();`
    fn keeper(ctx: &mut Context) -> Value {
        let undefined = ctx.create_undefined();
        let holder = ctx.declare("holder", undefined);
        let gen_fn = ctx
            .create_generator_function("keeper", "counter.js", KEEPER, &[("holder", holder)])
            .unwrap();
        let receiver = ctx.create_undefined();
        let generator = ctx.call(gen_fn, receiver, &[]).unwrap();
        ctx.assign_value(holder, generator).unwrap();
        generator
    }

    #[test]
    fn test_generator_sees_writes_to_captured_binding() {
        let mut ctx = context();
        let generator = keeper(&mut ctx);
        let (value, done) = next(&mut ctx, generator).unwrap();
        assert!(!done);
        assert!(ctx.same_value(value, generator));
    }

    #[test]
    fn test_self_capturing_generator_is_collected() {
        let mut ctx = context();
        let baseline = ctx.live_atoms();
        ctx.push_scope();
        keeper(&mut ctx);
        ctx.pop_scope();
        ctx.collect_garbage();
        assert_eq!(ctx.live_atoms(), baseline);
    }

    #[test]
    fn test_suspended_self_capturing_generator_is_collected() {
        let mut ctx = context();
        let baseline = ctx.live_atoms();
        ctx.push_scope();
        let generator = keeper(&mut ctx);
        next(&mut ctx, generator).unwrap();
        ctx.pop_scope();
        ctx.collect_garbage();
        assert_eq!(ctx.live_atoms(), baseline);
    }
}
