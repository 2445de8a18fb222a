//! `Function` and `Function.prototype`.

use core_types::ErrorKind;

use super::{arg, define_method, make_constructor, Intrinsic};
use crate::context::Context;
use crate::error::JsResult;
use crate::value::Value;

pub(super) fn install(ctx: &mut Context) -> JsResult<()> {
    let (ctor, prototype) = make_constructor(ctx, Intrinsic::Function, None, function_constructor)?;
    // Nothing could inherit from Function.prototype before it existed.
    ctx.set_prototype(ctor, Some(prototype))?;

    define_method(ctx, prototype, "toString", "toString", function_to_string)?;
    define_method(ctx, prototype, "call", "call", function_call)?;
    Ok(())
}

fn function_constructor(ctx: &mut Context, _this: Value, _args: &[Value]) -> JsResult<Value> {
    Err(ctx.create_exception(
        ErrorKind::Error,
        "Code generation from strings is not supported",
    ))
}

fn function_to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> JsResult<Value> {
    let text = match ctx.payload(this) {
        Some(payload) if payload.callable().is_some() => payload.descriptor().to_string(payload),
        _ => {
            return Err(ctx.type_error(
                "Function.prototype.toString requires that 'this' be a Function",
            ))
        }
    };
    match text {
        Ok(text) => Ok(ctx.create_string(text)),
        Err(err) => Err(ctx.throw(err)),
    }
}

/// `fn.call(thisArg, ...args)`
fn function_call(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    let receiver = arg(ctx, args, 0);
    let rest = args.get(1..).unwrap_or(&[]);
    ctx.call(this, receiver, rest)
}
