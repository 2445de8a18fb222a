//! `String` and `String.prototype`.

use super::{define_method, is_construct_call, make_constructor, this_primitive, wrap_primitive, Intrinsic};
use crate::context::Context;
use crate::error::JsResult;
use crate::payload::Payload;
use crate::value::{Value, ValueKind};

pub(super) fn install(ctx: &mut Context) -> JsResult<()> {
    let (_, prototype) = make_constructor(ctx, Intrinsic::String, None, string_constructor)?;

    define_method(ctx, prototype, "toString", "toString", |ctx, this, _args| {
        this_primitive(ctx, this, Intrinsic::String, "toString")
    })?;
    define_method(ctx, prototype, "valueOf", "valueOf", |ctx, this, _args| {
        this_primitive(ctx, this, Intrinsic::String, "valueOf")
    })?;
    Ok(())
}

/// `String(symbol)` describes the symbol; `new String(symbol)` raises like
/// any other string conversion of a symbol.
fn string_constructor(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    let text = match args.first() {
        None => String::new(),
        Some(value)
            if ctx.kind(*value) == ValueKind::Symbol
                && !is_construct_call(ctx, this, Intrinsic::String) =>
        {
            match ctx.payload(*value) {
                Some(Payload::Symbol { description, .. }) => {
                    format!("Symbol({})", description.as_deref().unwrap_or(""))
                }
                _ => String::new(),
            }
        }
        Some(value) => ctx.to_string(*value)?,
    };
    let primitive = ctx.create_string(text);
    wrap_primitive(ctx, this, Intrinsic::String, primitive)
}
