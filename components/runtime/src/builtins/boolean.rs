//! `Boolean` and `Boolean.prototype`.

use super::{define_method, make_constructor, this_primitive, wrap_primitive, Intrinsic};
use crate::context::Context;
use crate::error::JsResult;
use crate::value::Value;

pub(super) fn install(ctx: &mut Context) -> JsResult<()> {
    let (_, prototype) = make_constructor(ctx, Intrinsic::Boolean, None, boolean_constructor)?;

    define_method(ctx, prototype, "toString", "toString", |ctx, this, _args| {
        let primitive = this_primitive(ctx, this, Intrinsic::Boolean, "toString")?;
        let text = ctx.to_string(primitive)?;
        Ok(ctx.create_string(text))
    })?;
    define_method(ctx, prototype, "valueOf", "valueOf", |ctx, this, _args| {
        this_primitive(ctx, this, Intrinsic::Boolean, "valueOf")
    })?;
    Ok(())
}

fn boolean_constructor(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    let truth = args.first().map_or(false, |value| ctx.to_boolean(*value));
    let primitive = ctx.create_boolean(truth);
    wrap_primitive(ctx, this, Intrinsic::Boolean, primitive)
}
