//! `Number` and `Number.prototype`.

use super::{arg, define_method, make_constructor, this_primitive, wrap_primitive, Intrinsic};
use crate::context::Context;
use crate::error::JsResult;
use crate::object::PropertyDescriptor;
use crate::value::Value;

/// Number.MAX_SAFE_INTEGER
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub(super) fn install(ctx: &mut Context) -> JsResult<()> {
    let (ctor, prototype) = make_constructor(ctx, Intrinsic::Number, None, number_constructor)?;

    define_method(ctx, prototype, "toString", "toString", |ctx, this, _args| {
        let primitive = this_primitive(ctx, this, Intrinsic::Number, "toString")?;
        let text = ctx.to_string(primitive)?;
        Ok(ctx.create_string(text))
    })?;
    define_method(ctx, prototype, "valueOf", "valueOf", |ctx, this, _args| {
        this_primitive(ctx, this, Intrinsic::Number, "valueOf")
    })?;

    for (name, value) in [
        ("NaN", f64::NAN),
        ("POSITIVE_INFINITY", f64::INFINITY),
        ("NEGATIVE_INFINITY", f64::NEG_INFINITY),
        ("MAX_VALUE", f64::MAX),
        ("MIN_VALUE", f64::MIN_POSITIVE),
        ("MAX_SAFE_INTEGER", MAX_SAFE_INTEGER),
        ("MIN_SAFE_INTEGER", -MAX_SAFE_INTEGER),
        ("EPSILON", f64::EPSILON),
    ] {
        let constant = ctx.create_number(value);
        ctx.define_property(
            ctor,
            name,
            PropertyDescriptor::data(constant).hidden().read_only().locked(),
        )?;
    }

    define_predicate(ctx, ctor, "isNaN", f64::is_nan)?;
    define_predicate(ctx, ctor, "isFinite", f64::is_finite)?;
    define_predicate(ctx, ctor, "isInteger", |n| n.is_finite() && n.trunc() == n)?;
    define_predicate(ctx, ctor, "isSafeInteger", |n| {
        n.is_finite() && n.trunc() == n && n.abs() <= MAX_SAFE_INTEGER
    })?;
    Ok(())
}

/// `Number.<name>(value)`: false for anything that is not already a number.
fn define_predicate(
    ctx: &mut Context,
    ctor: Value,
    name: &str,
    test: fn(f64) -> bool,
) -> JsResult<()> {
    define_method(ctx, ctor, name, name, move |ctx, _this, args| {
        let value = arg(ctx, args, 0);
        let holds = ctx.as_f64(value).map_or(false, test);
        Ok(ctx.create_boolean(holds))
    })?;
    Ok(())
}

fn number_constructor(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    let number = match args.first() {
        Some(value) => ctx.to_number(*value)?,
        None => 0.0,
    };
    let primitive = ctx.create_number(number);
    wrap_primitive(ctx, this, Intrinsic::Number, primitive)
}
