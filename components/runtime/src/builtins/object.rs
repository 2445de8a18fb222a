//! `Object`, `Object.prototype` and the reflective statics.
//!
//! Installing `Object` also closes the bootstrap loop: `Function.prototype`
//! and the global object are re-parented onto `Object.prototype`.

use super::{arg, define_method, is_construct_call, make_constructor, Intrinsic};
use crate::context::Context;
use crate::error::JsResult;
use crate::value::{Value, ValueKind};

pub(super) fn install(ctx: &mut Context) -> JsResult<()> {
    let function = ctx.get_intrinsic(Intrinsic::Function)?;
    let function_proto = ctx.get_field(function, "prototype")?;

    let (ctor, prototype) = make_constructor(ctx, Intrinsic::Object, None, object_constructor)?;
    ctx.set_prototype(function_proto, Some(prototype))?;
    let global = ctx.global();
    ctx.set_prototype(global, Some(prototype))?;

    define_method(ctx, prototype, "toString", "toString", object_to_string)?;
    define_method(ctx, prototype, "valueOf", "valueOf", |_ctx, this, _args| Ok(this))?;

    define_method(ctx, ctor, "keys", "keys", |ctx, _this, args| {
        let target = arg(ctx, args, 0);
        ctx.get_own_keys(target)
    })?;
    define_method(ctx, ctor, "create", "create", |ctx, _this, args| {
        let proto = arg(ctx, args, 0);
        match ctx.kind(proto) {
            ValueKind::Null => Ok(ctx.create_object_with_prototype(None)),
            kind if kind.is_object() => Ok(ctx.create_object_with_prototype(Some(proto))),
            _ => Err(ctx.type_error("Object prototype may only be an Object or null")),
        }
    })?;
    define_method(ctx, ctor, "getPrototypeOf", "getPrototypeOf", |ctx, _this, args| {
        let target = arg(ctx, args, 0);
        ctx.get_prototype_of(target)
    })?;
    define_method(ctx, ctor, "setPrototypeOf", "setPrototypeOf", |ctx, _this, args| {
        let target = arg(ctx, args, 0);
        let proto = arg(ctx, args, 1);
        ctx.set_prototype(target, Some(proto))?;
        Ok(target)
    })?;
    define_method(ctx, ctor, "preventExtensions", "preventExtensions", |ctx, _this, args| {
        let target = arg(ctx, args, 0);
        Ok(ctx.prevent_extensions(target))
    })?;
    define_method(ctx, ctor, "seal", "seal", |ctx, _this, args| {
        let target = arg(ctx, args, 0);
        Ok(ctx.seal(target))
    })?;
    define_method(ctx, ctor, "freeze", "freeze", |ctx, _this, args| {
        let target = arg(ctx, args, 0);
        Ok(ctx.freeze(target))
    })?;
    define_method(ctx, ctor, "isExtensible", "isExtensible", |ctx, _this, args| {
        let target = arg(ctx, args, 0);
        let result = ctx.is_extensible(target);
        Ok(ctx.create_boolean(result))
    })?;
    define_method(ctx, ctor, "isSealed", "isSealed", |ctx, _this, args| {
        let target = arg(ctx, args, 0);
        let result = ctx.is_sealed(target);
        Ok(ctx.create_boolean(result))
    })?;
    define_method(ctx, ctor, "isFrozen", "isFrozen", |ctx, _this, args| {
        let target = arg(ctx, args, 0);
        let result = ctx.is_frozen(target);
        Ok(ctx.create_boolean(result))
    })?;
    Ok(())
}

/// `Object(value)`: boxes primitives, passes objects through and makes a
/// fresh object for `null` and `undefined`.
fn object_constructor(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    let value = arg(ctx, args, 0);
    let kind = ctx.kind(value);
    if kind.is_nullish() {
        if is_construct_call(ctx, this, Intrinsic::Object) {
            return Ok(this);
        }
        return Ok(ctx.create_object());
    }
    ctx.pack(value)
}

fn object_to_string(ctx: &mut Context, this: Value, _args: &[Value]) -> JsResult<Value> {
    let text = match ctx.kind(this) {
        ValueKind::Undefined | ValueKind::Uninitialized => "[object Undefined]".to_string(),
        ValueKind::Null => "[object Null]".to_string(),
        kind if kind.is_object() => ctx.object_to_string(this),
        _ => {
            let boxed = ctx.pack(this)?;
            ctx.object_to_string(boxed)
        }
    };
    Ok(ctx.create_string(text))
}
