//! `Symbol`, the shared registry and the well-known symbols.
//!
//! This module installs:
//! - `Symbol(description)`, which is callable but not constructible
//! - `Symbol.for` / `Symbol.keyFor` over the per-context registry
//! - the well-known symbols as read-only statics (`Symbol.iterator`, ...)
//! - `toString`, `valueOf` and `[Symbol.toPrimitive]` on the prototype

use super::{
    arg, define_method, define_symbol_method, is_construct_call, make_constructor,
    this_primitive, Intrinsic, WELL_KNOWN_SYMBOLS,
};
use crate::context::Context;
use crate::error::JsResult;
use crate::object::PropertyDescriptor;
use crate::payload::Payload;
use crate::value::{Value, ValueKind};

pub(super) fn install(ctx: &mut Context) -> JsResult<()> {
    let (ctor, prototype) = make_constructor(ctx, Intrinsic::Symbol, None, symbol_constructor)?;

    for name in WELL_KNOWN_SYMBOLS {
        let symbol = ctx.well_known_symbol(name)?;
        ctx.define_property(
            ctor,
            name,
            PropertyDescriptor::data(symbol).hidden().read_only().locked(),
        )?;
    }

    define_method(ctx, ctor, "for", "for", |ctx, _this, args| {
        let key = arg(ctx, args, 0);
        let key = ctx.to_string(key)?;
        ctx.symbol_for(&key)
    })?;
    define_method(ctx, ctor, "keyFor", "keyFor", |ctx, _this, args| {
        let symbol = arg(ctx, args, 0);
        if ctx.kind(symbol) != ValueKind::Symbol {
            let message = format!("{} is not a symbol", ctx.describe(symbol));
            return Err(ctx.type_error(message));
        }
        match ctx.symbol_key_for(symbol) {
            Some(key) => Ok(ctx.create_string(key)),
            None => Ok(ctx.create_undefined()),
        }
    })?;

    define_method(ctx, prototype, "toString", "toString", |ctx, this, _args| {
        let symbol = this_primitive(ctx, this, Intrinsic::Symbol, "toString")?;
        let text = symbol_text(ctx, symbol);
        Ok(ctx.create_string(text))
    })?;
    define_method(ctx, prototype, "valueOf", "valueOf", |ctx, this, _args| {
        this_primitive(ctx, this, Intrinsic::Symbol, "valueOf")
    })?;
    define_symbol_method(ctx, prototype, "toPrimitive", |ctx, this, _args| {
        this_primitive(ctx, this, Intrinsic::Symbol, "[Symbol.toPrimitive]")
    })?;
    Ok(())
}

fn symbol_constructor(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    if is_construct_call(ctx, this, Intrinsic::Symbol) {
        return Err(ctx.type_error("Symbol is not a constructor"));
    }
    let description = arg(ctx, args, 0);
    let description = match ctx.kind(description) {
        ValueKind::Undefined => None,
        _ => Some(ctx.to_string(description)?),
    };
    Ok(ctx.create_symbol(description.as_deref()))
}

/// `Symbol(description)`
fn symbol_text(ctx: &Context, symbol: Value) -> String {
    match ctx.payload(symbol) {
        Some(Payload::Symbol { description, .. }) => {
            format!("Symbol({})", description.as_deref().unwrap_or(""))
        }
        _ => "Symbol()".to_string(),
    }
}
