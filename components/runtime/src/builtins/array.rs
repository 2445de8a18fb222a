//! `Array`, `Array.prototype` and the array iterator.
//!
//! The iterator keeps its target array and position in hidden metadata
//! slots, so it holds the array alive for as long as it is reachable.

use super::{arg, define_method, define_symbol_method, make_constructor, Intrinsic};
use crate::context::Context;
use crate::error::JsResult;
use crate::value::{Value, ValueKind};

const ITERATOR_PROTOTYPE: &str = "iteratorPrototype";
const ITERATED: &str = "iterated";
const NEXT_INDEX: &str = "nextIndex";

pub(super) fn install(ctx: &mut Context) -> JsResult<()> {
    let (ctor, prototype) = make_constructor(ctx, Intrinsic::Array, None, array_constructor)?;

    define_method(ctx, prototype, "toString", "toString", |ctx, this, _args| {
        let text = join(ctx, this, ",")?;
        Ok(ctx.create_string(text))
    })?;
    define_method(ctx, prototype, "join", "join", |ctx, this, args| {
        let separator = arg(ctx, args, 0);
        let separator = match ctx.kind(separator) {
            ValueKind::Undefined => ",".to_string(),
            _ => ctx.to_string(separator)?,
        };
        let text = join(ctx, this, &separator)?;
        Ok(ctx.create_string(text))
    })?;
    define_method(ctx, prototype, "push", "push", |ctx, this, args| {
        let mut length = ctx.array_length(this)?;
        for item in args {
            length = ctx.array_push(this, *item)?;
        }
        Ok(ctx.create_number(length as f64))
    })?;
    define_symbol_method(ctx, prototype, "iterator", array_iterator)?;

    let iterator_proto = ctx.create_object();
    define_method(ctx, iterator_proto, "next", "next", iterator_next)?;
    define_symbol_method(ctx, iterator_proto, "iterator", |_ctx, this, _args| Ok(this))?;
    ctx.set_metadata(ctor, ITERATOR_PROTOTYPE, Some(iterator_proto))?;
    Ok(())
}

/// `Array(n)` makes `n` holes; any other argument list becomes the items.
fn array_constructor(ctx: &mut Context, _this: Value, args: &[Value]) -> JsResult<Value> {
    if let [length] = args {
        if ctx.kind(*length).is_numeric() {
            let array = ctx.create_array(&[])?;
            ctx.set_array_length(array, *length)?;
            return Ok(array);
        }
    }
    ctx.create_array(args)
}

/// Join the items of an array-like; holes and nullish items render empty.
fn join(ctx: &mut Context, this: Value, separator: &str) -> JsResult<String> {
    let length = ctx.array_length(this)?;
    let mut parts = Vec::with_capacity(length);
    for index in 0..length {
        let item = ctx.get_index(this, index)?;
        if ctx.kind(item).is_nullish() {
            parts.push(String::new());
        } else {
            parts.push(ctx.to_string(item)?);
        }
    }
    Ok(parts.join(separator))
}

fn array_iterator(ctx: &mut Context, this: Value, _args: &[Value]) -> JsResult<Value> {
    let array = ctx.get_intrinsic(Intrinsic::Array)?;
    let proto = ctx.get_metadata(array, ITERATOR_PROTOTYPE)?;
    let iterator = ctx.create_object_with_prototype(proto);
    ctx.set_metadata(iterator, ITERATED, Some(this))?;
    let start = ctx.create_number(0.0);
    ctx.set_metadata(iterator, NEXT_INDEX, Some(start))?;
    Ok(iterator)
}

fn iterator_next(ctx: &mut Context, this: Value, _args: &[Value]) -> JsResult<Value> {
    if !ctx.kind(this).is_object() {
        return Err(ctx.type_error("next method called on incompatible receiver"));
    }
    let target = match ctx.get_metadata(this, ITERATED)? {
        Some(target) => target,
        None => {
            let undefined = ctx.create_undefined();
            return ctx.iterator_result(undefined, true);
        }
    };
    let index = match ctx.get_metadata(this, NEXT_INDEX)? {
        Some(index) => ctx.to_number(index)? as usize,
        None => 0,
    };
    if index < ctx.array_length(target)? {
        let item = ctx.get_index(target, index)?;
        let next = ctx.create_number((index + 1) as f64);
        ctx.set_metadata(this, NEXT_INDEX, Some(next))?;
        return ctx.iterator_result(item, false);
    }
    ctx.set_metadata(this, ITERATED, None)?;
    let undefined = ctx.create_undefined();
    ctx.iterator_result(undefined, true)
}
