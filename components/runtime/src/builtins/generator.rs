//! `GeneratorFunction` and the `Generator` prototype.

use core_types::ErrorKind;

use super::{arg, define_method, define_symbol_method, make_constructor, Intrinsic};
use crate::context::{Context, GeneratorResume};
use crate::error::JsResult;
use crate::object::PropertyDescriptor;
use crate::value::Value;

pub(super) fn install(ctx: &mut Context) -> JsResult<()> {
    let function = ctx.get_intrinsic(Intrinsic::Function)?;
    let function_proto = ctx.get_field(function, "prototype")?;
    make_constructor(
        ctx,
        Intrinsic::GeneratorFunction,
        Some(function_proto),
        |ctx, _this, _args| {
            Err(ctx.create_exception(
                ErrorKind::Error,
                "Code generation from strings is not supported",
            ))
        },
    )?;

    let (_, prototype) = make_constructor(ctx, Intrinsic::Generator, None, |ctx, _this, _args| {
        Err(ctx.type_error("Generator is not a constructor"))
    })?;
    define_method(ctx, prototype, "next", "next", |ctx, this, args| {
        let value = arg(ctx, args, 0);
        ctx.generator_resume(this, GeneratorResume::Next(value))
    })?;
    define_method(ctx, prototype, "return", "return", |ctx, this, args| {
        let value = arg(ctx, args, 0);
        ctx.generator_resume(this, GeneratorResume::Return(value))
    })?;
    define_method(ctx, prototype, "throw", "throw", |ctx, this, args| {
        let value = arg(ctx, args, 0);
        ctx.generator_resume(this, GeneratorResume::Throw(value))
    })?;
    define_symbol_method(ctx, prototype, "iterator", |_ctx, this, _args| Ok(this))?;

    if let Some(tag) = ctx.well_known_key("toStringTag") {
        let name = ctx.create_string("Generator");
        ctx.define_property(prototype, tag, PropertyDescriptor::data(name).hidden().read_only())?;
    }
    Ok(())
}
