//! Built-in constructors and the bootstrap that wires them together.
//!
//! The bootstrap runs once per [`Context`], in dependency order:
//! - `Function` first, since every other constructor is a function
//! - `Object`, which then re-parents `Function.prototype` and the global
//!   object onto `Object.prototype`
//! - `Array`, `Number`, `Boolean`, `String`, `Symbol`, `BigInt`
//! - `GeneratorFunction` and the `Generator` prototype

mod array;
mod bigint;
mod boolean;
mod function;
mod generator;
mod number;
mod object;
mod string;
mod symbol;

use log::debug;

use crate::context::Context;
use crate::error::JsResult;
use crate::object::{PropertyDescriptor, PropertyKey};
use crate::types::Pack;
use crate::value::Value;

/// The built-in constructors a context keeps track of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intrinsic {
    /// `Function`
    Function,
    /// `Object`
    Object,
    /// `Array`
    Array,
    /// `Number`
    Number,
    /// `Boolean`
    Boolean,
    /// `String`
    String,
    /// `Symbol`
    Symbol,
    /// `BigInt`
    BigInt,
    /// `GeneratorFunction`
    GeneratorFunction,
    /// `Generator`
    Generator,
}

impl Intrinsic {
    /// Global name of the constructor.
    pub fn name(self) -> &'static str {
        match self {
            Intrinsic::Function => "Function",
            Intrinsic::Object => "Object",
            Intrinsic::Array => "Array",
            Intrinsic::Number => "Number",
            Intrinsic::Boolean => "Boolean",
            Intrinsic::String => "String",
            Intrinsic::Symbol => "Symbol",
            Intrinsic::BigInt => "BigInt",
            Intrinsic::GeneratorFunction => "GeneratorFunction",
            Intrinsic::Generator => "Generator",
        }
    }
}

/// Names of the well-known symbols, exposed as `Symbol.<name>`.
pub(crate) const WELL_KNOWN_SYMBOLS: [&str; 11] = [
    "asyncIterator",
    "hasInstance",
    "isConcatSpreadable",
    "iterator",
    "match",
    "matchAll",
    "replace",
    "search",
    "species",
    "toPrimitive",
    "toStringTag",
];

/// Install every built-in on a fresh context.
pub(crate) fn bootstrap(ctx: &mut Context) -> JsResult<()> {
    for name in WELL_KNOWN_SYMBOLS {
        let symbol = ctx.create_symbol(Some(&format!("Symbol.{}", name)));
        ctx.register_well_known(name, symbol)?;
    }

    let scope = ctx.push_scope();
    let installed = install_all(ctx);
    ctx.pop_scope();
    installed?;

    debug!("bootstrap done, scope {:?} released", scope);
    Ok(())
}

fn install_all(ctx: &mut Context) -> JsResult<()> {
    function::install(ctx)?;
    object::install(ctx)?;
    array::install(ctx)?;
    number::install(ctx)?;
    boolean::install(ctx)?;
    string::install(ctx)?;
    symbol::install(ctx)?;
    bigint::install(ctx)?;
    generator::install(ctx)?;

    let global = ctx.global();
    ctx.define_property(global, "global", PropertyDescriptor::data(global).hidden())?;
    Ok(())
}

/// Create the constructor `which` with a fresh prototype object and make it
/// a global binding.
///
/// The prototype inherits from `parent`, or from `Object.prototype` once it
/// exists.
pub(crate) fn make_constructor<F>(
    ctx: &mut Context,
    which: Intrinsic,
    parent: Option<Value>,
    op: F,
) -> JsResult<(Value, Value)>
where
    F: Fn(&mut Context, Value, &[Value]) -> JsResult<Value> + 'static,
{
    let ctor = ctx.create_native_function(which.name(), op)?;
    let parent = match parent {
        Some(parent) => Some(parent),
        None if ctx.is_bootstrapped(Intrinsic::Object) => {
            let object = ctx.get_intrinsic(Intrinsic::Object)?;
            Some(ctx.get_field(object, "prototype")?)
        }
        None => None,
    };
    let prototype = ctx.create_object_with_prototype(parent);
    install_prototype(ctx, ctor, prototype)?;
    ctx.register_intrinsic(which, ctor)?;
    if which != Intrinsic::Generator {
        let global = ctx.global();
        ctx.define_property(global, which.name(), PropertyDescriptor::data(ctor).hidden())?;
    }
    Ok((ctor, prototype))
}

/// Link `ctor.prototype` and `prototype.constructor`.
pub(crate) fn install_prototype(ctx: &mut Context, ctor: Value, prototype: Value) -> JsResult<()> {
    ctx.define_property(
        ctor,
        "prototype",
        PropertyDescriptor::data(prototype).hidden().read_only().locked(),
    )?;
    ctx.define_property(prototype, "constructor", PropertyDescriptor::data(ctor).hidden())?;
    Ok(())
}

/// Define a non-enumerable native method on `target`.
pub(crate) fn define_method<F>(
    ctx: &mut Context,
    target: Value,
    key: impl Into<PropertyKey>,
    name: &str,
    op: F,
) -> JsResult<Value>
where
    F: Fn(&mut Context, Value, &[Value]) -> JsResult<Value> + 'static,
{
    let method = ctx.create_native_function(name, op)?;
    ctx.define_property(target, key, PropertyDescriptor::data(method).hidden())?;
    Ok(method)
}

/// Define a method keyed by the well-known symbol `symbol`.
pub(crate) fn define_symbol_method<F>(
    ctx: &mut Context,
    target: Value,
    symbol: &str,
    op: F,
) -> JsResult<Value>
where
    F: Fn(&mut Context, Value, &[Value]) -> JsResult<Value> + 'static,
{
    let key = match ctx.well_known_key(symbol) {
        Some(key) => key,
        None => return Err(ctx.internal_error(format!("Unknown well-known symbol '{}'", symbol))),
    };
    define_method(ctx, target, key, &format!("[Symbol.{}]", symbol), op)
}

/// Argument `index`, or `undefined` when it was not passed.
pub(crate) fn arg(ctx: &mut Context, args: &[Value], index: usize) -> Value {
    match args.get(index) {
        Some(value) => *value,
        None => ctx.create_undefined(),
    }
}

/// Returns true when a built-in constructor was reached through
/// `construct`: the receiver is a fresh object built by `which`.
pub(crate) fn is_construct_call(ctx: &mut Context, this: Value, which: Intrinsic) -> bool {
    if !ctx.kind(this).is_object() {
        return false;
    }
    match ctx.get_constructor_of(this) {
        Ok(ctor) => ctx.is_intrinsic(ctor, which),
        Err(_) => false,
    }
}

/// The primitive behind `this` for the prototype methods of the wrapper
/// constructor `which`.
///
/// A primitive of the right kind is returned as is; a wrapper object must
/// have been built by `which`. Anything else raises TYPE.
pub(crate) fn this_primitive(
    ctx: &mut Context,
    this: Value,
    which: Intrinsic,
    method: &str,
) -> JsResult<Value> {
    let pack = ctx.payload(this).map(|payload| payload.descriptor().pack());
    if let Some(Ok(Pack::Wrap(kind))) = pack {
        if kind == which {
            return Ok(this);
        }
    }
    if is_construct_call(ctx, this, which) {
        if let Some(primitive) = ctx.get_metadata(this, crate::context::PRIMITIVE_SLOT)? {
            return Ok(primitive);
        }
    }
    Err(ctx.type_error(format!(
        "{}.prototype.{} requires that 'this' be a {}",
        which.name(),
        method,
        which.name()
    )))
}

/// Shared body of the wrapper constructors: a call returns the coerced
/// primitive; `new` stores it on the fresh wrapper and returns `undefined`
/// so the wrapper is kept.
pub(crate) fn wrap_primitive(
    ctx: &mut Context,
    this: Value,
    which: Intrinsic,
    primitive: Value,
) -> JsResult<Value> {
    if is_construct_call(ctx, this, which) {
        ctx.set_metadata(this, crate::context::PRIMITIVE_SLOT, Some(primitive))?;
        return Ok(ctx.create_undefined());
    }
    Ok(primitive)
}
