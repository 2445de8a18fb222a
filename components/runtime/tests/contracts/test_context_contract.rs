//! Contract tests verifying the public Context API.
//! These tests pin down the behavior an evaluator built on the runtime
//! relies on.

use core_types::{BigInt, ErrorKind};
use runtime::{
    descriptor, BinaryOp, Context, ContextConfig, Intrinsic, PropertyDescriptor, Relation,
    ValueKind,
};

fn context() -> Context {
    Context::new(ContextConfig::default()).unwrap()
}

/// Test Context contract: new(ContextConfig) -> Result<Context, RuntimeError>
#[test]
fn contract_context_new() {
    let ctx = context();
    assert_eq!(ctx.call_depth(), 1);
    assert_eq!(ctx.current_scope(), ctx.root_scope());
    assert_eq!(ctx.kind(ctx.global()), ValueKind::Object);
    for which in [
        Intrinsic::Function,
        Intrinsic::Object,
        Intrinsic::Array,
        Intrinsic::Number,
        Intrinsic::Boolean,
        Intrinsic::String,
        Intrinsic::Symbol,
        Intrinsic::BigInt,
        Intrinsic::GeneratorFunction,
        Intrinsic::Generator,
    ] {
        assert!(ctx.is_bootstrapped(which), "{} missing", which.name());
    }
}

/// Test Context contract: config is carried unchanged
#[test]
fn contract_context_config() {
    let config = ContextConfig::default().with_entry_function("boot");
    let mut ctx = Context::new(config.clone()).unwrap();
    assert_eq!(ctx.config(), &config);
    let err = ctx.type_error("x");
    let frames = &ctx.exception_error(err).unwrap().stack;
    assert_eq!(frames[0].function_name.as_deref(), Some("boot"));
}

/// Test descriptor contract: descriptor(kind).kind() == kind
#[test]
fn contract_one_descriptor_per_kind() {
    for kind in [
        ValueKind::Undefined,
        ValueKind::Null,
        ValueKind::Boolean,
        ValueKind::Number,
        ValueKind::String,
        ValueKind::BigInt,
        ValueKind::Object,
        ValueKind::Array,
        ValueKind::Function,
    ] {
        assert_eq!(descriptor(kind).kind(), kind);
    }
}

/// Test factory contract: create_* -> Value of the matching kind
#[test]
fn contract_factories() {
    let mut ctx = context();
    let cases = [
        (ctx.create_undefined(), ValueKind::Undefined, "undefined"),
        (ctx.create_null(), ValueKind::Null, "object"),
        (ctx.create_boolean(true), ValueKind::Boolean, "boolean"),
        (ctx.create_number(1.5), ValueKind::Number, "number"),
        (ctx.create_number(f64::NAN), ValueKind::NaN, "number"),
        (ctx.create_number(f64::INFINITY), ValueKind::Infinity, "number"),
        (ctx.create_string("s"), ValueKind::String, "string"),
        (ctx.create_bigint(BigInt::from(3i64)), ValueKind::BigInt, "bigint"),
        (ctx.create_symbol(Some("s")), ValueKind::Symbol, "symbol"),
        (ctx.create_object(), ValueKind::Object, "object"),
    ];
    for (value, kind, type_of) in cases {
        assert_eq!(ctx.kind(value), kind);
        assert_eq!(ctx.type_of(value), type_of);
    }
}

/// Test operator contract: binary(op, a, b) follows the operand kinds
#[test]
fn contract_binary_operators() {
    let mut ctx = context();
    let two = ctx.create_number(2.0);
    let text = ctx.create_string("x");
    let joined = ctx.binary(BinaryOp::Add, two, text).unwrap();
    assert_eq!(ctx.to_string(joined).unwrap(), "2x");

    let big = ctx.create_bigint(BigInt::from(7i64));
    let err = ctx.binary(BinaryOp::Mul, big, two).unwrap_err();
    let error = ctx.exception_error(err).unwrap();
    assert_eq!(error.kind, ErrorKind::TypeError);
    assert_eq!(
        error.message,
        "Cannot mix BigInt and other types, use explicit conversions"
    );

    let zero = ctx.create_bigint(BigInt::from(0i64));
    let err = ctx.div(big, zero).unwrap_err();
    assert_eq!(ctx.exception_error(err).unwrap().kind, ErrorKind::RangeError);
}

/// Test comparison contract: compare(relation, a, b) -> bool
#[test]
fn contract_relations() {
    let mut ctx = context();
    let one = ctx.create_number(1.0);
    let two = ctx.create_number(2.0);
    assert!(ctx.compare(Relation::Lt, one, two).unwrap());

    let big_one = ctx.create_bigint(BigInt::from(1i64));
    let big_two = ctx.create_bigint(BigInt::from(2i64));
    assert!(ctx.compare(Relation::Le, big_one, big_two).unwrap());
    let err = ctx.compare(Relation::Lt, one, big_two).unwrap_err();
    assert_eq!(ctx.exception_error(err).unwrap().kind, ErrorKind::TypeError);
    assert!(ctx.is_equal(one, big_one).unwrap());

    let nan = ctx.create_number(f64::NAN);
    assert!(!ctx.compare(Relation::Lt, nan, one).unwrap());
    assert!(!ctx.compare(Relation::Ge, nan, one).unwrap());
}

/// Test equality contract: strict equality never converts
#[test]
fn contract_equality() {
    let mut ctx = context();
    let one = ctx.create_number(1.0);
    let text = ctx.create_string("1");
    assert!(!ctx.is_strict_equal(one, text));
    assert!(ctx.is_equal(one, text).unwrap());

    let a = ctx.create_object();
    let b = ctx.create_object();
    let alias = ctx.clone_value(a).unwrap();
    assert!(ctx.is_strict_equal(a, alias));
    assert!(!ctx.is_strict_equal(a, b));

    let nan = ctx.create_number(f64::NAN);
    assert!(!ctx.is_strict_equal(nan, nan));
}

/// Test property contract: set_field then get_field round-trips through the prototype chain
#[test]
fn contract_prototype_lookup() {
    let mut ctx = context();
    let parent = ctx.create_object();
    let value = ctx.create_string("inherited");
    ctx.set_field(parent, "shared", value).unwrap();
    let child = ctx.create_object_with_prototype(Some(parent));
    let read = ctx.get_field(child, "shared").unwrap();
    assert_eq!(ctx.to_string(read).unwrap(), "inherited");

    let own = ctx.create_string("own");
    ctx.set_field(child, "shared", own).unwrap();
    let read = ctx.get_field(parent, "shared").unwrap();
    assert_eq!(ctx.to_string(read).unwrap(), "inherited");
}

/// Test symbol contract: symbol keys are distinct from string keys
#[test]
fn contract_symbol_keys() {
    let mut ctx = context();
    let obj = ctx.create_object();
    let symbol = ctx.create_symbol(Some("tag"));
    let value = ctx.create_number(1.0);
    ctx.set_member(obj, symbol, value).unwrap();
    let by_name = ctx.get_field(obj, "tag").unwrap();
    assert_eq!(ctx.kind(by_name), ValueKind::Undefined);
    let by_symbol = ctx.get_member(obj, symbol).unwrap();
    assert_eq!(ctx.as_f64(by_symbol), Some(1.0));

    let shared = ctx.symbol_for("app.key").unwrap();
    let again = ctx.symbol_for("app.key").unwrap();
    assert!(ctx.is_strict_equal(shared, again));
    assert_eq!(ctx.symbol_key_for(shared).as_deref(), Some("app.key"));
    assert_eq!(ctx.symbol_key_for(symbol), None);

    let iterator = ctx.well_known_symbol("iterator").unwrap();
    let symbol_ctor = ctx.get_intrinsic(Intrinsic::Symbol).unwrap();
    let exposed = ctx.get_field(symbol_ctor, "iterator").unwrap();
    assert!(ctx.is_strict_equal(iterator, exposed));
    assert!(ctx.to_string(iterator).is_err());
}

/// Test private field contract: #name is invisible to ordinary lookup
#[test]
fn contract_private_fields() {
    let mut ctx = context();
    let obj = ctx.create_object();
    let secret = ctx.create_number(9.0);
    ctx.define_private_property(obj, "secret", PropertyDescriptor::data(secret))
        .unwrap();
    let plain = ctx.get_field(obj, "secret").unwrap();
    assert_eq!(ctx.kind(plain), ValueKind::Undefined);

    let err = ctx
        .define_private_property(obj, "secret", PropertyDescriptor::data(secret))
        .unwrap_err();
    assert_eq!(
        ctx.exception_error(err).unwrap().message,
        "Cannot initialize #secret twice on the same object"
    );

    let other = ctx.create_object();
    let err = ctx.get_private_field(other, "secret").unwrap_err();
    assert_eq!(ctx.exception_error(err).unwrap().kind, ErrorKind::TypeError);
}

/// Test metadata contract: metadata slots are not properties
#[test]
fn contract_metadata() {
    let mut ctx = context();
    let obj = ctx.create_object();
    let tag = ctx.create_string("meta");
    ctx.set_metadata(obj, "tag", Some(tag)).unwrap();
    let read = ctx.get_metadata(obj, "tag").unwrap().unwrap();
    assert_eq!(ctx.to_string(read).unwrap(), "meta");
    let field = ctx.get_field(obj, "tag").unwrap();
    assert_eq!(ctx.kind(field), ValueKind::Undefined);

    ctx.set_metadata(obj, "tag", None).unwrap();
    assert!(ctx.get_metadata(obj, "tag").unwrap().is_none());
}

/// Test array contract: indices and length stay in step
#[test]
fn contract_arrays() {
    let mut ctx = context();
    let array = ctx.create_array(&[]).unwrap();
    let value = ctx.create_string("last");
    ctx.set_index(array, 4, value).unwrap();
    assert_eq!(ctx.array_length(array).unwrap(), 5);
    let hole = ctx.get_index(array, 1).unwrap();
    assert_eq!(ctx.kind(hole), ValueKind::Undefined);

    let two = ctx.create_number(2.0);
    ctx.set_array_length(array, two).unwrap();
    let gone = ctx.get_index(array, 4).unwrap();
    assert_eq!(ctx.kind(gone), ValueKind::Undefined);
    assert_eq!(ctx.array_push(array, value).unwrap(), 3);
}
