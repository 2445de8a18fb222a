//! Unit tests for fields, prototypes, arrays and integrity levels

use core_types::ErrorKind;
use runtime::{Context, ContextConfig, Intrinsic, PropertyDescriptor, PropertyKey, ValueKind};

fn context() -> Context {
    Context::new(ContextConfig::default()).unwrap()
}

fn own_keys(ctx: &mut Context, obj: runtime::Value) -> String {
    let keys = ctx.get_own_keys(obj).unwrap();
    ctx.to_string(keys).unwrap()
}

#[cfg(test)]
mod integrity_tests {
    use super::*;

    #[test]
    fn test_sealed_object_keeps_field_table() {
        let mut ctx = context();
        let obj = ctx.create_object();
        let one = ctx.create_number(1.0);
        ctx.set_field(obj, "kept", one).unwrap();
        ctx.seal(obj);
        assert!(!ctx.is_extensible(obj));

        let two = ctx.create_number(2.0);
        let err = ctx.set_field(obj, "added", two).unwrap_err();
        let error = ctx.exception_error(err).unwrap();
        assert_eq!(error.kind, ErrorKind::TypeError);
        assert_eq!(error.message, "Cannot add property added, object is not extensible");
        assert_eq!(own_keys(&mut ctx, obj), "kept");

        ctx.set_field(obj, "kept", two).unwrap();
        let kept = ctx.get_field(obj, "kept").unwrap();
        assert_eq!(ctx.as_f64(kept), Some(2.0));
        assert!(ctx.delete_field(obj, &PropertyKey::from("kept")).is_err());
    }

    #[test]
    fn test_frozen_array() {
        let mut ctx = context();
        let one = ctx.create_number(1.0);
        let array = ctx.create_array(&[one]).unwrap();
        ctx.freeze(array);
        assert!(ctx.is_frozen(array));
        assert!(ctx.set_index(array, 0, one).is_err());
        assert!(ctx.set_index(array, 1, one).is_err());
        let zero = ctx.create_number(0.0);
        assert!(ctx.set_array_length(array, zero).is_err());
        assert_eq!(ctx.array_length(array).unwrap(), 1);
    }

    #[test]
    fn test_prevent_extensions_still_allows_delete() {
        let mut ctx = context();
        let obj = ctx.create_object();
        let one = ctx.create_number(1.0);
        ctx.set_field(obj, "gone", one).unwrap();
        ctx.prevent_extensions(obj);
        assert!(!ctx.is_sealed(obj));
        assert!(ctx.delete_field(obj, &PropertyKey::from("gone")).unwrap());
        assert_eq!(own_keys(&mut ctx, obj), "");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    #[test]
    fn test_read_only_and_locked_fields() {
        let mut ctx = context();
        let obj = ctx.create_object();
        let pi = ctx.create_number(2.5);
        ctx.define_property(obj, "pi", PropertyDescriptor::data(pi).read_only().locked())
            .unwrap();
        let three = ctx.create_number(3.0);
        let err = ctx.set_field(obj, "pi", three).unwrap_err();
        assert_eq!(
            ctx.exception_error(err).unwrap().message,
            "Cannot assign to read only property 'pi' of object '#<Object>'"
        );
        let err = ctx
            .define_property(obj, "pi", PropertyDescriptor::data(three))
            .unwrap_err();
        assert_eq!(
            ctx.exception_error(err).unwrap().message,
            "Cannot redefine property: pi"
        );
    }

    #[test]
    fn test_getter_sees_receiver() {
        let mut ctx = context();
        let proto = ctx.create_object();
        let getter = ctx
            .create_native_function("get area", |ctx, this, _args| {
                let w = ctx.get_field(this, "w")?;
                let h = ctx.get_field(this, "h")?;
                ctx.mul(w, h)
            })
            .unwrap();
        ctx.define_property(proto, "area", PropertyDescriptor::accessor(Some(getter), None))
            .unwrap();

        let rect = ctx.create_object_with_prototype(Some(proto));
        let w = ctx.create_number(3.0);
        let h = ctx.create_number(4.0);
        ctx.set_field(rect, "w", w).unwrap();
        ctx.set_field(rect, "h", h).unwrap();
        let area = ctx.get_field(rect, "area").unwrap();
        assert_eq!(ctx.as_f64(area), Some(12.0));
    }

    #[test]
    fn test_hidden_fields_are_not_listed() {
        let mut ctx = context();
        let obj = ctx.create_object();
        let one = ctx.create_number(1.0);
        ctx.set_field(obj, "shown", one).unwrap();
        ctx.define_property(obj, "hidden", PropertyDescriptor::data(one).hidden())
            .unwrap();
        assert_eq!(own_keys(&mut ctx, obj), "shown");
        let hidden = ctx.get_field(obj, "hidden").unwrap();
        assert_eq!(ctx.as_f64(hidden), Some(1.0));
    }

    #[test]
    fn test_member_access_with_computed_keys() {
        let mut ctx = context();
        let obj = ctx.create_object();
        let key = ctx.create_number(7.0);
        let value = ctx.create_string("seven");
        ctx.set_member(obj, key, value).unwrap();
        let read = ctx.get_field(obj, "7").unwrap();
        assert_eq!(ctx.to_string(read).unwrap(), "seven");
    }

    #[test]
    fn test_reading_from_undefined_raises() {
        let mut ctx = context();
        let undefined = ctx.create_undefined();
        let err = ctx.get_field(undefined, "x").unwrap_err();
        assert_eq!(
            ctx.exception_error(err).unwrap().message,
            "Cannot read properties of undefined (reading 'x')"
        );
    }
}

#[cfg(test)]
mod prototype_tests {
    use super::*;

    #[test]
    fn test_bootstrap_prototype_chain() {
        let mut ctx = context();
        let object = ctx.get_intrinsic(Intrinsic::Object).unwrap();
        let object_proto = ctx.get_field(object, "prototype").unwrap();
        let top = ctx.get_prototype_of(object_proto).unwrap();
        assert_eq!(ctx.kind(top), ValueKind::Null);

        let function = ctx.get_intrinsic(Intrinsic::Function).unwrap();
        let function_proto = ctx.get_field(function, "prototype").unwrap();
        let parent = ctx.get_prototype_of(function_proto).unwrap();
        assert!(ctx.is_strict_equal(parent, object_proto));
    }

    #[test]
    fn test_prototype_cycle_is_refused() {
        let mut ctx = context();
        let a = ctx.create_object();
        let b = ctx.create_object_with_prototype(Some(a));
        let err = ctx.set_prototype(a, Some(b)).unwrap_err();
        assert_eq!(ctx.exception_error(err).unwrap().message, "Cyclic __proto__ value");
        let missing = ctx.get_field(b, "missing").unwrap();
        assert_eq!(ctx.kind(missing), ValueKind::Undefined);
    }

    #[test]
    fn test_primitive_methods_come_from_wrappers() {
        let mut ctx = context();
        let text = ctx.create_string("hi");
        let proto = ctx.get_prototype_of(text).unwrap();
        let string = ctx.get_intrinsic(Intrinsic::String).unwrap();
        let string_proto = ctx.get_field(string, "prototype").unwrap();
        assert!(ctx.is_strict_equal(proto, string_proto));
        let length = ctx.get_field(text, "length").unwrap();
        assert_eq!(ctx.as_f64(length), Some(2.0));
        let ctor = ctx.get_constructor_of(text).unwrap();
        assert!(ctx.is_intrinsic(ctor, Intrinsic::String));
    }
}

#[cfg(test)]
mod boxed_primitive_tests {
    use super::*;

    #[test]
    fn test_new_number_value_of() {
        let mut ctx = context();
        let number = ctx.get_intrinsic(Intrinsic::Number).unwrap();
        let five = ctx.create_number(5.0);
        let boxed = ctx.construct(number, &[five]).unwrap();
        assert!(ctx.kind(boxed).is_object());
        assert_eq!(ctx.type_of(boxed), "object");

        let value_of = ctx.get_field(boxed, "valueOf").unwrap();
        let unboxed = ctx.call(value_of, boxed, &[]).unwrap();
        assert_eq!(ctx.kind(unboxed), ValueKind::Number);
        assert!(ctx.is_strict_equal(unboxed, five));
    }

    #[test]
    fn test_value_of_on_plain_object_raises() {
        let mut ctx = context();
        let number = ctx.get_intrinsic(Intrinsic::Number).unwrap();
        let proto = ctx.get_field(number, "prototype").unwrap();
        let value_of = ctx.get_field(proto, "valueOf").unwrap();
        let impostor = ctx.create_object_with_prototype(Some(proto));
        let err = ctx.call(value_of, impostor, &[]).unwrap_err();
        assert_eq!(ctx.exception_error(err).unwrap().kind, ErrorKind::TypeError);
    }

    #[test]
    fn test_loose_equality_unboxes() {
        let mut ctx = context();
        let number = ctx.get_intrinsic(Intrinsic::Number).unwrap();
        let five = ctx.create_number(5.0);
        let boxed = ctx.construct(number, &[five]).unwrap();
        assert!(ctx.is_equal(boxed, five).unwrap());
        assert!(!ctx.is_strict_equal(boxed, five));
    }
}
