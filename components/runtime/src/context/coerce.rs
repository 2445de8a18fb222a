//! Conversions between kinds, boxing and equality.

use core_types::BigInt;

use super::Context;
use crate::builtins::Intrinsic;
use crate::error::JsResult;
use crate::object::{Field, JsObject, PropertyKey};
use crate::payload::Payload;
use crate::types::Pack;
use crate::value::{Value, ValueKind};

/// Metadata slot holding the primitive inside a wrapper object.
pub(crate) const PRIMITIVE_SLOT: &str = "primitive";

impl Context {
    /// String conversion.
    ///
    /// Objects use their `toString` method when it is callable and
    /// `Object.prototype.toString` otherwise.
    pub fn to_string(&mut self, value: Value) -> JsResult<String> {
        let kind = self.kind(value);
        if kind == ValueKind::Exception {
            let thrown = match self.payload(value) {
                Some(Payload::Exception(record)) => record.thrown,
                _ => None,
            };
            if let Some(atom) = thrown {
                let thrown = self.create_value(atom)?;
                return self.to_string(thrown);
            }
        }
        if kind.is_object() {
            return self.object_string(value);
        }
        let converted = match self.payload(value) {
            Some(payload) => payload.descriptor().to_string(payload),
            None => return Err(self.stale(value)),
        };
        converted.map_err(|err| self.throw(err))
    }

    fn object_string(&mut self, value: Value) -> JsResult<String> {
        let method = self.lookup(value.atom(), &PropertyKey::from("toString"));
        let method = match method {
            Some(field) => Some(self.read_field_value(field, value)?),
            None => None,
        };
        match method {
            Some(method) if self.kind(method).is_callable() => {
                let result = self.call(method, value, &[])?;
                if self.kind(result).is_object() {
                    return Err(self.type_error("Cannot convert object to primitive value"));
                }
                self.to_string(result)
            }
            Some(method) if self.kind(method) != ValueKind::Undefined => {
                Err(self.type_error("toString is not a function"))
            }
            _ => Ok(self.object_to_string(value)),
        }
    }

    fn read_field_value(&mut self, field: Field, receiver: Value) -> JsResult<Value> {
        match (field.value, field.getter) {
            (Some(atom), _) => self.create_value(atom),
            (None, Some(getter)) => {
                let getter = self.create_value(getter)?;
                self.call(getter, receiver, &[])
            }
            (None, None) => Ok(self.create_undefined()),
        }
    }

    /// `Object.prototype.toString`: `[object Tag]`.
    ///
    /// The tag is the `Symbol.toStringTag` field when it is a string, else
    /// the constructor's name, else the kind name.
    pub fn object_to_string(&self, value: Value) -> String {
        let object = match self.object(value) {
            Some(object) => object,
            None => return "[object Undefined]".to_string(),
        };
        if object.prototype.is_none() {
            return "[Object: null prototype]".to_string();
        }
        let ctor_name = object
            .constructor
            .and_then(|ctor| self.heap.get(ctor))
            .and_then(Payload::callable)
            .map(|callable| callable.name().to_string())
            .filter(|name| !name.is_empty());
        let tag = self
            .well_known_key("toStringTag")
            .and_then(|key| self.lookup(value.atom(), &key))
            .and_then(|field| field.value)
            .and_then(|atom| self.heap.get(atom))
            .and_then(Payload::as_str)
            .map(str::to_string);
        let kind_name = self
            .payload(value)
            .map(|payload| payload.descriptor().name())
            .unwrap_or("Object");
        format!(
            "[object {}]",
            tag.or(ctor_name).unwrap_or_else(|| kind_name.to_string())
        )
    }

    /// Number conversion; objects are unpacked first.
    pub fn to_number(&mut self, value: Value) -> JsResult<f64> {
        let kind = self.kind(value);
        if kind.is_object() {
            let primitive = self.unpack(value)?;
            return self.to_number(primitive);
        }
        let converted = match self.payload(value) {
            Some(payload) => payload.descriptor().to_number(payload),
            None => return Err(self.stale(value)),
        };
        converted.map_err(|err| self.throw(err))
    }

    /// Truthiness.
    pub fn to_boolean(&self, value: Value) -> bool {
        self.payload(value)
            .map_or(false, |payload| payload.descriptor().to_boolean(payload))
    }

    /// `typeof` of a value.
    pub fn type_of(&self, value: Value) -> &'static str {
        self.payload(value)
            .map_or("undefined", |payload| payload.descriptor().type_of())
    }

    /// Convert an object to a primitive through `[Symbol.toPrimitive]`,
    /// then `valueOf`, then `toString`. Primitives come back unchanged.
    pub fn unpack(&mut self, value: Value) -> JsResult<Value> {
        if !self.kind(value).is_object() {
            return Ok(value);
        }
        if let Some(key) = self.well_known_key("toPrimitive") {
            let method = self.get_property(value, &key)?;
            if self.kind(method).is_callable() {
                let hint = self.create_string("default");
                let result = self.call(method, value, &[hint])?;
                if self.kind(result).is_object() {
                    return Err(self.type_error("Cannot convert object to primitive value"));
                }
                return Ok(result);
            }
        }
        for name in ["valueOf", "toString"] {
            let method = self.get_field(value, name)?;
            if self.kind(method).is_callable() {
                let result = self.call(method, value, &[])?;
                if !self.kind(result).is_object() {
                    return Ok(result);
                }
            }
        }
        let text = self.object_to_string(value);
        Ok(self.create_string(text))
    }

    /// Box a primitive into its wrapper object; objects pack to themselves.
    pub fn pack(&mut self, value: Value) -> JsResult<Value> {
        let pack = match self.payload(value) {
            Some(payload) => payload.descriptor().pack(),
            None => return Err(self.stale(value)),
        };
        match pack.map_err(|err| self.throw(err))? {
            Pack::Itself => Ok(value),
            Pack::Wrap(which) => self.box_primitive(value, which),
        }
    }

    /// A wrapper object built by `which` holding a copy of `value`.
    pub(crate) fn box_primitive(&mut self, value: Value, which: Intrinsic) -> JsResult<Value> {
        let proto = self.intrinsic_prototype(which);
        let wrapper = self.alloc_object(Payload::Object(Box::new(JsObject::new(None))), proto);
        let ctor = self.get_intrinsic(which)?;
        self.set_constructor(wrapper, ctor)?;
        self.set_metadata(wrapper, PRIMITIVE_SLOT, Some(value))?;
        Ok(wrapper)
    }

    /// Strict equality: same kind, then the descriptor decides.
    pub fn is_strict_equal(&self, a: Value, b: Value) -> bool {
        match (self.payload(a), self.payload(b)) {
            (Some(pa), Some(pb)) if pa.kind() == pb.kind() => {
                let identical = self.heap.same_payload(a.atom(), b.atom());
                pa.descriptor().equal(pa, pb, identical)
            }
            _ => false,
        }
    }

    /// Loose equality.
    pub fn is_equal(&mut self, a: Value, b: Value) -> JsResult<bool> {
        let (ka, kb) = (self.kind(a), self.kind(b));
        if ka == kb {
            return Ok(self.is_strict_equal(a, b));
        }
        let nullish = |kind: ValueKind| kind.is_nullish() || kind == ValueKind::Uninitialized;
        if nullish(ka) || nullish(kb) {
            return Ok(nullish(ka) && nullish(kb));
        }
        if ka.is_object() && kb.is_object() {
            return Ok(self.heap.same_payload(a.atom(), b.atom()));
        }
        if ka.is_object() {
            let a = self.unpack(a)?;
            return self.is_equal(a, b);
        }
        if kb.is_object() {
            let b = self.unpack(b)?;
            return self.is_equal(a, b);
        }
        if ka == ValueKind::Boolean {
            let n = self.to_number(a)?;
            let a = self.create_number(n);
            return self.is_equal(a, b);
        }
        if kb == ValueKind::Boolean {
            let n = self.to_number(b)?;
            let b = self.create_number(n);
            return self.is_equal(a, b);
        }
        if ka == ValueKind::BigInt || kb == ValueKind::BigInt {
            let (big, other) = if ka == ValueKind::BigInt { (a, b) } else { (b, a) };
            return Ok(self.bigint_loosely_equals(big, other));
        }
        if ka == ValueKind::Symbol || kb == ValueKind::Symbol {
            return Ok(false);
        }
        if ka == ValueKind::String || kb == ValueKind::String {
            let (text, other) = if ka == ValueKind::String { (a, b) } else { (b, a) };
            if self.kind(other).is_numeric() {
                let n = self.to_number(text)?;
                let m = self.to_number(other)?;
                return Ok(n == m);
            }
            let left = self.to_string(text)?;
            let right = self.to_string(other)?;
            return Ok(left == right);
        }
        match (self.payload(a), self.payload(b)) {
            (Some(pa), Some(pb)) => Ok(pa.descriptor().equal(pa, pb, false)),
            _ => Ok(false),
        }
    }

    fn bigint_loosely_equals(&self, big: Value, other: Value) -> bool {
        let big = match self.payload(big) {
            Some(Payload::BigInt(value)) => value,
            _ => return false,
        };
        match self.payload(other) {
            Some(Payload::String(text)) => text
                .trim()
                .parse::<BigInt>()
                .map_or(false, |parsed| &parsed == big),
            Some(Payload::Number(n)) => BigInt::from_f64(*n).map_or(false, |n| &n == big),
            _ => false,
        }
    }

    /// Numeric value of a Number, NaN or Infinity.
    pub fn as_f64(&self, value: Value) -> Option<f64> {
        self.payload(value).and_then(Payload::as_f64)
    }

    /// Contents of a String.
    pub fn as_str(&self, value: Value) -> Option<&str> {
        self.payload(value).and_then(Payload::as_str)
    }

    /// Contents of a Boolean.
    pub fn as_bool(&self, value: Value) -> Option<bool> {
        match self.payload(value) {
            Some(Payload::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    /// Contents of a BigInt.
    pub fn as_bigint(&self, value: Value) -> Option<&BigInt> {
        match self.payload(value) {
            Some(Payload::BigInt(n)) => Some(n),
            _ => None,
        }
    }
}
