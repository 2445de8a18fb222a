//! Non-numeric primitive kinds.

use core_types::{ErrorKind, JsError};

use super::{type_error, BinaryOp, Pack, Relation, TypeDescriptor};
use crate::builtins::Intrinsic;
use crate::number::parse_number;
use crate::payload::Payload;
use crate::value::ValueKind;

fn nullish_pack() -> Result<Pack, JsError> {
    Err(type_error("Cannot convert undefined or null to object"))
}

/// `undefined`
#[derive(Debug)]
pub struct UndefinedType;

impl TypeDescriptor for UndefinedType {
    fn kind(&self) -> ValueKind {
        ValueKind::Undefined
    }

    fn name(&self) -> &'static str {
        "undefined"
    }

    fn type_of(&self) -> &'static str {
        "undefined"
    }

    fn to_string(&self, _payload: &Payload) -> Result<String, JsError> {
        Ok("undefined".to_string())
    }

    fn to_boolean(&self, _payload: &Payload) -> bool {
        false
    }

    fn clone_payload(&self, _payload: &Payload) -> Option<Payload> {
        Some(Payload::Undefined)
    }

    fn pack(&self) -> Result<Pack, JsError> {
        nullish_pack()
    }

    fn equal(&self, _lhs: &Payload, _rhs: &Payload, _identical: bool) -> bool {
        true
    }
}

/// A binding read before its declaration ran.
#[derive(Debug)]
pub struct UninitializedType;

fn uninitialized() -> JsError {
    JsError::new(
        ErrorKind::ReferenceError,
        "Cannot access variable before initialization",
    )
}

impl TypeDescriptor for UninitializedType {
    fn kind(&self) -> ValueKind {
        ValueKind::Uninitialized
    }

    fn name(&self) -> &'static str {
        "uninitialized"
    }

    fn type_of(&self) -> &'static str {
        "undefined"
    }

    fn to_string(&self, _payload: &Payload) -> Result<String, JsError> {
        Err(uninitialized())
    }

    fn to_number(&self, _payload: &Payload) -> Result<f64, JsError> {
        Err(uninitialized())
    }

    fn to_boolean(&self, _payload: &Payload) -> bool {
        false
    }

    fn clone_payload(&self, _payload: &Payload) -> Option<Payload> {
        Some(Payload::Uninitialized)
    }

    fn pack(&self) -> Result<Pack, JsError> {
        Err(uninitialized())
    }
}

/// `null`
#[derive(Debug)]
pub struct NullType;

impl TypeDescriptor for NullType {
    fn kind(&self) -> ValueKind {
        ValueKind::Null
    }

    fn name(&self) -> &'static str {
        "null"
    }

    fn to_string(&self, _payload: &Payload) -> Result<String, JsError> {
        Ok("null".to_string())
    }

    fn to_number(&self, _payload: &Payload) -> Result<f64, JsError> {
        Ok(0.0)
    }

    fn to_boolean(&self, _payload: &Payload) -> bool {
        false
    }

    fn clone_payload(&self, _payload: &Payload) -> Option<Payload> {
        Some(Payload::Null)
    }

    fn pack(&self) -> Result<Pack, JsError> {
        nullish_pack()
    }

    fn equal(&self, _lhs: &Payload, _rhs: &Payload, _identical: bool) -> bool {
        true
    }
}

/// String
#[derive(Debug)]
pub struct StringType;

impl TypeDescriptor for StringType {
    fn kind(&self) -> ValueKind {
        ValueKind::String
    }

    fn name(&self) -> &'static str {
        "String"
    }

    fn type_of(&self) -> &'static str {
        "string"
    }

    fn to_string(&self, payload: &Payload) -> Result<String, JsError> {
        Ok(payload.as_str().unwrap_or_default().to_string())
    }

    fn to_number(&self, payload: &Payload) -> Result<f64, JsError> {
        Ok(parse_number(payload.as_str().unwrap_or_default()))
    }

    fn to_boolean(&self, payload: &Payload) -> bool {
        !payload.as_str().unwrap_or_default().is_empty()
    }

    fn clone_payload(&self, payload: &Payload) -> Option<Payload> {
        Some(payload.clone())
    }

    fn pack(&self) -> Result<Pack, JsError> {
        Ok(Pack::Wrap(Intrinsic::String))
    }

    fn equal(&self, lhs: &Payload, rhs: &Payload, _identical: bool) -> bool {
        lhs.as_str() == rhs.as_str()
    }

    /// Only `+`, which concatenates.
    fn binary(&self, op: BinaryOp, lhs: &Payload, rhs: &Payload) -> Result<Payload, JsError> {
        match (op, lhs.as_str(), rhs.as_str()) {
            (BinaryOp::Add, Some(l), Some(r)) => Ok(Payload::String(format!("{}{}", l, r))),
            _ => Err(type_error(format!(
                "Operator '{}' cannot be applied to type String",
                op
            ))),
        }
    }

    fn compare(&self, op: Relation, lhs: &Payload, rhs: &Payload) -> Result<bool, JsError> {
        match (lhs.as_str(), rhs.as_str()) {
            (Some(l), Some(r)) => Ok(op.holds(Some(l.cmp(r)))),
            _ => Err(type_error("Cannot compare a String with another type")),
        }
    }
}

/// Boolean
#[derive(Debug)]
pub struct BooleanType;

fn boolean(payload: &Payload) -> bool {
    matches!(payload, Payload::Boolean(true))
}

impl TypeDescriptor for BooleanType {
    fn kind(&self) -> ValueKind {
        ValueKind::Boolean
    }

    fn name(&self) -> &'static str {
        "Boolean"
    }

    fn type_of(&self) -> &'static str {
        "boolean"
    }

    fn to_string(&self, payload: &Payload) -> Result<String, JsError> {
        Ok(boolean(payload).to_string())
    }

    fn to_number(&self, payload: &Payload) -> Result<f64, JsError> {
        Ok(if boolean(payload) { 1.0 } else { 0.0 })
    }

    fn to_boolean(&self, payload: &Payload) -> bool {
        boolean(payload)
    }

    fn clone_payload(&self, payload: &Payload) -> Option<Payload> {
        Some(Payload::Boolean(boolean(payload)))
    }

    fn pack(&self) -> Result<Pack, JsError> {
        Ok(Pack::Wrap(Intrinsic::Boolean))
    }

    fn equal(&self, lhs: &Payload, rhs: &Payload, _identical: bool) -> bool {
        boolean(lhs) == boolean(rhs)
    }
}

/// Symbol; equality is identity.
#[derive(Debug)]
pub struct SymbolType;

impl TypeDescriptor for SymbolType {
    fn kind(&self) -> ValueKind {
        ValueKind::Symbol
    }

    fn name(&self) -> &'static str {
        "Symbol"
    }

    fn type_of(&self) -> &'static str {
        "symbol"
    }

    fn to_string(&self, _payload: &Payload) -> Result<String, JsError> {
        Err(type_error("Cannot convert a Symbol value to a string"))
    }

    fn to_number(&self, _payload: &Payload) -> Result<f64, JsError> {
        Err(type_error("Cannot convert a Symbol value to a number"))
    }

    fn pack(&self) -> Result<Pack, JsError> {
        Ok(Pack::Wrap(Intrinsic::Symbol))
    }
}
