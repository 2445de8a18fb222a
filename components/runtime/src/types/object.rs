//! Object kinds and exceptions.
//!
//! Equality of these kinds is identity. Their string forms here are the
//! heap-free fallbacks; [`Context::to_string`](crate::Context::to_string)
//! first consults the object's own `toString` method.

use core_types::JsError;

use super::TypeDescriptor;
use crate::context::Context;
use crate::error::JsResult;
use crate::payload::Payload;
use crate::value::{Value, ValueKind};

/// Exception record
#[derive(Debug)]
pub struct ExceptionType;

impl TypeDescriptor for ExceptionType {
    fn kind(&self) -> ValueKind {
        ValueKind::Exception
    }

    fn name(&self) -> &'static str {
        "Exception"
    }

    /// Message followed by one line per captured frame, innermost first.
    fn to_string(&self, payload: &Payload) -> Result<String, JsError> {
        match payload {
            Payload::Exception(record) => Ok(record.error.to_string()),
            _ => Ok(String::new()),
        }
    }
}

/// Plain object
#[derive(Debug)]
pub struct ObjectType;

impl TypeDescriptor for ObjectType {
    fn kind(&self) -> ValueKind {
        ValueKind::Object
    }

    fn name(&self) -> &'static str {
        "Object"
    }

    fn to_string(&self, _payload: &Payload) -> Result<String, JsError> {
        Ok("[object Object]".to_string())
    }
}

/// Array
#[derive(Debug)]
pub struct ArrayType;

impl TypeDescriptor for ArrayType {
    fn kind(&self) -> ValueKind {
        ValueKind::Array
    }

    fn name(&self) -> &'static str {
        "Array"
    }

    fn to_string(&self, _payload: &Payload) -> Result<String, JsError> {
        Ok("[object Array]".to_string())
    }
}

/// Generator instance
#[derive(Debug)]
pub struct GeneratorType;

impl TypeDescriptor for GeneratorType {
    fn kind(&self) -> ValueKind {
        ValueKind::Generator
    }

    fn name(&self) -> &'static str {
        "Generator"
    }

    fn to_string(&self, _payload: &Payload) -> Result<String, JsError> {
        Ok("[object Generator]".to_string())
    }
}

fn function_string(payload: &Payload) -> String {
    let name = payload.callable().map(|c| c.name()).unwrap_or_default();
    if name.is_empty() {
        "[Function anonymous]".to_string()
    } else {
        format!("[Function {}]", name)
    }
}

/// Script function
#[derive(Debug)]
pub struct FunctionType;

impl TypeDescriptor for FunctionType {
    fn kind(&self) -> ValueKind {
        ValueKind::Function
    }

    fn name(&self) -> &'static str {
        "Function"
    }

    fn type_of(&self) -> &'static str {
        "function"
    }

    fn to_string(&self, payload: &Payload) -> Result<String, JsError> {
        Ok(function_string(payload))
    }

    /// Hands the body to the evaluator.
    fn call(&self, ctx: &mut Context, func: Value, self_value: Value, args: &[Value]) -> JsResult {
        ctx.run_function(func, self_value, args)
    }
}

/// Host function
#[derive(Debug)]
pub struct NativeFunctionType;

impl TypeDescriptor for NativeFunctionType {
    fn kind(&self) -> ValueKind {
        ValueKind::NativeFunction
    }

    fn name(&self) -> &'static str {
        "Function"
    }

    fn type_of(&self) -> &'static str {
        "function"
    }

    fn to_string(&self, payload: &Payload) -> Result<String, JsError> {
        Ok(function_string(payload))
    }

    fn call(&self, ctx: &mut Context, func: Value, self_value: Value, args: &[Value]) -> JsResult {
        ctx.run_native(func, self_value, args)
    }
}

/// Script generator function
#[derive(Debug)]
pub struct GeneratorFunctionType;

impl TypeDescriptor for GeneratorFunctionType {
    fn kind(&self) -> ValueKind {
        ValueKind::GeneratorFunction
    }

    fn name(&self) -> &'static str {
        "GeneratorFunction"
    }

    fn type_of(&self) -> &'static str {
        "function"
    }

    fn to_string(&self, payload: &Payload) -> Result<String, JsError> {
        Ok(function_string(payload))
    }

    /// Captures the call in a new generator instead of running the body.
    fn call(&self, ctx: &mut Context, func: Value, self_value: Value, args: &[Value]) -> JsResult {
        ctx.create_generator(func, self_value, args)
    }
}
