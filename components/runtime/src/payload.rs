//! Concrete data of a value.

use core_types::{BigInt, JsError};
use memory_manager::AtomId;

use crate::callable::{Callable, JsFunction, JsGenerator, NativeFunction};
use crate::object::{JsArray, JsObject, SymbolId};
use crate::types::{descriptor, TypeDescriptor};
use crate::value::ValueKind;

/// Exception record: an error with its captured trace, or a thrown value.
#[derive(Debug, Clone)]
pub struct ExceptionRecord {
    /// Kind, message and stack captured at creation
    pub error: JsError,
    /// Value passed to `throw`, when the exception wraps one
    pub thrown: Option<AtomId>,
}

/// Payload held by an atom.
#[derive(Debug, Clone)]
pub enum Payload {
    /// `undefined`
    Undefined,
    /// Declared, not initialized
    Uninitialized,
    /// `null`
    Null,
    /// Not-a-number
    NaN,
    /// Signed infinity
    Infinity {
        /// `-Infinity` when set
        negative: bool,
    },
    /// Finite number
    Number(f64),
    /// String
    String(String),
    /// Boolean
    Boolean(bool),
    /// Arbitrary-precision integer
    BigInt(BigInt),
    /// Symbol; identity is the payload itself
    Symbol {
        /// Identity used as a property key
        id: SymbolId,
        /// Description given at creation
        description: Option<String>,
    },
    /// Exception
    Exception(Box<ExceptionRecord>),
    /// Plain object
    Object(Box<JsObject>),
    /// Array
    Array(Box<JsArray>),
    /// Generator instance
    Generator(Box<JsGenerator>),
    /// Script function
    Function(Box<JsFunction>),
    /// Host function
    NativeFunction(Box<NativeFunction>),
    /// Script generator function
    GeneratorFunction(Box<JsFunction>),
}

impl Payload {
    /// Number payload, normalizing NaN and infinities to their own kinds.
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            Payload::NaN
        } else if value.is_infinite() {
            Payload::Infinity {
                negative: value < 0.0,
            }
        } else {
            Payload::Number(value)
        }
    }

    /// Kind of the payload.
    pub fn kind(&self) -> ValueKind {
        match self {
            Payload::Undefined => ValueKind::Undefined,
            Payload::Uninitialized => ValueKind::Uninitialized,
            Payload::Null => ValueKind::Null,
            Payload::NaN => ValueKind::NaN,
            Payload::Infinity { .. } => ValueKind::Infinity,
            Payload::Number(_) => ValueKind::Number,
            Payload::String(_) => ValueKind::String,
            Payload::Boolean(_) => ValueKind::Boolean,
            Payload::BigInt(_) => ValueKind::BigInt,
            Payload::Symbol { .. } => ValueKind::Symbol,
            Payload::Exception(_) => ValueKind::Exception,
            Payload::Object(_) => ValueKind::Object,
            Payload::Array(_) => ValueKind::Array,
            Payload::Generator(_) => ValueKind::Generator,
            Payload::Function(_) => ValueKind::Function,
            Payload::NativeFunction(_) => ValueKind::NativeFunction,
            Payload::GeneratorFunction(_) => ValueKind::GeneratorFunction,
        }
    }

    /// Descriptor implementing the semantics of this payload's kind.
    pub fn descriptor(&self) -> &'static dyn TypeDescriptor {
        descriptor(self.kind())
    }

    /// Numeric value of Number, NaN and Infinity payloads.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Payload::NaN => Some(f64::NAN),
            Payload::Infinity { negative: true } => Some(f64::NEG_INFINITY),
            Payload::Infinity { negative: false } => Some(f64::INFINITY),
            Payload::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Identity of a Symbol payload.
    pub fn symbol_id(&self) -> Option<SymbolId> {
        match self {
            Payload::Symbol { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// String contents of a String payload.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::String(s) => Some(s),
            _ => None,
        }
    }

    /// Object part of any object kind.
    pub fn object(&self) -> Option<&JsObject> {
        match self {
            Payload::Object(object) => Some(object),
            Payload::Array(array) => Some(&array.object),
            Payload::Generator(generator) => Some(&generator.object),
            Payload::Function(function) | Payload::GeneratorFunction(function) => {
                Some(&function.callable.object)
            }
            Payload::NativeFunction(native) => Some(&native.callable.object),
            _ => None,
        }
    }

    /// Mutable object part of any object kind.
    pub fn object_mut(&mut self) -> Option<&mut JsObject> {
        match self {
            Payload::Object(object) => Some(object),
            Payload::Array(array) => Some(&mut array.object),
            Payload::Generator(generator) => Some(&mut generator.object),
            Payload::Function(function) | Payload::GeneratorFunction(function) => {
                Some(&mut function.callable.object)
            }
            Payload::NativeFunction(native) => Some(&mut native.callable.object),
            _ => None,
        }
    }

    /// Callable part of any callable kind.
    pub fn callable(&self) -> Option<&Callable> {
        match self {
            Payload::Function(function) | Payload::GeneratorFunction(function) => {
                Some(&function.callable)
            }
            Payload::NativeFunction(native) => Some(&native.callable),
            _ => None,
        }
    }

    pub(crate) fn callable_mut(&mut self) -> Option<&mut Callable> {
        match self {
            Payload::Function(function) | Payload::GeneratorFunction(function) => {
                Some(&mut function.callable)
            }
            Payload::NativeFunction(native) => Some(&mut native.callable),
            _ => None,
        }
    }
}
