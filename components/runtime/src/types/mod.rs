//! Type descriptors: the semantics of each value kind.
//!
//! Every [`ValueKind`] maps to exactly one stateless descriptor through
//! [`descriptor`]. Descriptors answer everything that depends only on the
//! payload (stringification, coercions, cloning, boxing, equality and the
//! numeric operator set). Anything that needs the heap, such as looking up a
//! `toString` method, is layered on top by the [`Context`](crate::Context).
//!
//! Operations a kind does not support fall back to the trait's defaults,
//! which raise TYPE.

mod numeric;
mod object;
mod primitive;

use std::fmt;

use core_types::{ErrorKind, JsError};

use crate::builtins::Intrinsic;
use crate::context::Context;
use crate::error::JsResult;
use crate::payload::Payload;
use crate::value::{Value, ValueKind};

pub use numeric::{BigIntType, InfinityType, NaNType, NumberType};
pub use object::{
    ArrayType, ExceptionType, FunctionType, GeneratorFunctionType, GeneratorType,
    NativeFunctionType, ObjectType,
};
pub use primitive::{BooleanType, NullType, StringType, SymbolType, UndefinedType, UninitializedType};

/// Binary operators of numeric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Pow,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    UShr,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::UShr => ">>>",
        })
    }
}

/// Unary operators of numeric kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `~`
    BitNot,
    /// `++`
    Inc,
    /// `--`
    Dec,
    /// unary `-`
    Negate,
    /// unary `+`
    Plus,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOp::BitNot => "~",
            UnaryOp::Inc => "++",
            UnaryOp::Dec => "--",
            UnaryOp::Negate => "-",
            UnaryOp::Plus => "+",
        })
    }
}

/// Relational operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl Relation {
    /// Apply the relation to an ordering; `None` (unordered) is false.
    pub fn holds(self, ordering: Option<std::cmp::Ordering>) -> bool {
        use std::cmp::Ordering::*;
        match (self, ordering) {
            (_, None) => false,
            (Relation::Gt, Some(o)) => o == Greater,
            (Relation::Ge, Some(o)) => o != Less,
            (Relation::Lt, Some(o)) => o == Less,
            (Relation::Le, Some(o)) => o != Greater,
        }
    }
}

/// How `pack` boxes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pack {
    /// The value is already an object
    Itself,
    /// Wrap it in an instance of this built-in
    Wrap(Intrinsic),
}

pub(crate) fn type_error(message: impl Into<String>) -> JsError {
    JsError::new(ErrorKind::TypeError, message)
}

/// Semantics of one value kind.
pub trait TypeDescriptor: Sync {
    /// The kind described.
    fn kind(&self) -> ValueKind;

    /// Name used in error messages.
    fn name(&self) -> &'static str;

    /// Result of the `typeof` operator.
    fn type_of(&self) -> &'static str {
        "object"
    }

    /// String conversion.
    fn to_string(&self, payload: &Payload) -> Result<String, JsError>;

    /// Number conversion.
    fn to_number(&self, _payload: &Payload) -> Result<f64, JsError> {
        Ok(f64::NAN)
    }

    /// Truthiness.
    fn to_boolean(&self, _payload: &Payload) -> bool {
        true
    }

    /// Deep copy of the payload, or `None` when values of this kind are
    /// shared by reference.
    fn clone_payload(&self, _payload: &Payload) -> Option<Payload> {
        None
    }

    /// How the value is boxed into an object.
    fn pack(&self) -> Result<Pack, JsError> {
        Ok(Pack::Itself)
    }

    /// Equality of two payloads of this kind; `identical` tells whether
    /// both sides hold the very same payload.
    fn equal(&self, _lhs: &Payload, _rhs: &Payload, identical: bool) -> bool {
        identical
    }

    /// Binary arithmetic and bitwise operators.
    fn binary(&self, op: BinaryOp, _lhs: &Payload, _rhs: &Payload) -> Result<Payload, JsError> {
        Err(type_error(format!(
            "Operator '{}' cannot be applied to type {}",
            op,
            self.name()
        )))
    }

    /// Unary operators.
    fn unary(&self, op: UnaryOp, _operand: &Payload) -> Result<Payload, JsError> {
        Err(type_error(format!(
            "Operator '{}' cannot be applied to type {}",
            op,
            self.name()
        )))
    }

    /// Relational comparison.
    fn compare(&self, _op: Relation, _lhs: &Payload, _rhs: &Payload) -> Result<bool, JsError> {
        Err(type_error(format!("Cannot compare values of type {}", self.name())))
    }

    /// Invoke a value of this kind.
    fn call(&self, ctx: &mut Context, _func: Value, _self_value: Value, _args: &[Value]) -> JsResult {
        Err(ctx.type_error("variable is not a function"))
    }
}

static UNDEFINED: UndefinedType = UndefinedType;
static UNINITIALIZED: UninitializedType = UninitializedType;
static NULL: NullType = NullType;
static NAN: NaNType = NaNType;
static INFINITY: InfinityType = InfinityType;
static NUMBER: NumberType = NumberType;
static STRING: StringType = StringType;
static BOOLEAN: BooleanType = BooleanType;
static BIGINT: BigIntType = BigIntType;
static SYMBOL: SymbolType = SymbolType;
static EXCEPTION: ExceptionType = ExceptionType;
static OBJECT: ObjectType = ObjectType;
static ARRAY: ArrayType = ArrayType;
static GENERATOR: GeneratorType = GeneratorType;
static FUNCTION: FunctionType = FunctionType;
static NATIVE_FUNCTION: NativeFunctionType = NativeFunctionType;
static GENERATOR_FUNCTION: GeneratorFunctionType = GeneratorFunctionType;

/// The descriptor of `kind`.
///
/// # Examples
///
/// ```
/// use runtime::types::descriptor;
/// use runtime::{Payload, ValueKind};
///
/// let number = descriptor(ValueKind::Number);
/// assert_eq!(number.to_string(&Payload::Number(2.5)).unwrap(), "2.5");
/// assert!(!number.to_boolean(&Payload::Number(0.0)));
/// assert_eq!(descriptor(ValueKind::NaN).to_string(&Payload::NaN).unwrap(), "NaN");
/// ```
pub fn descriptor(kind: ValueKind) -> &'static dyn TypeDescriptor {
    match kind {
        ValueKind::Undefined => &UNDEFINED,
        ValueKind::Uninitialized => &UNINITIALIZED,
        ValueKind::Null => &NULL,
        ValueKind::NaN => &NAN,
        ValueKind::Infinity => &INFINITY,
        ValueKind::Number => &NUMBER,
        ValueKind::String => &STRING,
        ValueKind::Boolean => &BOOLEAN,
        ValueKind::BigInt => &BIGINT,
        ValueKind::Symbol => &SYMBOL,
        ValueKind::Exception => &EXCEPTION,
        ValueKind::Object => &OBJECT,
        ValueKind::Array => &ARRAY,
        ValueKind::Generator => &GENERATOR,
        ValueKind::Function => &FUNCTION,
        ValueKind::NativeFunction => &NATIVE_FUNCTION,
        ValueKind::GeneratorFunction => &GENERATOR_FUNCTION,
    }
}
