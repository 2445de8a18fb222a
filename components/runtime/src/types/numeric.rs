//! Numeric kinds: Number, NaN, Infinity and BigInt.
//!
//! NaN and Infinity are kinds of their own, but they share the double
//! arithmetic of Number; every result is normalized back through
//! [`Payload::number`].

use core_types::{BigInt, JsError};

use super::{type_error, BinaryOp, Pack, Relation, TypeDescriptor, UnaryOp};
use crate::builtins::Intrinsic;
use crate::error::bigint_fault;
use crate::number::{format_number, to_int32, to_uint32};
use crate::payload::Payload;
use crate::value::ValueKind;

fn operand(payload: &Payload) -> Result<f64, JsError> {
    payload
        .as_f64()
        .ok_or_else(|| type_error(format!("Expected a number, got {:?}", payload.kind())))
}

fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (base.abs() == 1.0 && exponent.is_infinite()) {
        f64::NAN
    } else {
        base.powf(exponent)
    }
}

fn number_binary(op: BinaryOp, lhs: &Payload, rhs: &Payload) -> Result<Payload, JsError> {
    let (a, b) = (operand(lhs)?, operand(rhs)?);
    let shift = to_uint32(b) & 31;
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        BinaryOp::Pow => pow(a, b),
        BinaryOp::BitAnd => f64::from(to_int32(a) & to_int32(b)),
        BinaryOp::BitOr => f64::from(to_int32(a) | to_int32(b)),
        BinaryOp::BitXor => f64::from(to_int32(a) ^ to_int32(b)),
        BinaryOp::Shl => f64::from(to_int32(a).wrapping_shl(shift)),
        BinaryOp::Shr => f64::from(to_int32(a) >> shift),
        BinaryOp::UShr => f64::from(to_uint32(a) >> shift),
    };
    Ok(Payload::number(result))
}

fn number_unary(op: UnaryOp, operand_payload: &Payload) -> Result<Payload, JsError> {
    let a = operand(operand_payload)?;
    let result = match op {
        UnaryOp::BitNot => f64::from(!to_int32(a)),
        UnaryOp::Inc => a + 1.0,
        UnaryOp::Dec => a - 1.0,
        UnaryOp::Negate => -a,
        UnaryOp::Plus => a,
    };
    Ok(Payload::number(result))
}

fn number_compare(op: Relation, lhs: &Payload, rhs: &Payload) -> Result<bool, JsError> {
    let (a, b) = (operand(lhs)?, operand(rhs)?);
    Ok(op.holds(a.partial_cmp(&b)))
}

/// Implements the descriptor methods shared by the double-backed kinds.
macro_rules! double_kind {
    ($ty:ident, $kind:expr, $name:expr) => {
        impl TypeDescriptor for $ty {
            fn kind(&self) -> ValueKind {
                $kind
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn type_of(&self) -> &'static str {
                "number"
            }

            fn to_string(&self, payload: &Payload) -> Result<String, JsError> {
                Ok(format_number(operand(payload)?))
            }

            fn to_number(&self, payload: &Payload) -> Result<f64, JsError> {
                operand(payload)
            }

            fn to_boolean(&self, payload: &Payload) -> bool {
                operand(payload).map_or(false, |n| n != 0.0 && !n.is_nan())
            }

            fn clone_payload(&self, payload: &Payload) -> Option<Payload> {
                Some(payload.clone())
            }

            fn pack(&self) -> Result<Pack, JsError> {
                Ok(Pack::Wrap(Intrinsic::Number))
            }

            fn equal(&self, lhs: &Payload, rhs: &Payload, _identical: bool) -> bool {
                lhs.as_f64() == rhs.as_f64() && lhs.as_f64().is_some()
            }

            fn binary(
                &self,
                op: BinaryOp,
                lhs: &Payload,
                rhs: &Payload,
            ) -> Result<Payload, JsError> {
                number_binary(op, lhs, rhs)
            }

            fn unary(&self, op: UnaryOp, operand_payload: &Payload) -> Result<Payload, JsError> {
                number_unary(op, operand_payload)
            }

            fn compare(&self, op: Relation, lhs: &Payload, rhs: &Payload) -> Result<bool, JsError> {
                number_compare(op, lhs, rhs)
            }
        }
    };
}

/// Finite number
#[derive(Debug)]
pub struct NumberType;

/// Not-a-number
#[derive(Debug)]
pub struct NaNType;

/// Signed infinity
#[derive(Debug)]
pub struct InfinityType;

double_kind!(NumberType, ValueKind::Number, "Number");
double_kind!(NaNType, ValueKind::NaN, "NaN");
double_kind!(InfinityType, ValueKind::Infinity, "Infinity");

/// Arbitrary-precision integer
#[derive(Debug)]
pub struct BigIntType;

fn bigint(payload: &Payload) -> Result<&BigInt, JsError> {
    match payload {
        Payload::BigInt(value) => Ok(value),
        _ => Err(type_error(
            "Cannot mix BigInt and other types, use explicit conversions",
        )),
    }
}

impl TypeDescriptor for BigIntType {
    fn kind(&self) -> ValueKind {
        ValueKind::BigInt
    }

    fn name(&self) -> &'static str {
        "BigInt"
    }

    fn type_of(&self) -> &'static str {
        "bigint"
    }

    fn to_string(&self, payload: &Payload) -> Result<String, JsError> {
        Ok(bigint(payload)?.to_string())
    }

    fn to_number(&self, payload: &Payload) -> Result<f64, JsError> {
        Ok(bigint(payload)?.to_f64())
    }

    fn to_boolean(&self, payload: &Payload) -> bool {
        bigint(payload).map_or(false, |v| !v.is_zero())
    }

    fn clone_payload(&self, payload: &Payload) -> Option<Payload> {
        Some(payload.clone())
    }

    fn pack(&self) -> Result<Pack, JsError> {
        Ok(Pack::Wrap(Intrinsic::BigInt))
    }

    fn equal(&self, lhs: &Payload, rhs: &Payload, _identical: bool) -> bool {
        matches!((bigint(lhs), bigint(rhs)), (Ok(a), Ok(b)) if a == b)
    }

    fn binary(&self, op: BinaryOp, lhs: &Payload, rhs: &Payload) -> Result<Payload, JsError> {
        let (a, b) = (bigint(lhs)?, bigint(rhs)?);
        let result = match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a.checked_div(b).map_err(bigint_fault)?,
            BinaryOp::Mod => a.checked_rem(b).map_err(bigint_fault)?,
            BinaryOp::Pow => a.checked_pow(b).map_err(bigint_fault)?,
            BinaryOp::BitAnd => a & b,
            BinaryOp::BitOr => a | b,
            BinaryOp::BitXor => a ^ b,
            BinaryOp::Shl => a.checked_shl(b).map_err(bigint_fault)?,
            BinaryOp::Shr => a.checked_shr(b).map_err(bigint_fault)?,
            BinaryOp::UShr => {
                return Err(type_error(
                    "BigInts have no unsigned right shift, use >> instead",
                ))
            }
        };
        Ok(Payload::BigInt(result))
    }

    fn unary(&self, op: UnaryOp, operand_payload: &Payload) -> Result<Payload, JsError> {
        let a = bigint(operand_payload)?;
        let one = BigInt::from(1i64);
        let result = match op {
            UnaryOp::BitNot => !a,
            UnaryOp::Inc => a + &one,
            UnaryOp::Dec => a - &one,
            UnaryOp::Negate => -a,
            UnaryOp::Plus => {
                return Err(type_error("Cannot convert a BigInt value to a number"))
            }
        };
        Ok(Payload::BigInt(result))
    }

    fn compare(&self, op: Relation, lhs: &Payload, rhs: &Payload) -> Result<bool, JsError> {
        let (a, b) = (bigint(lhs)?, bigint(rhs)?);
        Ok(op.holds(Some(a.cmp(b))))
    }
}
