//! `BigInt` and `BigInt.prototype`.

use core_types::{BigInt, ErrorKind, JsError};

use super::{arg, define_method, make_constructor, this_primitive, wrap_primitive, Intrinsic};
use crate::context::Context;
use crate::error::{bigint_fault, JsResult};
use crate::payload::Payload;
use crate::value::Value;

pub(super) fn install(ctx: &mut Context) -> JsResult<()> {
    let (_, prototype) = make_constructor(ctx, Intrinsic::BigInt, None, bigint_constructor)?;

    define_method(ctx, prototype, "toString", "toString", |ctx, this, _args| {
        let primitive = this_primitive(ctx, this, Intrinsic::BigInt, "toString")?;
        let text = ctx.to_string(primitive)?;
        Ok(ctx.create_string(text))
    })?;
    define_method(ctx, prototype, "valueOf", "valueOf", |ctx, this, _args| {
        this_primitive(ctx, this, Intrinsic::BigInt, "valueOf")
    })?;
    Ok(())
}

fn bigint_constructor(ctx: &mut Context, this: Value, args: &[Value]) -> JsResult<Value> {
    let value = arg(ctx, args, 0);
    let value = ctx.unpack(value)?;
    let converted = match ctx.payload(value) {
        Some(payload) => to_bigint(payload),
        None => Ok(BigInt::zero()),
    };
    let converted = converted.map_err(|err| ctx.throw(err))?;
    let primitive = ctx.create_bigint(converted);
    wrap_primitive(ctx, this, Intrinsic::BigInt, primitive)
}

/// `BigInt(value)` conversion of a primitive.
fn to_bigint(payload: &Payload) -> Result<BigInt, JsError> {
    match payload {
        Payload::BigInt(value) => Ok(value.clone()),
        Payload::Boolean(flag) => Ok(BigInt::from(*flag as i64)),
        Payload::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(BigInt::zero());
            }
            text.parse().map_err(bigint_fault)
        }
        Payload::Number(_) | Payload::NaN | Payload::Infinity { .. } => {
            let number = payload.as_f64().unwrap_or(f64::NAN);
            BigInt::from_f64(number).ok_or_else(|| {
                JsError::new(
                    ErrorKind::RangeError,
                    format!(
                        "The number {} cannot be converted to a BigInt because it is not an integer",
                        crate::number::format_number(number)
                    ),
                )
            })
        }
        other => Err(JsError::new(
            ErrorKind::TypeError,
            format!("Cannot convert {} to a BigInt", other.descriptor().type_of()),
        )),
    }
}
