//! Arithmetic, bitwise and relational operators.

use super::Context;
use crate::error::JsResult;
use crate::payload::Payload;
use crate::types::{descriptor, type_error, BinaryOp, Relation, UnaryOp};
use crate::value::{Value, ValueKind};

const MIXED_BIGINT: &str = "Cannot mix BigInt and other types, use explicit conversions";

impl Context {
    /// Operands of a numeric operator, after unpacking: both BigInt, or
    /// both doubles.
    fn numeric_operands(&mut self, a: Value, b: Value) -> JsResult<(Payload, Payload)> {
        let (ka, kb) = (self.kind(a), self.kind(b));
        if ka == ValueKind::BigInt || kb == ValueKind::BigInt {
            return match (self.payload(a), self.payload(b)) {
                (Some(pa @ Payload::BigInt(_)), Some(pb @ Payload::BigInt(_))) => {
                    Ok((pa.clone(), pb.clone()))
                }
                _ => Err(self.throw(type_error(MIXED_BIGINT))),
            };
        }
        let x = self.to_number(a)?;
        let y = self.to_number(b)?;
        Ok((Payload::number(x), Payload::number(y)))
    }

    /// Apply a binary operator. `+` concatenates when either side is a
    /// string.
    pub fn binary(&mut self, op: BinaryOp, a: Value, b: Value) -> JsResult<Value> {
        let a = self.unpack(a)?;
        let b = self.unpack(b)?;
        if op == BinaryOp::Add
            && (self.kind(a) == ValueKind::String || self.kind(b) == ValueKind::String)
        {
            let mut text = self.to_string(a)?;
            text.push_str(&self.to_string(b)?);
            return Ok(self.create_string(text));
        }
        let (pa, pb) = self.numeric_operands(a, b)?;
        let result = descriptor(pa.kind()).binary(op, &pa, &pb);
        match result {
            Ok(payload) => Ok(self.alloc(payload)),
            Err(err) => Err(self.throw(err)),
        }
    }

    /// Apply a unary operator.
    pub fn unary(&mut self, op: UnaryOp, a: Value) -> JsResult<Value> {
        let a = self.unpack(a)?;
        let operand = match self.payload(a) {
            Some(payload @ Payload::BigInt(_)) => payload.clone(),
            Some(_) => Payload::number(self.to_number(a)?),
            None => return Err(self.stale(a)),
        };
        let result = descriptor(operand.kind()).unary(op, &operand);
        match result {
            Ok(payload) => Ok(self.alloc(payload)),
            Err(err) => Err(self.throw(err)),
        }
    }

    /// Evaluate a relational comparison. Strings compare
    /// lexicographically; NaN compares false.
    pub fn compare(&mut self, relation: Relation, a: Value, b: Value) -> JsResult<bool> {
        let a = self.unpack(a)?;
        let b = self.unpack(b)?;
        if self.kind(a) == ValueKind::String && self.kind(b) == ValueKind::String {
            let result = match (self.payload(a), self.payload(b)) {
                (Some(pa), Some(pb)) => pa.descriptor().compare(relation, pa, pb),
                _ => return Err(self.stale(a)),
            };
            return result.map_err(|err| self.throw(err));
        }
        let (pa, pb) = self.numeric_operands(a, b)?;
        descriptor(pa.kind())
            .compare(relation, &pa, &pb)
            .map_err(|err| self.throw(err))
    }

    fn relation(&mut self, relation: Relation, a: Value, b: Value) -> JsResult<Value> {
        let holds = self.compare(relation, a, b)?;
        Ok(self.create_boolean(holds))
    }

    /// `a + b`
    pub fn add(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::Add, a, b)
    }

    /// `a - b`
    pub fn sub(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::Sub, a, b)
    }

    /// `a * b`
    pub fn mul(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::Mul, a, b)
    }

    /// `a / b`
    pub fn div(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::Div, a, b)
    }

    /// `a % b`
    pub fn modulo(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::Mod, a, b)
    }

    /// `a ** b`
    pub fn pow(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::Pow, a, b)
    }

    /// `a & b`
    pub fn bit_and(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::BitAnd, a, b)
    }

    /// `a | b`
    pub fn bit_or(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::BitOr, a, b)
    }

    /// `a ^ b`
    pub fn bit_xor(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::BitXor, a, b)
    }

    /// `a << b`
    pub fn shl(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::Shl, a, b)
    }

    /// `a >> b`
    pub fn shr(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::Shr, a, b)
    }

    /// `a >>> b`
    pub fn ushr(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.binary(BinaryOp::UShr, a, b)
    }

    /// `~a`
    pub fn bit_not(&mut self, a: Value) -> JsResult<Value> {
        self.unary(UnaryOp::BitNot, a)
    }

    /// `a + 1`, as used by `++`
    pub fn inc(&mut self, a: Value) -> JsResult<Value> {
        self.unary(UnaryOp::Inc, a)
    }

    /// `a - 1`, as used by `--`
    pub fn dec(&mut self, a: Value) -> JsResult<Value> {
        self.unary(UnaryOp::Dec, a)
    }

    /// `-a`
    pub fn negate(&mut self, a: Value) -> JsResult<Value> {
        self.unary(UnaryOp::Negate, a)
    }

    /// `+a`
    pub fn plus(&mut self, a: Value) -> JsResult<Value> {
        self.unary(UnaryOp::Plus, a)
    }

    /// `a > b`
    pub fn gt(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.relation(Relation::Gt, a, b)
    }

    /// `a >= b`
    pub fn ge(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.relation(Relation::Ge, a, b)
    }

    /// `a < b`
    pub fn lt(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.relation(Relation::Lt, a, b)
    }

    /// `a <= b`
    pub fn le(&mut self, a: Value, b: Value) -> JsResult<Value> {
        self.relation(Relation::Le, a, b)
    }
}
