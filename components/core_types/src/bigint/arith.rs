//! Arithmetic operators: `+ - * neg`, checked division, exponentiation and shifts.

use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Shl, Shr, Sub};

use super::digit::Digit;
use super::magnitude;
use super::{BigInt, BigIntError};

/// Forward owned and mixed operand forms of a binary operator to the
/// `&a op &b` implementation.
macro_rules! forward_binop {
    ($imp:ident, $method:ident) => {
        impl<D: Digit> $imp<BigInt<D>> for BigInt<D> {
            type Output = BigInt<D>;

            fn $method(self, other: BigInt<D>) -> BigInt<D> {
                (&self).$method(&other)
            }
        }

        impl<'a, D: Digit> $imp<&'a BigInt<D>> for BigInt<D> {
            type Output = BigInt<D>;

            fn $method(self, other: &'a BigInt<D>) -> BigInt<D> {
                (&self).$method(other)
            }
        }

        impl<'a, D: Digit> $imp<BigInt<D>> for &'a BigInt<D> {
            type Output = BigInt<D>;

            fn $method(self, other: BigInt<D>) -> BigInt<D> {
                self.$method(&other)
            }
        }
    };
}

pub(crate) use forward_binop;

/// Signed addition of two sign-magnitude operands.
fn signed_add<D: Digit>(a_neg: bool, a: &[D], b_neg: bool, b: &[D]) -> BigInt<D> {
    if a_neg == b_neg {
        return BigInt::from_parts(a_neg, magnitude::add(a, b));
    }
    match magnitude::cmp(a, b) {
        Ordering::Equal => BigInt::zero(),
        Ordering::Greater => BigInt::from_parts(a_neg, magnitude::sub(a, b)),
        Ordering::Less => BigInt::from_parts(b_neg, magnitude::sub(b, a)),
    }
}

impl<'a, D: Digit> Add<&'a BigInt<D>> for &'a BigInt<D> {
    type Output = BigInt<D>;

    fn add(self, other: &'a BigInt<D>) -> BigInt<D> {
        signed_add(self.negative, &self.digits, other.negative, &other.digits)
    }
}

impl<'a, D: Digit> Sub<&'a BigInt<D>> for &'a BigInt<D> {
    type Output = BigInt<D>;

    fn sub(self, other: &'a BigInt<D>) -> BigInt<D> {
        signed_add(self.negative, &self.digits, !other.negative, &other.digits)
    }
}

impl<'a, D: Digit> Mul<&'a BigInt<D>> for &'a BigInt<D> {
    type Output = BigInt<D>;

    fn mul(self, other: &'a BigInt<D>) -> BigInt<D> {
        BigInt::from_parts(
            self.negative != other.negative,
            magnitude::mul(&self.digits, &other.digits),
        )
    }
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl<D: Digit> Neg for BigInt<D> {
    type Output = BigInt<D>;

    fn neg(self) -> BigInt<D> {
        let negative = !self.negative;
        BigInt::from_parts(negative, self.digits)
    }
}

impl<'a, D: Digit> Neg for &'a BigInt<D> {
    type Output = BigInt<D>;

    fn neg(self) -> BigInt<D> {
        BigInt::from_parts(!self.negative, self.digits.clone())
    }
}

impl<D: Digit> Shl<usize> for BigInt<D> {
    type Output = BigInt<D>;

    fn shl(self, bits: usize) -> BigInt<D> {
        BigInt::from_parts(self.negative, magnitude::shl(&self.digits, bits))
    }
}

impl<'a, D: Digit> Shl<usize> for &'a BigInt<D> {
    type Output = BigInt<D>;

    fn shl(self, bits: usize) -> BigInt<D> {
        BigInt::from_parts(self.negative, magnitude::shl(&self.digits, bits))
    }
}

impl<'a, D: Digit> Shr<usize> for &'a BigInt<D> {
    type Output = BigInt<D>;

    /// Arithmetic shift: rounds toward negative infinity.
    fn shr(self, bits: usize) -> BigInt<D> {
        let (digits, lost) = magnitude::shr(&self.digits, bits);
        let shifted = BigInt::from_parts(self.negative, digits);
        if self.negative && lost {
            &shifted - &BigInt::from(1u64)
        } else {
            shifted
        }
    }
}

impl<D: Digit> Shr<usize> for BigInt<D> {
    type Output = BigInt<D>;

    fn shr(self, bits: usize) -> BigInt<D> {
        (&self) >> bits
    }
}

/// Shift counts above this are rejected instead of exhausting memory.
const MAX_SHIFT: u64 = 1 << 30;

impl<D: Digit> BigInt<D> {
    /// Truncating division; the quotient is negative when the signs differ.
    pub fn checked_div(&self, other: &Self) -> Result<Self, BigIntError> {
        if other.is_zero() {
            return Err(BigIntError::DivisionByZero);
        }
        let (quotient, _) = magnitude::div_rem(&self.digits, &other.digits);
        Ok(BigInt::from_parts(self.negative != other.negative, quotient))
    }

    /// Remainder of truncating division; carries the dividend's sign.
    pub fn checked_rem(&self, other: &Self) -> Result<Self, BigIntError> {
        if other.is_zero() {
            return Err(BigIntError::DivisionByZero);
        }
        let (_, rem) = magnitude::div_rem(&self.digits, &other.digits);
        Ok(BigInt::from_parts(self.negative, rem))
    }

    /// Raises to a small non-negative power by repeated squaring.
    pub fn pow(&self, mut exponent: u32) -> Self {
        let mut result = BigInt::from(1u64);
        let mut base = self.clone();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = &result * &base;
            }
            exponent >>= 1;
            if exponent > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// Raises to a `BigInt` power.
    pub fn checked_pow(&self, exponent: &Self) -> Result<Self, BigIntError> {
        if exponent.is_negative() {
            return Err(BigIntError::NegativeExponent);
        }
        if self.is_zero() || self.digits == [D::truncate(1)] {
            // 0^n and (+-1)^n never grow
            let odd = exponent.digits.first().map_or(false, |d| d.to_u64() & 1 == 1);
            return Ok(match (self.is_zero(), exponent.is_zero()) {
                (_, true) => BigInt::from(1u64),
                (true, false) => BigInt::zero(),
                (false, false) => BigInt::from_parts(self.negative && odd, self.digits.clone()),
            });
        }
        let exponent = exponent
            .to_u64()
            .and_then(|e| u32::try_from(e).ok())
            .filter(|e| u64::from(*e) < MAX_SHIFT)
            .ok_or(BigIntError::TooLarge)?;
        Ok(self.pow(exponent))
    }

    /// `self << count`; a negative count shifts right.
    pub fn checked_shl(&self, count: &Self) -> Result<Self, BigIntError> {
        let bits = count
            .abs()
            .to_u64()
            .filter(|bits| *bits < MAX_SHIFT)
            .map(|bits| bits as usize);
        match (count.is_negative(), bits) {
            (false, Some(bits)) => Ok(self << bits),
            (true, Some(bits)) => Ok(self >> bits),
            (false, None) if self.is_zero() => Ok(BigInt::zero()),
            (false, None) => Err(BigIntError::TooLarge),
            (true, None) => Ok(if self.is_negative() {
                BigInt::from(-1i64)
            } else {
                BigInt::zero()
            }),
        }
    }

    /// `self >> count`; a negative count shifts left.
    pub fn checked_shr(&self, count: &Self) -> Result<Self, BigIntError> {
        self.checked_shl(&-count)
    }
}
