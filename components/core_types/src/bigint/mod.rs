//! Arbitrary-precision signed integers.
//!
//! [`BigInt`] is a sign-magnitude integer stored as a little-endian array of
//! digits. The digit width is a type parameter (see [`Digit`]); every width
//! runs the same algorithms.
//!
//! # Examples
//!
//! ```
//! use core_types::BigInt;
//!
//! let a: BigInt = "12345678901234567890".parse().unwrap();
//! let b: BigInt = BigInt::from(1i64);
//! assert_eq!((&a + &b).to_string(), "12345678901234567891");
//!
//! let r = BigInt::<u32>::from(-7i64).checked_rem(&BigInt::from(3i64)).unwrap();
//! assert_eq!(r, BigInt::from(-1i64));
//! ```

mod arith;
mod bitwise;
mod digit;
mod magnitude;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_traits::{One, ToPrimitive, Zero};
use thiserror::Error;

pub use digit::Digit;

/// Largest integer a double represents exactly.
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Failures of [`BigInt`] construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BigIntError {
    /// The source text contained a character that is not a decimal digit
    #[error("Cannot convert {0} to a BigInt")]
    InvalidDigit(String),
    /// The source text had no digits
    #[error("Cannot convert empty string to a BigInt")]
    Empty,
    /// Division or remainder by zero
    #[error("Division by zero")]
    DivisionByZero,
    /// Exponentiation with a negative exponent
    #[error("Exponent must be non-negative")]
    NegativeExponent,
    /// Shift or exponent too large to evaluate
    #[error("Maximum BigInt size exceeded")]
    TooLarge,
}

/// A signed integer of unbounded size.
///
/// The magnitude never carries most-significant zero digits and zero is
/// never negative, so derived equality and hashing are value equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInt<D: Digit = u32> {
    negative: bool,
    digits: Vec<D>,
}

impl<D: Digit> BigInt<D> {
    pub(crate) fn from_parts(negative: bool, mut digits: Vec<D>) -> Self {
        magnitude::trim(&mut digits);
        Self {
            negative: negative && !digits.is_empty(),
            digits,
        }
    }

    /// The value zero.
    pub fn zero() -> Self {
        Self {
            negative: false,
            digits: Vec::new(),
        }
    }

    /// Returns true for zero.
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Returns true for values below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self::from_parts(false, self.digits.clone())
    }

    /// Little-endian digits of the magnitude.
    pub fn digits(&self) -> &[D] {
        &self.digits
    }

    /// Number of significant bits of the magnitude.
    pub fn bit_len(&self) -> u64 {
        magnitude::bit_len(&self.digits)
    }

    /// Converts to `i64`, or `None` when the value does not fit.
    ///
    /// Never truncates: callers rely on `None` to fall back to a floating
    /// point or infinite representation.
    pub fn to_i64(&self) -> Option<i64> {
        let mag = self.magnitude_u64()?;
        if self.negative {
            if mag <= i64::MAX as u64 {
                Some(-(mag as i64))
            } else if mag == 1u64 << 63 {
                Some(i64::MIN)
            } else {
                None
            }
        } else {
            i64::try_from(mag).ok()
        }
    }

    /// Converts to `u64`, or `None` when negative or too large.
    pub fn to_u64(&self) -> Option<u64> {
        if self.negative {
            return None;
        }
        self.magnitude_u64()
    }

    /// Converts to `f64`.
    ///
    /// Only integers within the exact double range (`2^53 - 1`) convert;
    /// anything larger maps to the infinity of the same sign.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::BigInt;
    ///
    /// assert_eq!(BigInt::<u32>::from(-3i64).to_f64(), -3.0);
    /// let huge: BigInt = "9007199254740993".parse().unwrap();
    /// assert_eq!(huge.to_f64(), f64::INFINITY);
    /// ```
    pub fn to_f64(&self) -> f64 {
        let infinite = if self.negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        match self.to_i64() {
            Some(v) if v.unsigned_abs() <= MAX_SAFE_INTEGER => v as f64,
            _ => infinite,
        }
    }

    fn magnitude_u64(&self) -> Option<u64> {
        if self.bit_len() > 64 {
            return None;
        }
        let mut value = 0u64;
        for (i, d) in self.digits.iter().enumerate() {
            value |= d.to_u64() << (i as u32 * D::BITS);
        }
        Some(value)
    }

    /// Converts an integral, finite `f64`; `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::BigInt;
    ///
    /// assert_eq!(BigInt::<u32>::from_f64(-42.0), Some(BigInt::from(-42i64)));
    /// assert_eq!(BigInt::<u32>::from_f64(1.5), None);
    /// assert_eq!(BigInt::<u32>::from_f64(f64::NAN), None);
    /// ```
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return None;
        }
        let negative = value < 0.0;
        let abs = value.abs();
        let result = if abs < 18_446_744_073_709_551_616.0 {
            Self::from(abs as u64)
        } else {
            // Integral values this large are normal numbers: mantissa * 2^exp.
            let bits = abs.to_bits();
            let exp = ((bits >> 52) & 0x7ff) as usize - 1075;
            let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
            Self::from(mantissa) << exp
        };
        Some(if negative { -result } else { result })
    }

    fn from_u64_magnitude(negative: bool, mut value: u64) -> Self {
        let mut digits = Vec::new();
        while value > 0 {
            digits.push(D::truncate(value & D::mask()));
            value = if D::BITS >= 64 { 0 } else { value >> D::BITS };
        }
        Self::from_parts(negative, digits)
    }
}

impl<D: Digit> Default for BigInt<D> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<D: Digit> From<i64> for BigInt<D> {
    fn from(value: i64) -> Self {
        Self::from_u64_magnitude(value < 0, value.unsigned_abs())
    }
}

impl<D: Digit> From<u64> for BigInt<D> {
    fn from(value: u64) -> Self {
        Self::from_u64_magnitude(false, value)
    }
}

impl<D: Digit> From<i32> for BigInt<D> {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl<D: Digit> From<u32> for BigInt<D> {
    fn from(value: u32) -> Self {
        Self::from(u64::from(value))
    }
}

impl<D: Digit> FromStr for BigInt<D> {
    type Err = BigIntError;

    /// Parses an optionally signed decimal integer.
    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let (negative, body) = match source.as_bytes().first() {
            Some(b'-') => (true, &source[1..]),
            Some(b'+') => (false, &source[1..]),
            _ => (false, source),
        };
        if body.is_empty() {
            return Err(BigIntError::Empty);
        }
        if !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BigIntError::InvalidDigit(source.to_string()));
        }
        let (_, chunk_width) = D::DECIMAL_CHUNK;
        let mut digits: Vec<D> = Vec::new();
        for chunk in body.as_bytes().chunks(chunk_width) {
            let mut factor = 1u64;
            let mut value = 0u64;
            for b in chunk {
                factor *= 10;
                value = value * 10 + u64::from(b - b'0');
            }
            magnitude::mul_small_add(&mut digits, factor, value);
        }
        Ok(Self::from_parts(negative, digits))
    }
}

impl<D: Digit> fmt::Display for BigInt<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let (chunk, width) = D::DECIMAL_CHUNK;
        let mut groups = Vec::new();
        let mut rest = self.digits.clone();
        while !rest.is_empty() {
            let (quotient, rem) = magnitude::div_rem_small(&rest, chunk);
            groups.push(rem);
            rest = quotient;
        }
        let mut out = String::new();
        if self.negative {
            out.push('-');
        }
        let mut iter = groups.iter().rev();
        if let Some(first) = iter.next() {
            out.push_str(&first.to_string());
        }
        for group in iter {
            out.push_str(&format!("{:0width$}", group, width = width));
        }
        f.write_str(&out)
    }
}

impl<D: Digit> Ord for BigInt<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => magnitude::cmp(&self.digits, &other.digits),
            (true, true) => magnitude::cmp(&other.digits, &self.digits),
        }
    }
}

impl<D: Digit> PartialOrd for BigInt<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: Digit> Zero for BigInt<D> {
    fn zero() -> Self {
        BigInt::zero()
    }

    fn is_zero(&self) -> bool {
        BigInt::is_zero(self)
    }
}

impl<D: Digit> One for BigInt<D> {
    fn one() -> Self {
        Self::from(1u64)
    }
}

impl<D: Digit> ToPrimitive for BigInt<D> {
    fn to_i64(&self) -> Option<i64> {
        BigInt::to_i64(self)
    }

    fn to_u64(&self) -> Option<u64> {
        BigInt::to_u64(self)
    }

    fn to_f64(&self) -> Option<f64> {
        Some(BigInt::to_f64(self))
    }
}
