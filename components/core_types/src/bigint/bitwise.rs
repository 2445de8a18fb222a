//! Bitwise operators with two's-complement semantics for negative operands.
//!
//! Both operands are mapped into a common width one digit wider than the
//! larger magnitude, combined digit by digit, and mapped back.

use std::ops::{BitAnd, BitOr, BitXor, Not};

use super::arith::forward_binop;
use super::digit::Digit;
use super::magnitude;
use super::BigInt;

fn combine<D: Digit>(a: &BigInt<D>, b: &BigInt<D>, op: impl Fn(u64, u64) -> u64) -> BigInt<D> {
    let width = a.digits.len().max(b.digits.len()) + 1;
    let left = magnitude::to_twos(a.negative, &a.digits, width);
    let right = magnitude::to_twos(b.negative, &b.digits, width);
    let image = left
        .iter()
        .zip(right.iter())
        .map(|(x, y)| D::truncate(op(x.to_u64(), y.to_u64()) & D::mask()))
        .collect();
    let (negative, digits) = magnitude::from_twos(image);
    BigInt::from_parts(negative, digits)
}

impl<'a, D: Digit> BitAnd<&'a BigInt<D>> for &'a BigInt<D> {
    type Output = BigInt<D>;

    fn bitand(self, other: &'a BigInt<D>) -> BigInt<D> {
        combine(self, other, |x, y| x & y)
    }
}

impl<'a, D: Digit> BitOr<&'a BigInt<D>> for &'a BigInt<D> {
    type Output = BigInt<D>;

    fn bitor(self, other: &'a BigInt<D>) -> BigInt<D> {
        combine(self, other, |x, y| x | y)
    }
}

impl<'a, D: Digit> BitXor<&'a BigInt<D>> for &'a BigInt<D> {
    type Output = BigInt<D>;

    fn bitxor(self, other: &'a BigInt<D>) -> BigInt<D> {
        combine(self, other, |x, y| x ^ y)
    }
}

forward_binop!(BitAnd, bitand);
forward_binop!(BitOr, bitor);
forward_binop!(BitXor, bitxor);

impl<'a, D: Digit> Not for &'a BigInt<D> {
    type Output = BigInt<D>;

    /// `!x == -(x + 1)`
    fn not(self) -> BigInt<D> {
        -(self + &BigInt::from(1u64))
    }
}

impl<D: Digit> Not for BigInt<D> {
    type Output = BigInt<D>;

    fn not(self) -> BigInt<D> {
        !&self
    }
}
