//! Digit widths usable by [`BigInt`](super::BigInt).

use std::fmt::Debug;
use std::hash::Hash;

/// One limb of a [`BigInt`](super::BigInt) magnitude.
///
/// All arithmetic is carried out in `u64`, so a digit can be at most 32 bits
/// wide: the product of two digits plus two carries must fit in 64 bits.
pub trait Digit: Copy + Default + Eq + Ord + Hash + Debug + 'static {
    /// Width of the digit in bits.
    const BITS: u32;
    /// Largest power of ten representable by one digit, with its exponent.
    const DECIMAL_CHUNK: (u64, usize);

    /// Widen to `u64`.
    fn to_u64(self) -> u64;
    /// Keep the low `BITS` bits of `value`.
    fn truncate(value: u64) -> Self;

    /// `2^BITS`, the radix of the digit array.
    fn base() -> u64 {
        1u64 << Self::BITS
    }

    /// Mask selecting the low `BITS` bits.
    fn mask() -> u64 {
        Self::base() - 1
    }
}

macro_rules! impl_digit {
    ($ty:ty, $chunk:expr, $width:expr) => {
        impl Digit for $ty {
            const BITS: u32 = <$ty>::BITS;
            const DECIMAL_CHUNK: (u64, usize) = ($chunk, $width);

            #[inline]
            fn to_u64(self) -> u64 {
                self as u64
            }

            #[inline]
            fn truncate(value: u64) -> Self {
                value as $ty
            }
        }
    };
}

impl_digit!(u8, 100, 2);
impl_digit!(u16, 10_000, 4);
impl_digit!(u32, 1_000_000_000, 9);
