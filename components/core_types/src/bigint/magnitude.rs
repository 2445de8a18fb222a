//! Unsigned magnitude arithmetic over little-endian digit slices.
//!
//! Every function returns a trimmed vector: no most-significant zero digits,
//! and zero is the empty vector.

use std::cmp::Ordering;

use super::digit::Digit;

pub(crate) fn trim<D: Digit>(digits: &mut Vec<D>) {
    while digits.last().map_or(false, |d| d.to_u64() == 0) {
        digits.pop();
    }
}

pub(crate) fn cmp<D: Digit>(a: &[D], b: &[D]) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        other => return other,
    }
    for (x, y) in a.iter().rev().zip(b.iter().rev()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

pub(crate) fn add<D: Digit>(a: &[D], b: &[D]) -> Vec<D> {
    let len = a.len().max(b.len());
    let mut out = Vec::with_capacity(len + 1);
    let mut carry = 0u64;
    for i in 0..len {
        let x = a.get(i).map_or(0, |d| d.to_u64());
        let y = b.get(i).map_or(0, |d| d.to_u64());
        let sum = x + y + carry;
        out.push(D::truncate(sum & D::mask()));
        carry = sum >> D::BITS;
    }
    if carry > 0 {
        out.push(D::truncate(carry));
    }
    trim(&mut out);
    out
}

/// `a - b`, requires `a >= b`.
pub(crate) fn sub<D: Digit>(a: &[D], b: &[D]) -> Vec<D> {
    debug_assert!(cmp(a, b) != Ordering::Less);
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0u64;
    for (i, x) in a.iter().enumerate() {
        let x = x.to_u64();
        let y = b.get(i).map_or(0, |d| d.to_u64()) + borrow;
        if x >= y {
            out.push(D::truncate(x - y));
            borrow = 0;
        } else {
            out.push(D::truncate(x + D::base() - y));
            borrow = 1;
        }
    }
    trim(&mut out);
    out
}

pub(crate) fn mul<D: Digit>(a: &[D], b: &[D]) -> Vec<D> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut acc = vec![0u64; a.len() + b.len()];
    for (i, x) in a.iter().enumerate() {
        let x = x.to_u64();
        let mut carry = 0u64;
        for (j, y) in b.iter().enumerate() {
            let cur = acc[i + j] + x * y.to_u64() + carry;
            acc[i + j] = cur & D::mask();
            carry = cur >> D::BITS;
        }
        let mut k = i + b.len();
        while carry > 0 {
            let cur = acc[k] + carry;
            acc[k] = cur & D::mask();
            carry = cur >> D::BITS;
            k += 1;
        }
    }
    let mut out: Vec<D> = acc.into_iter().map(D::truncate).collect();
    trim(&mut out);
    out
}

/// `digits = digits * factor + addend`, with `factor`, `addend` below the radix.
pub(crate) fn mul_small_add<D: Digit>(digits: &mut Vec<D>, factor: u64, addend: u64) {
    let mut carry = addend;
    for d in digits.iter_mut() {
        let cur = d.to_u64() * factor + carry;
        *d = D::truncate(cur & D::mask());
        carry = cur >> D::BITS;
    }
    while carry > 0 {
        digits.push(D::truncate(carry & D::mask()));
        carry >>= D::BITS;
    }
    trim(digits);
}

/// Divide by a divisor below the radix, returning the remainder.
pub(crate) fn div_rem_small<D: Digit>(digits: &[D], divisor: u64) -> (Vec<D>, u64) {
    let mut quotient = vec![D::default(); digits.len()];
    let mut rem = 0u64;
    for (i, d) in digits.iter().enumerate().rev() {
        let cur = (rem << D::BITS) | d.to_u64();
        quotient[i] = D::truncate(cur / divisor);
        rem = cur % divisor;
    }
    trim(&mut quotient);
    (quotient, rem)
}

pub(crate) fn bit_len<D: Digit>(digits: &[D]) -> u64 {
    match digits.last() {
        None => 0,
        Some(top) => {
            let top_bits = 64 - u64::from(top.to_u64().leading_zeros());
            (digits.len() as u64 - 1) * u64::from(D::BITS) + top_bits
        }
    }
}

pub(crate) fn shl<D: Digit>(digits: &[D], bits: usize) -> Vec<D> {
    if digits.is_empty() {
        return Vec::new();
    }
    let width = D::BITS as usize;
    let (whole, part) = (bits / width, bits % width);
    let mut out = vec![D::default(); whole];
    if part == 0 {
        out.extend_from_slice(digits);
    } else {
        let mut carry = 0u64;
        for d in digits {
            let cur = (d.to_u64() << part) | carry;
            out.push(D::truncate(cur & D::mask()));
            carry = cur >> width;
        }
        if carry > 0 {
            out.push(D::truncate(carry));
        }
    }
    trim(&mut out);
    out
}

/// Logical right shift, returning whether any set bit was shifted out.
pub(crate) fn shr<D: Digit>(digits: &[D], bits: usize) -> (Vec<D>, bool) {
    let width = D::BITS as usize;
    let (whole, part) = (bits / width, bits % width);
    if whole >= digits.len() {
        return (Vec::new(), !digits.is_empty());
    }
    let mut lost = digits[..whole].iter().any(|d| d.to_u64() != 0);
    let rest = &digits[whole..];
    let mut out = Vec::with_capacity(rest.len());
    if part == 0 {
        out.extend_from_slice(rest);
    } else {
        lost |= rest[0].to_u64() & ((1u64 << part) - 1) != 0;
        for i in 0..rest.len() {
            let low = rest[i].to_u64() >> part;
            let high = rest.get(i + 1).map_or(0, |d| d.to_u64()) << (width - part);
            out.push(D::truncate((low | high) & D::mask()));
        }
    }
    trim(&mut out);
    (out, lost)
}

/// Long division of magnitudes (Knuth, TAOCP vol. 2, 4.3.1 algorithm D);
/// `b` must be non-zero.
pub(crate) fn div_rem<D: Digit>(a: &[D], b: &[D]) -> (Vec<D>, Vec<D>) {
    debug_assert!(!b.is_empty());
    if cmp(a, b) == Ordering::Less {
        return (Vec::new(), a.to_vec());
    }
    if b.len() == 1 {
        let (q, r) = div_rem_small(a, b[0].to_u64());
        let mut rem = vec![D::truncate(r)];
        trim(&mut rem);
        return (q, rem);
    }
    let (base, mask, width) = (D::base(), D::mask(), D::BITS);
    let n = b.len();
    let m = a.len() - n;

    // Normalize so the divisor's top digit has its high bit set.
    let shift = (b[n - 1].to_u64().leading_zeros() - (64 - width)) as usize;
    let v: Vec<u64> = shl(b, shift).iter().map(|d| d.to_u64()).collect();
    let mut u: Vec<u64> = shl(a, shift).iter().map(|d| d.to_u64()).collect();
    u.resize(a.len() + 1, 0);
    let (v_top, v_next) = (v[n - 1], v[n - 2]);

    let mut quotient = vec![D::default(); m + 1];
    for j in (0..=m).rev() {
        let numerator = (u[j + n] << width) | u[j + n - 1];
        let mut qhat = numerator / v_top;
        let mut rhat = numerator % v_top;
        while qhat >= base || qhat * v_next > ((rhat << width) | u[j + n - 2]) {
            qhat -= 1;
            rhat += v_top;
            if rhat >= base {
                break;
            }
        }

        let mut carry = 0u64;
        let mut borrow = 0u64;
        for i in 0..n {
            let product = qhat * v[i] + carry;
            carry = product >> width;
            let take = (product & mask) + borrow;
            let cur = u[i + j];
            if cur >= take {
                u[i + j] = cur - take;
                borrow = 0;
            } else {
                u[i + j] = cur + base - take;
                borrow = 1;
            }
        }
        let take = carry + borrow;
        let overdrawn = u[j + n] < take;
        u[j + n] = if overdrawn {
            u[j + n] + base - take
        } else {
            u[j + n] - take
        };

        if overdrawn {
            qhat -= 1;
            let mut carry = 0u64;
            for i in 0..n {
                let sum = u[i + j] + v[i] + carry;
                u[i + j] = sum & mask;
                carry = sum >> width;
            }
            u[j + n] = (u[j + n] + carry) & mask;
        }
        quotient[j] = D::truncate(qhat);
    }
    trim(&mut quotient);

    let low: Vec<D> = u[..n].iter().map(|d| D::truncate(*d)).collect();
    let (rem, _) = shr(&low, shift);
    (quotient, rem)
}

/// Two's-complement image of a signed magnitude in `width` digits.
///
/// A negative value maps to `(all-ones + 1) - |x|`, computed as the digit-wise
/// complement of `|x|` plus one.
pub(crate) fn to_twos<D: Digit>(negative: bool, digits: &[D], width: usize) -> Vec<D> {
    let mut out: Vec<D> = (0..width)
        .map(|i| digits.get(i).copied().unwrap_or_default())
        .collect();
    if negative {
        let mut carry = 1u64;
        for d in out.iter_mut() {
            let cur = (!d.to_u64() & D::mask()) + carry;
            *d = D::truncate(cur & D::mask());
            carry = cur >> D::BITS;
        }
    }
    out
}

/// Inverse of [`to_twos`]: returns the sign and trimmed magnitude.
pub(crate) fn from_twos<D: Digit>(mut digits: Vec<D>) -> (bool, Vec<D>) {
    let negative = digits
        .last()
        .map_or(false, |top| top.to_u64() >> (D::BITS - 1) == 1);
    if negative {
        let mut carry = 1u64;
        for d in digits.iter_mut() {
            let cur = (!d.to_u64() & D::mask()) + carry;
            *d = D::truncate(cur & D::mask());
            carry = cur >> D::BITS;
        }
    }
    trim(&mut digits);
    (negative && !digits.is_empty(), digits)
}
