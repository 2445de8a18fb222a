//! Unit tests for BigInt, cross-checked against num-bigint

use core_types::{BigInt, BigIntError, Digit};
use pretty_assertions::assert_eq;

type Oracle = num_bigint::BigInt;

/// Deterministic decimal strings of varying length and sign.
fn samples() -> Vec<String> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut out = vec![
        "0".to_string(),
        "1".to_string(),
        "-1".to_string(),
        "255".to_string(),
        "256".to_string(),
        "-65536".to_string(),
        "18446744073709551616".to_string(),
        "-9223372036854775808".to_string(),
    ];
    for len in 1..24 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let mut s = String::new();
        if state & 1 == 1 {
            s.push('-');
        }
        let mut digits = state;
        for i in 0..len {
            let d = (digits % 10) as u8;
            digits = digits / 10 + (i as u64 * 7919);
            s.push((b'0' + if i == 0 && d == 0 { 1 } else { d }) as char);
        }
        out.push(s);
    }
    out
}

fn mine(s: &str) -> BigInt {
    s.parse().unwrap()
}

fn oracle(s: &str) -> Oracle {
    s.parse().unwrap()
}

#[test]
fn test_round_trip_normalizes() {
    assert_eq!(mine("000").to_string(), "0");
    assert_eq!(mine("-0").to_string(), "0");
    assert_eq!(mine("-000120").to_string(), "-120");
    for s in samples() {
        assert_eq!(mine(&s).to_string(), oracle(&s).to_string());
    }
}

#[test]
fn test_round_trip_all_digit_widths() {
    for s in samples() {
        assert_eq!(s.parse::<BigInt<u8>>().unwrap().to_string(), oracle(&s).to_string());
        assert_eq!(s.parse::<BigInt<u16>>().unwrap().to_string(), oracle(&s).to_string());
    }
}

#[test]
fn test_add_past_u64() {
    let sum = mine("12345678901234567890") + mine("1");
    assert_eq!(sum, mine("12345678901234567891"));
}

#[test]
fn test_remainder_carries_dividend_sign() {
    assert_eq!(mine("-7").checked_rem(&mine("3")), Ok(mine("-1")));
    assert_eq!(mine("-7").checked_div(&mine("3")), Ok(mine("-2")));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(mine("1").checked_rem(&mine("0")), Err(BigIntError::DivisionByZero));
    assert_eq!(mine("1").checked_div(&mine("-0")), Err(BigIntError::DivisionByZero));
}

#[test]
fn test_arithmetic_matches_oracle() {
    let values = samples();
    for a in &values {
        for b in &values {
            let (x, y) = (mine(a), mine(b));
            let (ox, oy) = (oracle(a), oracle(b));
            assert_eq!((&x + &y).to_string(), (&ox + &oy).to_string(), "{} + {}", a, b);
            assert_eq!((&x - &y).to_string(), (&ox - &oy).to_string(), "{} - {}", a, b);
            assert_eq!((&x * &y).to_string(), (&ox * &oy).to_string(), "{} * {}", a, b);
            assert_eq!(x.cmp(&y), ox.cmp(&oy), "{} cmp {}", a, b);
            if !y.is_zero() {
                let q = x.checked_div(&y).unwrap();
                let r = x.checked_rem(&y).unwrap();
                assert_eq!(q.to_string(), (&ox / &oy).to_string(), "{} / {}", a, b);
                assert_eq!(r.to_string(), (&ox % &oy).to_string(), "{} % {}", a, b);
            }
        }
    }
}

#[test]
fn test_bitwise_matches_oracle() {
    let values = samples();
    for a in &values {
        for b in &values {
            let (x, y) = (mine(a), mine(b));
            let (ox, oy) = (oracle(a), oracle(b));
            assert_eq!((&x & &y).to_string(), (&ox & &oy).to_string(), "{} & {}", a, b);
            assert_eq!((&x | &y).to_string(), (&ox | &oy).to_string(), "{} | {}", a, b);
            assert_eq!((&x ^ &y).to_string(), (&ox ^ &oy).to_string(), "{} ^ {}", a, b);
        }
        assert_eq!((!mine(a)).to_string(), (!oracle(a)).to_string(), "!{}", a);
    }
}

#[test]
fn test_to_i64_signals_overflow() {
    assert_eq!(mine("9007199254740991").to_i64(), Some(9_007_199_254_740_991));
    assert_eq!(mine("-9223372036854775809").to_i64(), None);
    assert_eq!(mine("18446744073709551616").to_u64(), None);
}

#[test]
fn test_pow_and_shift() {
    assert_eq!(mine("10").pow(20), mine("100000000000000000000"));
    assert_eq!(mine("1") << 70, mine("1180591620717411303424"));
    assert_eq!(mine("-1180591620717411303424") >> 70, mine("-1"));
    assert_eq!(mine("-1180591620717411303425") >> 70, mine("-2"));
}

fn check_division<D: Digit>(a: &str, b: &str) {
    let (x, y) = (a.parse::<BigInt<D>>().unwrap(), b.parse::<BigInt<D>>().unwrap());
    let (ox, oy) = (oracle(a), oracle(b));
    assert_eq!(x.checked_div(&y).unwrap().to_string(), (&ox / &oy).to_string(), "{} / {}", a, b);
    assert_eq!(x.checked_rem(&y).unwrap().to_string(), (&ox % &oy).to_string(), "{} % {}", a, b);
}

#[test]
fn test_long_division_matches_oracle() {
    let values = samples();
    let wide: Vec<String> = values
        .iter()
        .zip(values.iter().rev())
        .map(|(a, b)| (oracle(a) * oracle(b) * oracle(a) + oracle(b)).to_string())
        .collect();
    for a in &wide {
        for b in wide.iter().chain(values.iter()) {
            if oracle(b) == Oracle::from(0) {
                continue;
            }
            check_division::<u32>(a, b);
            check_division::<u16>(a, b);
            check_division::<u8>(a, b);
        }
    }
    // divisor with a saturated top digit and a dividend just below a multiple of it
    let divisor = "340282366920938463463374607431768211455";
    let dividend = (oracle(divisor) * oracle("18446744073709551615") - Oracle::from(1)).to_string();
    check_division::<u32>(&dividend, divisor);
}
