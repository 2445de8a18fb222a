//! Contract compliance tests for core_types
//!
//! These tests pin down the public surface other components rely on.

use core_types::{BigInt, BigIntError, Digit, ErrorKind, JsError, SourcePosition, StackFrame};
use num_traits::{One, ToPrimitive, Zero};

#[cfg(test)]
mod error_contract_tests {
    use super::*;

    /// Contract: the exception taxonomy has the generic kind plus the named kinds
    #[test]
    fn test_error_kind_variants() {
        let kinds = [
            ErrorKind::Error,
            ErrorKind::InternalError,
            ErrorKind::ReferenceError,
            ErrorKind::SyntaxError,
            ErrorKind::TypeError,
            ErrorKind::RangeError,
        ];
        assert_eq!(kinds.len(), 6);
    }

    /// Contract: JsError exposes kind, message, stack and source position
    #[test]
    fn test_js_error_fields() {
        let error = JsError {
            kind: ErrorKind::TypeError,
            message: "m".to_string(),
            stack: vec![StackFrame::new("f")],
            source_position: Some(SourcePosition::new(1, 2)),
        };
        assert_eq!(error.kind, ErrorKind::TypeError);
        assert_eq!(error.message, "m");
        assert_eq!(error.stack.len(), 1);
    }
}

#[cfg(test)]
mod bigint_contract_tests {
    use super::*;

    /// Contract: digit widths are interchangeable
    #[test]
    fn test_digit_widths() {
        assert_eq!(<u8 as Digit>::BITS, 8);
        assert_eq!(<u16 as Digit>::BITS, 16);
        assert_eq!(<u32 as Digit>::BITS, 32);
    }

    /// Contract: num-traits vocabulary is implemented
    #[test]
    fn test_num_traits() {
        assert!(<BigInt as Zero>::zero().is_zero());
        assert_eq!(<BigInt as One>::one(), BigInt::from(1i64));
        assert_eq!(ToPrimitive::to_i64(&BigInt::<u32>::from(-3i64)), Some(-3));
        assert_eq!(ToPrimitive::to_f64(&BigInt::<u32>::from(4i64)), Some(4.0));
    }

    /// Contract: errors render script-facing messages
    #[test]
    fn test_error_messages() {
        assert_eq!(BigIntError::DivisionByZero.to_string(), "Division by zero");
        assert_eq!(
            BigIntError::InvalidDigit("1x".to_string()).to_string(),
            "Cannot convert 1x to a BigInt"
        );
    }
}
