//! Error types.
//!
//! Script-level failures travel as [`Exception`] values inside
//! [`JsResult`]; host-level failures of the runtime itself are
//! [`RuntimeError`]s.

use core_types::{BigIntError, ErrorKind, JsError};
use memory_manager::HeapError;
use thiserror::Error;

use crate::value::Value;

/// Handle to an EXCEPTION-kind value.
///
/// Returned in the `Err` arm of every fallible context operation and passed
/// upward unchanged with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exception(Value);

impl Exception {
    pub(crate) fn new(value: Value) -> Self {
        Exception(value)
    }

    /// The exception value itself.
    pub fn value(&self) -> Value {
        self.0
    }
}

/// Result of an operation that may raise a script exception.
pub type JsResult<T = Value> = Result<T, Exception>;

/// Failures of the runtime host.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The built-in bootstrap raised an exception
    #[error("bootstrap failed: {0}")]
    Bootstrap(String),
    /// The heap rejected an operation
    #[error(transparent)]
    Heap(#[from] HeapError),
    /// A configuration document could not be read or written
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Script-visible form of a heap failure.
pub(crate) fn heap_fault(err: HeapError) -> JsError {
    JsError::new(ErrorKind::InternalError, err.to_string())
}

/// Script-visible form of a BigInt failure.
pub(crate) fn bigint_fault(err: BigIntError) -> JsError {
    let kind = match err {
        BigIntError::InvalidDigit(_) | BigIntError::Empty => ErrorKind::SyntaxError,
        BigIntError::DivisionByZero
        | BigIntError::NegativeExponent
        | BigIntError::TooLarge => ErrorKind::RangeError,
    };
    JsError::new(kind, err.to_string())
}
