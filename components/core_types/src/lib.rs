//! Core types shared by the script runtime.
//!
//! This crate provides the leaf types every other component builds on:
//! the exception taxonomy, call-stack frames for traces, and the
//! arbitrary-precision integer backing script `BigInt` values.
//!
//! # Overview
//!
//! - [`ErrorKind`] - Kinds of script exceptions
//! - [`JsError`] - Exception record with a captured stack trace
//! - [`StackFrame`] - Call stack frame information
//! - [`SourcePosition`] - Line/column location
//! - [`BigInt`] - Sign-magnitude integer over a configurable digit width
//!
//! # Examples
//!
//! ```
//! use core_types::{BigInt, ErrorKind, JsError, StackFrame};
//!
//! let n: BigInt = "-12345678901234567890".parse().unwrap();
//! assert!(n.is_negative());
//! assert_eq!(n.to_i64(), None);
//!
//! let error = JsError::new(ErrorKind::TypeError, "undefined is not a function")
//!     .with_stack(vec![StackFrame::new("main")]);
//! assert_eq!(error.stack.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod bigint;
mod error;
mod source;

pub use bigint::{BigInt, BigIntError, Digit};
pub use error::{ErrorKind, JsError};
pub use source::{SourcePosition, StackFrame};
