//! Script exception kinds and the exception record.
//!
//! A [`JsError`] is the data carried by an exception value: its kind, its
//! message and the call stack captured when it was created.

use std::fmt;

use crate::{SourcePosition, StackFrame};

/// The kind of a script exception.
///
/// These correspond to the built-in error constructors a script can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Generic error, also used for thrown non-error values
    Error,
    /// Engine invariant violation
    InternalError,
    /// Undeclared or not-yet-initialized binding
    ReferenceError,
    /// Syntax error surfaced by the compiler
    SyntaxError,
    /// Wrong kind of value for an operation
    TypeError,
    /// Value out of allowed range
    RangeError,
}

impl ErrorKind {
    /// Constructor name of this kind, as shown in traces.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::ErrorKind;
    ///
    /// assert_eq!(ErrorKind::TypeError.name(), "TypeError");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::InternalError => "InternalError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::RangeError => "RangeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A script exception with message and stack trace.
///
/// `stack` is ordered outermost first, the way the call stack grows.
///
/// # Examples
///
/// ```
/// use core_types::{JsError, ErrorKind, StackFrame};
///
/// let mut error = JsError::new(ErrorKind::TypeError, "undefined is not a function");
/// error.stack.push(StackFrame::new("main"));
///
/// assert_eq!(
///     error.to_string(),
///     "TypeError: undefined is not a function\n  at main(<internal>)\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Call stack at the time the error was created
    pub stack: Vec<StackFrame>,
    /// Position of the innermost frame, when known
    pub source_position: Option<SourcePosition>,
}

impl JsError {
    /// Create an error without a stack.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            stack: Vec::new(),
            source_position: None,
        }
    }

    /// Attach a captured call stack.
    pub fn with_stack(mut self, stack: Vec<StackFrame>) -> Self {
        self.source_position = stack.last().map(StackFrame::position);
        self.stack = stack;
        self
    }
}

impl fmt::Display for JsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.kind, self.message)?;
        for frame in self.stack.iter().rev() {
            writeln!(f, "  at {}", frame)?;
        }
        Ok(())
    }
}

impl std::error::Error for JsError {}
