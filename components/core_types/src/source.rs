//! Source position and stack frame types for exception traces.
//!
//! Frames are recorded by the runtime's call stack and copied into every
//! exception at the moment it is created.

use std::fmt;

/// A line/column position inside a source file.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition::new(10, 5);
/// assert_eq!(pos.line, 10);
/// assert_eq!(pos.to_string(), "10:5");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    /// Line number (1-indexed once known, 0 while unknown)
    pub line: u32,
    /// Column number (1-indexed once known, 0 while unknown)
    pub column: u32,
}

impl SourcePosition {
    /// Create a new position
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single frame of the script call stack.
///
/// The `line`/`column` pair of a frame is the position reached inside that
/// function: it is filled in when the function calls out, or when a trace is
/// captured while it is the innermost frame.
///
/// # Examples
///
/// ```
/// use core_types::StackFrame;
///
/// let frame = StackFrame {
///     function_name: Some("myFunction".to_string()),
///     source_url: Some("main.js".to_string()),
///     line: 25,
///     column: 10,
/// };
///
/// assert_eq!(frame.to_string(), "myFunction(main.js:25:10)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackFrame {
    /// Name of the function, or None for anonymous functions
    pub function_name: Option<String>,
    /// Path of the source file, or None for host (native) frames
    pub source_url: Option<String>,
    /// Line reached in this frame
    pub line: u32,
    /// Column reached in this frame
    pub column: u32,
}

impl StackFrame {
    /// Create a frame for `function_name` with an unknown position.
    pub fn new(function_name: impl Into<String>) -> Self {
        let name = function_name.into();
        Self {
            function_name: if name.is_empty() { None } else { Some(name) },
            source_url: None,
            line: 0,
            column: 0,
        }
    }

    /// Record the position reached inside this frame.
    pub fn set_position(&mut self, source_url: Option<String>, line: u32, column: u32) {
        self.source_url = source_url;
        self.line = line;
        self.column = column;
    }

    /// Position reached inside this frame.
    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column)
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.function_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "anonymous",
        };
        match self.source_url.as_deref() {
            Some(url) if !url.is_empty() => {
                write!(f, "{}({}:{}:{})", name, url, self.line, self.column)
            }
            _ => write!(f, "{}(<internal>)", name),
        }
    }
}
