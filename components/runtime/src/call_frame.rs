//! Call stack used for exception traces.

use core_types::StackFrame;

/// Stack of active calls, outermost first.
///
/// Each frame records the position reached inside it: when a call is made,
/// the caller's frame stores the call site before the callee is pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStack {
    frames: Vec<StackFrame>,
}

impl CallStack {
    /// Create a stack seeded with the entry frame.
    pub fn new(entry_function: &str) -> Self {
        Self {
            frames: vec![StackFrame::new(entry_function)],
        }
    }

    /// Record the call site in the current frame and enter `function`.
    pub fn push(&mut self, filename: Option<&str>, function: &str, line: u32, column: u32) {
        self.set_position(filename, line, column);
        self.enter(function);
    }

    /// Enter `function`, keeping the position recorded in the caller.
    pub fn enter(&mut self, function: &str) {
        self.frames.push(StackFrame::new(function));
    }

    /// Record the position reached in the current frame.
    pub fn set_position(&mut self, filename: Option<&str>, line: u32, column: u32) {
        if let Some(top) = self.frames.last_mut() {
            top.set_position(filename.map(str::to_string), line, column);
        }
    }

    /// Leave the current frame. The entry frame is never popped.
    pub fn pop(&mut self) -> Option<StackFrame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// Snapshot of the stack with the current frame at the given position.
    pub fn trace(&self, filename: Option<&str>, line: u32, column: u32) -> Vec<StackFrame> {
        let mut frames = self.frames.clone();
        if let Some(top) = frames.last_mut() {
            if filename.is_some() || line > 0 {
                top.set_position(filename.map(str::to_string), line, column);
            }
        }
        frames
    }

    /// Number of frames, the entry frame included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Frames, outermost first.
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }
}
