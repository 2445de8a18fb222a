//! Boundary to the bytecode evaluator.
//!
//! The runtime never executes script bodies itself. User functions and
//! generators hand their entry address, operand stack and receiver to an
//! [`Evaluator`] registered on the [`Context`].

use crate::context::Context;
use crate::error::JsResult;
use crate::value::Value;

/// Identifier of a compiled program, chosen by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub usize);

/// How a body is (re-)entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    /// First entry, or a plain function call
    Start,
    /// Generator resumed by `next(value)`
    Next(Value),
    /// Generator resumed by `throw(value)`
    Throw(Value),
}

/// Everything the evaluator needs to run or resume a body.
#[derive(Debug, Clone)]
pub struct EvalFrame {
    /// Address to start at
    pub pc: usize,
    /// Operand stack to restore
    pub stack: Vec<Value>,
    /// Receiver
    pub self_value: Value,
    /// Call arguments
    pub arguments: Vec<Value>,
    /// Entry mode
    pub resume: Resume,
}

/// How a body stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The body returned
    Return(Value),
    /// A generator body yielded; it resumes at `pc` with `stack`
    Yield {
        /// Yielded value
        value: Value,
        /// Resume address
        pc: usize,
        /// Operand stack to save
        stack: Vec<Value>,
    },
}

/// Executes compiled script bodies.
pub trait Evaluator {
    /// Find the compiled program for a source path.
    fn lookup(&self, path: &str) -> Option<ProgramId>;

    /// Run `program` from `frame` until it returns, yields or throws.
    fn eval(&self, ctx: &mut Context, program: ProgramId, frame: EvalFrame)
        -> JsResult<Completion>;
}
