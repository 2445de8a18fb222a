//! Callable and generator payloads.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use memory_manager::AtomId;

use crate::context::Context;
use crate::error::JsResult;
use crate::object::JsObject;
use crate::value::Value;

/// Host operation behind a native function: `(context, self, arguments)`.
pub type NativeFn = Rc<dyn Fn(&mut Context, Value, &[Value]) -> JsResult<Value>>;

/// Parts shared by every callable kind.
#[derive(Debug, Clone)]
pub struct Callable {
    pub(crate) object: JsObject,
    pub(crate) name: String,
    pub(crate) closure: IndexMap<String, AtomId>,
    pub(crate) global_context: bool,
    pub(crate) bound_self: Option<AtomId>,
    pub(crate) class: Option<AtomId>,
}

impl Callable {
    pub(crate) fn new(name: &str, prototype: Option<AtomId>) -> Self {
        Self {
            object: JsObject::new(prototype),
            name: name.to_string(),
            closure: IndexMap::new(),
            global_context: false,
            bound_self: None,
            class: None,
        }
    }

    /// Function name; empty for anonymous functions.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names captured from enclosing scopes.
    pub fn captured(&self) -> impl Iterator<Item = &str> {
        self.closure.keys().map(String::as_str)
    }

    /// Returns true when the body runs against the root scope.
    pub fn is_global_context(&self) -> bool {
        self.global_context
    }
}

/// Function compiled from script: a program path and an entry address.
#[derive(Debug, Clone)]
pub struct JsFunction {
    pub(crate) callable: Callable,
    pub(crate) path: String,
    pub(crate) address: usize,
}

impl JsFunction {
    /// Source path of the program holding the body.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Entry address of the body.
    pub fn address(&self) -> usize {
        self.address
    }
}

/// Function implemented by the host.
#[derive(Clone)]
pub struct NativeFunction {
    pub(crate) callable: Callable,
    pub(crate) op: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.callable.name)
            .finish_non_exhaustive()
    }
}

/// Execution state of a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorState {
    /// Created, body not entered yet
    Start,
    /// Body executing
    Running,
    /// Stopped at a `yield`; resumes at `pc` with the saved operand stack
    Suspended {
        /// Resume address
        pc: usize,
        /// Saved operand stack
        stack: Vec<AtomId>,
    },
    /// Returned or threw
    Done,
}

/// Generator instance: the captured call plus its resume point.
#[derive(Debug, Clone)]
pub struct JsGenerator {
    pub(crate) object: JsObject,
    pub(crate) function: AtomId,
    pub(crate) self_value: AtomId,
    pub(crate) arguments: Vec<AtomId>,
    pub(crate) closure: Vec<(String, AtomId)>,
    pub(crate) state: GeneratorState,
}

impl JsGenerator {
    /// Current state.
    pub fn state(&self) -> &GeneratorState {
        &self.state
    }
}
