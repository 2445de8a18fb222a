//! The runtime context.
//!
//! A [`Context`] owns the atom heap, the scope tree, the call stack, the
//! global object and the built-in constructors. It is the single entry point
//! of the evaluator: every value is created, read, converted and called
//! through it.
//!
//! Handles returned by the context are rooted in the current scope. Atoms
//! stored inside payloads are private to the context and are never handed
//! out directly; reading them yields a fresh handle holding the same payload.

mod call;
mod coerce;
mod factory;
mod operator;
mod property;

use std::rc::Rc;

use core_types::{ErrorKind, JsError, StackFrame};
use log::{debug, warn};
use memory_manager::{Arena, AtomId, GcStats, Heap, HeapConfig};
use rustc_hash::FxHashMap;

use crate::builtins::{self, Intrinsic};
use crate::call_frame::CallStack;
use crate::config::ContextConfig;
use crate::error::{heap_fault, Exception, JsResult, RuntimeError};
use crate::evaluator::Evaluator;
use crate::object::{JsObject, PropertyKey};
use crate::payload::{ExceptionRecord, Payload};
use crate::scope::{Scope, ScopeId};
use crate::value::{Value, ValueKind};

pub use call::GeneratorResume;
pub(crate) use coerce::PRIMITIVE_SLOT;

/// Interpreter session state.
///
/// # Examples
///
/// ```
/// use runtime::{Context, ContextConfig, ValueKind};
///
/// let mut ctx = Context::new(ContextConfig::default()).unwrap();
/// let obj = ctx.create_object();
/// let answer = ctx.create_number(42.0);
/// ctx.set_field(obj, "answer", answer).unwrap();
///
/// let read = ctx.get_field(obj, "answer").unwrap();
/// assert_eq!(ctx.kind(read), ValueKind::Number);
/// assert_eq!(ctx.to_string(read).unwrap(), "42");
/// assert_eq!(ctx.to_string(obj).unwrap(), "[object Object]");
/// ```
pub struct Context {
    config: ContextConfig,
    pub(crate) heap: Heap<Payload>,
    scopes: Arena<Scope>,
    root: ScopeId,
    current: ScopeId,
    call_stack: CallStack,
    global: Value,
    intrinsics: FxHashMap<Intrinsic, AtomId>,
    well_known: FxHashMap<String, AtomId>,
    registry: FxHashMap<String, AtomId>,
    evaluator: Option<Rc<dyn Evaluator>>,
    current_class: Option<Value>,
    next_symbol: u64,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("live_atoms", &self.heap.live_atoms())
            .field("scopes", &self.scopes.len())
            .field("call_depth", &self.call_stack.depth())
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Create a context and run the built-in bootstrap.
    pub fn new(config: ContextConfig) -> Result<Self, RuntimeError> {
        let mut heap = Heap::with_config(HeapConfig {
            initial_capacity: config.initial_heap_capacity,
        });
        let anchor = heap.alloc_anchor();
        let global_atom = heap.alloc(Payload::Object(Box::new(JsObject::new(None))));
        heap.add_child(anchor, global_atom)?;

        let mut scopes = Arena::new();
        let mut root_scope = Scope::new(None, anchor);
        let global = Value::new(global_atom);
        root_scope.values.push(global);
        let root = ScopeId(scopes.insert(root_scope));

        let mut ctx = Context {
            call_stack: CallStack::new(&config.entry_function),
            config,
            heap,
            scopes,
            root,
            current: root,
            global,
            intrinsics: FxHashMap::default(),
            well_known: FxHashMap::default(),
            registry: FxHashMap::default(),
            evaluator: None,
            current_class: None,
            next_symbol: 0,
        };
        if let Err(exception) = builtins::bootstrap(&mut ctx) {
            return Err(RuntimeError::Bootstrap(ctx.describe(exception.value())));
        }
        debug!("context ready with {} live atoms", ctx.heap.live_atoms());
        Ok(ctx)
    }

    /// Create a context that runs script bodies with `evaluator`.
    pub fn with_evaluator(
        config: ContextConfig,
        evaluator: Rc<dyn Evaluator>,
    ) -> Result<Self, RuntimeError> {
        let mut ctx = Self::new(config)?;
        ctx.evaluator = Some(evaluator);
        Ok(ctx)
    }

    /// Register the evaluator used by script functions and generators.
    pub fn set_evaluator(&mut self, evaluator: Rc<dyn Evaluator>) {
        self.evaluator = Some(evaluator);
    }

    /// Active configuration.
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// The global object.
    pub fn global(&self) -> Value {
        self.global
    }

    // ----- heap plumbing -------------------------------------------------

    /// Payload behind a handle; `None` for stale handles.
    pub fn payload(&self, value: Value) -> Option<&Payload> {
        self.heap.get(value.atom())
    }

    /// Kind of a value. Stale handles read as `undefined`.
    pub fn kind(&self, value: Value) -> ValueKind {
        match self.heap.get(value.atom()) {
            Some(payload) => payload.kind(),
            None => {
                warn!("stale handle {} read as undefined", value.atom());
                ValueKind::Undefined
            }
        }
    }

    /// Heap statistics, cumulative.
    pub fn gc_stats(&self) -> GcStats {
        self.heap.stats()
    }

    /// Number of live atoms, scope anchors included.
    pub fn live_atoms(&self) -> usize {
        self.heap.live_atoms()
    }

    /// Returns true while the handle's atom is live.
    pub fn is_live(&self, value: Value) -> bool {
        self.heap.contains(value.atom())
    }

    /// Returns true when both handles hold the very same payload.
    pub fn same_value(&self, a: Value, b: Value) -> bool {
        self.heap.same_payload(a.atom(), b.atom())
    }

    pub(crate) fn link(&mut self, parent: AtomId, child: AtomId) {
        if let Err(err) = self.heap.add_child(parent, child) {
            warn!("cannot link {} -> {}: {}", parent, child, err);
        }
    }

    pub(crate) fn unlink(&mut self, parent: AtomId, child: AtomId) {
        if let Err(err) = self.heap.remove_child(parent, child) {
            warn!("cannot unlink {} -> {}: {}", parent, child, err);
        }
    }

    /// Allocate a payload rooted in the current scope.
    pub(crate) fn alloc(&mut self, payload: Payload) -> Value {
        let atom = self.heap.alloc(payload);
        self.root_in_current(atom);
        Value::new(atom)
    }

    fn root_in_current(&mut self, atom: AtomId) {
        let current = self.current;
        if let Some(scope) = self.scopes.get_mut(current.0) {
            let root = scope.root;
            scope.values.push(Value::new(atom));
            self.link(root, atom);
        }
    }

    /// Atom hosting the edges of the payload behind `value`.
    pub(crate) fn host(&mut self, value: Value) -> JsResult<AtomId> {
        match self.heap.owner(value.atom()) {
            Some(owner) => Ok(owner),
            None => Err(self.stale(value)),
        }
    }

    pub(crate) fn stale(&mut self, value: Value) -> Exception {
        warn!("operation on stale handle {}", value.atom());
        self.throw(JsError::new(
            ErrorKind::InternalError,
            format!("{} is no longer live", value.atom()),
        ))
    }

    /// A private atom holding a copy of `value`: primitives are cloned,
    /// everything else is shared.
    pub(crate) fn clone_atom(&mut self, value: Value) -> JsResult<AtomId> {
        let copy = match self.heap.get(value.atom()) {
            Some(payload) => payload.descriptor().clone_payload(payload),
            None => return Err(self.stale(value)),
        };
        match copy {
            Some(payload) => Ok(self.heap.alloc(payload)),
            None => self
                .heap
                .alloc_shared(value.atom())
                .map_err(|err| self.throw(heap_fault(err))),
        }
    }

    /// Store `value` for the payload hosted by `host`.
    pub(crate) fn store(&mut self, host: AtomId, value: Value) -> JsResult<AtomId> {
        let atom = self.clone_atom(value)?;
        self.link(host, atom);
        Ok(atom)
    }

    /// Re-home an atom into the current scope as a fresh handle.
    pub fn create_value(&mut self, atom: AtomId) -> JsResult<Value> {
        let alias = self
            .heap
            .alloc_shared(atom)
            .map_err(|err| self.throw(heap_fault(err)))?;
        self.root_in_current(alias);
        Ok(Value::new(alias))
    }

    /// Keep `value` alive until the current scope ends.
    pub fn recycle(&mut self, value: Value) {
        self.root_in_current(value.atom());
    }

    /// A new handle holding a copy of `value`.
    ///
    /// Primitives get a fresh payload; objects, symbols and exceptions are
    /// shared, so the clone compares equal but is a different atom.
    pub fn clone_value(&mut self, value: Value) -> JsResult<Value> {
        let atom = self.clone_atom(value)?;
        self.root_in_current(atom);
        Ok(Value::new(atom))
    }

    pub(crate) fn object(&self, value: Value) -> Option<&JsObject> {
        self.heap.get(value.atom()).and_then(Payload::object)
    }

    pub(crate) fn object_mut(&mut self, value: Value) -> Option<&mut JsObject> {
        self.heap.get_mut(value.atom()).and_then(Payload::object_mut)
    }

    /// Run a collection pass.
    pub fn collect_garbage(&mut self) -> GcStats {
        let stats = self.heap.collect();
        self.heap.take_released();
        stats
    }

    // ----- scopes ----------------------------------------------------------

    /// The scope new values are rooted in.
    pub fn current_scope(&self) -> ScopeId {
        self.current
    }

    /// The outermost scope.
    pub fn root_scope(&self) -> ScopeId {
        self.root
    }

    /// Look up a scope.
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0)
    }

    /// Push a child of the current scope and make it current.
    pub fn push_scope(&mut self) -> ScopeId {
        let parent = self.current;
        let id = self.new_scope(parent);
        self.current = id;
        debug!("push scope {:?} (parent {:?})", id.0, parent.0);
        id
    }

    pub(crate) fn new_scope(&mut self, parent: ScopeId) -> ScopeId {
        let anchor = self.heap.alloc_anchor();
        let id = ScopeId(self.scopes.insert(Scope::new(Some(parent), anchor)));
        if let Some(scope) = self.scopes.get_mut(parent.0) {
            scope.children.push(id);
        }
        id
    }

    /// Pop the current scope, disposing everything rooted only in it.
    ///
    /// The root scope is never popped.
    pub fn pop_scope(&mut self) {
        let id = self.current;
        let parent = match self.scopes.get(id.0).and_then(|scope| scope.parent) {
            Some(parent) => parent,
            None => {
                warn!("attempt to pop the root scope");
                return;
            }
        };
        self.current = parent;
        self.dispose_scope(id);
        debug!("pop scope {:?}", id.0);
        if self.config.collect_on_scope_exit {
            self.collect_garbage();
        }
    }

    /// Make `scope` current, returning the previous one.
    pub fn set_scope(&mut self, scope: ScopeId) -> ScopeId {
        std::mem::replace(&mut self.current, scope)
    }

    pub(crate) fn scope_root(&self, id: ScopeId) -> Option<AtomId> {
        self.scopes.get(id.0).map(|scope| scope.root)
    }

    pub(crate) fn dispose_scope(&mut self, id: ScopeId) {
        let scope = match self.scopes.remove(id.0) {
            Some(scope) => scope,
            None => return,
        };
        for child in scope.children {
            self.dispose_scope(child);
        }
        if let Some(parent) = scope.parent.and_then(|p| self.scopes.get_mut(p.0)) {
            parent.children.retain(|c| *c != id);
        }
        if self.current == id {
            self.current = scope.parent.unwrap_or(self.root);
        }
        if let Err(err) = self.heap.dispose(scope.root) {
            warn!("scope anchor already gone: {}", err);
        }
    }

    // ----- bindings --------------------------------------------------------

    /// Bind `name` in the current scope.
    pub fn declare(&mut self, name: &str, value: Value) -> Value {
        let current = self.current;
        if let Some(scope) = self.scopes.get_mut(current.0) {
            let root = scope.root;
            scope.named.insert(name.to_string(), value);
            self.link(root, value.atom());
        }
        value
    }

    /// Resolve `name` through the scope chain, then the global object.
    pub fn query_value(&mut self, name: &str) -> JsResult<Value> {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            let scope = match self.scopes.get(id.0) {
                Some(scope) => scope,
                None => break,
            };
            if let Some(value) = scope.named.get(name) {
                return Ok(*value);
            }
            cursor = scope.parent;
        }
        let key = PropertyKey::from(name);
        if self.lookup(self.global.atom(), &key).is_some() {
            let global = self.global;
            return self.get_field(global, name);
        }
        Err(self.reference_error(format!("'{}' is not defined", name)))
    }

    /// Store `value` into the binding behind `variable`.
    pub fn assign_value(&mut self, variable: Value, value: Value) -> JsResult<Value> {
        if variable.is_const() && self.kind(variable) != ValueKind::Uninitialized {
            return Err(self.type_error("Assignment to constant variable."));
        }
        let copy = match self.heap.get(value.atom()) {
            Some(payload) => payload.descriptor().clone_payload(payload),
            None => return Err(self.stale(value)),
        };
        let result = match copy {
            Some(payload) => self.heap.set_payload(variable.atom(), payload),
            None => self.heap.share_payload(variable.atom(), value.atom()),
        };
        result.map_err(|err| self.throw(heap_fault(err)))?;
        Ok(variable)
    }

    /// Raise REFERENCE for a binding read before initialization.
    pub fn check_initialized(&mut self, value: Value) -> JsResult<Value> {
        if self.kind(value) == ValueKind::Uninitialized {
            return Err(self.reference_error("Cannot access variable before initialization"));
        }
        Ok(value)
    }

    // ----- metadata and class context ------------------------------------

    /// Set or clear a hidden per-object slot.
    pub fn set_metadata(&mut self, obj: Value, name: &str, meta: Option<Value>) -> JsResult<()> {
        if self.object(obj).is_none() {
            return Err(self.type_error("Cannot attach metadata to a non-object"));
        }
        let host = self.host(obj)?;
        let stored = match meta {
            Some(meta) => Some(self.store(host, meta)?),
            None => None,
        };
        let old = match self.object_mut(obj) {
            Some(object) => match stored {
                Some(atom) => object.metadata.insert(name.to_string(), atom),
                None => object.metadata.remove(name),
            },
            None => None,
        };
        if let Some(old) = old {
            self.unlink(host, old);
        }
        Ok(())
    }

    /// Read a hidden per-object slot.
    pub fn get_metadata(&mut self, obj: Value, name: &str) -> JsResult<Option<Value>> {
        let atom = self
            .object(obj)
            .and_then(|object| object.metadata.get(name).copied());
        atom.map(|atom| self.create_value(atom)).transpose()
    }

    /// Set the class whose body is executing, returning the previous one.
    pub fn set_current_class(&mut self, class: Option<Value>) -> Option<Value> {
        std::mem::replace(&mut self.current_class, class)
    }

    /// The class whose body is executing.
    pub fn current_class(&self) -> Option<Value> {
        self.current_class
    }

    // ----- call stack and exceptions --------------------------------------

    /// Record the call site and enter `function`.
    pub fn push_call_stack(
        &mut self,
        filename: Option<&str>,
        function: &str,
        line: u32,
        column: u32,
    ) -> JsResult<()> {
        self.call_stack.set_position(filename, line, column);
        self.enter_frame(function)
    }

    pub(crate) fn enter_frame(&mut self, function: &str) -> JsResult<()> {
        if self.call_stack.depth() >= self.config.max_call_depth {
            return Err(self.range_error("Maximum call stack size exceeded"));
        }
        self.call_stack.enter(function);
        Ok(())
    }

    /// Leave the current frame.
    pub fn pop_call_stack(&mut self) {
        self.call_stack.pop();
    }

    /// Record the position reached in the current frame.
    pub fn set_position(&mut self, filename: Option<&str>, line: u32, column: u32) {
        self.call_stack.set_position(filename, line, column);
    }

    /// Snapshot of the call stack, outermost first.
    pub fn trace(&self, filename: Option<&str>, line: u32, column: u32) -> Vec<StackFrame> {
        self.call_stack.trace(filename, line, column)
    }

    /// Number of frames on the call stack, the entry frame included.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// Create an exception value, capturing the call stack if `error` has
    /// none.
    pub fn throw(&mut self, error: JsError) -> Exception {
        let error = if error.stack.is_empty() {
            let stack = self.call_stack.frames().to_vec();
            error.with_stack(stack)
        } else {
            error
        };
        let value = self.alloc(Payload::Exception(Box::new(ExceptionRecord {
            error,
            thrown: None,
        })));
        Exception::new(value)
    }

    /// Create an exception of `kind`.
    pub fn create_exception(&mut self, kind: ErrorKind, message: impl Into<String>) -> Exception {
        self.throw(JsError::new(kind, message))
    }

    /// TYPE exception.
    pub fn type_error(&mut self, message: impl Into<String>) -> Exception {
        self.create_exception(ErrorKind::TypeError, message)
    }

    /// REFERENCE exception.
    pub fn reference_error(&mut self, message: impl Into<String>) -> Exception {
        self.create_exception(ErrorKind::ReferenceError, message)
    }

    /// RANGE exception.
    pub fn range_error(&mut self, message: impl Into<String>) -> Exception {
        self.create_exception(ErrorKind::RangeError, message)
    }

    /// INTERNAL exception.
    pub fn internal_error(&mut self, message: impl Into<String>) -> Exception {
        self.create_exception(ErrorKind::InternalError, message)
    }

    /// SYNTAX exception, as surfaced from the compiler.
    pub fn syntax_error(&mut self, message: impl Into<String>) -> Exception {
        self.create_exception(ErrorKind::SyntaxError, message)
    }

    /// Wrap a thrown script value in an exception.
    pub fn throw_value(&mut self, value: Value) -> Exception {
        if self.kind(value) == ValueKind::Exception {
            return Exception::new(value);
        }
        let exception = self.create_exception(ErrorKind::Error, "Uncaught exception");
        let stored = self
            .host(exception.value())
            .and_then(|host| self.store(host, value));
        if let Ok(atom) = stored {
            if let Some(Payload::Exception(record)) = self.heap.get_mut(exception.value().atom()) {
                record.thrown = Some(atom);
            }
        }
        exception
    }

    /// The value a `catch` clause binds: the thrown value, or the exception
    /// itself when it was raised by the runtime.
    pub fn caught_value(&mut self, exception: Exception) -> JsResult<Value> {
        match self.exception_record(exception).and_then(|r| r.thrown) {
            Some(atom) => self.create_value(atom),
            None => Ok(exception.value()),
        }
    }

    /// Kind, message and trace of an exception.
    pub fn exception_error(&self, exception: Exception) -> Option<&JsError> {
        self.exception_record(exception).map(|record| &record.error)
    }

    fn exception_record(&self, exception: Exception) -> Option<&ExceptionRecord> {
        match self.heap.get(exception.value().atom()) {
            Some(Payload::Exception(record)) => Some(record),
            _ => None,
        }
    }

    /// Best-effort string for diagnostics; never raises.
    pub fn describe(&mut self, value: Value) -> String {
        match self.to_string(value) {
            Ok(text) => text,
            Err(_) => match self.payload(value) {
                Some(payload) => format!("<{:?}>", payload.kind()),
                None => "<stale>".to_string(),
            },
        }
    }

    // ----- intrinsics ------------------------------------------------------

    pub(crate) fn register_intrinsic(&mut self, which: Intrinsic, ctor: Value) -> JsResult<()> {
        let root = self.scope_root(self.root);
        let atom = self.clone_atom(ctor)?;
        if let Some(root) = root {
            self.link(root, atom);
        }
        self.intrinsics.insert(which, atom);
        Ok(())
    }

    pub(crate) fn intrinsic_atom(&self, which: Intrinsic) -> Option<AtomId> {
        self.intrinsics.get(&which).copied()
    }

    /// Atom of the `prototype` field of a built-in constructor.
    pub(crate) fn intrinsic_prototype(&self, which: Intrinsic) -> Option<AtomId> {
        let ctor = self.intrinsic_atom(which)?;
        let object = self.heap.get(ctor)?.object()?;
        object.field(&PropertyKey::from("prototype"))?.value
    }

    /// Returns true when `value` is the built-in constructor `which`.
    pub fn is_intrinsic(&self, value: Value, which: Intrinsic) -> bool {
        self.intrinsic_atom(which)
            .map_or(false, |atom| self.heap.same_payload(atom, value.atom()))
    }

    /// Returns true once the built-in constructor `which` is installed.
    pub fn is_bootstrapped(&self, which: Intrinsic) -> bool {
        self.intrinsics.contains_key(&which)
    }

    /// Handle to a built-in constructor.
    pub fn get_intrinsic(&mut self, which: Intrinsic) -> JsResult<Value> {
        match self.intrinsic_atom(which) {
            Some(atom) => self.create_value(atom),
            None => Err(self.internal_error(format!("{} is not bootstrapped", which.name()))),
        }
    }

    pub(crate) fn register_well_known(&mut self, name: &str, symbol: Value) -> JsResult<()> {
        let root = self.scope_root(self.root);
        let atom = self.clone_atom(symbol)?;
        if let Some(root) = root {
            self.link(root, atom);
        }
        self.well_known.insert(name.to_string(), atom);
        Ok(())
    }

    /// Property key of a well-known symbol such as `iterator`.
    pub fn well_known_key(&self, name: &str) -> Option<PropertyKey> {
        let atom = self.well_known.get(name)?;
        self.heap
            .get(*atom)
            .and_then(Payload::symbol_id)
            .map(PropertyKey::Symbol)
    }

    /// Handle to a well-known symbol such as `iterator`.
    pub fn well_known_symbol(&mut self, name: &str) -> JsResult<Value> {
        match self.well_known.get(name).copied() {
            Some(atom) => self.create_value(atom),
            None => Err(self.internal_error(format!("Unknown well-known symbol '{}'", name))),
        }
    }

    /// The shared symbol registered under `key`, creating it on first use.
    pub fn symbol_for(&mut self, key: &str) -> JsResult<Value> {
        if let Some(atom) = self.registry.get(key).copied() {
            return self.create_value(atom);
        }
        let symbol = self.create_symbol(Some(key));
        let root = self.scope_root(self.root);
        let atom = self.clone_atom(symbol)?;
        if let Some(root) = root {
            self.link(root, atom);
        }
        self.registry.insert(key.to_string(), atom);
        Ok(symbol)
    }

    /// Registry key of a shared symbol.
    pub fn symbol_key_for(&self, symbol: Value) -> Option<String> {
        self.registry
            .iter()
            .find(|(_, atom)| self.heap.same_payload(**atom, symbol.atom()))
            .map(|(key, _)| key.clone())
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        let root = self.root;
        self.dispose_scope(root);
        let stats = self.collect_garbage();
        debug!(
            "context torn down: {} atoms reclaimed, {} left",
            stats.atoms_reclaimed,
            self.heap.live_atoms()
        );
    }
}
