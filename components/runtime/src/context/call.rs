//! Calls, construction and generator driving.

use std::rc::Rc;

use log::trace;
use memory_manager::AtomId;

use super::Context;
use crate::builtins::Intrinsic;
use crate::callable::{GeneratorState, JsGenerator};
use crate::error::{Exception, JsResult};
use crate::evaluator::{Completion, EvalFrame, Evaluator, ProgramId, Resume};
use crate::object::JsObject;
use crate::payload::Payload;
use crate::scope::ScopeId;
use crate::types::descriptor;
use crate::value::{Value, ValueKind};

/// How a generator is resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorResume {
    /// `next(value)`
    Next(Value),
    /// `return(value)`
    Return(Value),
    /// `throw(value)`
    Throw(Value),
}

/// Snapshot of the callable parts a call needs.
struct CallSite {
    name: String,
    global_context: bool,
    bound_self: Option<AtomId>,
    class: Option<AtomId>,
    closure: Vec<(String, AtomId)>,
}

impl Context {
    fn call_site(&self, func: Value) -> Option<CallSite> {
        let callable = self.payload(func)?.callable()?;
        Some(CallSite {
            name: callable.name.clone(),
            global_context: callable.global_context,
            bound_self: callable.bound_self,
            class: callable.class,
            closure: callable
                .closure
                .iter()
                .map(|(name, atom)| (name.clone(), *atom))
                .collect(),
        })
    }

    /// Move a call's outcome into the current scope so it outlives the
    /// callee's scope.
    fn rehome(&mut self, outcome: JsResult<Value>) -> JsResult<Value> {
        match outcome {
            Ok(value) => self.create_value(value.atom()),
            Err(exception) => match self.create_value(exception.value().atom()) {
                Ok(moved) => Err(Exception::new(moved)),
                Err(fault) => Err(fault),
            },
        }
    }

    fn leave_scope(&mut self, id: ScopeId) {
        self.dispose_scope(id);
        if self.config.collect_on_scope_exit {
            self.collect_garbage();
        }
    }

    /// Call `func` with `self_value` as receiver.
    ///
    /// The body runs in a fresh scope holding the captured bindings; the
    /// result is re-homed into the caller's scope before that scope is
    /// released.
    pub fn call(&mut self, func: Value, self_value: Value, args: &[Value]) -> JsResult<Value> {
        let kind = self.kind(func);
        let site = match self.call_site(func) {
            Some(site) if kind.is_callable() => site,
            _ => return Err(self.type_error("variable is not a function")),
        };
        self.enter_frame(&site.name)?;

        let caller = self.current;
        let saved_class = self.current_class;
        if site.global_context {
            self.current = self.root;
        }
        let scope = self.push_scope();
        trace!("call {} in scope {:?}", site.name, scope.0);

        let outcome = self.invoke(kind, func, self_value, args, &site);

        self.current = caller;
        let outcome = self.rehome(outcome);
        self.current_class = saved_class;
        self.leave_scope(scope);
        self.pop_call_stack();
        outcome
    }

    fn invoke(
        &mut self,
        kind: ValueKind,
        func: Value,
        self_value: Value,
        args: &[Value],
        site: &CallSite,
    ) -> JsResult<Value> {
        for (name, atom) in &site.closure {
            self.declare(name, Value::new(*atom));
        }
        let receiver = match site.bound_self {
            Some(atom) => self.create_value(atom)?,
            None => self_value,
        };
        if let Some(class) = site.class {
            let class = self.create_value(class)?;
            self.current_class = Some(class);
        }
        descriptor(kind).call(self, func, receiver, args)
    }

    /// `new ctor(...args)`.
    ///
    /// The constructor runs against a fresh object inheriting from
    /// `ctor.prototype`; an object returned by the constructor replaces it.
    pub fn construct(&mut self, ctor: Value, args: &[Value]) -> JsResult<Value> {
        let kind = self.kind(ctor);
        if !kind.is_callable() || kind == ValueKind::GeneratorFunction {
            let message = format!("{} is not a constructor", self.describe(ctor));
            return Err(self.type_error(message));
        }
        if self.is_intrinsic(ctor, Intrinsic::Array) {
            let undefined = self.create_undefined();
            return self.call(ctor, undefined, args);
        }
        let proto = self.get_field(ctor, "prototype")?;
        let proto = if self.kind(proto).is_object() {
            Some(proto.atom())
        } else {
            self.intrinsic_prototype(Intrinsic::Object)
        };
        let instance = self.alloc_object(Payload::Object(Box::new(JsObject::new(None))), proto);
        self.set_constructor(instance, ctor)?;
        let result = self.call(ctor, instance, args)?;
        if self.kind(result).is_object() {
            Ok(result)
        } else {
            Ok(instance)
        }
    }

    fn program_of(&mut self, func: Value) -> JsResult<(Rc<dyn Evaluator>, ProgramId, usize)> {
        let (path, address) = match self.payload(func) {
            Some(Payload::Function(f)) | Some(Payload::GeneratorFunction(f)) => {
                (f.path.clone(), f.address)
            }
            _ => return Err(self.type_error("variable is not a function")),
        };
        let evaluator = match self.evaluator.clone() {
            Some(evaluator) => evaluator,
            None => return Err(self.internal_error("No evaluator is registered")),
        };
        match evaluator.lookup(&path) {
            Some(program) => Ok((evaluator, program, address)),
            None => Err(self.internal_error(format!("Program '{}' is not loaded", path))),
        }
    }

    /// Run a script function's body through the evaluator.
    pub(crate) fn run_function(&mut self, func: Value, self_value: Value, args: &[Value]) -> JsResult<Value> {
        let (evaluator, program, address) = self.program_of(func)?;
        let frame = EvalFrame {
            pc: address,
            stack: Vec::new(),
            self_value,
            arguments: args.to_vec(),
            resume: Resume::Start,
        };
        match evaluator.eval(self, program, frame)? {
            Completion::Return(value) => Ok(value),
            Completion::Yield { .. } => {
                Err(self.internal_error("Cannot yield from a non-generator function"))
            }
        }
    }

    /// Run a host function.
    pub(crate) fn run_native(&mut self, func: Value, self_value: Value, args: &[Value]) -> JsResult<Value> {
        let op = match self.payload(func) {
            Some(Payload::NativeFunction(native)) => native.op.clone(),
            _ => return Err(self.type_error("variable is not a function")),
        };
        op(self, self_value, args)
    }

    /// Capture a generator function call without running its body.
    pub(crate) fn create_generator(
        &mut self,
        func: Value,
        self_value: Value,
        args: &[Value],
    ) -> JsResult<Value> {
        let proto = self.get_field(func, "prototype")?;
        let proto = if self.kind(proto).is_object() {
            Some(proto.atom())
        } else {
            self.intrinsic_prototype(Intrinsic::Generator)
        };
        let generator = JsGenerator {
            object: JsObject::new(None),
            function: func.atom(),
            self_value: self_value.atom(),
            arguments: Vec::new(),
            closure: Vec::new(),
            state: GeneratorState::Start,
        };
        let value = self.alloc_object(Payload::Generator(Box::new(generator)), proto);
        let host = value.atom();
        let function = self.store(host, func)?;
        let receiver = self.store(host, self_value)?;
        let mut arguments = Vec::with_capacity(args.len());
        for arg in args {
            arguments.push(self.store(host, *arg)?);
        }

        let captured = self.call_site(func).map(|site| site.closure).unwrap_or_default();
        let mut closure = Vec::with_capacity(captured.len());
        for (name, atom) in captured {
            self.link(host, atom);
            closure.push((name, atom));
        }

        if let Some(Payload::Generator(generator)) = self.heap.get_mut(host) {
            generator.function = function;
            generator.self_value = receiver;
            generator.arguments = arguments;
            generator.closure = closure;
        }
        Ok(value)
    }

    /// Drive a generator one step, producing a `{ value, done }` object.
    pub fn generator_resume(&mut self, generator: Value, resume: GeneratorResume) -> JsResult<Value> {
        let state = match self.payload(generator) {
            Some(Payload::Generator(g)) => g.state.clone(),
            _ => return Err(self.type_error("next method called on incompatible receiver")),
        };
        let (pc, saved_stack) = match (state, resume) {
            (GeneratorState::Running, _) => {
                return Err(self.type_error("Generator is already running"))
            }
            (GeneratorState::Done, GeneratorResume::Next(_)) => {
                let undefined = self.create_undefined();
                return self.iterator_result(undefined, true);
            }
            (_, GeneratorResume::Return(value)) => {
                self.finish_generator(generator);
                return self.iterator_result(value, true);
            }
            (GeneratorState::Done, GeneratorResume::Throw(value))
            | (GeneratorState::Start, GeneratorResume::Throw(value)) => {
                self.finish_generator(generator);
                return Err(self.throw_value(value));
            }
            (GeneratorState::Start, GeneratorResume::Next(_)) => (None, Vec::new()),
            (GeneratorState::Suspended { pc, stack }, _) => (Some(pc), stack),
        };
        let entry = match resume {
            GeneratorResume::Next(value) if pc.is_some() => Resume::Next(value),
            GeneratorResume::Throw(value) => Resume::Throw(value),
            _ => Resume::Start,
        };
        self.run_generator(generator, pc, saved_stack, entry)
    }

    fn run_generator(
        &mut self,
        generator: Value,
        pc: Option<usize>,
        saved_stack: Vec<AtomId>,
        entry: Resume,
    ) -> JsResult<Value> {
        let (function, self_atom, argument_atoms, closure) = match self.payload(generator) {
            Some(Payload::Generator(g)) => (
                g.function,
                g.self_value,
                g.arguments.clone(),
                g.closure.clone(),
            ),
            _ => return Err(self.type_error("next method called on incompatible receiver")),
        };
        let host = self.host(generator)?;
        self.set_generator_state(generator, GeneratorState::Running);

        // Each step gets a fresh scope over the captured bindings.
        let root = self.root;
        let scope = self.new_scope(root);
        let caller = self.set_scope(scope);
        for (name, atom) in &closure {
            self.declare(name, Value::new(*atom));
        }
        let outcome = self.step_generator(function, self_atom, &argument_atoms, pc, &saved_stack, entry);
        self.set_scope(caller);
        for atom in saved_stack {
            self.unlink(host, atom);
        }
        let settled = self.settle_generator(generator, host, outcome);
        self.leave_scope(scope);
        settled
    }

    fn settle_generator(
        &mut self,
        generator: Value,
        host: AtomId,
        outcome: JsResult<Completion>,
    ) -> JsResult<Value> {
        match outcome {
            Ok(Completion::Yield { value, pc, stack }) => {
                let mut saved = Vec::with_capacity(stack.len());
                for item in stack {
                    saved.push(self.store(host, item)?);
                }
                self.set_generator_state(generator, GeneratorState::Suspended { pc, stack: saved });
                let value = self.create_value(value.atom())?;
                self.iterator_result(value, false)
            }
            Ok(Completion::Return(value)) => {
                let value = self.create_value(value.atom())?;
                self.finish_generator(generator);
                self.iterator_result(value, true)
            }
            Err(exception) => {
                let moved = self.rehome(Err(exception));
                self.finish_generator(generator);
                moved
            }
        }
    }

    fn step_generator(
        &mut self,
        function: AtomId,
        self_atom: AtomId,
        argument_atoms: &[AtomId],
        pc: Option<usize>,
        saved_stack: &[AtomId],
        entry: Resume,
    ) -> JsResult<Completion> {
        let func = self.create_value(function)?;
        let self_value = self.create_value(self_atom)?;
        let mut arguments = Vec::with_capacity(argument_atoms.len());
        for atom in argument_atoms {
            arguments.push(self.create_value(*atom)?);
        }
        let mut stack = Vec::with_capacity(saved_stack.len());
        for atom in saved_stack {
            stack.push(self.create_value(*atom)?);
        }
        let (evaluator, program, address) = self.program_of(func)?;
        let name = self
            .call_site(func)
            .map(|site| site.name)
            .unwrap_or_default();
        self.enter_frame(&name)?;
        let frame = EvalFrame {
            pc: pc.unwrap_or(address),
            stack,
            self_value,
            arguments,
            resume: entry,
        };
        let outcome = evaluator.eval(self, program, frame);
        self.pop_call_stack();
        outcome
    }

    fn set_generator_state(&mut self, generator: Value, state: GeneratorState) {
        if let Some(Payload::Generator(g)) = self.heap.get_mut(generator.atom()) {
            g.state = state;
        }
    }

    /// Mark the generator done and drop its saved stack and captures.
    fn finish_generator(&mut self, generator: Value) {
        let host = self.heap.owner(generator.atom());
        let (closure, stack) = match self.heap.get_mut(generator.atom()) {
            Some(Payload::Generator(g)) => {
                let stack = match std::mem::replace(&mut g.state, GeneratorState::Done) {
                    GeneratorState::Suspended { stack, .. } => stack,
                    _ => Vec::new(),
                };
                (std::mem::take(&mut g.closure), stack)
            }
            _ => return,
        };
        if let Some(host) = host {
            for atom in stack.into_iter().chain(closure.into_iter().map(|(_, atom)| atom)) {
                self.unlink(host, atom);
            }
        }
    }

    /// `{ value, done }`
    pub fn iterator_result(&mut self, value: Value, done: bool) -> JsResult<Value> {
        let result = self.create_object();
        self.set_field(result, "value", value)?;
        let done = self.create_boolean(done);
        self.set_field(result, "done", done)?;
        Ok(result)
    }
}
