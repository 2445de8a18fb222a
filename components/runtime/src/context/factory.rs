//! Value factories.

use core_types::BigInt;
use log::warn;
use memory_manager::AtomId;

use super::Context;
use crate::builtins::Intrinsic;
use crate::callable::{Callable, JsFunction, NativeFunction};
use crate::error::JsResult;
use crate::object::{JsArray, JsObject, PropertyDescriptor, SymbolId};
use crate::payload::Payload;
use crate::value::{Value, ValueKind};

impl Context {
    /// `undefined`
    pub fn create_undefined(&mut self) -> Value {
        self.alloc(Payload::Undefined)
    }

    /// `null`
    pub fn create_null(&mut self) -> Value {
        self.alloc(Payload::Null)
    }

    /// A binding slot read before its declaration runs.
    pub fn create_uninitialized(&mut self) -> Value {
        self.alloc(Payload::Uninitialized)
    }

    /// A number; NaN and infinities get their own kinds.
    pub fn create_number(&mut self, value: f64) -> Value {
        self.alloc(Payload::number(value))
    }

    /// A string.
    pub fn create_string(&mut self, value: impl Into<String>) -> Value {
        self.alloc(Payload::String(value.into()))
    }

    /// A boolean.
    pub fn create_boolean(&mut self, value: bool) -> Value {
        self.alloc(Payload::Boolean(value))
    }

    /// A BigInt.
    pub fn create_bigint(&mut self, value: BigInt) -> Value {
        self.alloc(Payload::BigInt(value))
    }

    /// A new, unique symbol.
    pub fn create_symbol(&mut self, description: Option<&str>) -> Value {
        self.next_symbol += 1;
        self.alloc(Payload::Symbol {
            id: SymbolId(self.next_symbol),
            description: description.map(str::to_string),
        })
    }

    /// Share `atom` into the payload hosted by `host`, for links that cannot
    /// fail on live atoms.
    fn share_into(&mut self, host: AtomId, atom: AtomId) -> Option<AtomId> {
        match self.heap.alloc_shared(atom) {
            Ok(alias) => {
                self.link(host, alias);
                Some(alias)
            }
            Err(err) => {
                warn!("cannot share {} into {}: {}", atom, host, err);
                None
            }
        }
    }

    /// Allocate an object-kind payload whose prototype is `prototype`.
    pub(crate) fn alloc_object(&mut self, payload: Payload, prototype: Option<AtomId>) -> Value {
        let value = self.alloc(payload);
        if let Some(proto) = prototype {
            let stored = self.share_into(value.atom(), proto);
            if let Some(object) = self.object_mut(value) {
                object.prototype = stored;
            }
        }
        value
    }

    /// A plain object inheriting from `Object.prototype`.
    pub fn create_object(&mut self) -> Value {
        let proto = self.intrinsic_prototype(Intrinsic::Object);
        self.alloc_object(Payload::Object(Box::new(JsObject::new(None))), proto)
    }

    /// A plain object with the given prototype; `None` for a null prototype.
    pub fn create_object_with_prototype(&mut self, prototype: Option<Value>) -> Value {
        let proto = prototype.map(|p| p.atom());
        self.alloc_object(Payload::Object(Box::new(JsObject::new(None))), proto)
    }

    /// An array holding copies of `items`.
    pub fn create_array(&mut self, items: &[Value]) -> JsResult<Value> {
        let proto = self.intrinsic_prototype(Intrinsic::Array);
        let array = self.alloc_object(Payload::Array(Box::new(JsArray::new(None))), proto);
        let host = array.atom();
        let mut stored = Vec::with_capacity(items.len());
        for item in items {
            stored.push(self.store(host, *item)?);
        }
        if let Some(Payload::Array(array)) = self.heap.get_mut(host) {
            array.items = stored.into_iter().enumerate().collect();
            array.length = items.len();
        }
        Ok(array)
    }

    /// A script function.
    ///
    /// `closure` lists the captured bindings; they are shared with the
    /// enclosing scope, so writes on either side are visible to both.
    pub fn create_function(
        &mut self,
        name: &str,
        path: &str,
        address: usize,
        closure: &[(&str, Value)],
    ) -> JsResult<Value> {
        let function = JsFunction {
            callable: Callable::new(name, None),
            path: path.to_string(),
            address,
        };
        let proto = self.intrinsic_prototype(Intrinsic::Function);
        let func = self.alloc_object(Payload::Function(Box::new(function)), proto);
        self.capture(func, closure);
        let instance_proto = self.intrinsic_prototype(Intrinsic::Object);
        self.init_function(func, name, instance_proto)?;
        Ok(func)
    }

    /// A script generator function: calling it yields a generator.
    pub fn create_generator_function(
        &mut self,
        name: &str,
        path: &str,
        address: usize,
        closure: &[(&str, Value)],
    ) -> JsResult<Value> {
        let function = JsFunction {
            callable: Callable::new(name, None),
            path: path.to_string(),
            address,
        };
        let proto = self
            .intrinsic_prototype(Intrinsic::GeneratorFunction)
            .or_else(|| self.intrinsic_prototype(Intrinsic::Function));
        let func = self.alloc_object(Payload::GeneratorFunction(Box::new(function)), proto);
        self.capture(func, closure);
        let instance_proto = self.intrinsic_prototype(Intrinsic::Generator);
        self.init_function(func, name, instance_proto)?;
        Ok(func)
    }

    /// A host function.
    pub fn create_native_function<F>(&mut self, name: &str, op: F) -> JsResult<Value>
    where
        F: Fn(&mut Context, Value, &[Value]) -> JsResult<Value> + 'static,
    {
        let native = NativeFunction {
            callable: Callable::new(name, None),
            op: std::rc::Rc::new(op),
        };
        let proto = self.intrinsic_prototype(Intrinsic::Function);
        let func = self.alloc_object(Payload::NativeFunction(Box::new(native)), proto);
        let name = self.create_string(name);
        self.define_property(func, "name", PropertyDescriptor::data(name).hidden().read_only())?;
        Ok(func)
    }

    fn capture(&mut self, func: Value, closure: &[(&str, Value)]) {
        let host = func.atom();
        for (name, variable) in closure {
            self.link(host, variable.atom());
            let replaced = self
                .heap
                .get_mut(host)
                .and_then(Payload::callable_mut)
                .and_then(|callable| callable.closure.insert(name.to_string(), variable.atom()));
            if let Some(old) = replaced {
                self.unlink(host, old);
            }
        }
    }

    /// Give a fresh function its `prototype` object and its `name`.
    fn init_function(
        &mut self,
        func: Value,
        name: &str,
        instance_proto: Option<AtomId>,
    ) -> JsResult<()> {
        let prototype = self.alloc_object(Payload::Object(Box::new(JsObject::new(None))), instance_proto);
        if self.kind(func) == ValueKind::Function {
            self.define_property(prototype, "constructor", PropertyDescriptor::data(func).hidden())?;
        }
        self.define_property(func, "prototype", PropertyDescriptor::data(prototype).hidden())?;
        let name = self.create_string(name);
        self.define_property(func, "name", PropertyDescriptor::data(name).hidden().read_only())?;
        Ok(())
    }

    /// Run the function's body against the root scope.
    pub fn set_global_context(&mut self, func: Value, global: bool) -> JsResult<()> {
        match self.heap.get_mut(func.atom()).and_then(Payload::callable_mut) {
            Some(callable) => {
                callable.global_context = global;
                Ok(())
            }
            None => Err(self.type_error("variable is not a function")),
        }
    }

    /// Fix the receiver of every later call, as arrow functions do.
    pub fn bind_self(&mut self, func: Value, self_value: Value) -> JsResult<()> {
        self.set_callable_slot(func, self_value, |callable| &mut callable.bound_self)
    }

    /// Record the class a method belongs to.
    pub fn set_class(&mut self, func: Value, class: Value) -> JsResult<()> {
        self.set_callable_slot(func, class, |callable| &mut callable.class)
    }

    fn set_callable_slot(
        &mut self,
        func: Value,
        value: Value,
        slot: fn(&mut Callable) -> &mut Option<AtomId>,
    ) -> JsResult<()> {
        if self.payload(func).and_then(Payload::callable).is_none() {
            return Err(self.type_error("variable is not a function"));
        }
        let host = self.host(func)?;
        let atom = self.store(host, value)?;
        let old = self
            .heap
            .get_mut(func.atom())
            .and_then(Payload::callable_mut)
            .and_then(|callable| slot(callable).replace(atom));
        if let Some(old) = old {
            self.unlink(host, old);
        }
        Ok(())
    }
}
