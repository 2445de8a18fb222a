//! Field access, prototypes, arrays and object integrity levels.

use indexmap::IndexSet;
use log::warn;
use memory_manager::AtomId;
use rustc_hash::FxHashSet;

use super::Context;
use crate::error::{Exception, JsResult};
use crate::number::format_number;
use crate::object::{array_index, Field, PropertyDescriptor, PropertyKey, SymbolId};
use crate::payload::Payload;
use crate::types::Pack;
use crate::value::{Value, ValueKind};

impl Context {
    /// Find `key` on the object behind `atom` or along its prototype chain.
    ///
    /// A prototype cycle ends the walk as a miss.
    pub(crate) fn lookup(&self, atom: AtomId, key: &PropertyKey) -> Option<Field> {
        let mut visited = FxHashSet::default();
        let mut cursor = Some(atom);
        while let Some(current) = cursor {
            let owner = self.heap.owner(current)?;
            if !visited.insert(owner) {
                warn!("prototype cycle through {}", current);
                return None;
            }
            let object = self.heap.get(current)?.object()?;
            if let Some(field) = object.field(key) {
                return Some(field.clone());
            }
            cursor = object.prototype;
        }
        None
    }

    /// Prototype used for property lookups on a primitive.
    fn primitive_prototype(&self, value: Value) -> Option<AtomId> {
        let pack = self.payload(value)?.descriptor().pack().ok()?;
        match pack {
            Pack::Wrap(which) => self.intrinsic_prototype(which),
            Pack::Itself => None,
        }
    }

    fn symbol_atom(&self, id: SymbolId) -> Option<AtomId> {
        self.well_known
            .values()
            .chain(self.registry.values())
            .copied()
            .find(|atom| self.heap.get(*atom).and_then(Payload::symbol_id) == Some(id))
    }

    fn key_text(&self, obj: Value, key: &PropertyKey) -> String {
        match key {
            PropertyKey::Name(name) => name.clone(),
            PropertyKey::Symbol(id) => {
                let atom = self
                    .object(obj)
                    .and_then(|object| object.symbol_keys.get(id).copied())
                    .or_else(|| self.symbol_atom(*id));
                match atom.and_then(|atom| self.heap.get(atom)) {
                    Some(Payload::Symbol {
                        description: Some(text),
                        ..
                    }) => format!("Symbol({})", text),
                    _ => "Symbol()".to_string(),
                }
            }
        }
    }

    fn object_tag(&self, obj: Value) -> String {
        match self.payload(obj) {
            Some(payload) => format!("#<{}>", payload.descriptor().name()),
            None => "#<Object>".to_string(),
        }
    }

    fn read_only_error(&mut self, obj: Value, key: &PropertyKey) -> Exception {
        let message = format!(
            "Cannot assign to read only property '{}' of object '{}'",
            self.key_text(obj, key),
            self.object_tag(obj)
        );
        self.type_error(message)
    }

    fn not_extensible_error(&mut self, obj: Value, key: &PropertyKey) -> Exception {
        let message = format!(
            "Cannot add property {}, object is not extensible",
            self.key_text(obj, key)
        );
        self.type_error(message)
    }

    /// Property key of a value: symbols key by identity, everything else by
    /// its string form.
    pub fn property_key(&mut self, key: Value) -> JsResult<PropertyKey> {
        if let Some(id) = self.payload(key).and_then(Payload::symbol_id) {
            return Ok(PropertyKey::Symbol(id));
        }
        if self.kind(key).is_object() {
            let primitive = self.unpack(key)?;
            return self.property_key(primitive);
        }
        Ok(PropertyKey::Name(self.to_string(key)?))
    }

    /// Read `obj[name]`.
    pub fn get_field(&mut self, obj: Value, name: &str) -> JsResult<Value> {
        self.get_property(obj, &PropertyKey::from(name))
    }

    /// Write `obj[name] = value`.
    pub fn set_field(&mut self, obj: Value, name: &str, value: Value) -> JsResult<Value> {
        self.set_property(obj, &PropertyKey::from(name), value)
    }

    /// Read `obj[key]` for a computed key.
    pub fn get_member(&mut self, obj: Value, key: Value) -> JsResult<Value> {
        let key = self.property_key(key)?;
        self.get_property(obj, &key)
    }

    /// Write `obj[key] = value` for a computed key.
    pub fn set_member(&mut self, obj: Value, key: Value, value: Value) -> JsResult<Value> {
        let property = self.property_key(key)?;
        self.write_property(obj, &property, Some(key), value)
    }

    /// Read a property, walking the prototype chain.
    ///
    /// Primitives read through the prototype of their wrapper constructor
    /// without being boxed.
    pub fn get_property(&mut self, obj: Value, key: &PropertyKey) -> JsResult<Value> {
        let kind = self.kind(obj);
        if kind.is_nullish() || kind == ValueKind::Uninitialized {
            let message = format!(
                "Cannot read properties of {} (reading '{}')",
                self.describe(obj),
                self.key_text(obj, key)
            );
            return Err(self.type_error(message));
        }
        if let Some(value) = self.intrinsic_property(obj, kind, key)? {
            return Ok(value);
        }
        let field = if kind.is_object() {
            self.lookup(obj.atom(), key)
        } else {
            self.primitive_prototype(obj)
                .and_then(|proto| self.lookup(proto, key))
        };
        self.read_field(field, obj)
    }

    /// Properties computed from the payload: string and array `length` and
    /// indices, exception `name`/`message`/`stack`.
    fn intrinsic_property(
        &mut self,
        obj: Value,
        kind: ValueKind,
        key: &PropertyKey,
    ) -> JsResult<Option<Value>> {
        let name = match key.as_name() {
            Some(name) => name,
            None => return Ok(None),
        };
        match kind {
            ValueKind::String => {
                let text = self
                    .payload(obj)
                    .and_then(Payload::as_str)
                    .map(str::to_string)
                    .unwrap_or_default();
                if name == "length" {
                    let length = text.chars().count() as f64;
                    return Ok(Some(self.create_number(length)));
                }
                if let Some(index) = array_index(name) {
                    let ch = text.chars().nth(index).map(String::from);
                    return Ok(Some(match ch {
                        Some(ch) => self.create_string(ch),
                        None => self.create_undefined(),
                    }));
                }
                Ok(None)
            }
            ValueKind::Array => {
                if name == "length" {
                    let length = self.array_length(obj)? as f64;
                    return Ok(Some(self.create_number(length)));
                }
                match array_index(name) {
                    Some(index) => self.get_index(obj, index).map(Some),
                    None => Ok(None),
                }
            }
            ValueKind::Exception => {
                let error = match self.payload(obj) {
                    Some(Payload::Exception(record)) => record.error.clone(),
                    _ => return Ok(None),
                };
                let text = match name {
                    "name" => error.kind.name().to_string(),
                    "message" => error.message,
                    "stack" => error.to_string(),
                    _ => return Ok(None),
                };
                Ok(Some(self.create_string(text)))
            }
            _ => Ok(None),
        }
    }

    fn read_field(&mut self, field: Option<Field>, receiver: Value) -> JsResult<Value> {
        match field {
            None => Ok(self.create_undefined()),
            Some(Field {
                value: Some(atom), ..
            }) => self.create_value(atom),
            Some(Field {
                getter: Some(getter),
                ..
            }) => {
                let getter = self.create_value(getter)?;
                self.call(getter, receiver, &[])
            }
            Some(_) => Ok(self.create_undefined()),
        }
    }

    /// Write a property, honouring accessors, read-only fields and integrity
    /// levels.
    pub fn set_property(&mut self, obj: Value, key: &PropertyKey, value: Value) -> JsResult<Value> {
        self.write_property(obj, key, None, value)
    }

    fn write_property(
        &mut self,
        obj: Value,
        key: &PropertyKey,
        symbol: Option<Value>,
        value: Value,
    ) -> JsResult<Value> {
        let kind = self.kind(obj);
        if kind.is_nullish() || kind == ValueKind::Uninitialized {
            let message = format!(
                "Cannot set properties of {} (setting '{}')",
                self.describe(obj),
                self.key_text(obj, key)
            );
            return Err(self.type_error(message));
        }
        if !kind.is_object() {
            return Ok(value);
        }
        if kind == ValueKind::Array {
            if let Some(name) = key.as_name() {
                if name == "length" {
                    return self.set_array_length(obj, value);
                }
                if let Some(index) = array_index(name) {
                    return self.set_index(obj, index, value);
                }
            }
        }

        let (own, frozen, extensible) = match self.object(obj) {
            Some(object) => (object.field(key).cloned(), object.frozen, object.extensible),
            None => return Err(self.stale(obj)),
        };
        match own {
            Some(field) if field.is_accessor() => self.call_setter(obj, key, &field, value),
            Some(field) => {
                if frozen || !field.writable {
                    return Err(self.read_only_error(obj, key));
                }
                let descriptor = PropertyDescriptor {
                    value: Some(value),
                    getter: None,
                    setter: None,
                    configurable: field.configurable,
                    enumerable: field.enumerable,
                    writable: field.writable,
                };
                self.store_field(obj, key.clone(), descriptor, symbol)?;
                Ok(value)
            }
            None => {
                let inherited = self
                    .object(obj)
                    .and_then(|object| object.prototype)
                    .and_then(|proto| self.lookup(proto, key));
                match inherited {
                    Some(field) if field.is_accessor() => {
                        return self.call_setter(obj, key, &field, value)
                    }
                    Some(field) if !field.writable => {
                        return Err(self.read_only_error(obj, key))
                    }
                    _ => {}
                }
                if !extensible {
                    return Err(self.not_extensible_error(obj, key));
                }
                self.store_field(obj, key.clone(), PropertyDescriptor::data(value), symbol)?;
                Ok(value)
            }
        }
    }

    fn call_setter(
        &mut self,
        obj: Value,
        key: &PropertyKey,
        field: &Field,
        value: Value,
    ) -> JsResult<Value> {
        match field.setter {
            Some(setter) => {
                let setter = self.create_value(setter)?;
                self.call(setter, obj, &[value])?;
                Ok(value)
            }
            None => {
                let message = format!(
                    "Cannot set property {} of {} which has only a getter",
                    self.key_text(obj, key),
                    self.object_tag(obj)
                );
                Err(self.type_error(message))
            }
        }
    }

    /// Install a field, releasing whatever it replaces.
    fn store_field(
        &mut self,
        obj: Value,
        key: PropertyKey,
        descriptor: PropertyDescriptor,
        symbol: Option<Value>,
    ) -> JsResult<()> {
        let host = self.host(obj)?;
        let field = self.make_field(host, &descriptor)?;

        let symbol_atom = match &key {
            PropertyKey::Symbol(id) => {
                let known = self
                    .object(obj)
                    .map_or(false, |object| object.symbol_keys.contains_key(id));
                if known {
                    None
                } else {
                    match symbol.or_else(|| self.symbol_atom(*id).map(Value::new)) {
                        Some(symbol) => Some((*id, self.store(host, symbol)?)),
                        None => None,
                    }
                }
            }
            PropertyKey::Name(_) => None,
        };

        let old = match self.object_mut(obj) {
            Some(object) => {
                if let Some((id, atom)) = symbol_atom {
                    object.symbol_keys.insert(id, atom);
                }
                object.fields.insert(key, field)
            }
            None => None,
        };
        if let Some(old) = old {
            for atom in old.atoms() {
                self.unlink(host, atom);
            }
        }
        Ok(())
    }

    fn make_field(&mut self, host: AtomId, descriptor: &PropertyDescriptor) -> JsResult<Field> {
        let store = |ctx: &mut Self, value: Option<Value>| -> JsResult<Option<AtomId>> {
            value.map(|value| ctx.store(host, value)).transpose()
        };
        let is_accessor = descriptor.getter.is_some() || descriptor.setter.is_some();
        let value = if is_accessor {
            None
        } else {
            match descriptor.value {
                Some(value) => Some(self.store(host, value)?),
                None => {
                    let undefined = self.create_undefined();
                    Some(self.store(host, undefined)?)
                }
            }
        };
        Ok(Field {
            value,
            getter: store(self, descriptor.getter)?,
            setter: store(self, descriptor.setter)?,
            configurable: descriptor.configurable,
            enumerable: descriptor.enumerable,
            writable: descriptor.writable && !is_accessor,
        })
    }

    /// Define or redefine an own field with explicit attributes.
    pub fn define_property(
        &mut self,
        obj: Value,
        key: impl Into<PropertyKey>,
        descriptor: PropertyDescriptor,
    ) -> JsResult<()> {
        let key = key.into();
        self.define_property_with(obj, key, None, descriptor)
    }

    /// Define a field under a computed key.
    pub fn define_member(
        &mut self,
        obj: Value,
        key: Value,
        descriptor: PropertyDescriptor,
    ) -> JsResult<()> {
        let property = self.property_key(key)?;
        self.define_property_with(obj, property, Some(key), descriptor)
    }

    fn define_property_with(
        &mut self,
        obj: Value,
        key: PropertyKey,
        symbol: Option<Value>,
        descriptor: PropertyDescriptor,
    ) -> JsResult<()> {
        let kind = self.kind(obj);
        if !kind.is_object() {
            return Err(self.type_error("Object.defineProperty called on non-object"));
        }
        if kind == ValueKind::Array {
            if let (Some(index), Some(value)) = (key.as_name().and_then(array_index), descriptor.value) {
                self.set_index(obj, index, value)?;
                return Ok(());
            }
        }
        let (exists, configurable, frozen, extensible) = match self.object(obj) {
            Some(object) => {
                let field = object.field(&key);
                (
                    field.is_some(),
                    field.map_or(true, |f| f.configurable),
                    object.frozen,
                    object.extensible,
                )
            }
            None => return Err(self.stale(obj)),
        };
        if exists && (frozen || !configurable) {
            let message = format!("Cannot redefine property: {}", self.key_text(obj, &key));
            return Err(self.type_error(message));
        }
        if !exists && !extensible {
            let message = format!(
                "Cannot define property {}, object is not extensible",
                self.key_text(obj, &key)
            );
            return Err(self.type_error(message));
        }
        self.store_field(obj, key, descriptor, symbol)
    }

    /// Remove an own field. Returns false when there was nothing to remove.
    pub fn delete_field(&mut self, obj: Value, key: &PropertyKey) -> JsResult<bool> {
        let kind = self.kind(obj);
        if !kind.is_object() {
            return Ok(false);
        }
        let host = self.host(obj)?;
        let (configurable, sealed) = match self.object(obj) {
            Some(object) => match object.field(key) {
                Some(field) => (field.configurable, object.sealed),
                None => (true, object.sealed),
            },
            None => return Err(self.stale(obj)),
        };
        if kind == ValueKind::Array {
            if let Some(index) = key.as_name().and_then(array_index) {
                if sealed {
                    return Err(self.delete_error(obj, key));
                }
                let removed = match self.heap.get_mut(obj.atom()) {
                    Some(Payload::Array(array)) => array.items.remove(&index),
                    _ => None,
                };
                if let Some(atom) = removed {
                    self.unlink(host, atom);
                }
                return Ok(removed.is_some());
            }
        }
        if !configurable {
            return Err(self.delete_error(obj, key));
        }
        let removed = match self.object_mut(obj) {
            Some(object) => {
                let field = object.fields.shift_remove(key);
                let symbol = match key {
                    PropertyKey::Symbol(id) => object.symbol_keys.remove(id),
                    PropertyKey::Name(_) => None,
                };
                field.map(|field| (field, symbol))
            }
            None => None,
        };
        match removed {
            Some((field, symbol)) => {
                for atom in field.atoms().chain(symbol) {
                    self.unlink(host, atom);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_error(&mut self, obj: Value, key: &PropertyKey) -> Exception {
        let message = format!(
            "Cannot delete property '{}' of {}",
            self.key_text(obj, key),
            self.object_tag(obj)
        );
        self.type_error(message)
    }

    // ----- private fields --------------------------------------------------

    /// Read the private field `#name`.
    pub fn get_private_field(&mut self, obj: Value, name: &str) -> JsResult<Value> {
        let field = self
            .object(obj)
            .and_then(|object| object.private_fields.get(name).cloned());
        match field {
            Some(field) => self.read_field(Some(field), obj),
            None => Err(self.type_error(format!(
                "Cannot read private member #{} from an object whose class did not declare it",
                name
            ))),
        }
    }

    /// Write the private field `#name`, which must already be defined.
    pub fn set_private_field(&mut self, obj: Value, name: &str, value: Value) -> JsResult<Value> {
        let field = self
            .object(obj)
            .and_then(|object| object.private_fields.get(name).cloned());
        let field = match field {
            Some(field) => field,
            None => {
                return Err(self.type_error(format!(
                    "Cannot write private member #{} to an object whose class did not declare it",
                    name
                )))
            }
        };
        if field.is_accessor() {
            return match field.setter {
                Some(setter) => {
                    let setter = self.create_value(setter)?;
                    self.call(setter, obj, &[value])?;
                    Ok(value)
                }
                None => Err(self.type_error(format!("'#{}' was defined without a setter", name))),
            };
        }
        if !field.writable {
            return Err(self.type_error("Private method is not writable"));
        }
        let host = self.host(obj)?;
        let atom = self.store(host, value)?;
        let old = self
            .object_mut(obj)
            .and_then(|object| object.private_fields.get_mut(name))
            .and_then(|field| field.value.replace(atom));
        if let Some(old) = old {
            self.unlink(host, old);
        }
        Ok(value)
    }

    /// Define the private field `#name` once.
    pub fn define_private_property(
        &mut self,
        obj: Value,
        name: &str,
        descriptor: PropertyDescriptor,
    ) -> JsResult<()> {
        let exists = match self.object(obj) {
            Some(object) => object.private_fields.contains_key(name),
            None => return Err(self.type_error("Cannot define a private member on a non-object")),
        };
        if exists {
            return Err(self.type_error(format!(
                "Cannot initialize #{} twice on the same object",
                name
            )));
        }
        let host = self.host(obj)?;
        let field = self.make_field(host, &descriptor)?;
        if let Some(object) = self.object_mut(obj) {
            object.private_fields.insert(name.to_string(), field);
        }
        Ok(())
    }

    // ----- integrity levels ------------------------------------------------

    /// Forbid new fields.
    pub fn prevent_extensions(&mut self, obj: Value) -> Value {
        if let Some(object) = self.object_mut(obj) {
            object.extensible = false;
        }
        obj
    }

    /// Forbid new fields and make every field non-configurable.
    pub fn seal(&mut self, obj: Value) -> Value {
        if let Some(object) = self.object_mut(obj) {
            object.extensible = false;
            object.sealed = true;
            for field in object.fields.values_mut() {
                field.configurable = false;
            }
        }
        obj
    }

    /// Seal the object and make every data field read-only.
    pub fn freeze(&mut self, obj: Value) -> Value {
        if let Some(object) = self.object_mut(obj) {
            object.extensible = false;
            object.sealed = true;
            object.frozen = true;
            for field in object.fields.values_mut() {
                field.configurable = false;
                if !field.is_accessor() {
                    field.writable = false;
                }
            }
        }
        obj
    }

    /// Primitives are never extensible.
    pub fn is_extensible(&self, obj: Value) -> bool {
        self.object(obj).map_or(false, |object| object.extensible)
    }

    /// Primitives count as sealed.
    pub fn is_sealed(&self, obj: Value) -> bool {
        self.object(obj).map_or(true, |object| object.sealed)
    }

    /// Primitives count as frozen.
    pub fn is_frozen(&self, obj: Value) -> bool {
        self.object(obj).map_or(true, |object| object.frozen)
    }

    // ----- key enumeration -------------------------------------------------

    fn collect_keys(&mut self, obj: Value, inherited: bool) -> JsResult<Value> {
        let kind = self.kind(obj);
        if kind.is_nullish() {
            return Err(self.type_error("Cannot convert undefined or null to object"));
        }
        let mut keys: IndexSet<String> = IndexSet::new();
        if let Some(Payload::Array(array)) = self.payload(obj) {
            keys.extend(array.items.keys().map(|index| index.to_string()));
        }
        let mut shadowed: FxHashSet<String> = FxHashSet::default();
        let mut visited = FxHashSet::default();
        let mut cursor = if kind.is_object() {
            Some(obj.atom())
        } else {
            None
        };
        while let Some(current) = cursor {
            let owner = match self.heap.owner(current) {
                Some(owner) => owner,
                None => break,
            };
            if !visited.insert(owner) {
                break;
            }
            let object = match self.heap.get(current).and_then(Payload::object) {
                Some(object) => object,
                None => break,
            };
            for (key, field) in object.fields() {
                if let Some(name) = key.as_name() {
                    if field.enumerable && !shadowed.contains(name) {
                        keys.insert(name.to_string());
                    }
                    shadowed.insert(name.to_string());
                }
            }
            cursor = if inherited { object.prototype } else { None };
        }
        let values: Vec<Value> = keys
            .into_iter()
            .map(|key| self.create_string(key))
            .collect();
        self.create_array(&values)
    }

    /// Enumerable string keys, own then inherited, as an array.
    pub fn get_keys(&mut self, obj: Value) -> JsResult<Value> {
        self.collect_keys(obj, true)
    }

    /// Own enumerable string keys, as an array.
    pub fn get_own_keys(&mut self, obj: Value) -> JsResult<Value> {
        self.collect_keys(obj, false)
    }

    // ----- prototypes and constructors -------------------------------------

    /// Prototype of a value; primitives report their wrapper's prototype.
    pub fn get_prototype_of(&mut self, value: Value) -> JsResult<Value> {
        let kind = self.kind(value);
        if kind.is_nullish() || kind == ValueKind::Uninitialized {
            return Err(self.type_error("Cannot convert undefined or null to object"));
        }
        let proto = if kind.is_object() {
            self.object(value).and_then(|object| object.prototype)
        } else {
            self.primitive_prototype(value)
        };
        match proto {
            Some(atom) => self.create_value(atom),
            None => Ok(self.create_null()),
        }
    }

    /// Replace the prototype of `obj`; `None` or `null` clears it.
    pub fn set_prototype(&mut self, obj: Value, prototype: Option<Value>) -> JsResult<()> {
        let prototype = prototype.filter(|p| self.kind(*p) != ValueKind::Null);
        if let Some(proto) = prototype {
            if !self.kind(proto).is_object() {
                return Err(self.type_error("Object prototype may only be an Object or null"));
            }
        }
        let extensible = match self.object(obj) {
            Some(object) => object.extensible,
            None => return Err(self.type_error("Object.setPrototypeOf called on non-object")),
        };
        if !extensible {
            let message = format!("{} is not extensible", self.object_tag(obj));
            return Err(self.type_error(message));
        }
        if let Some(proto) = prototype {
            if self.reaches(proto.atom(), obj.atom()) {
                return Err(self.type_error("Cyclic __proto__ value"));
            }
        }
        let host = self.host(obj)?;
        let stored = match prototype {
            Some(proto) => Some(self.store(host, proto)?),
            None => None,
        };
        let old = self
            .object_mut(obj)
            .and_then(|object| std::mem::replace(&mut object.prototype, stored));
        if let Some(old) = old {
            self.unlink(host, old);
        }
        Ok(())
    }

    /// Returns true when `target`'s payload is on the prototype chain
    /// starting at `start` (inclusive).
    fn reaches(&self, start: AtomId, target: AtomId) -> bool {
        let mut visited = FxHashSet::default();
        let mut cursor = Some(start);
        while let Some(current) = cursor {
            if self.heap.same_payload(current, target) {
                return true;
            }
            match self.heap.owner(current) {
                Some(owner) if visited.insert(owner) => {}
                _ => return false,
            }
            cursor = self.heap.get(current).and_then(Payload::object).and_then(|o| o.prototype);
        }
        false
    }

    /// Constructor recorded on an object; primitives report their wrapper
    /// constructor.
    pub fn get_constructor_of(&mut self, value: Value) -> JsResult<Value> {
        let kind = self.kind(value);
        let ctor = if kind.is_object() {
            self.object(value).and_then(|object| object.constructor)
        } else {
            match self.payload(value).map(|p| p.descriptor().pack()) {
                Some(Ok(Pack::Wrap(which))) => self.intrinsic_atom(which),
                _ => None,
            }
        };
        match ctor {
            Some(atom) => self.create_value(atom),
            None => Ok(self.create_undefined()),
        }
    }

    /// Record the constructor of `obj`.
    pub fn set_constructor(&mut self, obj: Value, ctor: Value) -> JsResult<()> {
        if self.object(obj).is_none() {
            return Err(self.type_error("Cannot set the constructor of a non-object"));
        }
        let host = self.host(obj)?;
        let atom = self.store(host, ctor)?;
        let old = self
            .object_mut(obj)
            .and_then(|object| object.constructor.replace(atom));
        if let Some(old) = old {
            self.unlink(host, old);
        }
        Ok(())
    }

    // ----- arrays ----------------------------------------------------------

    /// Read `obj[index]`. Holes read as `undefined`.
    pub fn get_index(&mut self, obj: Value, index: usize) -> JsResult<Value> {
        let item = match self.payload(obj) {
            Some(Payload::Array(array)) => array.item(index),
            _ => return self.get_property(obj, &PropertyKey::Name(index.to_string())),
        };
        match item {
            Some(atom) => self.create_value(atom),
            None => Ok(self.create_undefined()),
        }
    }

    /// Write `obj[index]`, growing the length when writing past the end.
    pub fn set_index(&mut self, obj: Value, index: usize, value: Value) -> JsResult<Value> {
        let (exists, frozen, extensible) = match self.payload(obj) {
            Some(Payload::Array(array)) => (
                array.items.contains_key(&index),
                array.object.frozen,
                array.object.extensible,
            ),
            _ => return self.set_property(obj, &PropertyKey::Name(index.to_string()), value),
        };
        let length = match index.checked_add(1) {
            Some(length) if length <= u32::MAX as usize => length,
            _ => return Err(self.range_error("Invalid array length")),
        };
        let key = PropertyKey::Name(index.to_string());
        if frozen {
            return Err(self.read_only_error(obj, &key));
        }
        if !exists && !extensible {
            return Err(self.not_extensible_error(obj, &key));
        }
        let host = self.host(obj)?;
        let atom = self.store(host, value)?;
        let old = match self.heap.get_mut(obj.atom()) {
            Some(Payload::Array(array)) => {
                array.length = array.length.max(length);
                array.items.insert(index, atom)
            }
            _ => None,
        };
        if let Some(old) = old {
            self.unlink(host, old);
        }
        Ok(value)
    }

    /// Append to an array, returning the new length.
    pub fn array_push(&mut self, obj: Value, value: Value) -> JsResult<usize> {
        let length = self.array_length(obj)?;
        self.set_index(obj, length, value)?;
        Ok(length + 1)
    }

    /// Length of an array, or the numeric `length` field of any other value.
    pub fn array_length(&mut self, obj: Value) -> JsResult<usize> {
        if let Some(Payload::Array(array)) = self.payload(obj) {
            return Ok(array.length);
        }
        let length = self.get_field(obj, "length")?;
        let length = self.to_number(length)?;
        if length.is_nan() || length <= 0.0 {
            return Ok(0);
        }
        Ok(length.min(u32::MAX as f64) as usize)
    }

    /// Write an array's `length`, truncating when it shrinks.
    pub fn set_array_length(&mut self, obj: Value, length: Value) -> JsResult<Value> {
        let requested = self.to_number(length)?;
        if !requested.is_finite()
            || requested < 0.0
            || requested.fract() != 0.0
            || requested > u32::MAX as f64
        {
            return Err(self.range_error("Invalid array length"));
        }
        let new_length = requested as usize;
        let (frozen, sealed, current) = match self.payload(obj) {
            Some(Payload::Array(array)) => (array.object.frozen, array.object.sealed, array.length),
            _ => return Err(self.type_error("length can only be assigned on arrays")),
        };
        if frozen {
            return Err(self.read_only_error(obj, &PropertyKey::from("length")));
        }
        if sealed && new_length < current {
            let last = format_number((current - 1) as f64);
            return Err(self.delete_error(obj, &PropertyKey::Name(last)));
        }
        let host = self.host(obj)?;
        let removed = match self.heap.get_mut(obj.atom()) {
            Some(Payload::Array(array)) => {
                array.length = new_length;
                array.items.split_off(&new_length)
            }
            _ => Default::default(),
        };
        for atom in removed.into_values() {
            self.unlink(host, atom);
        }
        Ok(self.create_number(new_length as f64))
    }
}
