//! Object and array payloads.
//!
//! Payloads store atoms, never handles. Every atom referenced from a payload
//! is kept alive by an edge from the payload's owner atom; the context adds
//! and removes those edges whenever it edits a payload.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use memory_manager::AtomId;
use rustc_hash::FxHashMap;

use crate::value::Value;

/// Identity of a symbol, unique within its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub(crate) u64);

/// Key of an object field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// String key
    Name(String),
    /// Symbol key
    Symbol(SymbolId),
}

impl PropertyKey {
    /// The string key, if this is one.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            PropertyKey::Name(name) => Some(name),
            PropertyKey::Symbol(_) => None,
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        PropertyKey::Name(name.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        PropertyKey::Name(name)
    }
}

/// A data or accessor field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Stored value of a data field
    pub value: Option<AtomId>,
    /// Getter of an accessor field
    pub getter: Option<AtomId>,
    /// Setter of an accessor field
    pub setter: Option<AtomId>,
    /// May be deleted or redefined
    pub configurable: bool,
    /// Listed by key enumeration
    pub enumerable: bool,
    /// May be assigned
    pub writable: bool,
}

impl Field {
    /// A writable, enumerable, configurable data field.
    pub fn data(value: AtomId) -> Self {
        Self {
            value: Some(value),
            getter: None,
            setter: None,
            configurable: true,
            enumerable: true,
            writable: true,
        }
    }

    /// Returns true when the field has a getter or a setter.
    pub fn is_accessor(&self) -> bool {
        self.getter.is_some() || self.setter.is_some()
    }

    /// Atoms referenced by the field.
    pub fn atoms(&self) -> impl Iterator<Item = AtomId> {
        self.value.into_iter().chain(self.getter).chain(self.setter)
    }
}

/// Field table and prototype link shared by every object kind.
#[derive(Debug, Clone)]
pub struct JsObject {
    pub(crate) fields: IndexMap<PropertyKey, Field>,
    pub(crate) private_fields: IndexMap<String, Field>,
    pub(crate) metadata: FxHashMap<String, AtomId>,
    pub(crate) symbol_keys: FxHashMap<SymbolId, AtomId>,
    pub(crate) prototype: Option<AtomId>,
    pub(crate) constructor: Option<AtomId>,
    pub(crate) extensible: bool,
    pub(crate) sealed: bool,
    pub(crate) frozen: bool,
}

impl JsObject {
    /// An empty, extensible object.
    pub fn new(prototype: Option<AtomId>) -> Self {
        Self {
            fields: IndexMap::new(),
            private_fields: IndexMap::new(),
            metadata: FxHashMap::default(),
            symbol_keys: FxHashMap::default(),
            prototype,
            constructor: None,
            extensible: true,
            sealed: false,
            frozen: false,
        }
    }

    /// Own field under `key`.
    pub fn field(&self, key: &PropertyKey) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Own fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&PropertyKey, &Field)> {
        self.fields.iter()
    }

    /// Prototype atom, `None` for a null prototype.
    pub fn prototype(&self) -> Option<AtomId> {
        self.prototype
    }

    /// Constructor atom recorded at construction.
    pub fn constructor(&self) -> Option<AtomId> {
        self.constructor
    }

    /// Returns true while new fields may be added.
    pub fn is_extensible(&self) -> bool {
        self.extensible
    }

    /// Returns true once sealed (or frozen).
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Returns true once frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Every atom this object keeps alive.
    pub fn atoms(&self) -> Vec<AtomId> {
        let mut atoms: Vec<AtomId> = Vec::new();
        for field in self.fields.values() {
            atoms.extend(field.atoms());
        }
        atoms.extend(self.symbol_keys.values().copied());
        for field in self.private_fields.values() {
            atoms.extend(field.atoms());
        }
        atoms.extend(self.metadata.values().copied());
        atoms.extend(self.prototype);
        atoms.extend(self.constructor);
        atoms
    }
}

/// Array payload: an object plus an index table.
///
/// Indices absent from `items` below `length` are holes.
#[derive(Debug, Clone)]
pub struct JsArray {
    pub(crate) object: JsObject,
    pub(crate) items: BTreeMap<usize, AtomId>,
    pub(crate) length: usize,
}

impl JsArray {
    /// An empty array.
    pub fn new(prototype: Option<AtomId>) -> Self {
        Self {
            object: JsObject::new(prototype),
            items: BTreeMap::new(),
            length: 0,
        }
    }

    /// Value of the `length` counter.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true when `length` is zero.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Atom stored at `index`, `None` for holes.
    pub fn item(&self, index: usize) -> Option<AtomId> {
        self.items.get(&index).copied()
    }
}

/// Field definition passed to [`Context::define_property`].
///
/// [`Context::define_property`]: crate::Context::define_property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Value of a data field
    pub value: Option<Value>,
    /// Getter of an accessor field
    pub getter: Option<Value>,
    /// Setter of an accessor field
    pub setter: Option<Value>,
    /// May be deleted or redefined
    pub configurable: bool,
    /// Listed by key enumeration
    pub enumerable: bool,
    /// May be assigned
    pub writable: bool,
}

impl PropertyDescriptor {
    /// A writable, enumerable, configurable data field.
    pub fn data(value: Value) -> Self {
        Self {
            value: Some(value),
            getter: None,
            setter: None,
            configurable: true,
            enumerable: true,
            writable: true,
        }
    }

    /// An enumerable, configurable accessor field.
    pub fn accessor(getter: Option<Value>, setter: Option<Value>) -> Self {
        Self {
            value: None,
            getter,
            setter,
            configurable: true,
            enumerable: true,
            writable: true,
        }
    }

    /// Exclude the field from key enumeration.
    pub fn hidden(mut self) -> Self {
        self.enumerable = false;
        self
    }

    /// Forbid assignment.
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Forbid deletion and redefinition.
    pub fn locked(mut self) -> Self {
        self.configurable = false;
        self
    }
}

/// Canonical array index of a string key: digits without a leading zero.
pub fn array_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>()
        .ok()
        .filter(|index| *index < u32::MAX)
        .map(|index| index as usize)
}
