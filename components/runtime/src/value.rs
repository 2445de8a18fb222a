//! Value kinds and value handles.

use memory_manager::AtomId;

/// Concrete kind of a value.
///
/// The declaration order is significant: ranges of kinds classify values,
/// see [`ValueKind::is_primitive`], [`ValueKind::is_object`] and
/// [`ValueKind::is_callable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    /// `undefined`
    Undefined,
    /// A binding declared but not yet initialized
    Uninitialized,
    /// `null`
    Null,
    /// Not-a-number
    NaN,
    /// Positive or negative infinity
    Infinity,
    /// Finite number
    Number,
    /// String
    String,
    /// Boolean
    Boolean,
    /// Arbitrary-precision integer
    BigInt,
    /// Symbol
    Symbol,
    /// Exception record travelling up the call chain
    Exception,
    /// Plain object
    Object,
    /// Array
    Array,
    /// Generator instance
    Generator,
    /// Function compiled from script
    Function,
    /// Function implemented by the host
    NativeFunction,
    /// Function whose call produces a generator
    GeneratorFunction,
}

impl ValueKind {
    /// Primitive kinds: everything below `Exception`.
    pub fn is_primitive(self) -> bool {
        self < ValueKind::Exception
    }

    /// Object kinds, callables included.
    pub fn is_object(self) -> bool {
        self >= ValueKind::Object
    }

    /// Kinds that can be called.
    pub fn is_callable(self) -> bool {
        self >= ValueKind::Function
    }

    /// Number, NaN and Infinity.
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::NaN | ValueKind::Infinity | ValueKind::Number)
    }

    /// `undefined` and `null`.
    pub fn is_nullish(self) -> bool {
        matches!(self, ValueKind::Undefined | ValueKind::Null)
    }
}

/// Handle to a value: an atom plus a const flag.
///
/// A handle has no ownership of its own. It stays valid while the scope
/// that produced it is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Value {
    atom: AtomId,
    constant: bool,
}

impl Value {
    /// Wrap an atom in a mutable handle.
    pub fn new(atom: AtomId) -> Self {
        Self {
            atom,
            constant: false,
        }
    }

    /// Wrap an atom in a const handle.
    pub fn constant(atom: AtomId) -> Self {
        Self {
            atom,
            constant: true,
        }
    }

    /// The atom holding the value.
    pub fn atom(&self) -> AtomId {
        self.atom
    }

    /// Returns true for handles bound with `const`.
    pub fn is_const(&self) -> bool {
        self.constant
    }

    /// The same atom with a different const flag.
    pub fn with_const(self, constant: bool) -> Self {
        Self { constant, ..self }
    }
}

impl From<AtomId> for Value {
    fn from(atom: AtomId) -> Self {
        Value::new(atom)
    }
}
