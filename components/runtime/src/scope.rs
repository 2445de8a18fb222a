//! Lexical scopes.

use memory_manager::{AtomId, SlotId};
use rustc_hash::FxHashMap;

use crate::value::Value;

/// Identifier of a scope in a context's scope tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(crate) SlotId);

/// A lexical frame.
///
/// The root atom is an anchor: every handle created in the scope hangs off
/// it, so everything reachable from it survives until the scope is popped.
#[derive(Debug)]
pub struct Scope {
    pub(crate) parent: Option<ScopeId>,
    pub(crate) children: Vec<ScopeId>,
    pub(crate) root: AtomId,
    pub(crate) values: Vec<Value>,
    pub(crate) named: FxHashMap<String, Value>,
}

impl Scope {
    pub(crate) fn new(parent: Option<ScopeId>, root: AtomId) -> Self {
        Self {
            parent,
            children: Vec::new(),
            root,
            values: Vec::new(),
            named: FxHashMap::default(),
        }
    }

    /// Enclosing scope, `None` for the root scope.
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Scopes pushed while this one was current.
    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    /// Anchor atom of the scope.
    pub fn root(&self) -> AtomId {
        self.root
    }

    /// Handles created directly in this scope.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Binding declared in this scope under `name`.
    pub fn binding(&self, name: &str) -> Option<Value> {
        self.named.get(name).copied()
    }
}
