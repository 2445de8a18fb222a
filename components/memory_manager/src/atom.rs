//! Atoms: nodes of the ownership graph.
//!
//! An atom holds at most one payload and two counted adjacency maps. A child
//! edge keeps the child alive; the parent map mirrors it so the collector can
//! search backwards. An atom without a payload is an anchor: the root of a
//! scope, always considered reachable.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::arena::SlotId;

/// Handle to an atom in a [`Heap`](crate::Heap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(pub(crate) SlotId);

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "atom#{}", self.0)
    }
}

/// Handle to a payload slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PayloadId(pub(crate) SlotId);

/// Graph node. Edge counts allow the same child to be referenced twice.
#[derive(Debug, Default)]
pub(crate) struct Atom {
    pub(crate) payload: Option<PayloadId>,
    pub(crate) children: FxHashMap<AtomId, u32>,
    pub(crate) parents: FxHashMap<AtomId, u32>,
}

impl Atom {
    pub(crate) fn anchor() -> Self {
        Self::default()
    }

    pub(crate) fn is_anchor(&self) -> bool {
        self.payload.is_none()
    }
}

/// Increment a counted edge.
pub(crate) fn link(edges: &mut FxHashMap<AtomId, u32>, to: AtomId) {
    *edges.entry(to).or_insert(0) += 1;
}

/// Decrement a counted edge, returning false if it did not exist.
pub(crate) fn unlink(edges: &mut FxHashMap<AtomId, u32>, to: AtomId) -> bool {
    match edges.get_mut(&to) {
        Some(count) if *count > 1 => {
            *count -= 1;
            true
        }
        Some(_) => {
            edges.remove(&to);
            true
        }
        None => false,
    }
}

/// A payload with its holders and owning atom.
///
/// The owner is one of the holders, initially the atom that allocated the
/// payload. Other holders keep the owner alive through a child edge, because
/// edges of the payload's contents hang off the owner.
#[derive(Debug)]
pub(crate) struct PayloadSlot<T> {
    pub(crate) value: T,
    pub(crate) holders: Vec<AtomId>,
    pub(crate) owner: AtomId,
}
