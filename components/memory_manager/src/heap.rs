//! The atom heap: allocation, liveness edges and payload sharing.
//!
//! Payloads are reference counted by the atoms holding them. Edges are
//! counted too, and cutting one never frees anything synchronously: the child
//! is queued for the next [`Heap::collect`] pass (see `gc.rs`).

use std::collections::VecDeque;

use log::{trace, warn};
use thiserror::Error;

use crate::arena::Arena;
use crate::atom::{link, unlink, Atom, AtomId, PayloadId, PayloadSlot};

/// Errors reported by heap operations on invalid atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The atom was collected or disposed
    #[error("{0} is no longer live")]
    StaleAtom(AtomId),
    /// The operation needs a payload but the atom is a scope anchor
    #[error("{0} is an anchor and holds no payload")]
    Anchor(AtomId),
}

/// Heap sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapConfig {
    /// Slots reserved up front in the atom and payload arenas
    pub initial_capacity: usize,
}

impl Default for HeapConfig {
    fn default() -> Self {
        HeapConfig {
            initial_capacity: 256,
        }
    }
}

/// Collector counters, cumulative over the heap's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GcStats {
    /// Number of `collect` passes
    pub collections: u64,
    /// Atoms visited by backward searches
    pub atoms_examined: u64,
    /// Atoms reclaimed by the collector
    pub atoms_reclaimed: u64,
    /// Payloads whose last holder went away
    pub payloads_released: u64,
}

/// Ownership graph of atoms holding payloads of type `T`.
///
/// # Examples
///
/// ```
/// use memory_manager::Heap;
///
/// let mut heap = Heap::new();
/// let root = heap.alloc_anchor();
/// let a = heap.alloc("a");
/// let b = heap.alloc("b");
/// heap.add_child(root, a).unwrap();
/// heap.add_child(a, b).unwrap();
/// heap.add_child(b, a).unwrap();
///
/// // Cutting the only rooted edge orphans the a <-> b cycle.
/// heap.remove_child(root, a).unwrap();
/// heap.collect();
/// assert!(!heap.contains(a));
/// assert!(!heap.contains(b));
/// ```
#[derive(Debug)]
pub struct Heap<T> {
    pub(crate) atoms: Arena<Atom>,
    pub(crate) payloads: Arena<PayloadSlot<T>>,
    pub(crate) pending: VecDeque<AtomId>,
    pub(crate) released: Vec<T>,
    pub(crate) stats: GcStats,
}

impl<T> Heap<T> {
    /// Create an empty heap with default sizing.
    pub fn new() -> Self {
        Self::with_config(HeapConfig::default())
    }

    /// Create an empty heap.
    pub fn with_config(config: HeapConfig) -> Self {
        Heap {
            atoms: Arena::with_capacity(config.initial_capacity),
            payloads: Arena::with_capacity(config.initial_capacity),
            pending: VecDeque::new(),
            released: Vec::new(),
            stats: GcStats::default(),
        }
    }

    /// Allocate an anchor: an atom with no payload, always reachable.
    pub fn alloc_anchor(&mut self) -> AtomId {
        AtomId(self.atoms.insert(Atom::anchor()))
    }

    /// Allocate an atom owning a fresh payload.
    ///
    /// The atom has no parents yet; it is reclaimed by the next collection
    /// unless an edge to it is added first.
    pub fn alloc(&mut self, value: T) -> AtomId {
        let atom = AtomId(self.atoms.insert(Atom::anchor()));
        let payload = self.insert_payload(atom, value);
        if let Some(node) = self.atoms.get_mut(atom.0) {
            node.payload = Some(payload);
        }
        self.pending.push_back(atom);
        atom
    }

    fn insert_payload(&mut self, owner: AtomId, value: T) -> PayloadId {
        PayloadId(self.payloads.insert(PayloadSlot {
            value,
            holders: vec![owner],
            owner,
        }))
    }

    pub(crate) fn node(&self, atom: AtomId) -> Result<&Atom, HeapError> {
        self.atoms.get(atom.0).ok_or(HeapError::StaleAtom(atom))
    }

    fn node_mut(&mut self, atom: AtomId) -> Result<&mut Atom, HeapError> {
        self.atoms.get_mut(atom.0).ok_or(HeapError::StaleAtom(atom))
    }

    fn payload_id(&self, atom: AtomId) -> Result<PayloadId, HeapError> {
        self.node(atom)?.payload.ok_or(HeapError::Anchor(atom))
    }

    /// Returns true while `atom` is live.
    pub fn contains(&self, atom: AtomId) -> bool {
        self.atoms.contains(atom.0)
    }

    /// Returns true for live anchors.
    pub fn is_anchor(&self, atom: AtomId) -> bool {
        self.atoms.get(atom.0).map_or(false, Atom::is_anchor)
    }

    /// Borrow the payload held by `atom`.
    pub fn get(&self, atom: AtomId) -> Option<&T> {
        let payload = self.payload_id(atom).ok()?;
        self.payloads.get(payload.0).map(|slot| &slot.value)
    }

    /// Mutably borrow the payload held by `atom`.
    pub fn get_mut(&mut self, atom: AtomId) -> Option<&mut T> {
        let payload = self.payload_id(atom).ok()?;
        self.payloads.get_mut(payload.0).map(|slot| &mut slot.value)
    }

    /// The atom that allocated the payload `atom` holds.
    ///
    /// Edges describing the payload's contents hang off this atom.
    pub fn owner(&self, atom: AtomId) -> Option<AtomId> {
        let payload = self.payload_id(atom).ok()?;
        self.payloads.get(payload.0).map(|slot| slot.owner)
    }

    /// Returns true when both atoms hold the same payload.
    pub fn same_payload(&self, a: AtomId, b: AtomId) -> bool {
        match (self.payload_id(a), self.payload_id(b)) {
            (Ok(x), Ok(y)) => x == y,
            _ => false,
        }
    }

    /// Number of atoms holding the payload of `atom`.
    pub fn holders(&self, atom: AtomId) -> Option<u32> {
        let payload = self.payload_id(atom).ok()?;
        self.payloads.get(payload.0).map(|slot| slot.holders.len() as u32)
    }

    /// Replace the payload of `atom` with a fresh one it owns.
    pub fn set_payload(&mut self, atom: AtomId, value: T) -> Result<(), HeapError> {
        self.payload_id(atom)?;
        self.detach_payload(atom)?;
        let payload = self.insert_payload(atom, value);
        self.node_mut(atom)?.payload = Some(payload);
        Ok(())
    }

    /// Make `dst` hold the payload of `src`.
    ///
    /// If `dst` does not own the payload it keeps the owner alive through a
    /// child edge, which is dropped again when `dst` lets go of the payload.
    pub fn share_payload(&mut self, dst: AtomId, src: AtomId) -> Result<(), HeapError> {
        let payload = self.payload_id(src)?;
        if self.payload_id(dst)? == payload {
            return Ok(());
        }
        self.detach_payload(dst)?;
        self.hold(dst, payload, src)
    }

    /// Allocate a fresh atom holding the payload of `src`.
    ///
    /// Like [`Heap::alloc`], the new atom is queued for collection until an
    /// edge to it is added.
    pub fn alloc_shared(&mut self, src: AtomId) -> Result<AtomId, HeapError> {
        let payload = self.payload_id(src)?;
        let atom = AtomId(self.atoms.insert(Atom::anchor()));
        self.hold(atom, payload, src)?;
        self.pending.push_back(atom);
        Ok(atom)
    }

    fn hold(&mut self, atom: AtomId, payload: PayloadId, src: AtomId) -> Result<(), HeapError> {
        let owner = match self.payloads.get_mut(payload.0) {
            Some(slot) => {
                slot.holders.push(atom);
                slot.owner
            }
            None => return Err(HeapError::StaleAtom(src)),
        };
        self.node_mut(atom)?.payload = Some(payload);
        if owner != atom {
            self.add_child(atom, owner)?;
        }
        Ok(())
    }

    /// Drop `atom`'s hold on its payload, leaving it temporarily empty.
    ///
    /// When the owner lets go while other holders remain, ownership moves to
    /// the oldest remaining holder together with the owner's child edges.
    fn detach_payload(&mut self, atom: AtomId) -> Result<(), HeapError> {
        let payload = match self.node_mut(atom)?.payload.take() {
            Some(payload) => payload,
            None => return Ok(()),
        };
        let (owner, remaining) = match self.payloads.get_mut(payload.0) {
            Some(slot) => {
                slot.holders.retain(|holder| *holder != atom);
                (slot.owner, slot.holders.len())
            }
            None => return Ok(()),
        };
        if owner != atom {
            self.remove_child(atom, owner)?;
        } else if remaining > 0 {
            self.hand_off(atom, payload);
        }
        if remaining == 0 {
            self.cut_children(atom);
            self.free_payload(payload);
        }
        Ok(())
    }

    /// Drop every child edge of `atom`, queueing the children.
    fn cut_children(&mut self, atom: AtomId) {
        let children = match self.atoms.get_mut(atom.0) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children.keys() {
            if let Some(node) = self.atoms.get_mut(child.0) {
                node.parents.remove(&atom);
                self.pending.push_back(*child);
            }
        }
    }

    fn hand_off(&mut self, old: AtomId, payload: PayloadId) {
        let (heir, others) = match self.payloads.get_mut(payload.0) {
            Some(slot) if !slot.holders.is_empty() => {
                slot.owner = slot.holders[0];
                (slot.holders[0], slot.holders[1..].to_vec())
            }
            _ => return,
        };
        trace!("payload ownership {} -> {}", old, heir);
        let children = match self.atoms.get_mut(old.0) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for (child, count) in children {
            if child == old {
                continue;
            }
            if let Some(node) = self.atoms.get_mut(child.0) {
                node.parents.remove(&old);
            }
            for _ in 0..count {
                if let Some(node) = self.atoms.get_mut(heir.0) {
                    link(&mut node.children, child);
                }
                if let Some(node) = self.atoms.get_mut(child.0) {
                    link(&mut node.parents, heir);
                }
            }
        }
        for holder in others.into_iter().chain(std::iter::once(heir)) {
            if let Some(node) = self.atoms.get_mut(holder.0) {
                unlink(&mut node.children, old);
            }
            if let Some(node) = self.atoms.get_mut(old.0) {
                unlink(&mut node.parents, holder);
            }
            if holder != heir {
                if let Some(node) = self.atoms.get_mut(holder.0) {
                    link(&mut node.children, heir);
                }
                if let Some(node) = self.atoms.get_mut(heir.0) {
                    link(&mut node.parents, holder);
                }
            }
        }
        self.pending.push_back(old);
    }

    /// Drop one holder of `payload`, freeing it with the last one.
    pub(crate) fn release_payload(&mut self, payload: PayloadId, holder: AtomId) {
        let last = match self.payloads.get_mut(payload.0) {
            Some(slot) => {
                slot.holders.retain(|h| *h != holder);
                if slot.owner == holder {
                    if let Some(first) = slot.holders.first() {
                        slot.owner = *first;
                    }
                }
                slot.holders.is_empty()
            }
            None => false,
        };
        if last {
            self.free_payload(payload);
        }
    }

    fn free_payload(&mut self, payload: PayloadId) {
        if let Some(slot) = self.payloads.remove(payload.0) {
            self.stats.payloads_released += 1;
            self.released.push(slot.value);
        }
    }

    /// Add a liveness edge: `parent` keeps `child` alive.
    pub fn add_child(&mut self, parent: AtomId, child: AtomId) -> Result<(), HeapError> {
        self.node(child)?;
        link(&mut self.node_mut(parent)?.children, child);
        link(&mut self.node_mut(child)?.parents, parent);
        Ok(())
    }

    /// Remove one liveness edge and queue `child` for the next collection.
    ///
    /// Removing an edge that does not exist is a no-op.
    pub fn remove_child(&mut self, parent: AtomId, child: AtomId) -> Result<(), HeapError> {
        if !unlink(&mut self.node_mut(parent)?.children, child) {
            return Ok(());
        }
        match self.atoms.get_mut(child.0) {
            Some(node) => {
                unlink(&mut node.parents, parent);
                self.pending.push_back(child);
            }
            None => warn!("edge {} -> {} pointed at a dead atom", parent, child),
        }
        Ok(())
    }

    /// Number of edges from `parent` to `child`.
    pub fn edge_count(&self, parent: AtomId, child: AtomId) -> u32 {
        self.atoms
            .get(parent.0)
            .and_then(|node| node.children.get(&child).copied())
            .unwrap_or(0)
    }

    /// Children of `atom`, once per distinct child.
    pub fn children(&self, atom: AtomId) -> Vec<AtomId> {
        self.atoms
            .get(atom.0)
            .map(|node| node.children.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Parents of `atom`, once per distinct parent.
    pub fn parents(&self, atom: AtomId) -> Vec<AtomId> {
        self.atoms
            .get(atom.0)
            .map(|node| node.parents.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Destroy `atom` now.
    ///
    /// All its edges are cut, its children are queued for collection, and its
    /// hold on its payload is released. Used for scope anchors going out of
    /// scope.
    pub fn dispose(&mut self, atom: AtomId) -> Result<(), HeapError> {
        self.detach_payload(atom)?;
        let node = self
            .atoms
            .remove(atom.0)
            .ok_or(HeapError::StaleAtom(atom))?;
        for child in node.children.keys() {
            if let Some(child_node) = self.atoms.get_mut(child.0) {
                child_node.parents.remove(&atom);
                self.pending.push_back(*child);
            }
        }
        for parent in node.parents.keys() {
            if let Some(parent_node) = self.atoms.get_mut(parent.0) {
                parent_node.children.remove(&atom);
            }
        }
        Ok(())
    }

    /// Payloads released since the last call.
    pub fn take_released(&mut self) -> Vec<T> {
        std::mem::take(&mut self.released)
    }

    /// Number of live atoms, anchors included.
    pub fn live_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Number of live payloads.
    pub fn live_payloads(&self) -> usize {
        self.payloads.len()
    }

    /// Atoms waiting for the next collection.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Cumulative collector counters.
    pub fn stats(&self) -> GcStats {
        self.stats
    }
}

impl<T> Default for Heap<T> {
    fn default() -> Self {
        Self::new()
    }
}
