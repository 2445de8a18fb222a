//! Deferred trial-deletion cycle collector.
//!
//! Cutting an edge queues the child. A collection pass drains the queue: for
//! each candidate it searches backwards over parent edges. Reaching an anchor
//! proves the candidate is still rooted. If the search exhausts instead, every
//! atom it visited can only be reached from atoms in the same set, so the
//! whole set is garbage and is reclaimed as one batch: edges leaving the set
//! are cut first (queueing their targets), then every member is freed.

use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::atom::AtomId;
use crate::heap::{GcStats, Heap};

impl<T> Heap<T> {
    /// Run one collection pass over the pending queue.
    ///
    /// Returns the counters of this pass only; [`Heap::stats`] accumulates.
    pub fn collect(&mut self) -> GcStats {
        let mut pass = GcStats {
            collections: 1,
            ..GcStats::default()
        };
        let released_before = self.stats.payloads_released;

        while let Some(candidate) = self.pending.pop_front() {
            if !self.contains(candidate) || self.is_anchor(candidate) {
                continue;
            }
            let (component, rooted) = self.search_ancestors(candidate);
            pass.atoms_examined += component.len() as u64;
            if rooted {
                continue;
            }
            trace!("reclaiming {} atoms reached from {}", component.len(), candidate);
            pass.atoms_reclaimed += self.reclaim(&component) as u64;
        }

        pass.payloads_released = self.stats.payloads_released - released_before;
        self.stats.collections += 1;
        self.stats.atoms_examined += pass.atoms_examined;
        self.stats.atoms_reclaimed += pass.atoms_reclaimed;
        debug!(
            "gc pass: examined {} atoms, reclaimed {}, {} live",
            pass.atoms_examined,
            pass.atoms_reclaimed,
            self.live_atoms()
        );
        pass
    }

    /// Breadth of the backward search from `start`, and whether it reached an
    /// anchor. The visited set includes `start`.
    fn search_ancestors(&self, start: AtomId) -> (FxHashSet<AtomId>, bool) {
        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut stack = vec![start];
        while let Some(atom) = stack.pop() {
            let node = match self.node(atom) {
                Ok(node) => node,
                Err(_) => continue,
            };
            for parent in node.parents.keys() {
                if self.is_anchor(*parent) {
                    return (visited, true);
                }
                if visited.insert(*parent) {
                    stack.push(*parent);
                }
            }
        }
        (visited, false)
    }

    /// Tear down every edge touching `component`, then free its members.
    fn reclaim(&mut self, component: &FxHashSet<AtomId>) -> usize {
        for member in component {
            let children = match self.atoms.get_mut(member.0) {
                Some(node) => {
                    node.parents.clear();
                    std::mem::take(&mut node.children)
                }
                None => continue,
            };
            for child in children.keys() {
                if component.contains(child) {
                    continue;
                }
                if let Some(child_node) = self.atoms.get_mut(child.0) {
                    child_node.parents.remove(member);
                    self.pending.push_back(*child);
                }
            }
        }

        let mut freed = 0;
        for member in component {
            if let Some(node) = self.atoms.remove(member.0) {
                if let Some(payload) = node.payload {
                    self.release_payload(payload, *member);
                }
                freed += 1;
            }
        }
        freed
    }
}
