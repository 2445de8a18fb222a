//! Memory Manager - atom ownership graph and cycle collector
//!
//! This component provides:
//! - A generational slot arena with stale-handle detection
//! - Atoms holding shared, reference-counted payloads
//! - Counted liveness edges between atoms
//! - Anchors: payload-free atoms rooting a scope
//! - A deferred trial-deletion collector that reclaims unreachable cycles
//!
//! # Examples
//!
//! ```
//! use memory_manager::Heap;
//!
//! let mut heap = Heap::new();
//! let scope = heap.alloc_anchor();
//! let value = heap.alloc(42);
//! heap.add_child(scope, value).unwrap();
//!
//! heap.collect();
//! assert_eq!(heap.get(value), Some(&42));
//!
//! heap.dispose(scope).unwrap();
//! heap.collect();
//! assert!(!heap.contains(value));
//! assert_eq!(heap.take_released(), vec![42]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod arena;
mod atom;
mod gc;
pub mod heap;

pub use arena::{Arena, SlotId};
pub use atom::AtomId;
pub use heap::{GcStats, Heap, HeapConfig, HeapError};
