//! Generic containers over arena storage: queues, stacks, and maps with
//! explicit sharing semantics.
//!
//! The key insight: sharing should be visible in the type, not hidden in
//! copy behavior.
//!
//! # Design Philosophy
//!
//! Containers here are *handles* over node storage:
//!
//! ```text
//! Arena (slab + generations) - owns nodes, detects stale references
//! Chain                      - links node ids into a FIFO/LIFO order
//! Queue/Stack                - Rc handles onto a shared chain
//! SkipList/TreeMap           - ordered entries over their own arena
//! ```
//!
//! Two copy operations with different meanings:
//! - `clone()` **aliases**: both handles see the same chain, and each
//!   observes the other's pushes and pops.
//! - `duplicate()` **deep-copies**: the result shares no storage with its
//!   source.
//!
//! Structural errors are explicit: reading an empty container is
//! [`AccessError::Empty`], holding a cursor across a removal of its node is
//! [`AccessError::Stale`], and a reentrant mutation of an aliased chain is
//! [`AccessError::Contended`] rather than corruption.
//!
//! # Quick Start
//!
//! ```
//! use corral::Queue;
//!
//! let mut q: Queue<u64> = Queue::new();
//! q.push_back(10).unwrap();
//! q.push_back(20).unwrap();
//!
//! // clone() aliases: both handles share the chain
//! let mut alias = q.clone();
//! alias.pop_front().unwrap();
//! assert_eq!(q.front(), Ok(20));
//!
//! // duplicate() does not
//! let copy = q.duplicate();
//! q.push_back(30).unwrap();
//! assert_eq!(copy.len(), 1);
//! ```
//!
//! # Containers
//!
//! | Type | Discipline | Notes |
//! |------|------------|-------|
//! | [`Queue`] | FIFO | O(1) push/pop, bulk splice, aliasing clone |
//! | [`Stack`] | LIFO | same chain machinery, head-only |
//! | [`TreeMap`] | unique keys, ascending | skip-list backed, range scans |
//! | [`HashTableMap`] | unique keys, unordered | O(1) expected access |
//!
//! # Protocols
//!
//! - [`Sequence`]: forward-only element views with snapshot semantics;
//!   generic algorithms live in [`seq`] as free functions.
//! - [`Backing`]: minimal capability set from which the richer container
//!   operations are derived by blanket impl ([`BackingExt`]) - conformance
//!   is a compile-time bound, not a wrapper. Adapted backings re-enter the
//!   sequence protocol through [`BackingExt::sequence`].
//! - [`MapStore`]: the shared map contract over both map realizations.

#![warn(missing_docs)]

pub mod backing;
pub mod error;
pub mod hash_map;
pub mod map;
pub mod queue;
pub mod seq;
pub mod skiplist;
pub mod stack;
pub mod tree_map;

mod arena;
mod chain;
mod index;

pub use backing::{backing_eq, Backing, BackingExt, BackingSeq, Duplicate};
pub use chain::Cursor;
pub use error::{AccessError, KeyNotFound};
pub use hash_map::HashTableMap;
pub use map::MapStore;
pub use queue::Queue;
pub use seq::{SeqIter, Sequence};
pub use skiplist::SkipList;
pub use stack::Stack;
pub use tree_map::TreeMap;
