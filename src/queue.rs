//! FIFO queue over a shared node chain.
//!
//! A [`Queue`] is a *handle* to a chain, not the chain itself. Cloning the
//! handle aliases the same nodes and the same head/tail bookkeeping - two
//! clones observe each other's pushes and pops. This is the crate's
//! explicit form of reference semantics: sharing is visible in the type
//! (`Clone` = alias) instead of hiding in copy behavior. Use
//! [`Queue::duplicate`] for an independent deep copy.
//!
//! # Example
//!
//! ```
//! use corral::Queue;
//!
//! let mut q: Queue<u64> = Queue::new();
//! q.push_back(10).unwrap();
//! q.push_back(20).unwrap();
//!
//! assert_eq!(q.take_front(), Ok(10));
//! assert_eq!(q.take_front(), Ok(20));
//! assert!(q.is_empty());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::chain::{Chain, Cursor};
use crate::error::AccessError;

/// A FIFO queue handle; see the [module docs](self) for aliasing semantics.
pub struct Queue<T> {
    chain: Rc<RefCell<Chain<T>>>,
}

impl<T> Queue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Queue {
            chain: Rc::new(RefCell::new(Chain::new())),
        }
    }

    /// Creates an empty queue with room for `capacity` nodes before the
    /// arena grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Queue {
            chain: Rc::new(RefCell::new(Chain::with_capacity(capacity))),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.chain.borrow().len()
    }

    /// Returns `true` if the queue holds no elements.
    pub fn is_empty(&self) -> bool {
        self.chain.borrow().is_empty()
    }

    /// Returns `true` if `self` and `other` are handles to the same chain.
    pub fn shares_chain(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.chain, &other.chain)
    }

    /// Returns a copy of the front element.
    ///
    /// # Errors
    ///
    /// [`AccessError::Empty`] on an empty queue.
    pub fn front(&self) -> Result<T, AccessError>
    where
        T: Clone,
    {
        let chain = self
            .chain
            .try_borrow()
            .map_err(|_| AccessError::Contended)?;
        chain.front().cloned().ok_or(AccessError::Empty)
    }

    /// Unlinks the front element and discards it.
    ///
    /// # Errors
    ///
    /// [`AccessError::Empty`] on an empty queue; the queue is untouched on
    /// failure.
    pub fn pop_front(&mut self) -> Result<(), AccessError> {
        self.take_front().map(drop)
    }

    /// Unlinks the front element and returns it.
    ///
    /// This is `front` + `pop_front` as one logical operation, so the value
    /// moves out exactly once and no `Clone` bound is needed.
    ///
    /// # Errors
    ///
    /// [`AccessError::Empty`] on an empty queue.
    pub fn take_front(&mut self) -> Result<T, AccessError> {
        let mut chain = self
            .chain
            .try_borrow_mut()
            .map_err(|_| AccessError::Contended)?;
        chain.pop_front().ok_or(AccessError::Empty)
    }

    /// Appends a value at the tail. O(1); no existing node moves.
    ///
    /// # Errors
    ///
    /// [`AccessError::Contended`] if the shared chain is already borrowed.
    pub fn push_back(&mut self, value: T) -> Result<(), AccessError> {
        let mut chain = self
            .chain
            .try_borrow_mut()
            .map_err(|_| AccessError::Contended)?;
        chain.push_back(value);
        Ok(())
    }

    /// Appends every value of `values` at the tail, in order.
    ///
    /// The final state is identical to repeated [`push_back`](Queue::push_back)
    /// calls, but the new nodes are attached with a single tail-link fixup.
    /// The source iterator is drained before the chain is borrowed, so it
    /// may read aliased handles of this queue (including its own cursors).
    ///
    /// # Errors
    ///
    /// [`AccessError::Contended`] if the shared chain is already borrowed.
    pub fn extend_back<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<(), AccessError> {
        // Run the caller's iterator to completion first; no chain borrow may
        // be held while caller code executes.
        let values: Vec<T> = values.into_iter().collect();
        let mut chain = self
            .chain
            .try_borrow_mut()
            .map_err(|_| AccessError::Contended)?;
        chain.splice_back(values);
        Ok(())
    }

    /// Takes a [`Cursor`] over the queue's current elements.
    ///
    /// The cursor captures the current head without copying nodes; see
    /// [`Cursor`] for its lifecycle rules.
    pub fn snapshot(&self) -> Cursor<T> {
        let at = self.chain.borrow().head();
        Cursor {
            chain: Rc::clone(&self.chain),
            at,
        }
    }

    /// Deep-copies every element into a new independent queue.
    ///
    /// Unlike `clone`, nothing is shared with `self`: later mutations of
    /// either queue are invisible to the other.
    pub fn duplicate(&self) -> Queue<T>
    where
        T: Clone,
    {
        Queue {
            chain: Rc::new(RefCell::new(self.chain.borrow().duplicate())),
        }
    }
}

impl<T> Clone for Queue<T> {
    /// Returns a new handle to the **same** chain.
    ///
    /// The clone observes every push and pop made through `self`, and vice
    /// versa. For an independent copy use [`Queue::duplicate`].
    fn clone(&self) -> Self {
        Queue {
            chain: Rc::clone(&self.chain),
        }
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for Queue<T> {
    /// Element-sequence equality.
    ///
    /// Handles aliasing the same chain are trivially equal; otherwise both
    /// chains are walked element-wise, terminating at the shorter one.
    fn eq(&self, other: &Self) -> bool {
        if self.shares_chain(other) {
            return true;
        }
        self.chain.borrow().eq_elements(&other.chain.borrow())
    }
}

impl<T: Eq> Eq for Queue<T> {}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain = self.chain.borrow();
        f.debug_list().entries(chain.iter()).finish()
    }
}

impl<T> FromIterator<T> for Queue<T> {
    /// Eagerly consumes `iter` into a fresh queue, front first.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = Chain::new();
        chain.splice_back(iter);
        Queue {
            chain: Rc::new(RefCell::new(chain)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq;
    use crate::seq::Sequence;

    #[test]
    fn new_queue_is_empty() {
        let q: Queue<u64> = Queue::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.front(), Err(AccessError::Empty));
    }

    #[test]
    fn fifo_order() {
        let mut q: Queue<u64> = Queue::new();
        for v in [1, 2, 3, 4, 5] {
            q.push_back(v).unwrap();
        }

        for expected in [1, 2, 3, 4, 5] {
            assert_eq!(q.take_front(), Ok(expected));
        }
        assert!(q.is_empty());
        assert_eq!(q.take_front(), Err(AccessError::Empty));
    }

    #[test]
    fn emptiness_invariant_resets_tail() {
        let mut q: Queue<u64> = Queue::new();
        q.push_back(1).unwrap();
        q.pop_front().unwrap();

        assert!(q.is_empty());

        q.push_back(2).unwrap();
        assert_eq!(q.front(), Ok(2));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn clone_aliases_the_chain() {
        let mut a: Queue<u64> = [10, 20, 30].into_iter().collect();
        let mut b = a.clone();
        assert!(a.shares_chain(&b));

        // A pop through one handle is observed by the other.
        b.pop_front().unwrap();
        assert_eq!(a.front(), Ok(20));

        // An append through one handle is visible when iterating the other.
        a.push_back(67).unwrap();
        let seen: Vec<_> = b.snapshot().iterate().collect();
        assert_eq!(seen, vec![20, 30, 67]);
    }

    #[test]
    fn duplicate_is_independent() {
        let mut a: Queue<u64> = [1, 2, 3].into_iter().collect();
        let c = a.duplicate();
        assert!(!a.shares_chain(&c));

        a.push_back(4).unwrap();
        let seen: Vec<_> = c.snapshot().iterate().collect();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_equals_source() {
        let a: Queue<u64> = [1, 2, 3].into_iter().collect();
        assert_eq!(a.duplicate(), a);

        let empty: Queue<u64> = Queue::new();
        assert_eq!(empty.duplicate(), empty);
    }

    #[test]
    fn equality_by_element_sequence() {
        let a: Queue<u64> = [1, 2, 3].into_iter().collect();
        let b: Queue<u64> = [1, 2, 3].into_iter().collect();
        let shorter: Queue<u64> = [1, 2].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, shorter);
        assert_ne!(shorter, a);

        // Aliased handles short-circuit.
        let alias = a.clone();
        assert_eq!(a, alias);
    }

    #[test]
    fn extend_back_matches_repeated_push() {
        let mut bulk: Queue<u64> = Queue::new();
        bulk.push_back(1).unwrap();
        bulk.extend_back([2, 3, 4]).unwrap();

        let mut single: Queue<u64> = Queue::new();
        for v in [1, 2, 3, 4] {
            single.push_back(v).unwrap();
        }

        assert_eq!(bulk, single);
    }

    #[test]
    fn snapshot_sees_live_suffix() {
        let mut q: Queue<u64> = [1].into_iter().collect();
        let cursor = q.snapshot();

        // Appended after the snapshot, visible through the captured node's
        // extended next links.
        q.push_back(2).unwrap();
        q.push_back(3).unwrap();

        let seen: Vec<_> = cursor.iterate().collect();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn snapshot_of_empty_queue_stays_empty() {
        let mut q: Queue<u64> = Queue::new();
        let cursor = q.snapshot();

        q.push_back(1).unwrap();

        assert!(cursor.is_empty());
        assert_eq!(cursor.current(), Err(AccessError::Empty));
    }

    #[test]
    fn popping_under_a_cursor_makes_it_stale() {
        let mut q: Queue<u64> = [1, 2].into_iter().collect();
        let mut cursor = q.snapshot();

        q.pop_front().unwrap();

        assert_eq!(cursor.current(), Err(AccessError::Stale));
        assert_eq!(cursor.advance(), Err(AccessError::Stale));
    }

    #[test]
    fn cursor_survives_pops_behind_it() {
        let mut q: Queue<u64> = [1, 2, 3].into_iter().collect();
        let mut cursor = q.snapshot();
        cursor.advance().unwrap();

        // The cursor rests on node 2; removing node 1 does not disturb it.
        q.pop_front().unwrap();
        assert_eq!(seq::collect(&cursor), Ok(vec![2, 3]));
    }

    #[test]
    fn extend_back_source_may_read_aliased_handle() {
        let mut q: Queue<u64> = [1].into_iter().collect();
        let alias = q.clone();

        // The source iterator reads the aliased handle while running.
        q.extend_back((0..3).map(|v| v + alias.len() as u64)).unwrap();

        // len() stayed 1 for the whole drain; the splice happened after.
        assert_eq!(seq::collect(&q.snapshot()), Ok(vec![1, 1, 2, 3]));
    }

    #[test]
    fn extend_back_from_own_cursor_duplicates_elements() {
        let mut q: Queue<u64> = [1, 2, 3].into_iter().collect();

        q.extend_back(q.snapshot().iterate()).unwrap();

        assert_eq!(q.len(), 6);
        assert_eq!(seq::collect(&q.snapshot()), Ok(vec![1, 2, 3, 1, 2, 3]));
    }

    #[test]
    fn reentrant_mutation_during_front_reports_contended() {
        // An element whose Clone impl reaches back into an aliased handle.
        struct Reentrant {
            alias: Rc<RefCell<Option<Queue<Reentrant>>>>,
        }

        impl Clone for Reentrant {
            fn clone(&self) -> Self {
                if let Some(q) = self.alias.borrow_mut().as_mut() {
                    assert_eq!(q.pop_front(), Err(AccessError::Contended));
                }
                Reentrant {
                    alias: Rc::clone(&self.alias),
                }
            }
        }

        let cell = Rc::new(RefCell::new(None));
        let mut q: Queue<Reentrant> = Queue::new();
        q.push_back(Reentrant {
            alias: Rc::clone(&cell),
        })
        .unwrap();
        *cell.borrow_mut() = Some(q.clone());

        // front() clones the element while the chain is borrowed; the
        // mutation attempted inside that clone surfaces as Contended.
        assert!(q.front().is_ok());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn from_iter_is_eager() {
        let q: Queue<u64> = (1..=4).collect();
        assert_eq!(q.len(), 4);
        assert_eq!(format!("{q:?}"), "[1, 2, 3, 4]");
    }
}
