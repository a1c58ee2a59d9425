//! Singly-linked node chain over arena storage.
//!
//! This is the leaf structure shared by [`Queue`](crate::Queue) and
//! [`Stack`](crate::Stack): nodes hold a value and a `next` link, the chain
//! tracks head, tail, and length. All links are generational [`NodeId`]s
//! into the chain's own arena.
//!
//! # Invariants
//!
//! - `head` is `NONE` if and only if `tail` is `NONE`.
//! - The tail node's `next` is always `NONE`.
//! - With k ≥ 1 live nodes, `next` links form exactly one acyclic path from
//!   head to tail.

use std::cell::RefCell;
use std::rc::Rc;

use crate::arena::Arena;
use crate::error::AccessError;
use crate::index::NodeId;
use crate::seq::Sequence;

#[derive(Debug)]
pub(crate) struct ChainNode<T> {
    pub(crate) value: T,
    pub(crate) next: NodeId,
}

/// A singly-linked chain owning its arena.
#[derive(Debug)]
pub(crate) struct Chain<T> {
    arena: Arena<ChainNode<T>>,
    head: NodeId,
    tail: NodeId,
    len: usize,
}

impl<T> Chain<T> {
    pub(crate) fn new() -> Self {
        Chain {
            arena: Arena::new(),
            head: NodeId::NONE,
            tail: NodeId::NONE,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Chain {
            arena: Arena::with_capacity(capacity),
            head: NodeId::NONE,
            tail: NodeId::NONE,
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn head(&self) -> NodeId {
        self.head
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> Option<&ChainNode<T>> {
        self.arena.get(id)
    }

    /// Returns a reference to the front element.
    #[inline]
    pub(crate) fn front(&self) -> Option<&T> {
        self.arena.get(self.head).map(|node| &node.value)
    }

    /// Links a new node after the current tail.
    ///
    /// No existing node moves; a cursor resting on the old tail observes
    /// the new node through the updated `next` link.
    pub(crate) fn push_back(&mut self, value: T) -> NodeId {
        let id = self.arena.insert(ChainNode {
            value,
            next: NodeId::NONE,
        });

        if self.tail.is_some() {
            self.arena
                .get_mut(self.tail)
                .expect("chain tail must be live")
                .next = id;
        } else {
            self.head = id;
        }

        self.tail = id;
        self.len += 1;
        id
    }

    /// Links a new node before the current head.
    pub(crate) fn push_front(&mut self, value: T) -> NodeId {
        let id = self.arena.insert(ChainNode {
            value,
            next: self.head,
        });

        if self.tail.is_none() {
            self.tail = id;
        }

        self.head = id;
        self.len += 1;
        id
    }

    /// Unlinks and returns the front element.
    ///
    /// Clears the tail as well when the last node goes, so a following push
    /// relinks from scratch.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.head.is_none() {
            return None;
        }

        let node = self
            .arena
            .remove(self.head)
            .expect("chain head must be live");
        self.head = node.next;
        if self.head.is_none() {
            self.tail = NodeId::NONE;
        }
        self.len -= 1;
        Some(node.value)
    }

    /// Links every value of `values` after the tail, in order.
    ///
    /// The new nodes are chained to each other first, then attached with a
    /// single fixup of the old tail's `next` link. Final state is identical
    /// to repeated `push_back` calls.
    pub(crate) fn splice_back<I: IntoIterator<Item = T>>(&mut self, values: I) -> usize {
        let mut sub_head = NodeId::NONE;
        let mut sub_tail = NodeId::NONE;
        let mut count = 0;

        for value in values {
            let id = self.arena.insert(ChainNode {
                value,
                next: NodeId::NONE,
            });
            if sub_tail.is_some() {
                self.arena
                    .get_mut(sub_tail)
                    .expect("splice tail must be live")
                    .next = id;
            } else {
                sub_head = id;
            }
            sub_tail = id;
            count += 1;
        }

        if count == 0 {
            return 0;
        }

        if self.tail.is_some() {
            self.arena
                .get_mut(self.tail)
                .expect("chain tail must be live")
                .next = sub_head;
        } else {
            self.head = sub_head;
        }

        self.tail = sub_tail;
        self.len += count;
        count
    }

    /// Links every value of `values` before the head; the FIRST value ends
    /// up at the front of the chain.
    pub(crate) fn splice_front<I: IntoIterator<Item = T>>(&mut self, values: I) -> usize {
        let mut sub_head = NodeId::NONE;
        let mut sub_tail = NodeId::NONE;
        let mut count = 0;

        for value in values {
            let id = self.arena.insert(ChainNode {
                value,
                next: NodeId::NONE,
            });
            if sub_tail.is_some() {
                self.arena
                    .get_mut(sub_tail)
                    .expect("splice tail must be live")
                    .next = id;
            } else {
                sub_head = id;
            }
            sub_tail = id;
            count += 1;
        }

        if count == 0 {
            return 0;
        }

        self.arena
            .get_mut(sub_tail)
            .expect("splice tail must be live")
            .next = self.head;

        if self.tail.is_none() {
            self.tail = sub_tail;
        }

        self.head = sub_head;
        self.len += count;
        count
    }

    /// Borrowing iterator over the chain's values, front to back.
    pub(crate) fn iter(&self) -> ChainIter<'_, T> {
        ChainIter {
            chain: self,
            at: self.head,
        }
    }

    /// Deep-copies every reachable node into a fresh chain with its own
    /// arena. Nothing is shared with `self`.
    pub(crate) fn duplicate(&self) -> Chain<T>
    where
        T: Clone,
    {
        let mut copy = Chain::new();
        copy.splice_back(self.iter().cloned());
        copy
    }

    /// Element-wise equality of the remaining sequences.
    ///
    /// Terminates at the shorter chain's end; differing lengths compare
    /// unequal.
    pub(crate) fn eq_elements(&self, other: &Chain<T>) -> bool
    where
        T: PartialEq,
    {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

pub(crate) struct ChainIter<'a, T> {
    chain: &'a Chain<T>,
    at: NodeId,
}

impl<'a, T> Iterator for ChainIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.chain.node(self.at)?;
        self.at = node.next;
        Some(&node.value)
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A forward-only view over a chain's remaining elements.
///
/// A cursor shares the underlying nodes with the container it was taken
/// from but owns its position: advancing one cursor never advances another.
/// It is restartable only by taking a fresh snapshot.
///
/// Two lifecycle rules, both checked at access time:
///
/// - **Live suffix**: a cursor that has not been exhausted follows `next`
///   links as they stand, so values appended to the container after the
///   snapshot are visible once the cursor reaches them. A cursor taken from
///   an empty container captured no node and stays empty.
/// - **Invalidation**: removing the node a cursor rests on invalidates the
///   cursor; dereferencing it reports [`AccessError::Stale`] rather than
///   observing whatever reused the slot.
pub struct Cursor<T> {
    pub(crate) chain: Rc<RefCell<Chain<T>>>,
    pub(crate) at: NodeId,
}

impl<T: Clone> Sequence for Cursor<T> {
    type Item = T;

    #[inline]
    fn is_empty(&self) -> bool {
        self.at.is_none()
    }

    fn current(&self) -> Result<T, AccessError> {
        if self.at.is_none() {
            return Err(AccessError::Empty);
        }
        let chain = self
            .chain
            .try_borrow()
            .map_err(|_| AccessError::Contended)?;
        chain
            .node(self.at)
            .map(|node| node.value.clone())
            .ok_or(AccessError::Stale)
    }

    fn advance(&mut self) -> Result<(), AccessError> {
        if self.at.is_none() {
            return Err(AccessError::Empty);
        }
        let next = {
            let chain = self
                .chain
                .try_borrow()
                .map_err(|_| AccessError::Contended)?;
            chain.node(self.at).map(|node| node.next)
        };
        self.at = next.ok_or(AccessError::Stale)?;
        Ok(())
    }

    fn snapshot(&self) -> Self {
        Cursor {
            chain: Rc::clone(&self.chain),
            at: self.at,
        }
    }
}

impl<T: Clone> Clone for Cursor<T> {
    /// Equivalent to [`Sequence::snapshot`]: same nodes, independent position.
    fn clone(&self) -> Self {
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_back_builds_fifo_order() {
        let mut chain: Chain<u64> = Chain::new();

        chain.push_back(1);
        chain.push_back(2);
        chain.push_back(3);

        assert_eq!(chain.len(), 3);
        let values: Vec<_> = chain.iter().copied().collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn push_front_builds_lifo_order() {
        let mut chain: Chain<u64> = Chain::new();

        chain.push_front(1);
        chain.push_front(2);
        chain.push_front(3);

        let values: Vec<_> = chain.iter().copied().collect();
        assert_eq!(values, vec![3, 2, 1]);
    }

    #[test]
    fn pop_front_clears_tail_on_last_node() {
        let mut chain: Chain<u64> = Chain::new();

        chain.push_back(1);
        assert_eq!(chain.pop_front(), Some(1));
        assert!(chain.is_empty());
        assert!(chain.head().is_none());

        // Tail was reset, so the next push relinks cleanly.
        chain.push_back(2);
        assert_eq!(chain.front(), Some(&2));
        assert_eq!(chain.pop_front(), Some(2));
        assert_eq!(chain.pop_front(), None);
    }

    #[test]
    fn splice_back_matches_repeated_push() {
        let mut spliced: Chain<u64> = Chain::new();
        spliced.push_back(1);
        spliced.splice_back([2, 3, 4]);

        let mut pushed: Chain<u64> = Chain::new();
        for v in [1, 2, 3, 4] {
            pushed.push_back(v);
        }

        assert!(spliced.eq_elements(&pushed));
    }

    #[test]
    fn splice_front_puts_first_value_at_front() {
        let mut chain: Chain<u64> = Chain::new();
        chain.push_back(9);
        chain.splice_front([1, 2, 3]);

        let values: Vec<_> = chain.iter().copied().collect();
        assert_eq!(values, vec![1, 2, 3, 9]);
    }

    #[test]
    fn splice_empty_is_noop() {
        let mut chain: Chain<u64> = Chain::new();
        chain.push_back(1);

        assert_eq!(chain.splice_back(std::iter::empty()), 0);
        assert_eq!(chain.splice_front(std::iter::empty()), 0);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn duplicate_shares_nothing() {
        let mut chain: Chain<u64> = Chain::new();
        chain.splice_back([1, 2, 3]);

        let mut copy = chain.duplicate();
        assert!(chain.eq_elements(&copy));

        copy.push_back(4);
        assert_eq!(chain.len(), 3);
        assert_eq!(copy.len(), 4);
        assert!(!chain.eq_elements(&copy));
    }

    #[test]
    fn eq_terminates_on_shorter_chain() {
        let mut a: Chain<u64> = Chain::new();
        a.splice_back([1, 2]);

        let mut b: Chain<u64> = Chain::new();
        b.splice_back([1, 2, 3]);

        assert!(!a.eq_elements(&b));
        assert!(!b.eq_elements(&a));
    }
}
