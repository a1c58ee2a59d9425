//! Structural adapter mechanism: derive a full container interface from a
//! minimal backing capability set.
//!
//! [`Backing`] is the minimal contract - emptiness test, front access,
//! front removal, insertion at the backing's relevant end, and a
//! restartable forward view. Conformance is an ordinary trait bound,
//! checked at compile time; there is no runtime type inspection and no
//! wrapper type. The richer operations ([`BackingExt`]) are derived purely
//! by composition in a blanket impl, so for a conforming type the "adapter"
//! is the identity: implementing `Backing` *is* adapting.
//!
//! Duplication is deliberately separate: [`Duplicate`] is offered only by
//! backings that support it, never silently emulated.
//!
//! Adapted backings also speak the crate's sequence protocol:
//! [`BackingExt::sequence`] re-wraps the view as a
//! [`Sequence`](crate::Sequence), so the generic algorithms in
//! [`seq`](crate::seq) run over a `Vec` or `VecDeque` the same way they run
//! over a queue cursor.
//!
//! # Example
//!
//! `Vec` is a dynamic array used back-to-front - its last element is the
//! front - which makes it a stack:
//!
//! ```
//! use corral::{Backing, BackingExt};
//!
//! let mut stack: Vec<u32> = Vec::new();
//! stack.insert_all([1, 2, 3]);
//!
//! assert_eq!(stack.front(), Ok(&3));
//! assert_eq!(stack.take_front(), Ok(3));
//! assert_eq!(stack.take_front(), Ok(2));
//! ```

use std::collections::vec_deque;
use std::collections::VecDeque;

use crate::error::AccessError;
use crate::seq::Sequence;

/// Minimal capability set an adaptable backing container must expose.
pub trait Backing {
    /// Element type held by the backing.
    type Item;

    /// Restartable forward view over the backing's elements, front first.
    type View<'a>: Iterator<Item = &'a Self::Item>
    where
        Self: 'a;

    /// Returns `true` if the backing holds no elements.
    fn is_empty(&self) -> bool;

    /// Returns a reference to the front element.
    ///
    /// # Errors
    ///
    /// [`AccessError::Empty`] if the backing is empty.
    fn front(&self) -> Result<&Self::Item, AccessError>;

    /// Removes and returns the front element.
    ///
    /// # Errors
    ///
    /// [`AccessError::Empty`] if the backing is empty.
    fn remove_front(&mut self) -> Result<Self::Item, AccessError>;

    /// Inserts a value at the backing's relevant end - the end that gives
    /// the backing its queue or stack discipline.
    fn insert(&mut self, item: Self::Item);

    /// Returns a fresh forward view; each call restarts from the front.
    fn view(&self) -> Self::View<'_>;
}

/// Operations derived from the [`Backing`] contract by composition alone.
///
/// Blanket-implemented for every `Backing`; the adapter adds no behavior
/// that is not expressible through the minimal capability set, so its
/// correctness reduces to the backing's correctness.
pub trait BackingExt: Backing {
    /// Removes and returns the front element, checking emptiness first -
    /// observably equivalent to [`front`](Backing::front) followed by
    /// [`remove_front`](Backing::remove_front) as two separate calls.
    fn take_front(&mut self) -> Result<Self::Item, AccessError> {
        if self.is_empty() {
            return Err(AccessError::Empty);
        }
        self.remove_front()
    }

    /// Inserts every value of `items`, one plain insert at a time.
    fn insert_all<I: IntoIterator<Item = Self::Item>>(&mut self, items: I) {
        for item in items {
            self.insert(item);
        }
    }

    /// Empties the backing by replacing it with a freshly constructed
    /// default instance.
    fn clear_with_default(&mut self)
    where
        Self: Default + Sized,
    {
        *self = Self::default();
    }

    /// Re-wraps the backing's view as a [`Sequence`], so the generic
    /// algorithms in [`seq`](crate::seq) accept an adapted backing the same
    /// way they accept a container cursor.
    fn sequence(&self) -> BackingSeq<'_, Self>
    where
        Self: Sized,
    {
        BackingSeq { view: self.view() }
    }
}

impl<C: Backing> BackingExt for C {}

/// [`Sequence`] over a backing's view, returned by
/// [`BackingExt::sequence`].
///
/// Positions are plain view iterators: `snapshot` clones the view, so
/// snapshots are independent exactly as the protocol requires. The handle
/// borrows the backing; it cannot go stale and never contends.
pub struct BackingSeq<'a, C: Backing + 'a> {
    view: C::View<'a>,
}

impl<'a, C> Sequence for BackingSeq<'a, C>
where
    C: Backing + 'a,
    C::View<'a>: Clone,
    C::Item: Clone,
{
    type Item = C::Item;

    fn is_empty(&self) -> bool {
        self.view.clone().next().is_none()
    }

    fn current(&self) -> Result<C::Item, AccessError> {
        self.view.clone().next().cloned().ok_or(AccessError::Empty)
    }

    fn advance(&mut self) -> Result<(), AccessError> {
        self.view.next().map(drop).ok_or(AccessError::Empty)
    }

    fn snapshot(&self) -> Self {
        BackingSeq {
            view: self.view.clone(),
        }
    }
}

/// Deep duplication, offered only by backings that support it.
pub trait Duplicate {
    /// Returns an independent copy sharing no storage with `self`.
    fn duplicate(&self) -> Self;
}

/// Element-wise equality of two backings' views, front first.
///
/// Terminates at the shorter view's end; differing lengths compare unequal.
pub fn backing_eq<A, B>(a: &A, b: &B) -> bool
where
    A: Backing,
    B: Backing<Item = A::Item>,
    A::Item: PartialEq,
{
    a.view().eq(b.view())
}

// =============================================================================
// Vec - dynamic array used back-to-front (stack discipline)
// =============================================================================

impl<T> Backing for Vec<T> {
    type Item = T;
    type View<'a>
        = std::iter::Rev<std::slice::Iter<'a, T>>
    where
        T: 'a;

    #[inline]
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    #[inline]
    fn front(&self) -> Result<&T, AccessError> {
        self.last().ok_or(AccessError::Empty)
    }

    #[inline]
    fn remove_front(&mut self) -> Result<T, AccessError> {
        self.pop().ok_or(AccessError::Empty)
    }

    #[inline]
    fn insert(&mut self, item: T) {
        self.push(item);
    }

    #[inline]
    fn view(&self) -> Self::View<'_> {
        self.iter().rev()
    }
}

impl<T: Clone> Duplicate for Vec<T> {
    fn duplicate(&self) -> Self {
        self.clone()
    }
}

// =============================================================================
// VecDeque - queue discipline
// =============================================================================

impl<T> Backing for VecDeque<T> {
    type Item = T;
    type View<'a>
        = vec_deque::Iter<'a, T>
    where
        T: 'a;

    #[inline]
    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }

    #[inline]
    fn front(&self) -> Result<&T, AccessError> {
        VecDeque::front(self).ok_or(AccessError::Empty)
    }

    #[inline]
    fn remove_front(&mut self) -> Result<T, AccessError> {
        self.pop_front().ok_or(AccessError::Empty)
    }

    #[inline]
    fn insert(&mut self, item: T) {
        self.push_back(item);
    }

    #[inline]
    fn view(&self) -> Self::View<'_> {
        self.iter()
    }
}

impl<T: Clone> Duplicate for VecDeque<T> {
    fn duplicate(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generic over the contract: anything written against `Backing` works
    /// for every conforming type.
    fn drain_all<C: Backing>(backing: &mut C) -> Vec<C::Item> {
        let mut out = Vec::new();
        while let Ok(item) = backing.take_front() {
            out.push(item);
        }
        out
    }

    #[test]
    fn vec_is_a_stack() {
        let mut stack: Vec<u32> = Vec::new();
        stack.insert_all([1, 2, 3]);

        assert_eq!(stack.front(), Ok(&3));
        assert_eq!(drain_all(&mut stack), vec![3, 2, 1]);
        assert_eq!(stack.remove_front(), Err(AccessError::Empty));
    }

    #[test]
    fn vec_deque_is_a_queue() {
        let mut queue: VecDeque<u32> = VecDeque::new();
        queue.insert_all([1, 2, 3]);

        assert_eq!(Backing::front(&queue), Ok(&1));
        assert_eq!(drain_all(&mut queue), vec![1, 2, 3]);
    }

    #[test]
    fn take_front_equals_front_then_remove() {
        let mut via_take: Vec<u32> = vec![1, 2, 3];
        let mut via_two_calls: Vec<u32> = vec![1, 2, 3];

        let front = via_two_calls.front().copied().unwrap();
        let removed = via_two_calls.remove_front().unwrap();
        assert_eq!(front, removed);

        assert_eq!(via_take.take_front(), Ok(removed));
        assert_eq!(via_take, via_two_calls);
    }

    #[test]
    fn take_front_on_empty_reports_empty() {
        let mut empty: VecDeque<u32> = VecDeque::new();
        assert_eq!(empty.take_front(), Err(AccessError::Empty));
    }

    #[test]
    fn view_restarts_from_front() {
        let stack: Vec<u32> = vec![1, 2, 3];

        let first: Vec<_> = stack.view().copied().collect();
        let second: Vec<_> = stack.view().copied().collect();
        assert_eq!(first, vec![3, 2, 1]);
        assert_eq!(first, second);
    }

    #[test]
    fn backing_eq_compares_across_backings() {
        // Same front-first element sequence through different backings.
        let stack: Vec<u32> = vec![3, 2, 1]; // front-first view: 1, 2, 3
        let mut queue: VecDeque<u32> = VecDeque::new();
        queue.insert_all([1, 2, 3]);

        assert!(backing_eq(&stack, &queue));

        let shorter: Vec<u32> = vec![2, 1];
        assert!(!backing_eq(&shorter, &queue));
    }

    #[test]
    fn sequence_runs_generic_algorithms_over_backings() {
        use crate::seq;

        let mut queue: VecDeque<u32> = VecDeque::new();
        queue.insert_all([1, 2, 3]);

        let view = queue.sequence();
        assert_eq!(seq::contains(&view, &2), Ok(true));
        assert_eq!(seq::fold(&view, 0, |acc, v| acc + v), Ok(6));
        // The probed handle still rests at the front.
        assert_eq!(view.current(), Ok(1));

        // Same front-first sequence through a Vec used as a stack.
        let stack: Vec<u32> = vec![3, 2, 1];
        assert_eq!(seq::eq(&stack.sequence(), &queue.sequence()), Ok(true));
    }

    #[test]
    fn sequence_snapshots_are_independent() {
        let stack: Vec<u32> = vec![2, 1];

        let mut first = stack.sequence();
        let second = first.snapshot();

        first.advance().unwrap();
        assert_eq!(first.current(), Ok(2));
        assert_eq!(second.current(), Ok(1));

        first.advance().unwrap();
        assert!(first.is_empty());
        assert_eq!(first.current(), Err(AccessError::Empty));
        assert_eq!(first.advance(), Err(AccessError::Empty));
    }

    #[test]
    fn sequence_matches_container_cursor() {
        use crate::seq;
        use crate::Queue;

        let q: Queue<u32> = [1, 2, 3].into_iter().collect();
        let mut fifo: VecDeque<u32> = VecDeque::new();
        fifo.insert_all([1, 2, 3]);

        assert_eq!(seq::eq(&q.snapshot(), &fifo.sequence()), Ok(true));
    }

    #[test]
    fn duplicate_is_independent() {
        let original: Vec<u32> = vec![1, 2];
        let mut copy = original.duplicate();
        Backing::insert(&mut copy, 3);

        assert_eq!(original, vec![1, 2]);
        assert_eq!(copy, vec![1, 2, 3]);
    }

    #[test]
    fn clear_with_default_resets() {
        let mut queue: VecDeque<u32> = VecDeque::new();
        queue.insert_all([1, 2, 3]);

        queue.clear_with_default();
        assert!(Backing::is_empty(&queue));
    }
}
