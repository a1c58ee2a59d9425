//! The sequence protocol: lazy, forward-only, restartable-via-snapshot
//! views over a container's remaining elements.
//!
//! Every container in this crate can produce a [`Sequence`] handle, so
//! generic algorithms (search, fold, copy-into) operate uniformly over
//! queues, stacks, and adapted backings. The algorithms themselves are free
//! functions over the trait rather than provided methods - the capability
//! set stays minimal and the derived behavior lives in one place.
//!
//! # Example
//!
//! ```
//! use corral::{seq, Queue, Sequence};
//!
//! let q: Queue<u32> = [1, 2, 3].into_iter().collect();
//! let view = q.snapshot();
//!
//! assert_eq!(seq::contains(&view, &2), Ok(true));
//! assert_eq!(seq::fold(&view, 0, |acc, v| acc + v), Ok(6));
//! // The original view is untouched; free functions walk snapshots.
//! assert_eq!(seq::collect(&view), Ok(vec![1, 2, 3]));
//! ```

use crate::backing::Backing;
use crate::error::AccessError;

/// Minimal capability set of a forward-only element sequence.
///
/// A sequence is finite exactly when its underlying container is finite,
/// and restartable only through a fresh [`snapshot`](Sequence::snapshot) -
/// never by rewinding the same handle.
pub trait Sequence {
    /// Element type produced by the sequence.
    type Item;

    /// Returns `true` if the sequence is exhausted.
    fn is_empty(&self) -> bool;

    /// Reads the current element without advancing.
    ///
    /// # Errors
    ///
    /// [`AccessError::Empty`] if exhausted; [`AccessError::Stale`] if the
    /// referenced node was removed out from under the handle.
    fn current(&self) -> Result<Self::Item, AccessError>;

    /// Moves the handle to the next element.
    ///
    /// # Errors
    ///
    /// [`AccessError::Empty`] if exhausted; [`AccessError::Stale`] if the
    /// referenced node was removed out from under the handle.
    fn advance(&mut self) -> Result<(), AccessError>;

    /// Returns an independent handle over the same remaining elements.
    ///
    /// The snapshot shares the underlying nodes but owns its position;
    /// advancing one handle never advances another.
    fn snapshot(&self) -> Self
    where
        Self: Sized;

    /// Consumes the handle into an [`Iterator`] bridge.
    ///
    /// The iterator ends at exhaustion, or early at the first element that
    /// can no longer be accessed; use the `Result`-returning free functions
    /// when the distinction matters.
    fn iterate(self) -> SeqIter<Self>
    where
        Self: Sized,
    {
        SeqIter { seq: self }
    }
}

/// Iterator bridge returned by [`Sequence::iterate`].
pub struct SeqIter<S: Sequence> {
    seq: S,
}

impl<S: Sequence> Iterator for SeqIter<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.seq.is_empty() {
            return None;
        }
        let value = self.seq.current().ok()?;
        self.seq.advance().ok()?;
        Some(value)
    }
}

/// Returns `true` if `target` occurs in the sequence's remaining elements.
///
/// Walks a snapshot; the caller's handle is not advanced.
pub fn contains<S>(seq: &S, target: &S::Item) -> Result<bool, AccessError>
where
    S: Sequence,
    S::Item: PartialEq,
{
    let mut walk = seq.snapshot();
    while !walk.is_empty() {
        if walk.current()? == *target {
            return Ok(true);
        }
        walk.advance()?;
    }
    Ok(false)
}

/// Folds the sequence's remaining elements into an accumulator.
///
/// Walks a snapshot; the caller's handle is not advanced.
pub fn fold<S, B, F>(seq: &S, init: B, mut f: F) -> Result<B, AccessError>
where
    S: Sequence,
    F: FnMut(B, S::Item) -> B,
{
    let mut walk = seq.snapshot();
    let mut acc = init;
    while !walk.is_empty() {
        acc = f(acc, walk.current()?);
        walk.advance()?;
    }
    Ok(acc)
}

/// Collects the sequence's remaining elements into a `Vec`.
pub fn collect<S>(seq: &S) -> Result<Vec<S::Item>, AccessError>
where
    S: Sequence,
{
    fold(seq, Vec::new(), |mut acc, value| {
        acc.push(value);
        acc
    })
}

/// Element-wise equality of two sequences' remaining elements.
///
/// Terminates at the shorter sequence's end; differing lengths compare
/// unequal.
pub fn eq<A, B>(a: &A, b: &B) -> Result<bool, AccessError>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
    A::Item: PartialEq,
{
    let mut lhs = a.snapshot();
    let mut rhs = b.snapshot();
    loop {
        match (lhs.is_empty(), rhs.is_empty()) {
            (true, true) => return Ok(true),
            (true, false) | (false, true) => return Ok(false),
            (false, false) => {
                if lhs.current()? != rhs.current()? {
                    return Ok(false);
                }
                lhs.advance()?;
                rhs.advance()?;
            }
        }
    }
}

/// Copies the sequence's remaining elements into a backing container, in
/// sequence order, through the backing's own insertion end.
///
/// Returns the number of elements copied.
pub fn copy_into<S, B>(seq: &S, sink: &mut B) -> Result<usize, AccessError>
where
    S: Sequence,
    B: Backing<Item = S::Item>,
{
    fold(seq, 0, |count, value| {
        sink.insert(value);
        count + 1
    })
}
