//! LIFO stack over a shared node chain.
//!
//! Same shared-handle model as [`Queue`](crate::Queue): cloning a [`Stack`]
//! aliases the chain, [`Stack::duplicate`] deep-copies it. All operations
//! act at the head.
//!
//! # Example
//!
//! ```
//! use corral::Stack;
//!
//! let mut s: Stack<&str> = Stack::new();
//! s.push("bottom").unwrap();
//! s.push("top").unwrap();
//!
//! assert_eq!(s.take(), Ok("top"));
//! assert_eq!(s.take(), Ok("bottom"));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::chain::{Chain, Cursor};
use crate::error::AccessError;

/// A LIFO stack handle; cloning aliases the chain.
pub struct Stack<T> {
    chain: Rc<RefCell<Chain<T>>>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Stack {
            chain: Rc::new(RefCell::new(Chain::new())),
        }
    }

    /// Creates an empty stack with room for `capacity` nodes before the
    /// arena grows.
    pub fn with_capacity(capacity: usize) -> Self {
        Stack {
            chain: Rc::new(RefCell::new(Chain::with_capacity(capacity))),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.chain.borrow().len()
    }

    /// Returns `true` if the stack holds no elements.
    pub fn is_empty(&self) -> bool {
        self.chain.borrow().is_empty()
    }

    /// Returns `true` if `self` and `other` are handles to the same chain.
    pub fn shares_chain(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.chain, &other.chain)
    }

    /// Returns a copy of the top element.
    ///
    /// # Errors
    ///
    /// [`AccessError::Empty`] on an empty stack.
    pub fn top(&self) -> Result<T, AccessError>
    where
        T: Clone,
    {
        let chain = self
            .chain
            .try_borrow()
            .map_err(|_| AccessError::Contended)?;
        chain.front().cloned().ok_or(AccessError::Empty)
    }

    /// Pushes a value on top. O(1).
    ///
    /// # Errors
    ///
    /// [`AccessError::Contended`] if the shared chain is already borrowed.
    pub fn push(&mut self, value: T) -> Result<(), AccessError> {
        let mut chain = self
            .chain
            .try_borrow_mut()
            .map_err(|_| AccessError::Contended)?;
        chain.push_front(value);
        Ok(())
    }

    /// Pushes every value of `values`; the FIRST value ends up on top.
    ///
    /// The whole run is linked with a single head fixup, so `push_all([a,
    /// b, c])` leaves the stack reading `a, b, c, …` from the top down.
    /// The source iterator is drained before the chain is borrowed, so it
    /// may read aliased handles of this stack.
    ///
    /// # Errors
    ///
    /// [`AccessError::Contended`] if the shared chain is already borrowed.
    pub fn push_all<I: IntoIterator<Item = T>>(&mut self, values: I) -> Result<(), AccessError> {
        // Run the caller's iterator to completion first; no chain borrow may
        // be held while caller code executes.
        let values: Vec<T> = values.into_iter().collect();
        let mut chain = self
            .chain
            .try_borrow_mut()
            .map_err(|_| AccessError::Contended)?;
        chain.splice_front(values);
        Ok(())
    }

    /// Unlinks the top element and discards it.
    ///
    /// # Errors
    ///
    /// [`AccessError::Empty`] on an empty stack; the stack is untouched on
    /// failure.
    pub fn pop(&mut self) -> Result<(), AccessError> {
        self.take().map(drop)
    }

    /// Unlinks the top element and returns it.
    ///
    /// This is `top` + `pop` as one logical operation; the value moves out
    /// exactly once.
    ///
    /// # Errors
    ///
    /// [`AccessError::Empty`] on an empty stack.
    pub fn take(&mut self) -> Result<T, AccessError> {
        let mut chain = self
            .chain
            .try_borrow_mut()
            .map_err(|_| AccessError::Contended)?;
        chain.pop_front().ok_or(AccessError::Empty)
    }

    /// Takes a [`Cursor`] over the stack's current elements, top first.
    pub fn snapshot(&self) -> Cursor<T> {
        let at = self.chain.borrow().head();
        Cursor {
            chain: Rc::clone(&self.chain),
            at,
        }
    }

    /// Deep-copies every element into a new independent stack.
    pub fn duplicate(&self) -> Stack<T>
    where
        T: Clone,
    {
        Stack {
            chain: Rc::new(RefCell::new(self.chain.borrow().duplicate())),
        }
    }
}

impl<T> Clone for Stack<T> {
    /// Returns a new handle to the **same** chain; see [`Queue`](crate::Queue)
    /// for the aliasing contract.
    fn clone(&self) -> Self {
        Stack {
            chain: Rc::clone(&self.chain),
        }
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for Stack<T> {
    /// Element-sequence equality, top first; aliased handles short-circuit.
    fn eq(&self, other: &Self) -> bool {
        if self.shares_chain(other) {
            return true;
        }
        self.chain.borrow().eq_elements(&other.chain.borrow())
    }
}

impl<T: Eq> Eq for Stack<T> {}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain = self.chain.borrow();
        f.debug_list().entries(chain.iter()).finish()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Eagerly consumes `iter`; the FIRST element ends up on top, matching
    /// [`Stack::push_all`].
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut chain = Chain::new();
        chain.splice_front(iter);
        Stack {
            chain: Rc::new(RefCell::new(chain)),
        }
    }
}
