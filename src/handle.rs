//! Element positions and the stepping arithmetic built on them.
//!
//! A [`Handle`] is a detached position: it does not borrow the deque, so it
//! can be held across mutations and handed back to [`BlockDeque::insert`] or
//! [`BlockDeque::erase`]. Every use revalidates it. A handle goes stale when
//! its element is erased or its block is split, merged away, or lends
//! elements to a neighbour; a stale handle is reported as
//! [`DequeError::InvalidIterator`], never dereferenced.
//!
//! [`Cursor`] is the read-only flavour: a handle bundled with a shared borrow
//! of its deque, so the deque cannot change underneath it.

use std::cmp::Ordering;

use crate::arena::Key;
use crate::{BlockDeque, DequeError};

/// A position in a [`BlockDeque`]: an element, or past-the-end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    owner: u64,
    block: Option<Key>,
    node: Option<Key>,
}

impl Handle {
    /// Returns `true` for the past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

impl<T> BlockDeque<T> {
    /// Handle to the first element, or [`end`](Self::end) if empty.
    pub fn begin(&self) -> Handle {
        let head = self.head;
        self.handle_or_end(head, self.blocks[head].block.head())
    }

    /// The past-the-end handle.
    #[inline]
    pub fn end(&self) -> Handle {
        Handle {
            owner: self.owner,
            block: None,
            node: None,
        }
    }

    /// Read-only cursor at the first element.
    #[inline]
    pub fn cbegin(&self) -> Cursor<'_, T> {
        self.cursor(self.begin())
    }

    /// Read-only past-the-end cursor.
    #[inline]
    pub fn cend(&self) -> Cursor<'_, T> {
        self.cursor(self.end())
    }

    /// Wraps `handle` into a read-only cursor over this deque.
    ///
    /// The handle is validated lazily, by the cursor's operations.
    #[inline]
    pub fn cursor(&self, handle: Handle) -> Cursor<'_, T> {
        Cursor {
            deque: self,
            handle,
        }
    }

    /// Handle to position `pos`; `pos == len()` yields [`end`](Self::end).
    ///
    /// Fails with [`DequeError::IndexOutOfBound`] if `pos > len()`.
    pub fn handle_at(&self, pos: usize) -> Result<Handle, DequeError> {
        if pos == self.len() {
            return Ok(self.end());
        }
        let (block, node) = self.locate(pos)?;
        Ok(self.make_handle(block, node))
    }

    /// Element named by `handle`.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::{BlockDeque, DequeError};
    ///
    /// let deque: BlockDeque<char> = "abc".chars().collect();
    /// assert_eq!(deque.value(deque.begin()), Ok(&'a'));
    /// assert_eq!(deque.value(deque.end()), Err(DequeError::InvalidIterator));
    /// ```
    pub fn value(&self, handle: Handle) -> Result<&T, DequeError> {
        let (_, node) = self.resolve(handle)?.ok_or(DequeError::InvalidIterator)?;
        Ok(&self.nodes[node].value)
    }

    /// Element named by `handle`, mutably.
    pub fn value_mut(&mut self, handle: Handle) -> Result<&mut T, DequeError> {
        let (_, node) = self.resolve(handle)?.ok_or(DequeError::InvalidIterator)?;
        Ok(&mut self.nodes[node].value)
    }

    /// Handle one step forward. Stepping from the last element gives `end`.
    pub fn next(&self, handle: Handle) -> Result<Handle, DequeError> {
        self.advance(handle, 1)
    }

    /// Handle one step backward.
    pub fn prev(&self, handle: Handle) -> Result<Handle, DequeError> {
        self.advance(handle, -1)
    }

    /// Handle `n` steps away from `handle` (backward when `n` is negative).
    ///
    /// Whole blocks are skipped by length, so the cost is
    /// O(n / b + B) rather than O(n).
    ///
    /// Errors:
    /// - [`DequeError::InvalidIterator`] if `handle` is stale or foreign, or
    ///   if `n > 0` and `handle` is past-the-end
    /// - [`DequeError::InternalInconsistency`] if the walk would leave the
    ///   sequence (before the first element or beyond past-the-end)
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    ///
    /// let deque: BlockDeque<u32> = (0..1000).collect();
    /// let at = deque.advance(deque.begin(), 700).unwrap();
    /// assert_eq!(deque.value(at), Ok(&700));
    /// let back = deque.advance(deque.end(), -1).unwrap();
    /// assert_eq!(deque.value(back), Ok(&999));
    /// ```
    pub fn advance(&self, handle: Handle, n: isize) -> Result<Handle, DequeError> {
        let at = self.resolve(handle)?;
        match n.cmp(&0) {
            Ordering::Equal => Ok(handle),
            Ordering::Greater => {
                let (block, node) = at.ok_or(DequeError::InvalidIterator)?;
                self.walk_forward(block, node, n.unsigned_abs())
            }
            Ordering::Less => self.walk_backward(at, n.unsigned_abs()),
        }
    }

    /// Zero-based position of `handle`; `end` maps to `len()`.
    pub fn position(&self, handle: Handle) -> Result<usize, DequeError> {
        let Some((block, node)) = self.resolve(handle)? else {
            return Ok(self.len());
        };
        let mut pos = self.blocks[block].block.offset_of(&self.nodes, node);
        let mut at = self.blocks[block].prev;
        while let Some(prev) = at {
            pos += self.blocks[prev].block.len();
            at = self.blocks[prev].prev;
        }
        Ok(pos)
    }

    /// Signed distance `position(a) - position(b)`.
    ///
    /// Satisfies `advance(b, distance(a, b)) == a`.
    pub fn distance(&self, a: Handle, b: Handle) -> Result<isize, DequeError> {
        let a = self.position(a)?;
        let b = self.position(b)?;
        Ok(a as isize - b as isize)
    }

    /// Resolves a handle to `(block, node)` slots; `None` for past-the-end.
    pub(crate) fn resolve(&self, handle: Handle) -> Result<Option<(u32, u32)>, DequeError> {
        if handle.owner != self.owner {
            return Err(DequeError::InvalidIterator);
        }
        match (handle.block, handle.node) {
            (None, None) => Ok(None),
            (Some(block), Some(node)) => {
                match (self.blocks.resolve(block), self.nodes.resolve(node)) {
                    (Some(block), Some(node)) => Ok(Some((block, node))),
                    _ => Err(DequeError::InvalidIterator),
                }
            }
            _ => Err(DequeError::InvalidIterator),
        }
    }

    #[inline]
    pub(crate) fn make_handle(&self, block: u32, node: u32) -> Handle {
        Handle {
            owner: self.owner,
            block: Some(self.blocks.key(block)),
            node: Some(self.nodes.key(node)),
        }
    }

    #[inline]
    pub(crate) fn handle_or_end(&self, block: u32, node: Option<u32>) -> Handle {
        match node {
            Some(node) => self.make_handle(block, node),
            None => self.end(),
        }
    }

    fn walk_forward(&self, block: u32, node: u32, steps: usize) -> Result<Handle, DequeError> {
        // Within the current block first
        let mut node = node;
        let mut k = steps;
        while k > 0 {
            match self.nodes[node].next {
                Some(next) => {
                    node = next;
                    k -= 1;
                }
                None => break,
            }
        }
        if k == 0 {
            return Ok(self.make_handle(block, node));
        }

        let mut block = block;
        loop {
            match self.blocks[block].next {
                Some(next) => {
                    block = next;
                    let len = self.blocks[block].block.len();
                    if k <= len {
                        let node = self.blocks[block].block.nth(&self.nodes, k - 1)?;
                        return Ok(self.make_handle(block, node));
                    }
                    k -= len;
                }
                None if k == 1 => return Ok(self.end()),
                None => return Err(DequeError::InternalInconsistency),
            }
        }
    }

    fn walk_backward(&self, from: Option<(u32, u32)>, steps: usize) -> Result<Handle, DequeError> {
        let (mut block, mut node, mut k) = match from {
            Some((block, node)) => (block, node, steps),
            None => {
                // The first step from past-the-end lands on the last element
                let tail = self.tail;
                let last = self.blocks[tail]
                    .block
                    .tail()
                    .ok_or(DequeError::InternalInconsistency)?;
                (tail, last, steps - 1)
            }
        };

        while k > 0 {
            match self.nodes[node].prev {
                Some(prev) => {
                    node = prev;
                    k -= 1;
                }
                None => break,
            }
        }
        if k == 0 {
            return Ok(self.make_handle(block, node));
        }

        loop {
            let prev = self.blocks[block]
                .prev
                .ok_or(DequeError::InternalInconsistency)?;
            block = prev;
            let len = self.blocks[block].block.len();
            if k <= len {
                node = self.blocks[block].block.nth(&self.nodes, len - k)?;
                return Ok(self.make_handle(block, node));
            }
            k -= len;
        }
    }
}

/// A read-only position bound to a borrowed [`BlockDeque`].
///
/// Equality compares positions; cursors into different deques are never
/// equal.
pub struct Cursor<'a, T> {
    deque: &'a BlockDeque<T>,
    handle: Handle,
}

impl<'a, T> Cursor<'a, T> {
    /// The detached handle for this position.
    #[inline]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Returns `true` at the past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.handle.is_end()
    }

    /// Element at this position.
    pub fn get(&self) -> Result<&'a T, DequeError> {
        self.deque.value(self.handle)
    }

    /// Moves one step forward.
    pub fn move_next(&mut self) -> Result<(), DequeError> {
        self.handle = self.deque.next(self.handle)?;
        Ok(())
    }

    /// Moves one step backward.
    pub fn move_prev(&mut self) -> Result<(), DequeError> {
        self.handle = self.deque.prev(self.handle)?;
        Ok(())
    }

    /// Cursor `n` steps away (backward when negative).
    pub fn advance(&self, n: isize) -> Result<Self, DequeError> {
        Ok(Self {
            deque: self.deque,
            handle: self.deque.advance(self.handle, n)?,
        })
    }

    /// Zero-based position; past-the-end maps to the deque length.
    pub fn position(&self) -> Result<usize, DequeError> {
        self.deque.position(self.handle)
    }

    /// Signed distance `self - origin`.
    pub fn offset_from(&self, origin: &Self) -> Result<isize, DequeError> {
        self.deque.distance(self.handle, origin.handle)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> std::fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}
