//! A double-ended sequence built from bounded linked blocks.
//!
//! `BlockDeque` keeps its elements in a list of blocks, each block being a
//! doubly linked chain of at most `B` elements. Pushing and popping at either
//! end touches only the first or last block, so it is O(1) amortized.
//! Inserting or erasing in the middle touches one block plus, occasionally,
//! its neighbours, so it costs O(B) plus the O(n / b) walk to find the block.
//!
//! Positions are handed out as [`Handle`]s. A handle names an element node
//! and the block holding it; it stays valid until that element is removed or
//! its block is reorganised, and stale handles are detected rather than
//! dereferenced.
//!
//! # Example
//!
//! ```
//! use block_deque::BlockDeque;
//!
//! let mut deque: BlockDeque<i32> = (0..10).collect();
//! deque.push_front(-1);
//! deque.push_back(10);
//!
//! // Insert before the element at position 5
//! let at = deque.handle_at(5).unwrap();
//! let inserted = deque.insert(at, 99).unwrap();
//! assert_eq!(deque[5], 99);
//! assert_eq!(deque.position(inserted).unwrap(), 5);
//!
//! // Erase it again; the returned handle names the element that followed
//! let next = deque.erase(inserted).unwrap();
//! assert_eq!(deque.value(next), Ok(&4));
//! assert_eq!(deque.len(), 12);
//! ```

mod arena;
mod block;
mod bounds;
mod error;
mod handle;
mod into_iter;
mod iter;

pub use bounds::BlockBounds;
pub use error::{BoundsError, DequeError};
pub use handle::{Cursor, Handle};
pub use into_iter::IntoIter;
pub use iter::{Iter, IterMut};

use arena::Arena;
use block::{Block, Nodes};
use std::cmp::Ordering;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{self, AtomicU64};

/// Source of owner ids; every deque (and every clone or clear of one) draws a
/// fresh id so handles cannot be presented to the wrong container.
static NEXT_OWNER: AtomicU64 = AtomicU64::new(1);

fn next_owner() -> u64 {
    NEXT_OWNER.fetch_add(1, atomic::Ordering::Relaxed)
}

/// One cell of the block list.
#[derive(Clone, Debug, Default)]
pub(crate) struct BlockNode {
    pub(crate) prev: Option<u32>,
    pub(crate) next: Option<u32>,
    pub(crate) block: Block,
}

/// A double-ended sequence of bounded linked blocks.
///
/// Whenever the deque holds more than one block, every block length lies in
/// the configured [`BlockBounds`] band; a lone block may be shorter. The deque
/// always keeps at least one (possibly empty) block.
///
/// # Complexity
///
/// | operation                     | cost                    |
/// |-------------------------------|-------------------------|
/// | `push_*` / `pop_*`            | O(1) amortized          |
/// | `at` / indexing               | O(n / b + B)            |
/// | `insert` / `erase` by handle  | O(B) amortized          |
/// | `position` / `distance`       | O(n / b + B)            |
///
/// # Example
///
/// ```
/// use block_deque::BlockDeque;
///
/// let mut deque: BlockDeque<&str> = BlockDeque::new();
/// deque.push_back("b");
/// deque.push_front("a");
/// assert_eq!(deque.front(), Ok(&"a"));
/// assert_eq!(deque.back(), Ok(&"b"));
/// assert_eq!(deque.pop_back(), Ok("b"));
/// ```
///
/// # Panics
///
/// Elements and blocks are addressed by `u32` slots, so a deque holds at most
/// `u32::MAX` elements. Growing past that panics.
pub struct BlockDeque<T> {
    /// Element nodes of every block
    pub(crate) nodes: Nodes<T>,
    /// Block list cells
    pub(crate) blocks: Arena<BlockNode>,
    /// First block
    pub(crate) head: u32,
    /// Last block
    pub(crate) tail: u32,
    /// Sum of all block lengths
    len: usize,
    bounds: BlockBounds,
    /// Identity checked against handles
    pub(crate) owner: u64,
}

impl<T> BlockDeque<T> {
    /// Creates an empty deque with the default bounds (250, 500).
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::BlockDeque;
    /// let deque: BlockDeque<i32> = BlockDeque::new();
    /// assert!(deque.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_bounds(BlockBounds::default())
    }

    /// Creates an empty deque whose blocks are kept within `bounds`.
    pub fn with_bounds(bounds: BlockBounds) -> Self {
        let mut blocks = Arena::new();
        let only = blocks.insert(BlockNode::default());
        Self {
            nodes: Arena::new(),
            blocks,
            head: only,
            tail: only,
            len: 0,
            bounds,
            owner: next_owner(),
        }
    }

    /// Returns the block length thresholds of this deque.
    #[inline]
    pub fn bounds(&self) -> BlockBounds {
        self.bounds
    }

    /// Returns the number of elements in the deque.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the first element.
    ///
    /// Fails with [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn front(&self) -> Result<&T, DequeError> {
        let node = self.first_node().ok_or(DequeError::EmptyContainer)?;
        Ok(&self.nodes[node].value)
    }

    /// Returns the first element mutably.
    pub fn front_mut(&mut self) -> Result<&mut T, DequeError> {
        let node = self.first_node().ok_or(DequeError::EmptyContainer)?;
        Ok(&mut self.nodes[node].value)
    }

    /// Returns the last element.
    ///
    /// Fails with [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn back(&self) -> Result<&T, DequeError> {
        let node = self.last_node().ok_or(DequeError::EmptyContainer)?;
        Ok(&self.nodes[node].value)
    }

    /// Returns the last element mutably.
    pub fn back_mut(&mut self) -> Result<&mut T, DequeError> {
        let node = self.last_node().ok_or(DequeError::EmptyContainer)?;
        Ok(&mut self.nodes[node].value)
    }

    #[inline]
    fn first_node(&self) -> Option<u32> {
        if self.len == 0 {
            return None;
        }
        self.blocks[self.head].block.head()
    }

    #[inline]
    fn last_node(&self) -> Option<u32> {
        if self.len == 0 {
            return None;
        }
        self.blocks[self.tail].block.tail()
    }

    /// Returns the element at `pos` with bounds checking.
    ///
    /// Fails with [`DequeError::IndexOutOfBound`] if `pos >= len()`.
    ///
    /// # Example
    ///
    /// ```
    /// use block_deque::{BlockDeque, DequeError};
    /// let deque: BlockDeque<i32> = (0..3).collect();
    /// assert_eq!(deque.at(2), Ok(&2));
    /// assert_eq!(deque.at(3), Err(DequeError::IndexOutOfBound { index: 3, len: 3 }));
    /// ```
    pub fn at(&self, pos: usize) -> Result<&T, DequeError> {
        let (_, node) = self.locate(pos)?;
        Ok(&self.nodes[node].value)
    }

    /// Returns the element at `pos` mutably, with bounds checking.
    pub fn at_mut(&mut self, pos: usize) -> Result<&mut T, DequeError> {
        let (_, node) = self.locate(pos)?;
        Ok(&mut self.nodes[node].value)
    }

    /// Returns a reference to the element at `pos`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<&T> {
        self.at(pos).ok()
    }

    /// Returns a mutable reference to the element at `pos`, or `None` if out of bounds.
    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut T> {
        self.at_mut(pos).ok()
    }

    /// Finds the block and node holding position `pos`.
    pub(crate) fn locate(&self, pos: usize) -> Result<(u32, u32), DequeError> {
        let (block, k) = self.locate_block(pos)?;
        Ok((block, self.blocks[block].block.nth(&self.nodes, k)?))
    }

    /// Finds the block holding position `pos` and the offset inside it.
    ///
    /// Walks the block list from whichever end is nearer, skipping whole
    /// blocks by length.
    fn locate_block(&self, pos: usize) -> Result<(u32, usize), DequeError> {
        if pos >= self.len {
            return Err(DequeError::IndexOutOfBound {
                index: pos,
                len: self.len,
            });
        }

        if pos < self.len / 2 {
            let mut block = self.head;
            let mut k = pos;
            loop {
                let cell = &self.blocks[block];
                let len = cell.block.len();
                if k < len {
                    return Ok((block, k));
                }
                k -= len;
                block = cell.next.ok_or(DequeError::InternalInconsistency)?;
            }
        } else {
            let mut block = self.tail;
            // Distance from the back
            let mut k = self.len - 1 - pos;
            loop {
                let cell = &self.blocks[block];
                let len = cell.block.len();
                if k < len {
                    return Ok((block, len - 1 - k));
                }
                k -= len;
                block = cell.prev.ok_or(DequeError::InternalInconsistency)?;
            }
        }
    }

    /// Appends an element to the back of the deque.
    pub fn push_back(&mut self, value: T) {
        let tail = self.tail;
        self.blocks[tail].block.push_back(&mut self.nodes, value);
        self.len += 1;
        self.settle_after_push(tail);
    }

    /// Prepends an element to the front of the deque.
    pub fn push_front(&mut self, value: T) {
        let head = self.head;
        self.blocks[head].block.push_front(&mut self.nodes, value);
        self.len += 1;
        self.settle_after_push(head);
    }

    /// Removes and returns the last element.
    ///
    /// Fails with [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn pop_back(&mut self) -> Result<T, DequeError> {
        if self.len == 0 {
            return Err(DequeError::EmptyContainer);
        }
        let tail = self.tail;
        let value = self.blocks[tail].block.pop_back(&mut self.nodes)?;
        self.len -= 1;
        self.rebalance(tail)?;
        Ok(value)
    }

    /// Removes and returns the first element.
    ///
    /// Fails with [`DequeError::EmptyContainer`] if the deque is empty.
    pub fn pop_front(&mut self) -> Result<T, DequeError> {
        if self.len == 0 {
            return Err(DequeError::EmptyContainer);
        }
        let head = self.head;
        let value = self.blocks[head].block.pop_front(&mut self.nodes)?;
        self.len -= 1;
        self.rebalance(head)?;
        Ok(value)
    }

    /// Inserts `value` before the element named by `pos`.
    ///
    /// Inserting before [`end`](Self::end) appends. Returns a handle to the
    /// inserted element, valid even when the insertion split its block.
    ///
    /// Fails with [`DequeError::InvalidIterator`] if `pos` is stale or
    /// belongs to another deque.
    pub fn insert(&mut self, pos: Handle, value: T) -> Result<Handle, DequeError> {
        let Some((block, node)) = self.resolve(pos)? else {
            self.push_back(value);
            let tail = self.tail;
            return Ok(self.handle_or_end(tail, self.blocks[tail].block.tail()));
        };

        let inserted = self.blocks[block]
            .block
            .insert_before(&mut self.nodes, node, value);
        self.len += 1;
        let representative = self.rebalance(block)?;
        let owner = self.block_containing(inserted, representative)?;
        Ok(self.make_handle(owner, inserted))
    }

    /// Inserts `value` so that it ends up at position `pos`.
    ///
    /// Fails with [`DequeError::IndexOutOfBound`] if `pos > len()`.
    pub fn insert_at(&mut self, pos: usize, value: T) -> Result<Handle, DequeError> {
        let at = self.handle_at(pos)?;
        self.insert(at, value)
    }

    /// Removes the element named by `pos`.
    ///
    /// Returns a handle to the element that followed it, or
    /// [`end`](Self::end) if it was the last one.
    ///
    /// Fails with [`DequeError::InvalidIterator`] if `pos` is past-the-end,
    /// stale, or belongs to another deque.
    pub fn erase(&mut self, pos: Handle) -> Result<Handle, DequeError> {
        let (block, node) = self.resolve(pos)?.ok_or(DequeError::InvalidIterator)?;
        let (_, next) = self.erase_node(block, node)?;
        Ok(next)
    }

    /// Removes and returns the element at position `pos`.
    ///
    /// Fails with [`DequeError::IndexOutOfBound`] if `pos >= len()`.
    pub fn remove(&mut self, pos: usize) -> Result<T, DequeError> {
        let (block, k) = self.locate_block(pos)?;
        let (value, following) = self.blocks[block].block.remove_nth(&mut self.nodes, k)?;
        self.settle_after_erase(block, following)?;
        Ok(value)
    }

    fn erase_node(&mut self, block: u32, node: u32) -> Result<(T, Handle), DequeError> {
        let (value, following) = self.blocks[block].block.remove(&mut self.nodes, node);
        let next = self.settle_after_erase(block, following)?;
        Ok((value, next))
    }

    /// Accounts for one element unlinked from `block` and rebalances it.
    ///
    /// `following` is the in-block successor of the removed node. Returns a
    /// handle to the element that followed the removed one.
    fn settle_after_erase(
        &mut self,
        block: u32,
        following: Option<u32>,
    ) -> Result<Handle, DequeError> {
        self.len -= 1;

        // The follower may live in the next block; find it before rebalance
        // possibly merges that block away.
        let following = following.or_else(|| {
            self.blocks[block]
                .next
                .and_then(|next| self.blocks[next].block.head())
        });
        let representative = self.rebalance(block)?;

        match following {
            Some(follower) => {
                let owner = self.block_containing(follower, representative)?;
                Ok(self.make_handle(owner, follower))
            }
            None => Ok(self.end()),
        }
    }

    /// Rebalances after a push, which has no error channel.
    fn settle_after_push(&mut self, at: u32) {
        if let Err(err) = self.rebalance(at) {
            tracing::error!(%err, block = at, "rebalance after push failed");
        }
    }

    /// Finds which of `representative` and its neighbours now holds `node`.
    fn block_containing(&self, node: u32, representative: u32) -> Result<u32, DequeError> {
        let cell = &self.blocks[representative];
        [Some(representative), cell.next, cell.prev]
            .into_iter()
            .flatten()
            .find(|&candidate| self.blocks[candidate].block.contains(&self.nodes, node))
            .ok_or(DequeError::InternalInconsistency)
    }

    /// Removes all elements.
    ///
    /// Every outstanding handle becomes invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.blocks.clear();
        let only = self.blocks.insert(BlockNode::default());
        self.head = only;
        self.tail = only;
        self.len = 0;
        self.owner = next_owner();
    }

    /// Returns `true` if the deque contains an element equal to `x`.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == x)
    }

    /// Returns an iterator over references to the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns an iterator over mutable references to the elements.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Restores the length band of block `at` after a mutation.
    ///
    /// - longer than `upper`: split into halves, the original cell is retired
    /// - shorter than `lower`: absorb neighbours while the result fits under
    ///   `upper`, then borrow from the larger neighbour if still short
    ///
    /// Returns the block that now represents `at`: the left half after a
    /// split, otherwise `at` itself. This is the only place blocks are created
    /// or destroyed.
    ///
    /// Fails with [`DequeError::InternalInconsistency`] if a block chain
    /// disagrees with its recorded length.
    fn rebalance(&mut self, at: u32) -> Result<u32, DequeError> {
        debug_assert_eq!(self.nodes.len(), self.len);
        let len = self.blocks[at].block.len();
        if len > self.bounds.upper() {
            return self.split_block(at);
        }
        if len < self.bounds.lower() {
            self.absorb_neighbors(at);
            if self.blocks[at].block.len() < self.bounds.lower() {
                self.borrow_from_neighbor(at)?;
            }
        }
        Ok(at)
    }

    fn split_block(&mut self, at: u32) -> Result<u32, DequeError> {
        let (left, right) = self.blocks[at].block.split(&mut self.nodes)?;
        let BlockNode { prev, next, .. } = self.blocks.remove(at);
        tracing::trace!(
            block = at,
            left = left.len(),
            right = right.len(),
            "split block"
        );

        let left_at = self.blocks.insert(BlockNode {
            prev,
            next: None,
            block: left,
        });
        let right_at = self.blocks.insert(BlockNode {
            prev: Some(left_at),
            next,
            block: right,
        });
        self.blocks[left_at].next = Some(right_at);

        match prev {
            Some(prev) => self.blocks[prev].next = Some(left_at),
            None => self.head = left_at,
        }
        match next {
            Some(next) => self.blocks[next].prev = Some(right_at),
            None => self.tail = right_at,
        }
        Ok(left_at)
    }

    fn absorb_neighbors(&mut self, at: u32) {
        let upper = self.bounds.upper();

        while let Some(prev) = self.blocks[at].prev {
            if self.blocks[prev].block.len() + self.blocks[at].block.len() > upper {
                break;
            }
            let donor = self.unlink_block(prev);
            tracing::trace!(block = at, donor = prev, absorbed = donor.len(), "merge preceding block");
            self.blocks[at].block.merge_front(&mut self.nodes, donor);
        }

        while let Some(next) = self.blocks[at].next {
            if self.blocks[next].block.len() + self.blocks[at].block.len() > upper {
                break;
            }
            let donor = self.unlink_block(next);
            tracing::trace!(block = at, donor = next, absorbed = donor.len(), "merge following block");
            self.blocks[at].block.merge_back(&mut self.nodes, donor);
        }
    }

    /// Moves elements from the longer neighbour into `at` until both hold at
    /// least half of their combined length.
    ///
    /// Only reached when merging was refused, i.e. the combined length exceeds
    /// `upper >= 2 * lower`, so both halves end up at least `lower`.
    fn borrow_from_neighbor(&mut self, at: u32) -> Result<(), DequeError> {
        let cell = &self.blocks[at];
        let (donor, from_prev) = match (cell.prev, cell.next) {
            (Some(prev), Some(next)) => {
                if self.blocks[prev].block.len() >= self.blocks[next].block.len() {
                    (prev, true)
                } else {
                    (next, false)
                }
            }
            (Some(prev), None) => (prev, true),
            (None, Some(next)) => (next, false),
            (None, None) => return Ok(()),
        };

        let have = self.blocks[at].block.len();
        let wanted = (self.blocks[donor].block.len() + have) / 2;
        if wanted <= have {
            return Ok(());
        }
        let count = wanted - have;

        if from_prev {
            let moved = self.blocks[donor]
                .block
                .split_off_back(&mut self.nodes, count)?;
            self.blocks[at].block.merge_front(&mut self.nodes, moved);
        } else {
            let moved = self.blocks[donor]
                .block
                .split_off_front(&mut self.nodes, count)?;
            self.blocks[at].block.merge_back(&mut self.nodes, moved);
        }
        // Elements left the donor; handles into it can no longer be trusted.
        self.blocks.retire_keys(donor);
        tracing::trace!(block = at, donor, moved = count, "borrow from neighbour");
        Ok(())
    }

    /// Removes block cell `at` from the list and returns its block.
    ///
    /// `at` must have at least one neighbour.
    fn unlink_block(&mut self, at: u32) -> Block {
        let BlockNode { prev, next, block } = self.blocks.remove(at);
        debug_assert!(prev.is_some() || next.is_some());
        match prev {
            Some(prev) => self.blocks[prev].next = next,
            None => {
                if let Some(next) = next {
                    self.head = next;
                }
            }
        }
        match next {
            Some(next) => self.blocks[next].prev = prev,
            None => {
                if let Some(prev) = prev {
                    self.tail = prev;
                }
            }
        }
        block
    }
}

// Trait implementations
impl<T: Clone> Clone for BlockDeque<T> {
    /// Deep copy of every block and element.
    ///
    /// The clone has the same block layout but its own identity: handles
    /// obtained from `self` are rejected by the clone.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            blocks: self.blocks.clone(),
            head: self.head,
            tail: self.tail,
            len: self.len,
            bounds: self.bounds,
            owner: next_owner(),
        }
    }
}

impl<T: PartialEq> PartialEq for BlockDeque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for BlockDeque<T> {}

impl<T: PartialOrd> PartialOrd for BlockDeque<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for BlockDeque<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: std::hash::Hash> std::hash::Hash for BlockDeque<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for item in self.iter() {
            item.hash(state);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for BlockDeque<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for BlockDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for BlockDeque<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for BlockDeque<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Extend<T> for BlockDeque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Clone + 'a> Extend<&'a T> for BlockDeque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item.clone());
        }
    }
}

impl<T> FromIterator<T> for BlockDeque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T> From<Vec<T>> for BlockDeque<T> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

impl<T> IntoIterator for BlockDeque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a BlockDeque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut BlockDeque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
impl<T> BlockDeque<T> {
    /// Lengths of the blocks in list order.
    fn block_lens(&self) -> Vec<usize> {
        let mut lens = Vec::new();
        let mut at = Some(self.head);
        while let Some(block) = at {
            lens.push(self.blocks[block].block.len());
            at = self.blocks[block].next;
        }
        lens
    }

    /// Checks every structural invariant, panicking on the first violation.
    fn assert_invariants(&self) {
        let mut prev = None;
        let mut at = Some(self.head);
        let mut count = 0;
        let mut total = 0;
        let mut last = self.head;
        while let Some(block) = at {
            let cell = &self.blocks[block];
            assert_eq!(cell.prev, prev, "broken prev link at block {block}");
            assert_eq!(
                cell.block.head().is_none(),
                cell.block.len() == 0,
                "head/len disagree at block {block}"
            );
            let mut walked = 0;
            let mut node = cell.block.head();
            let mut node_prev = None;
            while let Some(current) = node {
                assert_eq!(self.nodes[current].prev, node_prev);
                walked += 1;
                node_prev = Some(current);
                node = self.nodes[current].next;
            }
            assert_eq!(node_prev, cell.block.tail(), "tail mismatch at block {block}");
            assert_eq!(walked, cell.block.len(), "len mismatch at block {block}");
            total += walked;
            count += 1;
            last = block;
            prev = Some(block);
            at = cell.next;
        }
        assert_eq!(last, self.tail, "tail block mismatch");
        assert_eq!(total, self.len, "total length mismatch");
        assert_eq!(self.nodes.len(), self.len, "leaked element nodes");
        assert_eq!(self.blocks.len(), count, "leaked block cells");

        let lens = self.block_lens();
        if lens.len() > 1 {
            for len in &lens {
                assert!(
                    (self.bounds.lower()..=self.bounds.upper()).contains(len),
                    "block length {len} outside band in {lens:?}"
                );
            }
        } else {
            assert!(lens[0] <= self.bounds.upper());
        }
    }
}
