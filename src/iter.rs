//! Borrowing iterators for `BlockDeque`.

use std::marker::PhantomData;

use crate::arena::{Arena, Slot};
use crate::block::{Node, Nodes};
use crate::{BlockDeque, BlockNode};

/// Position after `(block, _)` given the node's in-block `next` link:
/// the next node in the same block, else the head of the next non-empty block.
#[inline]
pub(crate) fn step_forward(
    blocks: &Arena<BlockNode>,
    block: u32,
    next: Option<u32>,
) -> Option<(u32, u32)> {
    if let Some(next) = next {
        return Some((block, next));
    }
    let mut at = blocks[block].next;
    while let Some(candidate) = at {
        if let Some(head) = blocks[candidate].block.head() {
            return Some((candidate, head));
        }
        at = blocks[candidate].next;
    }
    None
}

/// Mirror of [`step_forward`].
#[inline]
pub(crate) fn step_backward(
    blocks: &Arena<BlockNode>,
    block: u32,
    prev: Option<u32>,
) -> Option<(u32, u32)> {
    if let Some(prev) = prev {
        return Some((block, prev));
    }
    let mut at = blocks[block].prev;
    while let Some(candidate) = at {
        if let Some(tail) = blocks[candidate].block.tail() {
            return Some((candidate, tail));
        }
        at = blocks[candidate].prev;
    }
    None
}

/// An iterator over references to elements of a `BlockDeque`.
pub struct Iter<'a, T> {
    nodes: &'a Nodes<T>,
    blocks: &'a Arena<BlockNode>,
    /// Next (block, node) to yield from the front
    front: Option<(u32, u32)>,
    /// Next (block, node) to yield from the back
    back: Option<(u32, u32)>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(deque: &'a BlockDeque<T>) -> Self {
        let blocks = &deque.blocks;
        Self {
            nodes: &deque.nodes,
            blocks,
            front: blocks[deque.head].block.head().map(|n| (deque.head, n)),
            back: blocks[deque.tail].block.tail().map(|n| (deque.tail, n)),
            remaining: deque.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (block, node) = self.front?;
        let node = &self.nodes[node];
        self.front = step_forward(self.blocks, block, node.next);
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (block, node) = self.back?;
        let node = &self.nodes[node];
        self.back = step_backward(self.blocks, block, node.prev);
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> std::iter::FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            blocks: self.blocks,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T> std::fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// An iterator over mutable references to elements of a `BlockDeque`.
pub struct IterMut<'a, T> {
    /// Slot storage of the element arena, borrowed exclusively for `'a`
    base: *mut Slot<Node<T>>,
    blocks: &'a Arena<BlockNode>,
    front: Option<(u32, u32)>,
    back: Option<(u32, u32)>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(deque: &'a mut BlockDeque<T>) -> Self {
        let remaining = deque.len();
        let BlockDeque {
            nodes,
            blocks,
            head,
            tail,
            ..
        } = deque;
        let blocks: &'a Arena<BlockNode> = blocks;
        Self {
            base: nodes.base_ptr(),
            front: blocks[*head].block.head().map(|n| (*head, n)),
            back: blocks[*tail].block.tail().map(|n| (*tail, n)),
            blocks,
            remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (block, node) = self.front?;
        // Safety: the arena is exclusively borrowed for 'a and not resized
        // while we exist; `node` is occupied and has not been yielded yet
        // since `remaining` counts the nodes between `front` and `back`.
        let node = unsafe { &mut *Arena::value_ptr(self.base, node) };
        self.front = step_forward(self.blocks, block, node.next);
        self.remaining -= 1;
        Some(&mut node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (block, node) = self.back?;
        // Safety: see `next`
        let node = unsafe { &mut *Arena::value_ptr(self.base, node) };
        self.back = step_backward(self.blocks, block, node.prev);
        self.remaining -= 1;
        Some(&mut node.value)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> std::iter::FusedIterator for IterMut<'_, T> {}

impl<T> std::fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.remaining)
            .finish()
    }
}

// Safety: IterMut yields exclusive references to distinct elements
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}
