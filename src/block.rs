//! A bounded run of elements stored as a doubly linked chain.
//!
//! A `Block` is only a descriptor (`head`, `tail`, `len`); the nodes of its
//! chain live in the element arena shared by every block of a deque. This is
//! what makes merging two neighbouring blocks an O(1) splice: no element is
//! moved, only the boundary links change.

use crate::arena::Arena;
use crate::DequeError;

/// One element together with its links inside its block.
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<u32>,
    pub(crate) next: Option<u32>,
}

/// Storage for element nodes.
pub(crate) type Nodes<T> = Arena<Node<T>>;

/// A doubly linked chain of element nodes.
///
/// Invariant: `len` equals the length of the chain from `head` to `tail`, and
/// `head.is_none() == (len == 0) == tail.is_none()`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Block {
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
}

impl Block {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) const fn head(&self) -> Option<u32> {
        self.head
    }

    #[inline]
    pub(crate) const fn tail(&self) -> Option<u32> {
        self.tail
    }

    /// Prepends `value` and returns its node.
    pub(crate) fn push_front<T>(&mut self, nodes: &mut Nodes<T>, value: T) -> u32 {
        let node = nodes.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(head) => nodes[head].prev = Some(node),
            None => self.tail = Some(node),
        }
        self.head = Some(node);
        self.len += 1;
        node
    }

    /// Appends `value` and returns its node.
    pub(crate) fn push_back<T>(&mut self, nodes: &mut Nodes<T>, value: T) -> u32 {
        let node = nodes.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => nodes[tail].next = Some(node),
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
        node
    }

    pub(crate) fn pop_front<T>(&mut self, nodes: &mut Nodes<T>) -> Result<T, DequeError> {
        let head = self.head.ok_or(DequeError::EmptyContainer)?;
        let node = nodes.remove(head);
        self.head = node.next;
        match node.next {
            Some(next) => nodes[next].prev = None,
            None => self.tail = None,
        }
        self.len -= 1;
        Ok(node.value)
    }

    pub(crate) fn pop_back<T>(&mut self, nodes: &mut Nodes<T>) -> Result<T, DequeError> {
        let tail = self.tail.ok_or(DequeError::EmptyContainer)?;
        let node = nodes.remove(tail);
        self.tail = node.prev;
        match node.prev {
            Some(prev) => nodes[prev].next = None,
            None => self.head = None,
        }
        self.len -= 1;
        Ok(node.value)
    }

    /// Splices `value` in immediately before `at`, which must belong to this block.
    pub(crate) fn insert_before<T>(&mut self, nodes: &mut Nodes<T>, at: u32, value: T) -> u32 {
        let prev = nodes[at].prev;
        let node = nodes.insert(Node {
            value,
            prev,
            next: Some(at),
        });
        nodes[at].prev = Some(node);
        match prev {
            Some(prev) => nodes[prev].next = Some(node),
            None => self.head = Some(node),
        }
        self.len += 1;
        node
    }

    /// Unlinks `at`, which must belong to this block.
    ///
    /// Returns the value and the node that followed it inside this block.
    pub(crate) fn remove<T>(&mut self, nodes: &mut Nodes<T>, at: u32) -> (T, Option<u32>) {
        let node = nodes.remove(at);
        match node.prev {
            Some(prev) => nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        (node.value, node.next)
    }

    /// Unlinks the `k`-th node (0-based); returns its value and follower.
    pub(crate) fn remove_nth<T>(
        &mut self,
        nodes: &mut Nodes<T>,
        k: usize,
    ) -> Result<(T, Option<u32>), DequeError> {
        let at = self.nth(nodes, k)?;
        Ok(self.remove(nodes, at))
    }

    /// Finds the `k`-th node (0-based), walking from the nearer end.
    pub(crate) fn nth<T>(&self, nodes: &Nodes<T>, k: usize) -> Result<u32, DequeError> {
        if k >= self.len {
            return Err(DequeError::IndexOutOfBound {
                index: k,
                len: self.len,
            });
        }
        let found = if k < self.len / 2 {
            self.walk_next(nodes, self.head, k)
        } else {
            self.walk_prev(nodes, self.tail, self.len - 1 - k)
        };
        found.ok_or(DequeError::InternalInconsistency)
    }

    fn walk_next<T>(&self, nodes: &Nodes<T>, from: Option<u32>, steps: usize) -> Option<u32> {
        let mut at = from?;
        for _ in 0..steps {
            at = nodes[at].next?;
        }
        Some(at)
    }

    fn walk_prev<T>(&self, nodes: &Nodes<T>, from: Option<u32>, steps: usize) -> Option<u32> {
        let mut at = from?;
        for _ in 0..steps {
            at = nodes[at].prev?;
        }
        Some(at)
    }

    /// Splices all of `other` in front of this block's chain.
    pub(crate) fn merge_front<T>(&mut self, nodes: &mut Nodes<T>, other: Block) {
        let (Some(other_head), Some(other_tail)) = (other.head, other.tail) else {
            return;
        };
        match self.head {
            Some(head) => {
                nodes[head].prev = Some(other_tail);
                nodes[other_tail].next = Some(head);
            }
            None => self.tail = Some(other_tail),
        }
        self.head = Some(other_head);
        self.len += other.len;
    }

    /// Splices all of `other` after this block's chain.
    pub(crate) fn merge_back<T>(&mut self, nodes: &mut Nodes<T>, other: Block) {
        let (Some(other_head), Some(other_tail)) = (other.head, other.tail) else {
            return;
        };
        match self.tail {
            Some(tail) => {
                nodes[tail].next = Some(other_head);
                nodes[other_head].prev = Some(tail);
            }
            None => self.head = Some(other_head),
        }
        self.tail = Some(other_tail);
        self.len += other.len;
    }

    /// Detaches the first `k` nodes as a new block. O(k).
    ///
    /// Fails with [`DequeError::InternalInconsistency`] if the chain is
    /// shorter than `len` claims; the block is left untouched then.
    pub(crate) fn split_off_front<T>(
        &mut self,
        nodes: &mut Nodes<T>,
        k: usize,
    ) -> Result<Block, DequeError> {
        debug_assert!(k <= self.len);
        if k == 0 {
            return Ok(Block::new());
        }
        if k >= self.len {
            return Ok(std::mem::take(self));
        }
        let last = self
            .walk_next(nodes, self.head, k - 1)
            .ok_or(DequeError::InternalInconsistency)?;
        let rest = nodes[last].next.ok_or(DequeError::InternalInconsistency)?;
        nodes[last].next = None;
        nodes[rest].prev = None;
        let front = Block {
            head: self.head,
            tail: Some(last),
            len: k,
        };
        self.head = Some(rest);
        self.len -= k;
        Ok(front)
    }

    /// Detaches the last `k` nodes as a new block. O(k).
    pub(crate) fn split_off_back<T>(
        &mut self,
        nodes: &mut Nodes<T>,
        k: usize,
    ) -> Result<Block, DequeError> {
        debug_assert!(k <= self.len);
        if k == 0 {
            return Ok(Block::new());
        }
        if k >= self.len {
            return Ok(std::mem::take(self));
        }
        let first = self
            .walk_prev(nodes, self.tail, k - 1)
            .ok_or(DequeError::InternalInconsistency)?;
        let kept = nodes[first].prev.ok_or(DequeError::InternalInconsistency)?;
        nodes[first].prev = None;
        nodes[kept].next = None;
        let back = Block {
            head: Some(first),
            tail: self.tail,
            len: k,
        };
        self.tail = Some(kept);
        self.len -= k;
        Ok(back)
    }

    /// Cuts the chain in two halves of `len / 2` and `len - len / 2` nodes.
    pub(crate) fn split<T>(mut self, nodes: &mut Nodes<T>) -> Result<(Block, Block), DequeError> {
        let right_len = self.len - self.len / 2;
        let right = self.split_off_back(nodes, right_len)?;
        Ok((self, right))
    }

    /// Whether `node` is part of this block's chain. O(len).
    pub(crate) fn contains<T>(&self, nodes: &Nodes<T>, node: u32) -> bool {
        let mut at = self.head;
        while let Some(current) = at {
            if current == node {
                return true;
            }
            at = nodes[current].next;
        }
        false
    }

    /// Number of nodes before `node`, which must belong to this block.
    pub(crate) fn offset_of<T>(&self, nodes: &Nodes<T>, node: u32) -> usize {
        let mut offset = 0;
        let mut at = nodes[node].prev;
        while let Some(current) = at {
            offset += 1;
            at = nodes[current].prev;
        }
        offset
    }
}
