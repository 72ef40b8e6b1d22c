//! Owning iterator for `BlockDeque`.

use crate::BlockDeque;

/// An owning iterator over elements of a `BlockDeque`.
///
/// This struct is created by the `into_iter` method on `BlockDeque`
/// (provided by the [`IntoIterator`] trait).
pub struct IntoIter<T> {
    deque: BlockDeque<T>,
}

impl<T> IntoIter<T> {
    #[inline]
    pub(crate) fn new(deque: BlockDeque<T>) -> Self {
        Self { deque }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.deque.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.deque.len();
        (remaining, Some(remaining))
    }

    #[inline]
    fn count(self) -> usize {
        self.deque.len()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.deque.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> std::iter::FusedIterator for IntoIter<T> {}

impl<T: Clone> Clone for IntoIter<T> {
    fn clone(&self) -> Self {
        Self {
            deque: self.deque.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.deque).finish()
    }
}
