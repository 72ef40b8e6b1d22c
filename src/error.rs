//! Error types reported by [`BlockDeque`](crate::BlockDeque) operations.

use thiserror::Error;

/// Failure kinds of deque operations.
///
/// Every variant is a contract violation detected before any state is
/// mutated; none of them is transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DequeError {
    /// `front`, `back`, `pop_front` or `pop_back` on an empty deque
    #[error("container is empty")]
    EmptyContainer,

    /// Position outside the valid range
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBound {
        /// Requested position
        index: usize,
        /// Length of the range that was indexed
        len: usize,
    },

    /// Past-the-end, stale, or foreign handle where a live one is required
    #[error("invalid iterator")]
    InvalidIterator,

    /// A step walked off the block list; indicates a broken invariant or a
    /// step past either end of the sequence
    #[error("internal inconsistency: step walked off the block list")]
    InternalInconsistency,
}

/// Rejected block-length thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("invalid block bounds: lower {lower} must be at least 1 and upper {upper} at least twice lower")]
pub struct BoundsError {
    /// Requested lower threshold
    pub lower: usize,
    /// Requested upper threshold
    pub upper: usize,
}
