//! Block length thresholds.

use crate::BoundsError;

/// Lower and upper length thresholds for the blocks of a
/// [`BlockDeque`](crate::BlockDeque).
///
/// Whenever a deque holds more than one block, every block length lies in
/// `lower..=upper`. Splitting a block of `upper + 1` elements must yield two
/// halves that are both at least `lower`, so `upper >= 2 * lower` is required.
///
/// # Example
///
/// ```
/// use block_deque::{BlockBounds, BlockDeque};
///
/// let bounds = BlockBounds::new(4, 8).unwrap();
/// let mut deque: BlockDeque<u32> = BlockDeque::with_bounds(bounds);
/// deque.extend(0..100);
/// assert_eq!(deque.len(), 100);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockBounds {
    lower: usize,
    upper: usize,
}

impl BlockBounds {
    /// Default lower threshold.
    pub const DEFAULT_LOWER: usize = 250;
    /// Default upper threshold.
    pub const DEFAULT_UPPER: usize = 500;

    /// Validates and creates a pair of thresholds.
    pub fn new(lower: usize, upper: usize) -> Result<Self, BoundsError> {
        match lower.checked_mul(2) {
            Some(twice) if lower >= 1 && upper >= twice => Ok(Self { lower, upper }),
            _ => Err(BoundsError { lower, upper }),
        }
    }

    #[inline]
    pub const fn lower(&self) -> usize {
        self.lower
    }

    #[inline]
    pub const fn upper(&self) -> usize {
        self.upper
    }
}

impl Default for BlockBounds {
    fn default() -> Self {
        Self {
            lower: Self::DEFAULT_LOWER,
            upper: Self::DEFAULT_UPPER,
        }
    }
}
