//! Comparison tests between BlockDeque and std::collections::VecDeque
//!
//! This module provides property-based testing that compares the behavior of
//! BlockDeque with VecDeque to automatically catch behavioral discrepancies.

use block_deque::{BlockBounds, BlockDeque, DequeError};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

// ============================================================================
// COMPARISON TESTING INFRASTRUCTURE
// ============================================================================

/// Operations that can be applied to a deque for comparison testing.
#[derive(Debug, Clone)]
enum DequeOp<T> {
    PushBack(T),
    PushFront(T),
    PopBack,
    PopFront,
    Clear,
    /// Insert before the element at this position (through a handle)
    Insert(usize, T),
    /// Erase the element at this position (through a handle)
    Erase(usize),
    Remove(usize),
    Set(usize, T),
    Extend(Vec<T>),
}

/// Apply an operation to both deques and compare results.
fn apply_op<T: Clone + PartialEq + std::fmt::Debug>(
    std_deque: &mut VecDeque<T>,
    block_deque: &mut BlockDeque<T>,
    op: &DequeOp<T>,
) {
    match op {
        DequeOp::PushBack(v) => {
            std_deque.push_back(v.clone());
            block_deque.push_back(v.clone());
        }
        DequeOp::PushFront(v) => {
            std_deque.push_front(v.clone());
            block_deque.push_front(v.clone());
        }
        DequeOp::PopBack => {
            let std_result = std_deque.pop_back();
            let block_result = block_deque.pop_back().ok();
            assert_eq!(std_result, block_result, "pop_back() mismatch");
        }
        DequeOp::PopFront => {
            let std_result = std_deque.pop_front();
            let block_result = block_deque.pop_front().ok();
            assert_eq!(std_result, block_result, "pop_front() mismatch");
        }
        DequeOp::Clear => {
            std_deque.clear();
            block_deque.clear();
        }
        DequeOp::Insert(idx, v) => {
            if *idx <= std_deque.len() {
                std_deque.insert(*idx, v.clone());
                let at = block_deque.handle_at(*idx).unwrap();
                let inserted = block_deque.insert(at, v.clone()).unwrap();
                assert_eq!(block_deque.value(inserted), Ok(v), "insert() handle mismatch");
                assert_eq!(block_deque.position(inserted), Ok(*idx));
            }
        }
        DequeOp::Erase(idx) => {
            if *idx < std_deque.len() {
                std_deque.remove(*idx);
                let at = block_deque.handle_at(*idx).unwrap();
                let next = block_deque.erase(at).unwrap();
                assert_eq!(block_deque.position(next), Ok(*idx), "erase() follower mismatch");
                assert_eq!(block_deque.value(next).ok(), std_deque.get(*idx));
            }
        }
        DequeOp::Remove(idx) => {
            if *idx < std_deque.len() {
                let std_result = std_deque.remove(*idx);
                let block_result = block_deque.remove(*idx).ok();
                assert_eq!(std_result, block_result, "remove() mismatch");
            }
        }
        DequeOp::Set(idx, v) => {
            if *idx < std_deque.len() {
                std_deque[*idx] = v.clone();
                block_deque[*idx] = v.clone();
            }
        }
        DequeOp::Extend(vals) => {
            std_deque.extend(vals.iter().cloned());
            block_deque.extend(vals.iter().cloned());
        }
    }
}

/// Verify that both deques have the same content.
fn assert_deques_equal<T: Clone + PartialEq + std::fmt::Debug>(
    std_deque: &VecDeque<T>,
    block_deque: &BlockDeque<T>,
) {
    assert_eq!(std_deque.len(), block_deque.len(), "length mismatch");
    assert_eq!(std_deque.is_empty(), block_deque.is_empty(), "is_empty mismatch");

    // Compare element by element, both directions
    for (i, (std_elem, block_elem)) in std_deque.iter().zip(block_deque.iter()).enumerate() {
        assert_eq!(std_elem, block_elem, "element mismatch at index {}", i);
    }
    assert!(
        std_deque.iter().rev().eq(block_deque.iter().rev()),
        "reverse iteration mismatch"
    );

    assert_eq!(std_deque.front(), block_deque.front().ok(), "front() mismatch");
    assert_eq!(std_deque.back(), block_deque.back().ok(), "back() mismatch");

    for i in 0..std_deque.len() {
        assert_eq!(std_deque.get(i), block_deque.get(i), "get({}) mismatch", i);
    }

    assert_eq!(
        block_deque.at(std_deque.len()),
        Err(DequeError::IndexOutOfBound {
            index: std_deque.len(),
            len: std_deque.len()
        })
    );
    assert_eq!(block_deque.get(usize::MAX), None);
}

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

/// Strategy for generating a single deque operation.
fn deque_op_strategy() -> impl Strategy<Value = DequeOp<i32>> {
    prop_oneof![
        3 => any::<i32>().prop_map(DequeOp::PushBack),
        3 => any::<i32>().prop_map(DequeOp::PushFront),
        2 => Just(DequeOp::PopBack),
        2 => Just(DequeOp::PopFront),
        1 => Just(DequeOp::Clear),
        3 => (0usize..100, any::<i32>()).prop_map(|(idx, v)| DequeOp::Insert(idx, v)),
        2 => (0usize..100).prop_map(DequeOp::Erase),
        2 => (0usize..100).prop_map(DequeOp::Remove),
        1 => (0usize..100, any::<i32>()).prop_map(|(idx, v)| DequeOp::Set(idx, v)),
        1 => prop::collection::vec(any::<i32>(), 0..50).prop_map(DequeOp::Extend),
    ]
}

/// Strategy for generating a sequence of operations.
fn ops_sequence_strategy() -> impl Strategy<Value = Vec<DequeOp<i32>>> {
    prop::collection::vec(deque_op_strategy(), 0..200)
}

/// Strategy for valid block bounds with small blocks, so that splits, merges
/// and borrows happen often.
fn small_bounds_strategy() -> impl Strategy<Value = BlockBounds> {
    (1usize..6, 0usize..5).prop_map(|(lower, slack)| {
        BlockBounds::new(lower, lower * 2 + slack).unwrap()
    })
}

// ============================================================================
// PROPTEST TESTS
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Test that a random sequence of operations produces identical results.
    #[test]
    fn proptest_operations_match(ops in ops_sequence_strategy()) {
        let mut std_deque: VecDeque<i32> = VecDeque::new();
        let mut block_deque: BlockDeque<i32> = BlockDeque::new();

        for op in &ops {
            apply_op(&mut std_deque, &mut block_deque, op);
            assert_deques_equal(&std_deque, &block_deque);
        }
    }

    /// Same, with tiny blocks.
    #[test]
    fn proptest_operations_match_small_blocks(
        bounds in small_bounds_strategy(),
        ops in ops_sequence_strategy(),
    ) {
        let mut std_deque: VecDeque<i32> = VecDeque::new();
        let mut block_deque: BlockDeque<i32> = BlockDeque::with_bounds(bounds);

        for op in &ops {
            apply_op(&mut std_deque, &mut block_deque, op);
            assert_deques_equal(&std_deque, &block_deque);
        }
    }

    /// Test push followed by iteration.
    #[test]
    fn proptest_push_and_iter(values in prop::collection::vec(any::<i32>(), 0..1200)) {
        let block_deque: BlockDeque<i32> = values.iter().copied().collect();
        let collected: Vec<i32> = block_deque.iter().copied().collect();
        prop_assert_eq!(&collected, &values);

        let owned: Vec<i32> = block_deque.into_iter().collect();
        prop_assert_eq!(owned, values);
    }

    /// Every index agrees with walking a handle from the front.
    #[test]
    fn proptest_index_matches_advance(
        bounds in small_bounds_strategy(),
        values in prop::collection::vec(any::<i32>(), 0..200),
    ) {
        let mut block_deque = BlockDeque::with_bounds(bounds);
        block_deque.extend(values.iter().copied());
        let begin = block_deque.begin();
        for i in 0..values.len() {
            let at = block_deque.advance(begin, i as isize).unwrap();
            prop_assert_eq!(block_deque.value(at), Ok(&block_deque[i]));
        }
    }

    /// Distance and advance are inverse to each other.
    #[test]
    fn proptest_distance_round_trip(
        bounds in small_bounds_strategy(),
        len in 0usize..150,
        a in 0usize..151,
        b in 0usize..151,
    ) {
        let mut block_deque = BlockDeque::with_bounds(bounds);
        block_deque.extend(0..len);
        let a = a.min(len);
        let b = b.min(len);
        let ha = block_deque.handle_at(a).unwrap();
        let hb = block_deque.handle_at(b).unwrap();
        let d = block_deque.distance(hb, ha).unwrap();
        prop_assert_eq!(d, b as isize - a as isize);
        prop_assert_eq!(block_deque.advance(ha, d), Ok(hb));
    }

    #[test]
    fn proptest_contains(
        values in prop::collection::vec(0i32..100, 0..100),
        needle in 0i32..100,
    ) {
        let block_deque: BlockDeque<i32> = values.iter().copied().collect();
        prop_assert_eq!(block_deque.contains(&needle), values.contains(&needle));
    }

    #[test]
    fn proptest_clone(values in prop::collection::vec(any::<i32>(), 0..600)) {
        let block_deque: BlockDeque<i32> = values.iter().copied().collect();
        let cloned = block_deque.clone();
        prop_assert_eq!(&block_deque, &cloned);
        prop_assert!(cloned.iter().copied().eq(values.iter().copied()));
    }

    #[test]
    fn proptest_ordering(
        a in prop::collection::vec(any::<i32>(), 0..50),
        b in prop::collection::vec(any::<i32>(), 0..50),
    ) {
        let da: BlockDeque<i32> = a.iter().copied().collect();
        let db: BlockDeque<i32> = b.iter().copied().collect();
        prop_assert_eq!(da.cmp(&db), a.cmp(&b));
        prop_assert_eq!(da == db, a == b);
    }

    #[test]
    fn proptest_hash(values in prop::collection::vec(any::<i32>(), 0..100)) {
        let d1: BlockDeque<i32> = values.iter().copied().collect();
        let mut d2 = BlockDeque::with_bounds(BlockBounds::new(1, 2).unwrap());
        d2.extend(values.iter().copied());

        let hash = |d: &BlockDeque<i32>| {
            let mut hasher = DefaultHasher::new();
            d.hash(&mut hasher);
            hasher.finish()
        };
        // Block layout does not leak into the hash
        prop_assert_eq!(hash(&d1), hash(&d2));
    }
}

// ============================================================================
// QUICKCHECK TESTS
// ============================================================================

#[cfg(test)]
mod quickcheck_tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn small_deque(values: &[i32]) -> BlockDeque<i32> {
        let mut deque = BlockDeque::with_bounds(BlockBounds::new(2, 5).unwrap());
        deque.extend(values);
        deque
    }

    #[quickcheck]
    fn qc_push_pop_symmetry(values: Vec<i32>) -> bool {
        let mut deque = small_deque(&[]);
        for v in &values {
            deque.push_front(*v);
        }

        let mut popped: Vec<i32> = Vec::new();
        while let Ok(v) = deque.pop_front() {
            popped.push(v);
        }

        popped.reverse();
        popped == values
    }

    /// Size equals successful pushes and inserts minus successful pops and erases.
    #[quickcheck]
    fn qc_size_accounting(ops: Vec<(u8, u8)>) -> bool {
        let mut deque = small_deque(&[]);
        let mut expected: usize = 0;
        for (kind, at) in ops {
            let at = at as usize;
            match kind % 6 {
                0 => {
                    deque.push_back(at as i32);
                    expected += 1;
                }
                1 => {
                    deque.push_front(at as i32);
                    expected += 1;
                }
                2 => {
                    if deque.pop_back().is_ok() {
                        expected -= 1;
                    }
                }
                3 => {
                    if deque.pop_front().is_ok() {
                        expected -= 1;
                    }
                }
                4 => {
                    if deque.insert_at(at, 0).is_ok() {
                        expected += 1;
                    }
                }
                _ => {
                    let erased = deque
                        .handle_at(at)
                        .and_then(|handle| deque.erase(handle));
                    if erased.is_ok() {
                        expected -= 1;
                    }
                }
            }
        }
        deque.len() == expected
    }

    /// `erase(insert(it, v))` restores the prior sequence.
    #[quickcheck]
    fn qc_erase_insert_round_trip(values: Vec<i32>, at: usize, v: i32) -> bool {
        let mut deque = small_deque(&values);
        let at = at % (values.len() + 1);
        let handle = deque.handle_at(at).unwrap();
        let inserted = deque.insert(handle, v).unwrap();
        let follower = deque.erase(inserted).unwrap();
        deque.iter().eq(values.iter())
            && deque.len() == values.len()
            && deque.position(follower) == Ok(at)
    }

    /// `seq[i] == *(begin() + i)` for every valid index.
    #[quickcheck]
    fn qc_index_matches_begin_plus_i(values: Vec<i32>) -> bool {
        let deque = small_deque(&values);
        (0..values.len()).all(|i| {
            deque
                .advance(deque.begin(), i as isize)
                .and_then(|at| deque.value(at))
                == Ok(&deque[i])
        })
    }

    /// `a + (b - a) == b`.
    #[quickcheck]
    fn qc_advance_by_distance(values: Vec<i32>, a: usize, b: usize) -> bool {
        let deque = small_deque(&values);
        let a = deque.handle_at(a % (values.len() + 1)).unwrap();
        let b = deque.handle_at(b % (values.len() + 1)).unwrap();
        let d = deque.distance(b, a).unwrap();
        deque.advance(a, d) == Ok(b)
    }

    #[quickcheck]
    fn qc_clear_idempotent(values: Vec<i32>) -> bool {
        let mut once = small_deque(&values);
        once.clear();
        let mut twice = small_deque(&values);
        twice.clear();
        twice.clear();
        once == twice && twice.is_empty() && twice.begin() == twice.end()
    }

    #[quickcheck]
    fn qc_from_iter_round_trip(values: Vec<i32>) -> bool {
        let deque: BlockDeque<i32> = values.iter().copied().collect();
        let back: Vec<i32> = deque.into_iter().collect();
        back == values
    }

    #[quickcheck]
    fn qc_extend_adds_all(initial: Vec<i32>, extension: Vec<i32>) -> bool {
        let mut deque = small_deque(&initial);
        deque.extend(extension.iter().copied());
        deque.len() == initial.len() + extension.len()
            && deque.iter().eq(initial.iter().chain(extension.iter()))
    }
}

// ============================================================================
// EDGE CASE TESTS
// ============================================================================

#[cfg(test)]
mod edge_case_tests {
    use super::*;

    #[test]
    fn test_erase_front_until_empty() {
        let mut deque: BlockDeque<i32> = BlockDeque::new();
        for i in 0..1000 {
            deque.push_back(i);
        }
        for i in 0..1000 {
            let front = deque.handle_at(0).unwrap();
            assert_eq!(deque.value(front), Ok(&i));
            deque.erase(front).unwrap();
        }
        assert!(deque.is_empty());
        assert_eq!(deque.begin(), deque.end());
    }

    #[test]
    fn test_insert_at_begin_plus_five() {
        let mut deque: BlockDeque<i32> = (0..10).collect();
        let at = deque.advance(deque.begin(), 5).unwrap();
        deque.insert(at, 99).unwrap();
        assert_eq!(deque[5], 99);
        assert_eq!(deque.len(), 11);
        assert_eq!(deque[6], 5);
    }

    #[test]
    fn test_empty_operations() {
        let mut deque: BlockDeque<i32> = BlockDeque::new();
        assert_eq!(deque.front(), Err(DequeError::EmptyContainer));
        assert_eq!(deque.back(), Err(DequeError::EmptyContainer));
        assert_eq!(deque.pop_front(), Err(DequeError::EmptyContainer));
        assert_eq!(deque.pop_back(), Err(DequeError::EmptyContainer));
        assert_eq!(
            deque.at(0),
            Err(DequeError::IndexOutOfBound { index: 0, len: 0 })
        );
        assert_eq!(deque.iter().count(), 0);
        assert_eq!(deque.position(deque.end()), Ok(0));
    }

    #[test]
    fn test_at_boundaries() {
        let deque: BlockDeque<i32> = (0..700).collect();
        let len = deque.len();
        assert_eq!(deque.at(len - 1), Ok(&699));
        assert_eq!(
            deque.at(len),
            Err(DequeError::IndexOutOfBound { index: len, len })
        );
        // The wrapped equivalent of -1
        assert_eq!(
            deque.at(usize::MAX),
            Err(DequeError::IndexOutOfBound {
                index: usize::MAX,
                len
            })
        );
    }

    #[test]
    fn test_clone_independent() {
        let original: BlockDeque<String> = (0..600).map(|i| i.to_string()).collect();
        let mut copy = original.clone();
        copy[0].push('!');
        copy.pop_back().unwrap();
        copy.push_front("new".to_string());

        assert_eq!(original.len(), 600);
        assert_eq!(original[0], "0");
        assert_eq!(original[599], "599");
        assert_eq!(copy[1], "0!");
    }

    #[test]
    fn test_forced_split_keeps_order() {
        let mut deque: BlockDeque<usize> = BlockDeque::new();
        let upper = deque.bounds().upper();
        for i in 0..=upper {
            deque.push_back(i);
        }
        for i in 0..=upper {
            assert_eq!(deque[i], i);
        }
        assert!(deque.iter().copied().eq(0..=upper));
        assert!(deque.iter().rev().copied().eq((0..=upper).rev()));

        // Walk handles across the new block boundary
        let mut at = deque.begin();
        for i in 0..=upper {
            assert_eq!(deque.value(at), Ok(&i));
            at = deque.next(at).unwrap();
        }
        assert_eq!(at, deque.end());
    }

    #[test]
    fn test_single_element() {
        let mut deque: BlockDeque<i32> = BlockDeque::new();
        deque.push_back(42);
        assert_eq!(deque.front(), deque.back());
        assert_eq!(deque.next(deque.begin()), Ok(deque.end()));
        assert_eq!(deque.prev(deque.end()), Ok(deque.begin()));
        let next = deque.erase(deque.begin()).unwrap();
        assert_eq!(next, deque.end());
        assert!(deque.is_empty());
    }

    #[test]
    fn test_insert_at_all_positions() {
        for pos in 0..=20 {
            let mut deque = BlockDeque::with_bounds(BlockBounds::new(2, 4).unwrap());
            deque.extend(0..20);
            let mut model: Vec<i32> = (0..20).collect();
            deque.insert_at(pos, -1).unwrap();
            model.insert(pos, -1);
            assert!(deque.iter().eq(model.iter()));
        }
    }

    #[test]
    fn test_remove_at_all_positions() {
        for pos in 0..20 {
            let mut deque = BlockDeque::with_bounds(BlockBounds::new(2, 4).unwrap());
            deque.extend(0..20);
            let mut model: Vec<i32> = (0..20).collect();
            assert_eq!(deque.remove(pos), Ok(model.remove(pos)));
            assert!(deque.iter().eq(model.iter()));
        }
    }

    #[test]
    fn test_insert_at_out_of_range() {
        let mut deque: BlockDeque<i32> = (0..3).collect();
        assert_eq!(
            deque.insert_at(4, 0),
            Err(DequeError::IndexOutOfBound { index: 4, len: 3 })
        );
        assert_eq!(
            deque.remove(3),
            Err(DequeError::IndexOutOfBound { index: 3, len: 3 })
        );
        assert_eq!(deque.len(), 3);
    }

    #[test]
    fn test_failed_calls_do_not_mutate() {
        let mut a: BlockDeque<i32> = (0..10).collect();
        let b: BlockDeque<i32> = (0..10).collect();
        let snapshot = a.clone();
        let end = a.end();
        assert_eq!(a.erase(end), Err(DequeError::InvalidIterator));
        assert_eq!(a.erase(b.begin()), Err(DequeError::InvalidIterator));
        assert_eq!(a.insert(b.begin(), 5), Err(DequeError::InvalidIterator));
        assert_eq!(a, snapshot);
    }

    #[test]
    fn test_handle_survives_unrelated_mutation() {
        let mut deque: BlockDeque<i32> = (0..2000).collect();
        let middle = deque.handle_at(1000).unwrap();
        for _ in 0..100 {
            deque.push_back(0);
            deque.push_front(0);
            deque.pop_back().unwrap();
        }
        assert_eq!(deque.value(middle), Ok(&1000));
        assert_eq!(deque.position(middle), Ok(1100));
    }

    #[test]
    fn test_iter_mut_modifications() {
        let mut deque: BlockDeque<i32> = (0..1000).collect();
        for x in &mut deque {
            *x *= 3;
        }
        assert!(deque.iter().copied().eq((0..1000).map(|x| x * 3)));
    }

    #[test]
    fn test_double_ended_iterator() {
        let deque: BlockDeque<i32> = (0..1000).collect();
        let mut iter = deque.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&999));
        assert_eq!(iter.len(), 998);
        assert_eq!(iter.nth(500), Some(&501));
    }

    #[test]
    fn test_cursor_walk() {
        let deque: BlockDeque<i32> = (0..600).collect();
        let mut cursor = deque.cbegin();
        let mut sum = 0;
        while let Ok(value) = cursor.get() {
            sum += *value;
            cursor.move_next().unwrap();
        }
        assert_eq!(sum, (0..600).sum());
        assert_eq!(cursor, deque.cend());
        assert_eq!(cursor.offset_from(&deque.cbegin()), Ok(600));
    }

    #[test]
    fn test_unit_elements() {
        let mut deque: BlockDeque<()> = BlockDeque::new();
        for _ in 0..1500 {
            deque.push_back(());
        }
        assert_eq!(deque.len(), 1500);
        assert_eq!(deque.iter().count(), 1500);
        while deque.pop_front().is_ok() {}
        assert!(deque.is_empty());
    }
}

// ============================================================================
// DROP COUNTING TESTS
// ============================================================================

#[cfg(test)]
mod drop_tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct DropCounter {
        count: Rc<RefCell<usize>>,
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            *self.count.borrow_mut() += 1;
        }
    }

    impl Clone for DropCounter {
        fn clone(&self) -> Self {
            DropCounter {
                count: self.count.clone(),
            }
        }
    }

    fn filled(count: &Rc<RefCell<usize>>, n: usize) -> BlockDeque<DropCounter> {
        let mut deque = BlockDeque::with_bounds(BlockBounds::new(2, 4).unwrap());
        for _ in 0..n {
            deque.push_back(DropCounter {
                count: count.clone(),
            });
        }
        deque
    }

    #[test]
    fn test_drop_on_clear() {
        let count = Rc::new(RefCell::new(0));
        let mut deque = filled(&count, 10);
        assert_eq!(*count.borrow(), 0);
        deque.clear();
        assert_eq!(*count.borrow(), 10);
    }

    #[test]
    fn test_drop_on_pop() {
        let count = Rc::new(RefCell::new(0));
        let mut deque = filled(&count, 10);
        drop(deque.pop_back());
        drop(deque.pop_front());
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_drop_on_erase() {
        let count = Rc::new(RefCell::new(0));
        let mut deque = filled(&count, 10);
        let at = deque.handle_at(4).unwrap();
        deque.erase(at).unwrap();
        assert_eq!(*count.borrow(), 1);
        drop(deque.remove(2));
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_drop_on_deque_drop() {
        let count = Rc::new(RefCell::new(0));
        {
            let _deque = filled(&count, 25);
        }
        assert_eq!(*count.borrow(), 25);
    }

    #[test]
    fn test_drop_on_into_iter_partial() {
        let count = Rc::new(RefCell::new(0));
        let deque = filled(&count, 10);
        let mut iter = deque.into_iter();
        drop(iter.next());
        drop(iter.next_back());
        assert_eq!(*count.borrow(), 2);
        drop(iter);
        assert_eq!(*count.borrow(), 10);
    }

    #[test]
    fn test_clone_then_drop_both() {
        let count = Rc::new(RefCell::new(0));
        let deque = filled(&count, 8);
        let copy = deque.clone();
        drop(deque);
        assert_eq!(*count.borrow(), 8);
        drop(copy);
        assert_eq!(*count.borrow(), 16);
    }
}

// ============================================================================
// STRESS TESTS
// ============================================================================

#[cfg(test)]
mod stress_tests {
    use super::*;

    #[test]
    fn stress_many_pushes_both_ends() {
        let mut deque: BlockDeque<i32> = BlockDeque::new();
        let mut model: VecDeque<i32> = VecDeque::new();
        for i in 0..50_000 {
            if i % 3 == 0 {
                deque.push_front(i);
                model.push_front(i);
            } else {
                deque.push_back(i);
                model.push_back(i);
            }
        }
        assert_deques_equal(&model, &deque);
    }

    #[test]
    fn stress_random_operations() {
        use rand::Rng;
        let mut rng = rand::rng();

        let mut deque = BlockDeque::with_bounds(BlockBounds::new(8, 16).unwrap());
        let mut model: VecDeque<i32> = VecDeque::new();

        for _ in 0..10_000 {
            let op: u8 = rng.random_range(0..10);

            match op {
                0..=2 => {
                    let val: i32 = rng.random();
                    deque.push_back(val);
                    model.push_back(val);
                }
                3..=4 => {
                    let val: i32 = rng.random();
                    deque.push_front(val);
                    model.push_front(val);
                }
                5 => assert_eq!(deque.pop_back().ok(), model.pop_back()),
                6 => assert_eq!(deque.pop_front().ok(), model.pop_front()),
                7 => {
                    let idx = rng.random_range(0..=model.len());
                    let val: i32 = rng.random();
                    deque.insert_at(idx, val).unwrap();
                    model.insert(idx, val);
                }
                8 => {
                    if !model.is_empty() {
                        let idx = rng.random_range(0..model.len());
                        let at = deque.handle_at(idx).unwrap();
                        deque.erase(at).unwrap();
                        model.remove(idx);
                    }
                }
                9 => {
                    if !model.is_empty() {
                        let idx = rng.random_range(0..model.len());
                        assert_eq!(deque.remove(idx).ok(), model.remove(idx));
                    }
                }
                _ => unreachable!(),
            }
        }

        assert_deques_equal(&model, &deque);
    }

    #[test]
    fn stress_drain_from_middle() {
        let mut deque: BlockDeque<u32> = (0..5000).collect();
        let mut at = deque.handle_at(2500).unwrap();
        let mut erased = 0;
        while !at.is_end() {
            at = deque.erase(at).unwrap();
            erased += 1;
        }
        assert_eq!(erased, 2500);
        assert!(deque.iter().copied().eq(0..2500));
    }
}
