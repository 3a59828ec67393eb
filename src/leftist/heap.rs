//! Leftist heap handle and its iterators.

use super::node::{dismantle, meld, Link, Node};
use crate::error::HeapError;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;

/// A min-heap backed by a leftist tree.
///
/// All structural changes go through one meld primitive, so merging two
/// heaps is as cheap as inserting into one.
///
/// # Time Complexity
///
/// | Operation                          | Time Complexity |
/// |------------------------------------|-----------------|
/// | [`insert`](Self::insert)           | `O(log n)`      |
/// | [`find_min`](Self::find_min)       | `O(1)`          |
/// | [`delete_min`](Self::delete_min)   | `O(log n)`      |
/// | [`merge`](Self::merge)             | `O(log m + log n)` |
/// | [`clear`](Self::clear)             | `O(n)`          |
///
/// # Examples
///
/// ```
/// use meld_heaps::leftist::LeftistHeap;
/// use meld_heaps::HeapError;
///
/// let mut heap = LeftistHeap::new();
/// for x in [5, 3, 8, 1] {
///     heap.insert(x);
/// }
/// assert_eq!(heap.find_min(), Ok(&1));
/// assert_eq!(heap.delete_min(), Ok(1));
/// assert_eq!(heap.delete_min(), Ok(3));
/// assert_eq!(heap.delete_min(), Ok(5));
/// assert_eq!(heap.delete_min(), Ok(8));
/// assert_eq!(heap.delete_min(), Err(HeapError::Empty));
/// ```
pub struct LeftistHeap<T> {
    root: Link<T>,
    len: usize,
}

impl<T> LeftistHeap<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the minimum element without removing it.
    ///
    /// Fails with [`HeapError::Empty`] on an empty heap.
    pub fn find_min(&self) -> Result<&T, HeapError> {
        self.root
            .as_ref()
            .map(|node| &node.item)
            .ok_or(HeapError::Empty)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        dismantle(self.root.take());
        self.len = 0;
    }

    /// Iterates over the elements in arbitrary order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: self.root.as_deref().into_iter().collect(),
            remaining: self.len,
        }
    }
}

impl<T: Ord> LeftistHeap<T> {
    /// Adds an element to the heap.
    ///
    /// The new element is melded in as the first operand, so it becomes
    /// the root when it ties with the current minimum.
    pub fn insert(&mut self, item: T) {
        self.root = meld(Some(Node::singleton(item)), self.root.take());
        self.len += 1;
    }

    /// Removes and returns the minimum element.
    ///
    /// Fails with [`HeapError::Empty`] on an empty heap, leaving it
    /// untouched.
    pub fn delete_min(&mut self) -> Result<T, HeapError> {
        let root = self.root.take().ok_or(HeapError::Empty)?;
        let Node {
            item, left, right, ..
        } = *root;
        self.root = meld(left, right);
        self.len -= 1;
        Ok(item)
    }

    /// Merges `other` into this heap, consuming it.
    ///
    /// This heap's root is melded in as the first operand, so when both
    /// minima compare equal this heap's minimum stays the root.
    pub fn merge(&mut self, mut other: Self) {
        log::debug!(
            "melding leftist heaps of sizes {} and {}",
            self.len,
            other.len
        );
        self.root = meld(self.root.take(), other.root.take());
        self.len += mem::take(&mut other.len);
    }

    /// Moves every element of `other` into this heap, leaving `other`
    /// empty.
    pub fn append(&mut self, other: &mut Self) {
        self.merge(mem::take(other));
    }

    /// Drains the heap into a vector in non-decreasing order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len);
        while let Ok(item) = self.delete_min() {
            sorted.push(item);
        }
        sorted
    }
}

impl<T> Drop for LeftistHeap<T> {
    fn drop(&mut self) {
        dismantle(self.root.take());
    }
}

impl<T> Default for LeftistHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LeftistHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for LeftistHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<T: Ord> Extend<T> for LeftistHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord> IntoIterator for LeftistHeap<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the heap, yielding elements in non-decreasing order.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { heap: self }
    }
}

impl<'a, T> IntoIterator for &'a LeftistHeap<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Borrowing iterator over a [`LeftistHeap`] in pre-order (arbitrary
/// with respect to priority).
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        self.remaining -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator that drains a [`LeftistHeap`] in non-decreasing order.
pub struct IntoIter<T> {
    heap: LeftistHeap<T>,
}

impl<T: Ord> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.delete_min().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len, Some(self.heap.len))
    }
}

impl<T: Ord> ExactSizeIterator for IntoIter<T> {}
impl<T: Ord> FusedIterator for IntoIter<T> {}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for LeftistHeap<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de> + Ord> serde::Deserialize<'de> for LeftistHeap<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Vec<T> as serde::Deserialize>::deserialize(deserializer).map(Self::from_iter)
    }
}

#[cfg(feature = "parallel")]
impl<T: Ord + Send> rayon::iter::FromParallelIterator<T> for LeftistHeap<T> {
    /// Builds one heap per rayon split and melds them together.
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: rayon::iter::IntoParallelIterator<Item = T>,
    {
        use rayon::iter::ParallelIterator;

        par_iter
            .into_par_iter()
            .fold(Self::new, |mut heap, item| {
                heap.insert(item);
                heap
            })
            .reduce(Self::new, |mut a, b| {
                a.merge(b);
                a
            })
    }
}

#[cfg(feature = "parallel")]
impl<T: Ord + Send> rayon::iter::ParallelExtend<T> for LeftistHeap<T> {
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: rayon::iter::IntoParallelIterator<Item = T>,
    {
        use rayon::iter::ParallelIterator;

        let other: Self = par_iter.into_par_iter().collect();
        self.merge(other);
    }
}

#[cfg(test)]
impl<T: Ord> LeftistHeap<T> {
    /// Asserts heap order, the leftist rank invariant and the element count.
    fn check_invariants(&self) {
        use super::node::rank;

        let mut count = 0;
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            assert!(rank(&node.left) >= rank(&node.right), "leftist property");
            assert_eq!(node.rank, rank(&node.right) + 1, "rank is 1 + rank(right)");
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                assert!(node.item <= child.item, "heap order");
                stack.push(child);
            }
        }
        assert_eq!(count, self.len, "element count");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    /// Orders by `key` only, so equal keys stay distinguishable by `tag`.
    #[derive(Debug, Clone, Copy)]
    struct Tagged {
        key: u32,
        tag: char,
    }

    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    impl Eq for Tagged {}

    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }

    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> Ordering {
            self.key.cmp(&other.key)
        }
    }

    #[test]
    fn test_insert_then_drain_in_order() {
        let mut heap = LeftistHeap::new();
        for x in [5, 3, 8, 1] {
            heap.insert(x);
        }
        heap.check_invariants();
        assert_eq!(heap.delete_min(), Ok(1));
        assert_eq!(heap.delete_min(), Ok(3));
        assert_eq!(heap.delete_min(), Ok(5));
        assert_eq!(heap.delete_min(), Ok(8));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_empty_heap_errors() {
        let mut heap: LeftistHeap<i32> = LeftistHeap::new();
        assert_eq!(heap.find_min(), Err(HeapError::Empty));
        assert_eq!(heap.delete_min(), Err(HeapError::Empty));
        assert_eq!(heap.len(), 0);
    }

    #[test]
    fn test_find_min_does_not_mutate() {
        let heap: LeftistHeap<i32> = [4, 2, 6].into_iter().collect();
        assert_eq!(heap.find_min(), Ok(&2));
        assert_eq!(heap.find_min(), Ok(&2));
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn test_clear() {
        let mut heap: LeftistHeap<i32> = (0..100).collect();
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.find_min(), Err(HeapError::Empty));
        heap.insert(7);
        assert_eq!(heap.find_min(), Ok(&7));
    }

    #[test]
    fn test_merge_sizes_add() {
        let mut a: LeftistHeap<i32> = [9, 1, 5].into_iter().collect();
        let b: LeftistHeap<i32> = [4, 0, 7, 2].into_iter().collect();
        a.merge(b);
        a.check_invariants();
        assert_eq!(a.len(), 7);
        assert_eq!(a.into_sorted_vec(), vec![0, 1, 2, 4, 5, 7, 9]);
    }

    #[test]
    fn test_merge_with_empty() {
        let mut a: LeftistHeap<i32> = LeftistHeap::new();
        a.merge([3, 1].into_iter().collect());
        assert_eq!(a.find_min(), Ok(&1));
        a.merge(LeftistHeap::new());
        assert_eq!(a.len(), 2);
    }

    fn tagged_heap(tag: char, fillers: usize) -> LeftistHeap<Tagged> {
        let mut heap = LeftistHeap::new();
        heap.insert(Tagged { key: 1, tag });
        for _ in 0..fillers {
            heap.insert(Tagged { key: 9, tag: '-' });
        }
        heap
    }

    #[test]
    fn test_merge_equal_elements_equal_sizes() {
        let mut heap = tagged_heap('a', 1);
        heap.merge(tagged_heap('b', 1));
        heap.check_invariants();
        assert_eq!(heap.find_min().map(|t| t.tag), Ok('a'));
    }

    #[test]
    fn test_merge_equal_elements_other_larger() {
        let mut heap = tagged_heap('a', 0);
        heap.merge(tagged_heap('b', 3));
        heap.check_invariants();
        assert_eq!(heap.find_min().map(|t| t.tag), Ok('a'));
        assert_eq!(heap.delete_min().map(|t| t.tag), Ok('a'));
        assert_eq!(heap.delete_min().map(|t| t.tag), Ok('b'));
    }

    #[test]
    fn test_merge_equal_elements_self_larger() {
        let mut heap = tagged_heap('a', 3);
        heap.merge(tagged_heap('b', 0));
        heap.check_invariants();
        assert_eq!(heap.find_min().map(|t| t.tag), Ok('a'));
    }

    #[test]
    fn test_append_empties_other() {
        let mut a: LeftistHeap<i32> = [3].into_iter().collect();
        let mut b: LeftistHeap<i32> = [2, 8].into_iter().collect();
        a.append(&mut b);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(a.len(), 3);
        assert_eq!(a.find_min(), Ok(&2));
    }

    #[test]
    fn test_equal_elements_newest_first() {
        let mut heap = LeftistHeap::new();
        heap.insert(Tagged { key: 1, tag: 'a' });
        heap.insert(Tagged { key: 1, tag: 'b' });
        heap.insert(Tagged { key: 2, tag: 'c' });
        assert_eq!(heap.find_min().map(|t| t.tag), Ok('b'));
        assert_eq!(heap.delete_min().map(|t| t.tag), Ok('b'));
        assert_eq!(heap.delete_min().map(|t| t.tag), Ok('a'));
        assert_eq!(heap.delete_min().map(|t| t.tag), Ok('c'));
    }

    #[test]
    fn test_iter_visits_every_element() {
        let heap: LeftistHeap<i32> = [5, 3, 8, 1, 9].into_iter().collect();
        let iter = heap.iter();
        assert_eq!(iter.len(), 5);
        let mut seen: Vec<i32> = iter.copied().collect();
        seen.sort();
        assert_eq!(seen, vec![1, 3, 5, 8, 9]);
        assert_eq!(heap.iter().next(), Some(&1));
    }

    #[test]
    fn test_into_iter_sorted() {
        let heap: LeftistHeap<i32> = [7, -2, 4, 4, 0].into_iter().collect();
        let drained: Vec<i32> = heap.into_iter().collect();
        assert_eq!(drained, vec![-2, 0, 4, 4, 7]);
    }

    #[test]
    fn test_debug_lists_elements() {
        let heap: LeftistHeap<i32> = [2, 1].into_iter().collect();
        assert_eq!(format!("{heap:?}"), "[1, 2]");
    }

    #[test]
    fn test_deep_left_spine_drop() {
        let mut heap = LeftistHeap::new();
        for x in (0..200_000u32).rev() {
            heap.insert(x);
        }
        assert_eq!(heap.delete_min(), Ok(0));
        assert_eq!(heap.len(), 199_999);
        drop(heap);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_preserves_elements() {
        let heap: LeftistHeap<i32> = [5, 3, 8].into_iter().collect();
        let bytes = bincode::serialize(&heap).unwrap();
        let back: LeftistHeap<i32> = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back.into_sorted_vec(), vec![3, 5, 8]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_collect() {
        use rayon::prelude::*;

        let heap: LeftistHeap<u32> = (0..10_000u32).into_par_iter().rev().collect();
        heap.check_invariants();
        assert_eq!(heap.len(), 10_000);
        assert_eq!(heap.find_min(), Ok(&0));
    }

    proptest! {
        #[test]
        fn prop_drain_is_sorted(items in proptest::collection::vec(any::<i32>(), 0..200)) {
            let heap: LeftistHeap<i32> = items.iter().copied().collect();
            heap.check_invariants();
            let mut expected = items.clone();
            expected.sort();
            prop_assert_eq!(heap.into_sorted_vec(), expected);
        }

        #[test]
        fn prop_merge_matches_model(
            a in proptest::collection::vec(any::<i16>(), 0..100),
            b in proptest::collection::vec(any::<i16>(), 0..100),
        ) {
            let mut left: LeftistHeap<i16> = a.iter().copied().collect();
            let right: LeftistHeap<i16> = b.iter().copied().collect();
            left.merge(right);
            left.check_invariants();
            prop_assert_eq!(left.len(), a.len() + b.len());

            let mut expected: Vec<i16> = a.into_iter().chain(b).collect();
            expected.sort();
            prop_assert_eq!(left.into_sorted_vec(), expected);
        }

        #[test]
        fn prop_interleaved_ops_track_min(ops in proptest::collection::vec(proptest::option::of(any::<i16>()), 0..300)) {
            // Some(x) inserts x, None extracts the minimum.
            let mut heap = LeftistHeap::new();
            let mut model: Vec<i16> = Vec::new();
            for op in ops {
                match op {
                    Some(x) => {
                        heap.insert(x);
                        model.push(x);
                    }
                    None => {
                        let expected = model.iter().copied().min();
                        if let Some(min) = expected {
                            let pos = model.iter().position(|&v| v == min).unwrap();
                            model.swap_remove(pos);
                        }
                        prop_assert_eq!(heap.delete_min().ok(), expected);
                    }
                }
                heap.check_invariants();
                prop_assert_eq!(heap.len(), model.len());
                prop_assert_eq!(heap.find_min().ok(), model.iter().min());
            }
        }
    }
}
