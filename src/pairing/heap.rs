//! Pairing heap handle, search-based deletion and its iterators.

use super::node::{Arena, NodeId};
use crate::error::HeapError;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::ops::ControlFlow;

/// A min-heap backed by a pairing heap.
///
/// The heap is a single multiway tree whose root holds the minimum. Work
/// is deferred: insertion only links two roots, and the tree is
/// restructured during [`delete_min`](Self::delete_min). Elements can be
/// located by value, which makes [`delete`](Self::delete) and
/// [`adjust`](Self::adjust) possible without handles.
///
/// # Time Complexity
///
/// | Operation                          | Time Complexity          |
/// |------------------------------------|--------------------------|
/// | [`insert`](Self::insert)           | `O(1)`                   |
/// | [`find_min`](Self::find_min)       | `O(1)`                   |
/// | [`delete_min`](Self::delete_min)   | `O(log n)` (amortized)   |
/// | [`find`](Self::find)               | `O(n)`                   |
/// | [`delete`](Self::delete)           | `O(n)` search + `O(k)` relink |
/// | [`adjust`](Self::adjust)           | `O(n)` search + `O(subtree)`  |
/// | [`merge`](Self::merge)             | `O(min(m, n))` relocation |
///
/// # Examples
///
/// ```
/// use meld_heaps::pairing::PairingHeap;
///
/// let mut heap = PairingHeap::new();
/// for x in [4, 9, 6] {
///     heap.insert(x);
/// }
/// assert_eq!(heap.adjust(&4, 2), Ok(4));
/// assert_eq!(heap.find_min(), Ok(&2));
/// assert_eq!(heap.find(&9), Ok(&9));
/// ```
#[derive(Clone)]
pub struct PairingHeap<T> {
    arena: Arena<T>,
    root: Option<NodeId>,
}

impl<T> PairingHeap<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Creates an empty heap with room for `capacity` elements before the
    /// node arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.arena.len()
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
            .map(|root| &self.arena[root].item)
            .ok_or(HeapError::Empty)
    }

    /// Removes every element and releases the node arena.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Iterates over the elements in depth-first pre-order: a node, then
    /// each of its sub-heaps in child order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            stack: self.root.into_iter().collect(),
            remaining: self.len(),
        }
    }

    /// Calls `f` on each element in the same order as [`iter`](Self::iter),
    /// stopping at the first [`ControlFlow::Break`], whose value is
    /// returned.
    ///
    /// ```
    /// use meld_heaps::pairing::PairingHeap;
    /// use std::ops::ControlFlow;
    ///
    /// let heap: PairingHeap<i32> = (1..=10).collect();
    /// let mut visited = 0;
    /// let found = heap.visit(|&x| {
    ///     visited += 1;
    ///     if x == 1 { ControlFlow::Break(x) } else { ControlFlow::Continue(()) }
    /// });
    /// assert_eq!(found, ControlFlow::Break(1));
    /// assert_eq!(visited, 1);
    /// ```
    pub fn visit<B, F>(&self, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(&T) -> ControlFlow<B>,
    {
        for item in self.iter() {
            f(item)?;
        }
        ControlFlow::Continue(())
    }

    /// Unhooks `id` from its parent's child list. Its own children stay
    /// attached.
    fn unlink(&mut self, id: NodeId) {
        if let Some(parent) = self.arena[id].parent.take() {
            let siblings = &mut self.arena[parent].children;
            if let Some(pos) = siblings.iter().position(|&child| child == id) {
                siblings.remove(pos);
            }
        }
    }
}

impl<T: Ord> PairingHeap<T> {
    /// Adds an element to the heap.
    ///
    /// The new element becomes the root when it ties with the current
    /// minimum.
    pub fn insert(&mut self, item: T) {
        let node = self.arena.alloc(item);
        self.root = Some(self.link(self.root, node));
    }

    /// Removes and returns the minimum element.
    ///
    /// The root's sub-heaps are merged back into one by a left-to-right
    /// pairwise pass. Fails with [`HeapError::Empty`] on an empty heap.
    pub fn delete_min(&mut self) -> Result<T, HeapError> {
        let root = self.root.ok_or(HeapError::Empty)?;
        let node = self.arena.release(root);
        self.root = self.consolidate(node.children);
        Ok(node.item)
    }

    /// Removes the first element (in [`iter`](Self::iter) order) that
    /// compares equal to `item` and returns it.
    ///
    /// Removing the minimum behaves like [`delete_min`](Self::delete_min).
    /// Otherwise the node's children are moved onto the root and left for
    /// the next `delete_min` to consolidate. Fails with
    /// [`HeapError::NotFound`], leaving the heap unchanged, when nothing
    /// matches.
    pub fn delete(&mut self, item: &T) -> Result<T, HeapError> {
        let (root, id) = self.locate(item)?;
        if id == root {
            return self.delete_min();
        }

        self.unlink(id);
        let node = self.arena.release(id);
        log::trace!(
            "pairing heap: deleted interior node, {} children moved to root",
            node.children.len()
        );
        for child in node.children {
            self.arena[child].parent = Some(root);
            self.arena[root].children.push_back(child);
        }
        Ok(node.item)
    }

    /// Replaces the first element comparing equal to `item` with
    /// `new_item` and returns the old element.
    ///
    /// When the match is not the root, its whole subtree is detached and
    /// every element below it is re-inserted as a singleton heap, so the
    /// cost grows with the subtree size. Fails with
    /// [`HeapError::NotFound`], leaving the heap unchanged, when nothing
    /// matches.
    pub fn adjust(&mut self, item: &T, new_item: T) -> Result<T, HeapError> {
        let (root, id) = self.locate(item)?;
        if id == root {
            let old = self.delete_min()?;
            self.insert(new_item);
            return Ok(old);
        }

        self.unlink(id);
        let node = self.arena.release(id);
        let mut descendants = Vec::new();
        let mut stack: Vec<NodeId> = node.children.into_iter().rev().collect();
        while let Some(child) = stack.pop() {
            let child = self.arena.release(child);
            stack.extend(child.children.into_iter().rev());
            descendants.push(child.item);
        }
        log::trace!(
            "pairing heap: adjusted interior node, flattened {} descendants",
            descendants.len()
        );

        self.insert(new_item);
        for descendant in descendants {
            self.insert(descendant);
        }
        Ok(node.item)
    }

    /// Returns the first element (in [`iter`](Self::iter) order) comparing
    /// equal to `item`, or [`HeapError::NotFound`].
    pub fn find(&self, item: &T) -> Result<&T, HeapError> {
        self.locate(item).map(|(_, id)| &self.arena[id].item)
    }

    /// Merges `other` into this heap, consuming it.
    ///
    /// The nodes of the smaller heap are relocated into the larger heap's
    /// arena, then the two roots are linked with this heap's root first.
    /// When both minima compare equal, `other`'s minimum becomes the root,
    /// whichever heap is larger.
    pub fn merge(&mut self, mut other: Self) {
        log::debug!(
            "melding pairing heaps of sizes {} and {}",
            self.len(),
            other.len()
        );
        let Some(other_root) = other.root else {
            return;
        };
        let Some(self_root) = self.root else {
            *self = other;
            return;
        };

        let (self_root, other_root) = if self.len() < other.len() {
            let ours = mem::replace(&mut self.arena, Arena::new());
            let self_root = other.arena.adopt(ours, self_root);
            mem::swap(&mut self.arena, &mut other.arena);
            (self_root, other_root)
        } else {
            (self_root, self.arena.adopt(other.arena, other_root))
        };
        self.root = Some(self.link(Some(self_root), other_root));
    }

    /// Moves every element of `other` into this heap, leaving `other`
    /// empty.
    pub fn append(&mut self, other: &mut Self) {
        self.merge(mem::take(other));
    }

    /// Drains the heap into a vector in non-decreasing order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Ok(item) = self.delete_min() {
            sorted.push(item);
        }
        sorted
    }

    /// Links two sub-heaps and returns the surviving root.
    ///
    /// `first` survives only when strictly smaller; on ties `second`
    /// absorbs it. The loser is prepended to the winner's children.
    fn link(&mut self, first: Option<NodeId>, second: NodeId) -> NodeId {
        let Some(first) = first else {
            return second;
        };
        let (winner, loser) = if self.arena[first].item < self.arena[second].item {
            (first, second)
        } else {
            (second, first)
        };
        self.arena[winner].children.push_front(loser);
        self.arena[loser].parent = Some(winner);
        winner
    }

    /// Folds the sub-heaps of a removed root into one, left to right:
    /// `((c1 + c2) + c3) + ...`.
    fn consolidate(&mut self, children: VecDeque<NodeId>) -> Option<NodeId> {
        log::trace!("pairing heap: consolidating {} sub-heaps", children.len());
        let mut heaps = children.into_iter();
        let mut merged = heaps.next()?;
        for heap in heaps {
            merged = self.link(Some(merged), heap);
        }
        self.arena[merged].parent = None;
        Some(merged)
    }

    /// Finds the first node in pre-order whose element compares equal to
    /// `item`. Returns the root alongside it.
    fn locate(&self, item: &T) -> Result<(NodeId, NodeId), HeapError> {
        let root = self.root.ok_or(HeapError::NotFound)?;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            if node.item.cmp(item) == Ordering::Equal {
                return Ok((root, id));
            }
            stack.extend(node.children.iter().rev());
        }
        Err(HeapError::NotFound)
    }
}

impl<T> Default for PairingHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PairingHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for PairingHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut heap = Self::with_capacity(iter.size_hint().0);
        heap.extend(iter);
        heap
    }
}

impl<T: Ord> Extend<T> for PairingHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord> IntoIterator for PairingHeap<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the heap, yielding elements in non-decreasing order.
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { heap: self }
    }
}

impl<'a, T> IntoIterator for &'a PairingHeap<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Borrowing pre-order iterator over a [`PairingHeap`].
///
/// Single-pass and finite; the borrow keeps the heap from being mutated
/// while iterating.
pub struct Iter<'a, T> {
    arena: &'a Arena<T>,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.stack.pop()?;
        let arena = self.arena;
        let node = &arena[id];
        self.stack.extend(node.children.iter().rev());
        self.remaining -= 1;
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator that drains a [`PairingHeap`] in non-decreasing order.
pub struct IntoIter<T> {
    heap: PairingHeap<T>,
}

impl<T: Ord> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.delete_min().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<T: Ord> ExactSizeIterator for IntoIter<T> {}
impl<T: Ord> FusedIterator for IntoIter<T> {}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PairingHeap<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de> + Ord> serde::Deserialize<'de> for PairingHeap<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Vec<T> as serde::Deserialize>::deserialize(deserializer).map(Self::from_iter)
    }
}

#[cfg(feature = "parallel")]
impl<T: Ord + Send> rayon::iter::FromParallelIterator<T> for PairingHeap<T> {
    /// Builds one heap per rayon split and merges them together.
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
impl<T: Ord + Send> rayon::iter::ParallelExtend<T> for PairingHeap<T> {
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
impl<T: Ord> PairingHeap<T> {
    /// Asserts heap order, parent links and that every live node is
    /// reachable from the root.
    fn check_invariants(&self) {
        let Some(root) = self.root else {
            assert_eq!(self.len(), 0, "empty heap holds no nodes");
            return;
        };
        assert_eq!(self.arena[root].parent, None, "root has no parent");

        let mut count = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            count += 1;
            let node = &self.arena[id];
            for &child in &node.children {
                assert!(node.item <= self.arena[child].item, "heap order");
                assert_eq!(self.arena[child].parent, Some(id), "parent link");
                stack.push(child);
            }
        }
        assert_eq!(count, self.len(), "every node reachable");
    }

    fn children_of_root(&self) -> Vec<&T> {
        self.root
            .map(|root| {
                self.arena[root]
                    .children
                    .iter()
                    .map(|&child| &self.arena[child].item)
                    .collect()
            })
            .unwrap_or_default()
    }
}
