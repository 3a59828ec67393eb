//! Leftist tree nodes and the rank-preserving meld.

use std::mem;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A node of a leftist tree. Children are owned exclusively; there are
/// no parent links.
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    /// `1 + rank(right)`; an absent child has rank 0.
    pub(crate) rank: usize,
}

impl<T> Node<T> {
    pub(crate) fn singleton(item: T) -> Box<Self> {
        Box::new(Node {
            item,
            left: None,
            right: None,
            rank: 1,
        })
    }
}

pub(crate) fn rank<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.rank)
}

/// Melds two leftist trees into one.
///
/// The root holding the smaller element survives. On equal elements the
/// first operand survives, so callers control tie-breaking by argument
/// order.
pub(crate) fn meld<T: Ord>(x: Link<T>, y: Link<T>) -> Link<T> {
    match (x, y) {
        (None, y) => y,
        (x, None) => x,
        (Some(x), Some(y)) => {
            if x.item > y.item {
                Some(absorb(y, x))
            } else {
                Some(absorb(x, y))
            }
        }
    }
}

/// Merges `other` into the right spine of `root`, whose element is not
/// greater than `other`'s.
fn absorb<T: Ord>(mut root: Box<Node<T>>, other: Box<Node<T>>) -> Box<Node<T>> {
    if root.left.is_none() {
        // rank(left) >= rank(right) implies the right child is absent too.
        debug_assert!(root.right.is_none());
        root.left = Some(other);
        root.rank = 1;
        return root;
    }

    root.right = meld(root.right.take(), Some(other));
    if rank(&root.left) < rank(&root.right) {
        mem::swap(&mut root.left, &mut root.right);
    }
    root.rank = rank(&root.right) + 1;
    root
}

/// Drops a tree iteratively. Left spines can be `O(n)` deep, so the
/// default recursive `Box` drop could overflow the stack.
pub(crate) fn dismantle<T>(link: Link<T>) {
    let mut stack: Vec<Box<Node<T>>> = link.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}
