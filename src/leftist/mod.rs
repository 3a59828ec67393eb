//! Leftist heap.
//!
//! A binary min-heap where every node carries a rank (s-value): the length
//! of its right spine down to a missing child. Keeping the left child's rank
//! at least the right child's bounds every right spine by `O(log n)`, and
//! since melding only ever walks right spines, merging two heaps costs
//! `O(log m + log n)`. Insertion and extraction are both expressed as melds.
//!
//! # References
//!
//! - Crane, C. A. (1972). "Linear Lists and Priority Queues as Balanced Binary Trees"
//! - Knuth, D. E. (1973). *The Art of Computer Programming*, Vol. 3, §5.2.3

mod heap;
mod node;

pub use heap::{IntoIter, Iter, LeftistHeap};
