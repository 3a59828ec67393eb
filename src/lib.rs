//! Meldable priority queues.
//!
//! Provides two min-heaps whose defining capability is cheap merging of
//! two whole heaps, something an array-backed binary heap cannot offer:
//!
//! - **Leftist heap**: binary tree kept right-light by a rank (s-value)
//!   invariant. Insert, extract and merge all run in `O(log n)` through a
//!   single meld primitive.
//! - **Pairing heap**: multiway tree restored lazily by a pairwise-merge
//!   pass during extraction. Insert is `O(1)`, extract is amortized
//!   `O(log n)`, and the heap supports deleting or adjusting arbitrary
//!   elements located by search.
//!
//! Elements only need a total order (`Ord`). Both heaps surface the most
//! recently inserted element first when several elements compare equal.
//!
//! # Examples
//!
//! ```
//! use meld_heaps::leftist::LeftistHeap;
//! use meld_heaps::pairing::PairingHeap;
//!
//! let mut a: LeftistHeap<i32> = [5, 3, 8].into_iter().collect();
//! let b: LeftistHeap<i32> = [1, 9].into_iter().collect();
//! a.merge(b);
//! assert_eq!(a.into_sorted_vec(), vec![1, 3, 5, 8, 9]);
//!
//! let mut p: PairingHeap<i32> = [10, 4, 7].into_iter().collect();
//! assert_eq!(p.delete(&7), Ok(7));
//! assert_eq!(p.delete_min(), Ok(4));
//! ```
//!
//! # Features
//!
//! - `serde`: both heaps serialize as a sequence of their elements.
//! - `parallel`: both heaps can be built from rayon parallel iterators by
//!   merging per-thread heaps.

pub mod error;
pub mod leftist;
pub mod pairing;

pub use error::HeapError;
