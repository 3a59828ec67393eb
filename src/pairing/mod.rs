//! Pairing heap.
//!
//! A min-heap kept as one multiway tree in heap order. Insertion and
//! merging link two roots in constant time; the restructuring work is
//! deferred to extraction, which merges the removed root's sub-heaps back
//! together with a single left-to-right pass. Arbitrary elements can be
//! searched for, deleted, or replaced with a new value.
//!
//! # References
//!
//! - Fredman, Sedgewick, Sleator & Tarjan (1986), "The Pairing Heap: A New
//!   Form of Self-Adjusting Heap", *Algorithmica* 1, 111-129.
//! - Stasko & Vitter (1987), "Pairing Heaps: Experiments and Analysis"

mod heap;
mod node;

pub use heap::{IntoIter, Iter, PairingHeap};
