//! Errors reported by heap operations.

use std::fmt;

/// Failure of a heap query or removal.
///
/// Every operation that returns this error leaves the heap unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeapError {
    /// The heap holds no elements.
    Empty,

    /// No element in the heap compares equal to the one searched for.
    NotFound,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::NotFound => write!(f, "element not found in heap"),
        }
    }
}

impl std::error::Error for HeapError {}
