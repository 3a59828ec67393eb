//! Arena storage for pairing heap nodes.
//!
//! Nodes refer to each other by [`NodeId`] (an index into the arena), which
//! lets a node keep a non-owning link to its parent for `O(1)` detachment
//! without reference cycles.

use std::collections::VecDeque;
use std::ops::{Index, IndexMut};

/// Index of a node slot in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// A pairing heap node.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) item: T,
    /// Sub-heaps, most recently linked first.
    pub(crate) children: VecDeque<NodeId>,
    /// `None` for the root and for sub-heaps not linked anywhere yet.
    pub(crate) parent: Option<NodeId>,
}

/// Slot storage with a free list. Released slots are reused by later
/// allocations.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Stores `item` as a parentless, childless node.
    pub(crate) fn alloc(&mut self, item: T) -> NodeId {
        let id = self.reserve();
        self.slots[id.0] = Some(Node {
            item,
            children: VecDeque::new(),
            parent: None,
        });
        id
    }

    /// Removes a node from the arena and hands it back by value. Links held
    /// by other nodes are not touched.
    pub(crate) fn release(&mut self, id: NodeId) -> Node<T> {
        let node = self.slots[id.0]
            .take()
            .expect("pairing heap node id refers to a released slot");
        self.free.push(id.0);
        node
    }

    /// Moves every live node of `other` into this arena, rewriting child and
    /// parent links. Returns where `other_root` landed.
    pub(crate) fn adopt(&mut self, other: Arena<T>, other_root: NodeId) -> NodeId {
        let mut remap: Vec<Option<NodeId>> = vec![None; other.slots.len()];
        let mut moved = Vec::with_capacity(other.len());
        for (old, slot) in other.slots.into_iter().enumerate() {
            if let Some(node) = slot {
                let id = self.reserve();
                remap[old] = Some(id);
                moved.push((id, node));
            }
        }

        let lookup = |id: NodeId| remap[id.0].expect("pairing heap link to a released slot");
        for (id, mut node) in moved {
            for child in node.children.iter_mut() {
                *child = lookup(*child);
            }
            node.parent = node.parent.map(lookup);
            self.slots[id.0] = Some(node);
        }
        lookup(other_root)
    }

    /// Claims a slot, leaving it vacant until the caller fills it.
    fn reserve(&mut self) -> NodeId {
        match self.free.pop() {
            Some(index) => NodeId(index),
            None => {
                self.slots.push(None);
                NodeId(self.slots.len() - 1)
            }
        }
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        self.slots[id.0]
            .as_ref()
            .expect("pairing heap node id refers to a released slot")
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.slots[id.0]
            .as_mut()
            .expect("pairing heap node id refers to a released slot")
    }
}
