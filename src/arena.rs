//! Slot arena that owns every trie node.
//!
//! Nodes refer to each other through [`NodeId`] indices instead of pointers.
//! A removed node's slot is threaded onto a free list and handed out again by
//! the next allocation, so long-lived tables with heavy churn do not grow
//! without bound.

use crate::node::Node;

/// Index of a node inside a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub(crate) struct NodeId(usize);

impl NodeId {
    /// The root is allocated first and never freed.
    pub(crate) const ROOT: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
enum Slot {
    Occupied(Node),
    /// Next free slot, if any.
    Free(Option<NodeId>),
}

#[derive(Clone, Debug)]
pub(crate) struct NodeArena {
    slots: Vec<Slot>,
    free_head: Option<NodeId>,
    live: usize,
}

impl NodeArena {
    /// `capacity` is a hint. A reservation the allocator cannot satisfy is
    /// dropped and the arena grows on demand instead.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::new();
        let _ = slots.try_reserve(capacity);
        Self {
            slots,
            free_head: None,
            live: 0,
        }
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;
        match self.free_head {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                self.free_head = match slot {
                    Slot::Free(next) => *next,
                    Slot::Occupied(_) => unreachable!("free list points at live node {id:?}"),
                };
                *slot = Slot::Occupied(node);
                id
            }
            None => {
                let id = NodeId(self.slots.len());
                self.slots.push(Slot::Occupied(node));
                id
            }
        }
    }

    /// Takes the node out of its slot and puts the slot on the free list.
    pub(crate) fn free(&mut self, id: NodeId) -> Node {
        debug_assert_ne!(id, NodeId::ROOT, "root is never freed");
        let slot = std::mem::replace(&mut self.slots[id.index()], Slot::Free(self.free_head));
        match slot {
            Slot::Occupied(node) => {
                self.free_head = Some(id);
                self.live -= 1;
                node
            }
            Slot::Free(_) => unreachable!("double free of node {id:?}"),
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        match &self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Free(_) => unreachable!("freed node {id:?} is still linked"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        match &mut self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Free(_) => unreachable!("freed node {id:?} is still linked"),
        }
    }

    /// Number of occupied slots.
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.live = 0;
    }
}
