//! Fixed-capacity node pool for one tree build.
//!
//! Nodes are addressed by `NodeRef` indices instead of pointers. Child
//! links are optional indices: a node without children is a leaf. The
//! arena reserves `2 * alphabet_size - 1` slots up front (the size of a
//! full Huffman tree over the whole alphabet) and never grows or frees
//! individual nodes; the whole pool is dropped with the tree that owns it.

use crate::error::{HuffmanError, Resource, Result};

/// Index of a node inside the `NodeArena` that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef(u32);

impl NodeRef {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A tree node record.
///
/// Leaves carry an alphabet symbol. Internal nodes carry a synthetic marker
/// symbol `>= alphabet_size`, unique per node, used only for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub symbol: u32,
    pub frequency: u64,
    pub left: Option<NodeRef>,
    pub right: Option<NodeRef>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The pair of children of an internal node.
    pub fn children(&self) -> Option<(NodeRef, NodeRef)> {
        match (self.left, self.right) {
            (Some(left), Some(right)) => Some((left, right)),
            _ => None,
        }
    }
}

/// Bump allocator over a preallocated node buffer.
///
/// # Invariants
/// - `nodes.len() <= capacity`
/// - the buffer never reallocates after construction
/// - every child index stored in a node is lower than the node's own index
#[derive(Debug, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
    capacity: usize,
}

impl NodeArena {
    /// Arena large enough for a full tree over `alphabet_size` symbols.
    pub fn for_alphabet(alphabet_size: usize) -> Self {
        Self::with_capacity((2 * alphabet_size).saturating_sub(1))
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, node: Node) -> Result<NodeRef> {
        if self.nodes.len() >= self.capacity {
            return Err(HuffmanError::CapacityExceeded {
                resource: Resource::NodeArena,
                limit: self.capacity,
            }
            .into());
        }
        let index = NodeRef(self.nodes.len() as u32);
        self.nodes.push(node);
        Ok(index)
    }

    /// Allocate a leaf.
    ///
    /// # Errors
    /// `CapacityExceeded` (node arena) when every slot is in use.
    pub fn allocate(&mut self, symbol: u32, frequency: u64) -> Result<NodeRef> {
        self.push(Node {
            symbol,
            frequency,
            left: None,
            right: None,
        })
    }

    /// Allocate an internal node whose weight is the sum of its children.
    pub fn allocate_internal(
        &mut self,
        marker: u32,
        left: NodeRef,
        right: NodeRef,
    ) -> Result<NodeRef> {
        let frequency = self
            .get(left)
            .frequency
            .checked_add(self.get(right).frequency)
            .ok_or(HuffmanError::FrequencyOverflow)?;

        self.push(Node {
            symbol: marker,
            frequency,
            left: Some(left),
            right: Some(right),
        })
    }

    /// Look up a node.
    ///
    /// `node` must come from this arena; refs are never shared across arenas.
    pub fn get(&self, node: NodeRef) -> &Node {
        &self.nodes[node.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All nodes in allocation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}
