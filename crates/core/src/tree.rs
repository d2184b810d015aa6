//! Greedy Huffman tree construction.
//!
//! The heap starts with one leaf per distinct symbol. While it holds more
//! than one node, the two lightest nodes are extracted and merged under a
//! new internal node (first extracted on the left), which goes back into
//! the heap. The last node left is the root.
//!
//! # Ordering
//!
//! Heap entries are ordered by `(frequency, symbol)`. Leaves use their own
//! symbol; each internal node gets a fresh marker `alphabet_size + n` in
//! creation order. Every key is distinct, so the merge sequence depends on
//! the frequency table alone and never on the order nodes were inserted.
//!
//! # Degenerate inputs
//!
//! - no symbols: the tree has no root
//! - one distinct symbol: the root is that symbol's leaf (no merges)

use crate::arena::{Node, NodeArena, NodeRef};
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::heap::MinHeap;

/// Heap key for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Weighted {
    frequency: u64,
    symbol: u32,
    node: NodeRef,
}

/// A Huffman tree together with the arena that owns its nodes.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    arena: NodeArena,
    root: Option<NodeRef>,
    alphabet_size: usize,
}

impl HuffmanTree {
    /// Build the tree for every non-zero entry of `frequencies`.
    ///
    /// # Errors
    /// - `CapacityExceeded` if the arena or heap bound is hit
    /// - `FrequencyOverflow` if a merged weight does not fit in u64
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        let alphabet_size = frequencies.alphabet_size();
        let distinct = frequencies.distinct_count();
        let mut arena = NodeArena::for_alphabet(alphabet_size);

        let mut leaves = Vec::with_capacity(distinct);
        for (symbol, frequency) in frequencies.iter() {
            let symbol = symbol as u32;
            let node = arena.allocate(symbol, frequency)?;
            leaves.push(Weighted {
                frequency,
                symbol,
                node,
            });
        }

        let root = merge(&mut arena, leaves, alphabet_size as u32)?;

        let tree = Self {
            arena,
            root,
            alphabet_size,
        };
        log::debug!(
            "built huffman tree: {} leaves, root weight {}, height {}",
            tree.leaf_count(),
            tree.root_frequency(),
            tree.height()
        );
        Ok(tree)
    }

    pub fn root(&self) -> Option<NodeRef> {
        self.root
    }

    pub fn node(&self, node: NodeRef) -> &Node {
        self.arena.get(node)
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Weight of the root (the total symbol count), 0 for an empty tree.
    pub fn root_frequency(&self) -> u64 {
        self.root.map_or(0, |root| self.node(root).frequency)
    }

    pub fn leaf_count(&self) -> usize {
        self.arena.nodes().iter().filter(|n| n.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.arena.len() - self.leaf_count()
    }

    /// Weights of the internal nodes in the order they were merged.
    pub fn merge_frequencies(&self) -> Vec<u64> {
        self.arena
            .nodes()
            .iter()
            .filter(|n| !n.is_leaf())
            .map(|n| n.frequency)
            .collect()
    }

    /// Edges on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        // Children are always allocated before their parent, so one reverse
        // pass over the arena sees every parent before its children.
        let nodes = self.arena.nodes();
        let mut depth = vec![0usize; nodes.len()];
        let mut height = 0;
        for (index, node) in nodes.iter().enumerate().rev() {
            if let Some((left, right)) = node.children() {
                depth[left.index()] = depth[index] + 1;
                depth[right.index()] = depth[index] + 1;
                height = height.max(depth[index] + 1);
            }
        }
        height
    }
}

/// Run the greedy merge loop over `leaves` and return the root.
///
/// Internal nodes take markers `first_marker`, `first_marker + 1`, ... in
/// creation order. The result does not depend on the order of `leaves`.
fn merge(
    arena: &mut NodeArena,
    leaves: Vec<Weighted>,
    first_marker: u32,
) -> Result<Option<NodeRef>> {
    let capacity = leaves.len();
    let mut heap = MinHeap::build(leaves, capacity)?;
    let mut marker = first_marker;

    while heap.len() > 1 {
        let a = heap.extract_min()?;
        let b = heap.extract_min()?;

        let node = arena.allocate_internal(marker, a.node, b.node)?;
        heap.insert(Weighted {
            frequency: arena.get(node).frequency,
            symbol: marker,
            node,
        })?;
        marker += 1;
    }

    if heap.is_empty() {
        Ok(None)
    } else {
        Ok(Some(heap.extract_min()?.node))
    }
}
