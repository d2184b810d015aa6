//! Code extraction by iterative depth-first traversal.
//!
//! The traversal keeps an explicit stack of `(node, visit)` frames next to
//! the path bits walked so far. Descending into a left child appends `0`,
//! into a right child appends `1`. Each internal node is revisited twice
//! through its frame state, so its right subtree is entered exactly once.
//! On reaching a leaf, the current path becomes that symbol's code.
//!
//! The stack never holds more than `max_len + 1` frames because the path
//! length is checked before every descent.

use std::fmt;

use crate::arena::NodeRef;
use crate::error::{HuffmanError, Resource, Result};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// Default upper bound on code length, in bits.
pub const MAX_CODE_LEN: usize = 100;

/// A variable-length code of up to `Code::CAPACITY` bits.
///
/// Bits are stored right-aligned in `bits`; the first bit of the code is
/// bit `len - 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u128,
    len: u8,
}

impl Code {
    pub const CAPACITY: usize = 128;

    /// Build a code from its `len` lowest bits of `bits`, MSB-first.
    pub fn new(bits: u128, len: usize) -> Option<Self> {
        if len > Self::CAPACITY {
            return None;
        }
        let mask = if len == Self::CAPACITY {
            u128::MAX
        } else {
            (1u128 << len) - 1
        };
        Some(Self {
            bits: bits & mask,
            len: len as u8,
        })
    }

    pub fn bits(&self) -> u128 {
        self.bits
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The `i`-th bit from the start of the code.
    pub fn bit(&self, i: usize) -> bool {
        debug_assert!(i < self.len());
        (self.bits >> (self.len() - 1 - i)) & 1 == 1
    }

    /// Whether `self` is a prefix of `other` (every code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        let shift = u32::from(other.len.saturating_sub(self.len));
        self.len <= other.len && other.bits.checked_shr(shift).unwrap_or(0) == self.bits
    }

    fn push(&mut self, bit: bool) {
        self.bits = (self.bits << 1) | bit as u128;
        self.len += 1;
    }

    fn pop(&mut self) {
        if self.len > 0 {
            self.bits >>= 1;
            self.len -= 1;
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len() {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol → code mapping over a fixed alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    pub fn new(alphabet_size: usize) -> Self {
        Self {
            codes: vec![None; alphabet_size],
        }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(symbol as usize).and_then(Option::as_ref)
    }

    fn insert(&mut self, symbol: u32, code: Code) {
        if let Some(slot) = self.codes.get_mut(symbol as usize) {
            *slot = Some(code);
        }
    }

    pub fn alphabet_size(&self) -> usize {
        self.codes.len()
    }

    /// Number of symbols that have a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// Iterate `(symbol, code)` ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u8, c)))
    }

    /// Length of the longest code (0 for an empty table).
    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Pairwise check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }

    /// Σ frequency × code length: the packed bit count before padding.
    ///
    /// # Errors
    /// `HuffmanError::FrequencyOverflow` if the sum does not fit in u64.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> Result<u64> {
        let mut total = 0u64;
        for (symbol, freq) in frequencies.iter() {
            let Some(code) = self.get(symbol) else {
                continue;
            };
            total = freq
                .checked_mul(code.len() as u64)
                .and_then(|bits| total.checked_add(bits))
                .ok_or(HuffmanError::FrequencyOverflow)?;
        }
        Ok(total)
    }
}

#[derive(Debug, Clone, Copy)]
enum Visit {
    Left,
    Right,
    Done,
}

/// Assign every leaf of `tree` its root-to-leaf path.
///
/// A root that is itself a leaf (one distinct symbol) gets the code `0`.
///
/// # Errors
/// `CapacityExceeded` (code length) if a path would exceed `max_len` bits.
pub fn generate_codes(tree: &HuffmanTree, max_len: usize) -> Result<CodeTable> {
    let mut table = CodeTable::new(tree.alphabet_size());
    let max_len = max_len.min(Code::CAPACITY);

    let Some(root) = tree.root() else {
        return Ok(table);
    };

    let root_node = tree.node(root);
    if root_node.is_leaf() {
        let mut code = Code::default();
        code.push(false);
        table.insert(root_node.symbol, code);
        return Ok(table);
    }

    let mut stack: Vec<(NodeRef, Visit)> = Vec::with_capacity(max_len + 1);
    let mut path = Code::default();
    stack.push((root, Visit::Left));

    while let Some((node_ref, visit)) = stack.pop() {
        let node = tree.node(node_ref);

        let Some((left, right)) = node.children() else {
            table.insert(node.symbol, path);
            path.pop();
            continue;
        };

        let (child, bit, next) = match visit {
            Visit::Left => (left, false, Visit::Right),
            Visit::Right => (right, true, Visit::Done),
            Visit::Done => {
                path.pop();
                continue;
            }
        };

        if path.len() >= max_len {
            return Err(HuffmanError::CapacityExceeded {
                resource: Resource::CodeLength,
                limit: max_len,
            }
            .into());
        }
        stack.push((node_ref, next));
        path.push(bit);
        stack.push((child, Visit::Left));
    }

    log::trace!("generated {} codes, longest {} bits", table.len(), table.max_len());
    Ok(table)
}
