//! Symbol frequency counting.
//!
//! A `FrequencyTable` holds one counter per alphabet slot. It is built by a
//! single linear pass over the input, or by several passes over fixed-size
//! chunks of it; both produce the same counts.

use crate::error::{HuffmanError, Result};

/// Occurrence counts for every symbol of a fixed alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: Vec<u64>,
}

impl FrequencyTable {
    /// Create an all-zero table for `alphabet_size` symbols.
    pub fn new(alphabet_size: usize) -> Self {
        Self {
            counts: vec![0; alphabet_size],
        }
    }

    /// Count every symbol in one pass.
    ///
    /// # Errors
    /// `HuffmanError::SymbolOutOfRange` if a symbol is `>= alphabet_size`.
    pub fn from_symbols(symbols: &[u8], alphabet_size: usize) -> Result<Self> {
        let mut table = Self::new(alphabet_size);
        table.count_chunk(symbols, 0)?;
        Ok(table)
    }

    /// Count symbols in slices of `chunk_size` bytes.
    ///
    /// A `chunk_size` of zero is treated as one chunk covering the input.
    pub fn from_symbols_chunked(
        symbols: &[u8],
        alphabet_size: usize,
        chunk_size: usize,
    ) -> Result<Self> {
        if chunk_size == 0 {
            return Self::from_symbols(symbols, alphabet_size);
        }

        let mut table = Self::new(alphabet_size);
        for (index, chunk) in symbols.chunks(chunk_size).enumerate() {
            table.count_chunk(chunk, index * chunk_size)?;
        }
        Ok(table)
    }

    fn count_chunk(&mut self, chunk: &[u8], offset: usize) -> Result<()> {
        let alphabet_size = self.counts.len();
        for (i, &symbol) in chunk.iter().enumerate() {
            match self.counts.get_mut(symbol as usize) {
                Some(count) => *count += 1,
                None => {
                    return Err(HuffmanError::SymbolOutOfRange {
                        symbol,
                        position: offset + i,
                        alphabet_size,
                    }
                    .into())
                }
            }
        }
        Ok(())
    }

    /// Overwrite the count of one symbol.
    ///
    /// # Errors
    /// `HuffmanError::SymbolNotInAlphabet` if `symbol >= alphabet_size`.
    pub fn set(&mut self, symbol: u8, frequency: u64) -> Result<()> {
        let alphabet_size = self.counts.len();
        let slot = self
            .counts
            .get_mut(symbol as usize)
            .ok_or(HuffmanError::SymbolNotInAlphabet {
                symbol,
                alphabet_size,
            })?;
        *slot = frequency;
        Ok(())
    }

    /// Count for `symbol` (0 when absent or outside the alphabet).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts.get(symbol as usize).copied().unwrap_or(0)
    }

    pub fn alphabet_size(&self) -> usize {
        self.counts.len()
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts.
    ///
    /// # Errors
    /// `HuffmanError::FrequencyOverflow` if the sum does not fit in u64.
    pub fn total(&self) -> Result<u64> {
        self.counts
            .iter()
            .try_fold(0u64, |sum, &count| sum.checked_add(count))
            .ok_or_else(|| HuffmanError::FrequencyOverflow.into())
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate `(symbol, frequency)` over non-zero entries, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}
