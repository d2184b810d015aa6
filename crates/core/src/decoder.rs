//! Decoding packed streams.
//!
//! A `Decoder` is rebuilt from a `CodeTable` alone: every code is inserted
//! into a binary trie held in a flat `Vec`, child links stored as indices.
//! Decoding walks the trie one bit at a time and restarts at the root
//! after each leaf.

use crate::bitio::BitReader;
use crate::codes::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::packer::PackedStream;

const ROOT: usize = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: [Option<u32>; 2],
    symbol: Option<u8>,
}

/// Prefix-code decoder.
#[derive(Debug, Clone)]
pub struct Decoder {
    nodes: Vec<TrieNode>,
}

impl Decoder {
    /// Build the decoding trie.
    ///
    /// # Errors
    /// `HuffmanError::PrefixConflict` if one code is a prefix of another
    /// (or two symbols share a code).
    pub fn from_code_table(codes: &CodeTable) -> Result<Self> {
        let total_bits: usize = codes.iter().map(|(_, c)| c.len()).sum();
        let mut nodes = Vec::with_capacity(total_bits + 1);
        nodes.push(TrieNode::default());

        for (symbol, code) in codes.iter() {
            let mut current = ROOT;
            for i in 0..code.len() {
                if nodes[current].symbol.is_some() {
                    return Err(HuffmanError::PrefixConflict { symbol }.into());
                }
                let branch = code.bit(i) as usize;
                current = match nodes[current].children[branch] {
                    Some(next) => next as usize,
                    None => {
                        let next = nodes.len();
                        nodes.push(TrieNode::default());
                        nodes[current].children[branch] = Some(next as u32);
                        next
                    }
                };
            }

            let node = &nodes[current];
            let has_children = node.children.iter().any(Option::is_some);
            if current == ROOT || node.symbol.is_some() || has_children {
                return Err(HuffmanError::PrefixConflict { symbol }.into());
            }
            nodes[current].symbol = Some(symbol);
        }

        Ok(Self { nodes })
    }

    /// Decode exactly `bit_len` bits of `bytes`.
    ///
    /// # Errors
    /// - `BitIoError::InsufficientBits` if `bytes` is shorter than `bit_len`
    /// - `HuffmanError::InvalidCode` on a bit path no code uses
    /// - `HuffmanError::TruncatedCode` if the bits end inside a code
    pub fn decode(&self, bytes: &[u8], bit_len: usize) -> Result<Vec<u8>> {
        let mut reader = BitReader::with_bit_len(bytes, bit_len)?;
        let mut output = Vec::new();

        while !reader.is_empty() {
            output.push(self.next_symbol(&mut reader)?);
        }
        Ok(output)
    }

    /// Decode a whole `PackedStream`.
    pub fn decode_stream(&self, packed: &PackedStream) -> Result<Vec<u8>> {
        self.decode(packed.bytes(), packed.bit_len())
    }

    /// Decode until `sentinel` is read; the sentinel itself is not returned
    /// and any bits after it are ignored.
    ///
    /// # Errors
    /// `HuffmanError::MissingSentinel` if the buffer ends first.
    pub fn decode_until(&self, bytes: &[u8], sentinel: u8) -> Result<Vec<u8>> {
        let mut reader = BitReader::new(bytes);
        let mut output = Vec::new();

        while !reader.is_empty() {
            let symbol = match self.next_symbol(&mut reader) {
                Ok(symbol) => symbol,
                Err(crate::Error::Huffman(HuffmanError::TruncatedCode { .. })) => break,
                Err(e) => return Err(e),
            };
            if symbol == sentinel {
                return Ok(output);
            }
            output.push(symbol);
        }
        Err(HuffmanError::MissingSentinel { sentinel }.into())
    }

    fn next_symbol(&self, reader: &mut BitReader<'_>) -> Result<u8> {
        let start = reader.position();
        let mut current = ROOT;
        loop {
            if reader.is_empty() {
                return Err(HuffmanError::TruncatedCode { position: start }.into());
            }
            let position = reader.position();
            let branch = reader.read_bit()? as usize;
            let next = self.nodes[current].children[branch]
                .ok_or(HuffmanError::InvalidCode { position })?;
            current = next as usize;

            if let Some(symbol) = self.nodes[current].symbol {
                return Ok(symbol);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{generate_codes, MAX_CODE_LEN};
    use crate::error::{BitIoError, Error};
    use crate::frequency::FrequencyTable;
    use crate::packer::{pack, pack_terminated};
    use crate::tree::HuffmanTree;

    fn codes_for(freqs: &FrequencyTable) -> CodeTable {
        let tree = HuffmanTree::build(freqs).unwrap();
        generate_codes(&tree, MAX_CODE_LEN).unwrap()
    }

    #[test]
    fn test_round_trip_abracadabra() {
        let data = b"abracadabra";
        let codes = codes_for(&FrequencyTable::from_symbols(data, 128).unwrap());
        let packed = pack(data, &codes).unwrap();

        let decoder = Decoder::from_code_table(&codes).unwrap();
        assert_eq!(decoder.decode_stream(&packed).unwrap(), data);
    }

    #[test]
    fn test_padding_decodes_as_garbage_without_bit_len() {
        // "aaaa" with code 0 packs to one zero byte; all 8 bits decode as 'a'
        let codes = codes_for(&FrequencyTable::from_symbols(b"aaaa", 128).unwrap());
        let packed = pack(b"aaaa", &codes).unwrap();
        let decoder = Decoder::from_code_table(&codes).unwrap();

        assert_eq!(decoder.decode_stream(&packed).unwrap(), b"aaaa");
        assert_eq!(decoder.decode(packed.bytes(), 8).unwrap(), b"aaaaaaaa");
    }

    #[test]
    fn test_sentinel_ignores_padding() {
        let mut freqs = FrequencyTable::from_symbols(b"aaaa", 128).unwrap();
        freqs.set(0, 1).unwrap();
        let codes = codes_for(&freqs);
        let packed = pack_terminated(b"aaaa", &codes, 0).unwrap();
        let decoder = Decoder::from_code_table(&codes).unwrap();

        assert_eq!(decoder.decode_until(packed.bytes(), 0).unwrap(), b"aaaa");
    }

    #[test]
    fn test_missing_sentinel() {
        let mut freqs = FrequencyTable::from_symbols(b"ab", 128).unwrap();
        freqs.set(0, 1).unwrap();
        let codes = codes_for(&freqs);
        let packed = pack(b"abab", &codes).unwrap();
        let decoder = Decoder::from_code_table(&codes).unwrap();

        assert!(matches!(
            decoder.decode_until(packed.bytes(), 0),
            Err(Error::Huffman(HuffmanError::MissingSentinel { sentinel: 0 }))
        ));
    }

    #[test]
    fn test_truncated_code() {
        // a=0 c=100 d=101 b=110 r=111; cut "c" after two bits
        let data = b"abracadabra";
        let codes = codes_for(&FrequencyTable::from_symbols(data, 128).unwrap());
        let packed = pack(b"ac", &codes).unwrap();
        let decoder = Decoder::from_code_table(&codes).unwrap();

        assert!(matches!(
            decoder.decode(packed.bytes(), 3),
            Err(Error::Huffman(HuffmanError::TruncatedCode { position: 1 }))
        ));
    }

    #[test]
    fn test_invalid_code_on_incomplete_tree() {
        // A one-symbol table only knows the path "0"
        let codes = codes_for(&FrequencyTable::from_symbols(b"a", 128).unwrap());
        let decoder = Decoder::from_code_table(&codes).unwrap();
        assert!(matches!(
            decoder.decode(&[0b0100_0000], 2),
            Err(Error::Huffman(HuffmanError::InvalidCode { position: 1 }))
        ));
    }

    #[test]
    fn test_bit_len_past_buffer() {
        let codes = codes_for(&FrequencyTable::from_symbols(b"ab", 128).unwrap());
        let decoder = Decoder::from_code_table(&codes).unwrap();
        assert!(matches!(
            decoder.decode(&[0], 9),
            Err(Error::BitIo(BitIoError::InsufficientBits { .. }))
        ));
    }

    #[test]
    fn test_empty_table_decodes_empty_stream() {
        let decoder = Decoder::from_code_table(&CodeTable::new(128)).unwrap();
        assert!(decoder.decode(&[], 0).unwrap().is_empty());
    }
}
