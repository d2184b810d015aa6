//! Packing symbol streams into bytes.
//!
//! Codes are concatenated in input order into one logical bit sequence,
//! which is padded on the right with zeros up to a multiple of 8 and split
//! into bytes, first bit most significant.
//!
//! Padding bits look like the start of a valid code, so a `PackedStream`
//! always carries the exact data bit count. Streams packed with
//! `pack_terminated` additionally end with a sentinel code, which lets a
//! decoder stop without knowing the bit count.

use crate::bitio::BitWriter;
use crate::codes::CodeTable;
use crate::error::{BitIoError, HuffmanError, Result};

/// Packed bytes plus the number of meaningful bits in them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedStream {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl PackedStream {
    /// Wrap bytes produced elsewhere (e.g. read back from a frame).
    ///
    /// # Errors
    /// `BitIoError::InsufficientBits` if `bit_len` exceeds `bytes.len() * 8`.
    pub fn from_parts(bytes: Vec<u8>, bit_len: usize) -> Result<Self> {
        let available = bytes.len() * 8;
        if bit_len > available {
            return Err(BitIoError::InsufficientBits {
                requested: bit_len,
                available,
            }
            .into());
        }
        Ok(Self { bytes, bit_len })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Data bits before padding.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Zero bits appended after the data.
    pub fn padding_bits(&self) -> usize {
        self.bytes.len() * 8 - self.bit_len
    }

    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// The data bits as a `'0'/'1'` string, padding excluded.
    pub fn to_bit_string(&self) -> String {
        (0..self.bit_len)
            .map(|i| {
                let bit = self.bytes[i / 8] & (0x80 >> (i % 8)) != 0;
                if bit {
                    '1'
                } else {
                    '0'
                }
            })
            .collect()
    }
}

/// Concatenate the code of every symbol, then pad to a byte boundary.
///
/// # Errors
/// `HuffmanError::UnknownSymbol` if a symbol has no code.
pub fn pack(symbols: &[u8], codes: &CodeTable) -> Result<PackedStream> {
    let writer = write_symbols(symbols, codes)?;
    Ok(finish(writer))
}

/// Like `pack`, with the code of `sentinel` appended after the data.
pub fn pack_terminated(symbols: &[u8], codes: &CodeTable, sentinel: u8) -> Result<PackedStream> {
    let mut writer = write_symbols(symbols, codes)?;
    let code = codes.get(sentinel).ok_or(HuffmanError::UnknownSymbol {
        symbol: sentinel,
        position: symbols.len(),
    })?;
    writer.write_code(code)?;
    Ok(finish(writer))
}

fn write_symbols(symbols: &[u8], codes: &CodeTable) -> Result<BitWriter> {
    let mut writer = BitWriter::with_capacity_bits(symbols.len() * codes.max_len().max(1));
    for (position, &symbol) in symbols.iter().enumerate() {
        let code = codes
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol { symbol, position })?;
        writer.write_code(code)?;
    }
    Ok(writer)
}

fn finish(writer: BitWriter) -> PackedStream {
    let bit_len = writer.bit_len();
    log::debug!(
        "packed {} bits into {} bytes ({} padding bits)",
        bit_len,
        bit_len.div_ceil(8),
        writer.padding_bits()
    );
    PackedStream {
        bytes: writer.finish(),
        bit_len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{generate_codes, MAX_CODE_LEN};
    use crate::error::Error;
    use crate::frequency::FrequencyTable;
    use crate::tree::HuffmanTree;

    fn codes_for(data: &[u8]) -> CodeTable {
        let freqs = FrequencyTable::from_symbols(data, 128).unwrap();
        let tree = HuffmanTree::build(&freqs).unwrap();
        generate_codes(&tree, MAX_CODE_LEN).unwrap()
    }

    #[test]
    fn test_abracadabra_bits() {
        // a=0 c=100 d=101 b=110 r=111
        let codes = codes_for(b"abracadabra");
        let packed = pack(b"abracadabra", &codes).unwrap();

        assert_eq!(packed.to_bit_string(), "01101110100010101101110");
        assert_eq!(packed.bit_len(), 23);
        assert_eq!(packed.padding_bits(), 1);
        assert_eq!(packed.bytes(), &[0b0110_1110, 0b1000_1010, 0b1101_1100]);
    }

    #[test]
    fn test_single_symbol_stream() {
        let codes = codes_for(b"aaaa");
        let packed = pack(b"aaaa", &codes).unwrap();
        assert_eq!(packed.to_bit_string(), "0000");
        assert_eq!(packed.bytes(), &[0x00]);
        assert_eq!(packed.padding_bits(), 4);
    }

    #[test]
    fn test_empty_stream() {
        let codes = codes_for(b"");
        let packed = pack(b"", &codes).unwrap();
        assert!(packed.is_empty());
        assert!(packed.bytes().is_empty());
        assert_eq!(packed.padding_bits(), 0);
    }

    #[test]
    fn test_exact_byte_boundary_has_no_padding() {
        let codes = codes_for(b"ab");
        let packed = pack(b"abababab", &codes).unwrap();
        assert_eq!(packed.bit_len(), 8);
        assert_eq!(packed.bytes(), &[0b0101_0101]);
        assert_eq!(packed.padding_bits(), 0);
    }

    #[test]
    fn test_from_parts_rejects_bit_len_past_buffer() {
        assert!(matches!(
            PackedStream::from_parts(vec![0xFF], 9),
            Err(Error::BitIo(BitIoError::InsufficientBits {
                requested: 9,
                available: 8
            }))
        ));

        let packed = PackedStream::from_parts(vec![0b1010_0000], 3).unwrap();
        assert_eq!(packed.to_bit_string(), "101");
        assert_eq!(packed.padding_bits(), 5);
    }

    #[test]
    fn test_unknown_symbol() {
        let codes = codes_for(b"ab");
        let result = pack(b"abc", &codes);
        assert!(matches!(
            result,
            Err(Error::Huffman(HuffmanError::UnknownSymbol {
                symbol: b'c',
                position: 2
            }))
        ));
    }

    #[test]
    fn test_terminated_appends_sentinel_code() {
        let mut freqs = FrequencyTable::from_symbols(b"aab", 128).unwrap();
        freqs.set(0, 1).unwrap();
        let tree = HuffmanTree::build(&freqs).unwrap();
        let codes = generate_codes(&tree, MAX_CODE_LEN).unwrap();

        let plain = pack(b"aab", &codes).unwrap();
        let terminated = pack_terminated(b"aab", &codes, 0).unwrap();
        let sentinel = codes.get(0).unwrap().to_string();

        assert_eq!(
            terminated.to_bit_string(),
            format!("{}{}", plain.to_bit_string(), sentinel)
        );
    }
}
