//! The encode entry point.
//!
//! One call runs the whole pipeline in sequence:
//! frequency count → heap build → tree build → code generation → packing.
//! Every call builds its own frequency table, arena and heap, so an
//! `Encoder` can be reused and shared without any state carrying over.

use crate::codes::{generate_codes, Code, CodeTable, MAX_CODE_LEN};
use crate::decoder::Decoder;
use crate::error::{Error, HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::packer::{pack, pack_terminated, PackedStream};
use crate::tree::HuffmanTree;

/// 7-bit ASCII alphabet.
pub const ASCII_ALPHABET: usize = 128;

/// Full byte alphabet.
pub const BYTE_ALPHABET: usize = 256;

/// Frequency counting slice size.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Configuration for one encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Number of symbols; every input byte must be below this
    pub alphabet_size: usize,

    /// Longest code allowed before the run is aborted
    pub max_code_len: usize,

    /// Symbol reserved as end-of-stream marker, appended after the data
    pub end_of_stream: Option<u8>,

    /// Slice size for frequency counting
    pub chunk_size: usize,
}

impl EncoderConfig {
    pub fn new(alphabet_size: usize) -> Self {
        Self {
            alphabet_size,
            max_code_len: MAX_CODE_LEN,
            end_of_stream: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// 128-symbol ASCII alphabet.
    pub fn ascii() -> Self {
        Self::new(ASCII_ALPHABET)
    }

    /// 256-symbol byte alphabet.
    pub fn bytes() -> Self {
        Self::new(BYTE_ALPHABET)
    }

    pub fn with_sentinel(mut self, symbol: u8) -> Self {
        self.end_of_stream = Some(symbol);
        self
    }

    pub fn with_max_code_len(mut self, bits: usize) -> Self {
        self.max_code_len = bits;
        self
    }

    pub fn with_chunk_size(mut self, bytes: usize) -> Self {
        self.chunk_size = bytes;
        self
    }

    /// Reject settings the engine cannot honor.
    pub fn validate(&self) -> Result<()> {
        if !(1..=BYTE_ALPHABET).contains(&self.alphabet_size) {
            return Err(Error::Config(format!(
                "alphabet size must be within 1..={BYTE_ALPHABET}, got {}",
                self.alphabet_size
            )));
        }
        if !(1..=Code::CAPACITY).contains(&self.max_code_len) {
            return Err(Error::Config(format!(
                "max code length must be within 1..={}, got {}",
                Code::CAPACITY,
                self.max_code_len
            )));
        }
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk size must be non-zero".to_string()));
        }
        if let Some(symbol) = self.end_of_stream {
            if symbol as usize >= self.alphabet_size {
                return Err(Error::Config(format!(
                    "end-of-stream symbol {symbol} is outside alphabet of size {}",
                    self.alphabet_size
                )));
            }
        }
        Ok(())
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::bytes()
    }
}

/// The result of one encode call.
#[derive(Debug, Clone)]
pub struct Encoded {
    frequencies: FrequencyTable,
    codes: CodeTable,
    packed: PackedStream,
    symbol_count: usize,
    end_of_stream: Option<u8>,
}

impl Encoded {
    /// Symbol counts the codes were built from (sentinel included).
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    pub fn packed(&self) -> &PackedStream {
        &self.packed
    }

    /// Data bits before padding.
    pub fn bit_len(&self) -> usize {
        self.packed.bit_len()
    }

    /// Number of input symbols (sentinel excluded).
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    pub fn end_of_stream(&self) -> Option<u8> {
        self.end_of_stream
    }

    /// Decode the packed stream back to the input symbols.
    ///
    /// Sentinel-terminated streams stop at the sentinel; others use the
    /// exact bit length.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let decoder = Decoder::from_code_table(&self.codes)?;
        let decoded = match self.end_of_stream {
            Some(sentinel) => decoder.decode_until(self.packed.bytes(), sentinel)?,
            None => decoder.decode_stream(&self.packed)?,
        };

        if decoded.len() != self.symbol_count {
            return Err(HuffmanError::LengthMismatch {
                expected: self.symbol_count,
                actual: decoded.len(),
            }
            .into());
        }
        Ok(decoded)
    }
}

/// Reusable encoder for a fixed configuration.
#[derive(Debug, Clone)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    /// # Errors
    /// `Error::Config` if the configuration fails validation.
    pub fn new(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Build the code table for `symbols` and pack them.
    ///
    /// Empty input yields an empty table and no bytes. A single distinct
    /// symbol is coded as `0`, one bit per occurrence.
    pub fn encode(&self, symbols: &[u8]) -> Result<Encoded> {
        let frequencies = self.count(symbols)?;
        log::debug!(
            "encoding {} symbols, {} distinct, alphabet {}",
            symbols.len(),
            frequencies.distinct_count(),
            self.config.alphabet_size
        );

        let codes = self.build_codes(&frequencies)?;
        let packed = match self.config.end_of_stream {
            Some(sentinel) => pack_terminated(symbols, &codes, sentinel)?,
            None => pack(symbols, &codes)?,
        };

        Ok(Encoded {
            frequencies,
            codes,
            packed,
            symbol_count: symbols.len(),
            end_of_stream: self.config.end_of_stream,
        })
    }

    /// Code table for an existing frequency table.
    pub fn build_codes(&self, frequencies: &FrequencyTable) -> Result<CodeTable> {
        let tree = HuffmanTree::build(frequencies)?;
        generate_codes(&tree, self.config.max_code_len)
    }

    fn count(&self, symbols: &[u8]) -> Result<FrequencyTable> {
        let mut frequencies = FrequencyTable::from_symbols_chunked(
            symbols,
            self.config.alphabet_size,
            self.config.chunk_size,
        )?;

        if let Some(sentinel) = self.config.end_of_stream {
            if let Some(position) = symbols.iter().position(|&s| s == sentinel) {
                return Err(HuffmanError::SentinelInInput {
                    symbol: sentinel,
                    position,
                }
                .into());
            }
            frequencies.set(sentinel, 1)?;
        }
        Ok(frequencies)
    }
}

/// Encode `symbols` over an alphabet of `alphabet_size` with default settings.
///
/// Returns the code table, the packed bytes and the exact bit length.
pub fn encode(symbols: &[u8], alphabet_size: usize) -> Result<Encoded> {
    Encoder::new(EncoderConfig::new(alphabet_size))?.encode(symbols)
}
