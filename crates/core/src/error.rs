//! Error types for the huffpack engine.
//!
//! Every failure is returned as a structured error; nothing in the
//! encoding path panics. An error aborts the single encode or decode call
//! that raised it and leaves no partial output behind.
//!
//! Empty input and single-symbol alphabets are not errors. They are
//! handled paths with defined output (see `tree` and `codes`).

use std::fmt;

use thiserror::Error;

/// Top-level error type for all operations in the engine.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Huffman: tree construction, code generation, packing and decoding
/// - Framing: frame serialization/parsing
/// - CRC: frame corruption detected
/// - I/O: file system operations (harness only)
/// - Config: rejected encoder configuration
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman engine error (capacity, heap misuse, unknown symbols, bad codes)
    #[error("huffman error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Frame error (e.g., invalid header, length mismatch)
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// CRC validation failed, indicating data corruption
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the last valid bit
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Declared bit length is larger than the backing buffer
    #[error("insufficient bits: requested {requested}, available {available}")]
    InsufficientBits { requested: usize, available: usize },

    /// Invalid bit count (more than 64 bits in a single write)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// The fixed structural bound that an encoding run ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Node arena slots (`2 * alphabet_size - 1`)
    NodeArena,
    /// Heap slots (number of distinct symbols)
    Heap,
    /// Bits in a single code (tree height)
    CodeLength,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::NodeArena => f.write_str("node arena"),
            Resource::Heap => f.write_str("heap"),
            Resource::CodeLength => f.write_str("code length"),
        }
    }
}

/// Huffman engine errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// A fixed structural bound was exceeded; the run is aborted, never truncated
    #[error("{resource} capacity exceeded: limit is {limit}")]
    CapacityExceeded { resource: Resource, limit: usize },

    /// `extract_min` called on an empty heap
    #[error("heap underflow: extract from empty heap")]
    HeapUnderflow,

    /// Input symbol does not fit the configured alphabet
    #[error("symbol {symbol} at position {position} is outside alphabet of size {alphabet_size}")]
    SymbolOutOfRange {
        symbol: u8,
        position: usize,
        alphabet_size: usize,
    },

    /// Frequency assigned to a symbol the table has no slot for
    #[error("symbol {symbol} is outside alphabet of size {alphabet_size}")]
    SymbolNotInAlphabet { symbol: u8, alphabet_size: usize },

    /// Symbol has no entry in the code table
    #[error("symbol {symbol} at position {position} has no code")]
    UnknownSymbol { symbol: u8, position: usize },

    /// Bit sequence leads off the code tree
    #[error("invalid huffman code at bit position {position}")]
    InvalidCode { position: usize },

    /// Bit stream ended in the middle of a code
    #[error("bit stream ends inside a code starting at bit position {position}")]
    TruncatedCode { position: usize },

    /// Sentinel-terminated decode ran out of bits before the sentinel
    #[error("end-of-stream sentinel {sentinel} not found")]
    MissingSentinel { sentinel: u8 },

    /// Input already contains the symbol reserved as end-of-stream sentinel
    #[error("input contains reserved end-of-stream symbol {symbol} at position {position}")]
    SentinelInInput { symbol: u8, position: usize },

    /// Code table is not prefix-free
    #[error("code for symbol {symbol} conflicts with another code")]
    PrefixConflict { symbol: u8 },

    /// Decoded length doesn't match expected length
    #[error("decoded length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Summed node weight does not fit in u64
    #[error("frequency overflow while merging nodes")]
    FrequencyOverflow,
}

/// Frame errors.
#[derive(Debug, Error)]
pub enum FramingError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Frame is too short to contain a valid header
    #[error("frame too short: need at least {required} bytes, got {actual}")]
    FrameTooShort { required: usize, actual: usize },

    /// Frame length doesn't match header specification
    #[error("frame length mismatch: header says {expected}, got {actual}")]
    FrameLengthMismatch { expected: usize, actual: usize },

    /// Metadata block is not a whole number of entries, or repeats a symbol
    #[error("malformed frequency metadata: {0}")]
    MalformedMetadata(String),

    /// Frame header describes an encoding this build cannot represent
    #[error("unsupported frame field {field}: {value}")]
    Unsupported { field: &'static str, value: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_names_resource() {
        let err: Error = HuffmanError::CapacityExceeded {
            resource: Resource::CodeLength,
            limit: 100,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "huffman error: code length capacity exceeded: limit is 100"
        );
    }

    #[test]
    fn test_crc_message_is_hex() {
        let err = Error::Crc {
            expected: 0xdead_beef,
            actual: 0x1,
        };
        assert_eq!(
            err.to_string(),
            "CRC mismatch: expected 0xdeadbeef, got 0x00000001"
        );
    }
}
