//! huffpack-core: Huffman code construction and bit packing with bounded memory
//!
//! This library computes an optimal prefix-free code for the symbols of an
//! input stream and packs the stream into bytes with it:
//! - Counts symbol frequencies over a fixed alphabet (128 or 256 symbols)
//! - Builds the Huffman tree in a fixed-capacity node arena using a bounded min-heap
//! - Extracts codes by iterative traversal (no recursion)
//! - Packs codes MSB-first into zero-padded bytes, keeping the exact bit length
//!
//! # Architecture
//!
//! Modules, leaves first:
//! - `frequency`: Symbol counting, single pass or chunked
//! - `arena`: Fixed-capacity node pool addressed by index
//! - `heap`: Bounded binary min-heap
//! - `tree`: Greedy tree construction with deterministic tie-breaking
//! - `codes`: Code values, code tables and iterative code extraction
//! - `bitio`: Low-level bit reading/writing
//! - `packer`: Symbol stream → packed bytes
//! - `decoder`: Packed bytes → symbol stream, built from a code table
//! - `encoder`: The `encode` entry point and its configuration
//! - `framing`: Self-describing frames with CRC32
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Bounded memory**: Arena, heap and traversal stack have fixed limits
//! - **Deterministic**: Equal frequency tables always produce equal codes
//!
//! # Example
//! ```
//! let encoded = huffpack_core::encode(b"abracadabra", 128).unwrap();
//! assert_eq!(encoded.codes().get(b'a').unwrap().to_string(), "0");
//! assert_eq!(encoded.bit_len(), 23);
//! assert_eq!(encoded.decode().unwrap(), b"abracadabra");
//! ```

pub mod arena;
pub mod bitio;
pub mod codes;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod framing;
pub mod frequency;
pub mod heap;
pub mod packer;
pub mod tree;

// Re-export commonly used types
pub use codes::{Code, CodeTable, MAX_CODE_LEN};
pub use decoder::Decoder;
pub use encoder::{encode, Encoded, Encoder, EncoderConfig, ASCII_ALPHABET, BYTE_ALPHABET};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use packer::PackedStream;
pub use tree::HuffmanTree;
