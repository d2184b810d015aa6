//! Frame serialization and parsing.
//!
//! A frame packages a packed stream with everything needed to decode it
//! later: the frequency table (the decoder rebuilds the same tree from it,
//! since tie-breaking is deterministic), the exact bit length and the
//! optional end-of-stream sentinel.
//!
//! # Frame Format
//!
//! ```text
//! +-------------------+
//! | Magic (4 bytes)   |  0x48 0x55 0x46 0x50 ("HUFP")
//! +-------------------+
//! | alphabet_size (2) |  u16 little-endian
//! +-------------------+
//! | flags (1)         |  bit 0: sentinel present
//! +-------------------+
//! | sentinel (1)      |  end-of-stream symbol (0 when absent)
//! +-------------------+
//! | symbol_count (4)  |  u32 input length, sentinel excluded
//! +-------------------+
//! | bit_len (8)       |  u64 data bits before padding
//! +-------------------+
//! | meta_len (2)      |  u16 length of frequency metadata
//! +-------------------+
//! | payload_len (4)   |  u32 packed byte count
//! +-------------------+
//! | crc32 (4)         |  u32 checksum of everything after the magic
//! +-------------------+
//! | metadata          |  (symbol u8, frequency u64) pairs, ascending
//! +-------------------+
//! | payload           |  packed bytes
//! +-------------------+
//! ```

use crate::codes::Code;
use crate::decoder::Decoder;
use crate::encoder::{Encoded, Encoder, EncoderConfig};
use crate::error::{Error, FramingError, HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::packer::PackedStream;

/// Magic number for frames: "HUFP"
const MAGIC: [u8; 4] = [0x48, 0x55, 0x46, 0x50];

/// Size of the frame header in bytes
const HEADER_SIZE: usize = 30;

/// Bytes per metadata entry (symbol + frequency)
const META_ENTRY_SIZE: usize = 9;

const FLAG_SENTINEL: u8 = 0x01;

/// A parsed frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub alphabet_size: usize,

    pub end_of_stream: Option<u8>,

    /// Original input length
    pub symbol_count: u32,

    /// Counts the code table is rebuilt from
    pub frequencies: FrequencyTable,

    pub packed: PackedStream,

    pub crc32: u32,
}

/// Serialize an encode result into a frame.
///
/// # Errors
/// `FramingError::Unsupported` if the input is too long for the header fields.
pub fn serialize_frame(encoded: &Encoded) -> Result<Vec<u8>> {
    let metadata = serialize_metadata(encoded.frequencies());
    let payload = encoded.packed().bytes();

    let alphabet_size = encoded.frequencies().alphabet_size() as u16;
    let (flags, sentinel) = match encoded.end_of_stream() {
        Some(symbol) => (FLAG_SENTINEL, symbol),
        None => (0, 0),
    };
    let symbol_count = u32::try_from(encoded.symbol_count()).map_err(|_| FramingError::Unsupported {
        field: "symbol_count",
        value: encoded.symbol_count() as u64,
    })?;
    let bit_len = encoded.bit_len() as u64;
    let meta_len = metadata.len() as u16;
    let payload_len = u32::try_from(payload.len()).map_err(|_| FramingError::Unsupported {
        field: "payload_len",
        value: payload.len() as u64,
    })?;

    let mut frame = Vec::with_capacity(HEADER_SIZE + metadata.len() + payload.len());
    frame.extend_from_slice(&MAGIC);
    frame.extend_from_slice(&alphabet_size.to_le_bytes());
    frame.push(flags);
    frame.push(sentinel);
    frame.extend_from_slice(&symbol_count.to_le_bytes());
    frame.extend_from_slice(&bit_len.to_le_bytes());
    frame.extend_from_slice(&meta_len.to_le_bytes());
    frame.extend_from_slice(&payload_len.to_le_bytes());

    let crc32 = compute_crc(&frame[4..], &metadata, payload);
    frame.extend_from_slice(&crc32.to_le_bytes());

    frame.extend_from_slice(&metadata);
    frame.extend_from_slice(payload);

    Ok(frame)
}

/// Parse a frame from bytes.
///
/// # Errors
/// - `FramingError::InvalidMagic` if magic number doesn't match
/// - `FramingError::FrameTooShort` if buffer is too small for the header
/// - `FramingError::FrameLengthMismatch` if lengths disagree with the header
/// - `Error::Crc` if CRC validation fails
/// - `FramingError::MalformedMetadata` / `Unsupported` for bad field values
pub fn parse_frame(bytes: &[u8]) -> Result<Frame> {
    if bytes.len() < HEADER_SIZE {
        return Err(FramingError::FrameTooShort {
            required: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
    if magic != MAGIC {
        return Err(FramingError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let alphabet_size = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
    let flags = bytes[6];
    let sentinel = bytes[7];
    let symbol_count = u32::from_le_bytes(array(&bytes[8..12]));
    let bit_len = u64::from_le_bytes(array(&bytes[12..20]));
    let meta_len = u16::from_le_bytes([bytes[20], bytes[21]]) as usize;
    let payload_len = u32::from_le_bytes(array(&bytes[22..26])) as usize;
    let crc32 = u32::from_le_bytes(array(&bytes[26..30]));

    let expected_size = HEADER_SIZE + meta_len + payload_len;
    if bytes.len() != expected_size {
        return Err(FramingError::FrameLengthMismatch {
            expected: expected_size,
            actual: bytes.len(),
        }
        .into());
    }

    let metadata = &bytes[HEADER_SIZE..HEADER_SIZE + meta_len];
    let payload = &bytes[HEADER_SIZE + meta_len..];

    let computed_crc = compute_crc(&bytes[4..26], metadata, payload);
    if computed_crc != crc32 {
        return Err(Error::Crc {
            expected: crc32,
            actual: computed_crc,
        });
    }

    if !(1..=256).contains(&alphabet_size) {
        return Err(FramingError::Unsupported {
            field: "alphabet_size",
            value: alphabet_size as u64,
        }
        .into());
    }
    if bit_len.div_ceil(8) != payload_len as u64 {
        return Err(FramingError::Unsupported {
            field: "bit_len",
            value: bit_len,
        }
        .into());
    }

    let end_of_stream = (flags & FLAG_SENTINEL != 0).then_some(sentinel);
    let frequencies = deserialize_metadata(metadata, alphabet_size)?;

    Ok(Frame {
        alphabet_size,
        end_of_stream,
        symbol_count,
        frequencies,
        packed: PackedStream::from_parts(payload.to_vec(), bit_len as usize)?,
        crc32,
    })
}

fn array<const N: usize>(slice: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    out
}

fn serialize_metadata(frequencies: &FrequencyTable) -> Vec<u8> {
    let mut metadata = Vec::with_capacity(frequencies.distinct_count() * META_ENTRY_SIZE);
    for (symbol, frequency) in frequencies.iter() {
        metadata.push(symbol);
        metadata.extend_from_slice(&frequency.to_le_bytes());
    }
    metadata
}

fn deserialize_metadata(metadata: &[u8], alphabet_size: usize) -> Result<FrequencyTable> {
    if metadata.len() % META_ENTRY_SIZE != 0 {
        return Err(FramingError::MalformedMetadata(format!(
            "{} bytes is not a multiple of {META_ENTRY_SIZE}",
            metadata.len()
        ))
        .into());
    }

    let mut frequencies = FrequencyTable::new(alphabet_size);
    let mut previous: Option<u8> = None;
    for entry in metadata.chunks_exact(META_ENTRY_SIZE) {
        let symbol = entry[0];
        let frequency = u64::from_le_bytes(array(&entry[1..]));

        if previous.is_some_and(|p| symbol <= p) {
            return Err(FramingError::MalformedMetadata(format!(
                "symbol {symbol} out of order"
            ))
            .into());
        }
        if frequency == 0 || symbol as usize >= alphabet_size {
            return Err(FramingError::MalformedMetadata(format!(
                "invalid entry for symbol {symbol}"
            ))
            .into());
        }
        frequencies.set(symbol, frequency)?;
        previous = Some(symbol);
    }
    Ok(frequencies)
}

/// CRC32 over the header fields after the magic, the metadata and the payload.
fn compute_crc(header: &[u8], metadata: &[u8], payload: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(header);
    hasher.update(metadata);
    hasher.update(payload);
    hasher.finalize()
}

/// Encode `symbols` with `config` and serialize the result.
pub fn compress_and_frame(symbols: &[u8], config: &EncoderConfig) -> Result<Vec<u8>> {
    let encoded = Encoder::new(*config)?.encode(symbols)?;
    serialize_frame(&encoded)
}

/// Decode a parsed frame back to the original symbols.
pub fn decode_frame(frame: &Frame) -> Result<Vec<u8>> {
    let mut config = EncoderConfig::new(frame.alphabet_size).with_max_code_len(Code::CAPACITY);
    config.end_of_stream = frame.end_of_stream;

    let codes = Encoder::new(config)?.build_codes(&frame.frequencies)?;
    let decoder = Decoder::from_code_table(&codes)?;
    let decoded = match frame.end_of_stream {
        Some(sentinel) => decoder.decode_until(frame.packed.bytes(), sentinel)?,
        None => decoder.decode_stream(&frame.packed)?,
    };

    if decoded.len() != frame.symbol_count as usize {
        return Err(HuffmanError::LengthMismatch {
            expected: frame.symbol_count as usize,
            actual: decoded.len(),
        }
        .into());
    }
    Ok(decoded)
}
