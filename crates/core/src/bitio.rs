//! Bit-level I/O for packed code streams.
//!
//! Both `BitWriter` and `BitReader` work MSB-first: the first bit written
//! lands in the most significant bit of the first byte.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte on the right with zeros and
//!   reports the exact number of data bits through `bit_len`
//! - BitReader: can be bounded to a bit length so padding is never read as data
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//! let bit_len = writer.bit_len();
//! // 10111 -> padded to 10111000
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::with_bit_len(&bytes, bit_len).unwrap();
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(2).unwrap(), 0b11);
//! assert!(reader.is_empty());
//! ```

use crate::codes::Code;
use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `pending` holds fewer than 8 bits, MSB-aligned
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Current partial byte
    pending: u8,
    /// Bits used in `pending` (0-7)
    pending_len: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer with room for `bits` bits before reallocating.
    pub fn with_capacity_bits(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            pending: 0,
            pending_len: 0,
        }
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.pending |= 0x80 >> self.pending_len;
        }
        self.pending_len += 1;
        if self.pending_len == 8 {
            self.bytes.push(self.pending);
            self.pending = 0;
            self.pending_len = 0;
        }
    }

    /// Write the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }

        let mut remaining = count;
        while remaining > 0 {
            // Fill the pending byte as far as possible in one step
            let room = 8 - self.pending_len as usize;
            let take = remaining.min(room);
            let shift = remaining - take;
            let chunk = ((value >> shift) & ((1u64 << take) - 1)) as u8;

            self.pending |= chunk << (room - take);
            self.pending_len += take as u8;
            if self.pending_len == 8 {
                self.bytes.push(self.pending);
                self.pending = 0;
                self.pending_len = 0;
            }
            remaining = shift;
        }

        Ok(())
    }

    /// Append every bit of `code`.
    pub fn write_code(&mut self, code: &Code) -> Result<()> {
        let len = code.len();
        let bits = code.bits();
        if len > 64 {
            self.write_bits((bits >> 64) as u64, len - 64)?;
            self.write_bits(bits as u64, 64)
        } else {
            self.write_bits(bits as u64, len)
        }
    }

    /// Number of data bits written so far (padding excluded).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.pending_len as usize
    }

    /// Zero bits the final byte needs to reach a byte boundary.
    pub fn padding_bits(&self) -> usize {
        (8 - self.pending_len as usize) % 8
    }

    /// Pad the last partial byte with zeros and return the buffer.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending_len > 0 {
            self.bytes.push(self.pending);
        }
        self.bytes
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `position <= bit_len <= data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Next bit to read (0 = MSB of first byte)
    position: usize,
    /// Bits past this point are padding
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    /// Reader over every bit of `data`, padding included.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            bit_len: data.len() * 8,
        }
    }

    /// Reader limited to the first `bit_len` bits of `data`.
    ///
    /// # Errors
    /// `BitIoError::InsufficientBits` if `data` holds fewer than `bit_len` bits.
    pub fn with_bit_len(data: &'a [u8], bit_len: usize) -> Result<Self> {
        let available = data.len() * 8;
        if bit_len > available {
            return Err(BitIoError::InsufficientBits {
                requested: bit_len,
                available,
            }
            .into());
        }
        Ok(Self {
            data,
            position: 0,
            bit_len,
        })
    }

    /// Read one bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` past the last valid bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.position >= self.bit_len {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let byte = self.data[self.position / 8];
        let bit = byte & (0x80 >> (self.position % 8)) != 0;
        self.position += 1;
        Ok(bit)
    }

    /// Read up to 64 bits, most significant first.
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }

    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.position >= self.bit_len
    }
}
