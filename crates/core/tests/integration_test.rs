//! Integration tests for the full huffpack pipeline.
//!
//! These tests verify end-to-end behavior: input -> count -> tree -> codes ->
//! pack -> frame -> parse -> decode, with verification that output matches
//! input.

use huffpack_core::{
    codes::generate_codes,
    encode,
    error::{Error, HuffmanError, Resource},
    framing::{compress_and_frame, decode_frame, parse_frame},
    Decoder, Encoder, EncoderConfig, FrequencyTable, HuffmanTree, ASCII_ALPHABET, BYTE_ALPHABET,
};

/// The 8000-symbol `a..z` cycle used as a reference workload.
fn alphabet_cycle(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'a' + (i % 26) as u8).collect()
}

/// Round trip through encode, frame, parse and decode.
#[test]
fn test_full_pipeline_text() {
    let input_data = b"hello world! this is a test of the full pipeline with some repetition: aaaaaaaaaa bbbbbbbbbb cccccccccc";

    let frame_bytes =
        compress_and_frame(input_data, &EncoderConfig::ascii()).expect("compression failed");
    let frame = parse_frame(&frame_bytes).expect("frame parsing failed");
    let decoded = decode_frame(&frame).expect("decompression failed");

    assert_eq!(decoded, input_data, "output doesn't match input");
}

/// Every distinct symbol gets a code and the packed length matches the table.
#[test]
fn test_alphabet_cycle() {
    let input_data = alphabet_cycle(8000);
    let encoded = encode(&input_data, ASCII_ALPHABET).unwrap();

    assert_eq!(encoded.codes().len(), 26);
    assert!(encoded.codes().is_prefix_free());

    // 26 near-equal weights: six codes of 4 bits, twenty of 5 bits
    let mut lengths: Vec<usize> = encoded.codes().iter().map(|(_, c)| c.len()).collect();
    lengths.sort_unstable();
    assert_eq!(lengths.iter().filter(|&&l| l == 4).count(), 6);
    assert_eq!(lengths.iter().filter(|&&l| l == 5).count(), 20);

    assert_eq!(
        encoded.bit_len() as u64,
        encoded.codes().weighted_length(encoded.frequencies()).unwrap()
    );
    assert_eq!(encoded.packed().bytes().len(), encoded.bit_len().div_ceil(8));
    assert_eq!(encoded.decode().unwrap(), input_data);
}

/// Test with all symbols present (full 256-byte alphabet).
#[test]
fn test_all_symbols() {
    let input_data: Vec<u8> = (0..=255).collect();

    let encoded = encode(&input_data, BYTE_ALPHABET).expect("encode failed");
    assert!(encoded.codes().iter().all(|(_, c)| c.len() == 8));
    assert_eq!(encoded.bit_len(), 256 * 8);

    let frame_bytes = compress_and_frame(&input_data, &EncoderConfig::bytes()).unwrap();
    let frame = parse_frame(&frame_bytes).unwrap();
    assert_eq!(decode_frame(&frame).unwrap(), input_data);
}

/// Classic textbook weights produce the textbook tree.
#[test]
fn test_classic_weights() {
    let mut freqs = FrequencyTable::new(ASCII_ALPHABET);
    for (symbol, f) in [(b'a', 5), (b'b', 9), (b'c', 12), (b'd', 13), (b'e', 16), (b'f', 45)] {
        freqs.set(symbol, f).unwrap();
    }

    let tree = HuffmanTree::build(&freqs).unwrap();
    assert_eq!(tree.merge_frequencies(), vec![14, 25, 30, 55, 100]);
    assert_eq!(tree.root_frequency(), 100);

    let codes = generate_codes(&tree, huffpack_core::MAX_CODE_LEN).unwrap();
    // Kraft equality for a full binary tree: Σ 2^(4 - len) == 2^4
    let kraft: u32 = codes.iter().map(|(_, c)| 1u32 << (4 - c.len())).sum();
    assert_eq!(kraft, 16);
}

/// A single repeated symbol does not crash and round-trips.
#[test]
fn test_single_symbol_input() {
    let encoded = encode(b"aaaa", ASCII_ALPHABET).unwrap();
    assert_eq!(encoded.codes().len(), 1);
    assert_eq!(encoded.codes().get(b'a').unwrap().to_string(), "0");
    assert_eq!(encoded.bit_len(), 4);
    assert_eq!(encoded.packed().bytes(), &[0]);
    assert_eq!(encoded.decode().unwrap(), b"aaaa");

    let frame_bytes = compress_and_frame(b"aaaa", &EncoderConfig::ascii()).unwrap();
    let frame = parse_frame(&frame_bytes).unwrap();
    assert_eq!(decode_frame(&frame).unwrap(), b"aaaa");
}

/// Empty input yields an empty table and no bytes.
#[test]
fn test_empty_input() {
    let encoded = encode(b"", BYTE_ALPHABET).unwrap();
    assert!(encoded.codes().is_empty());
    assert!(encoded.packed().bytes().is_empty());
    assert_eq!(encoded.bit_len(), 0);
}

/// Sentinel-terminated streams decode without the bit length.
#[test]
fn test_sentinel_without_bit_len() {
    let config = EncoderConfig::ascii().with_sentinel(0);
    let encoder = Encoder::new(config).unwrap();
    let encoded = encoder.encode(b"the quick brown fox").unwrap();

    let decoder = Decoder::from_code_table(encoded.codes()).unwrap();
    let decoded = decoder.decode_until(encoded.packed().bytes(), 0).unwrap();
    assert_eq!(decoded, b"the quick brown fox");
}

/// A frame decodes to the same bytes as the in-memory result.
#[test]
fn test_frame_matches_in_memory_codes() {
    let input_data = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
    let encoder = Encoder::new(EncoderConfig::bytes()).unwrap();
    let encoded = encoder.encode(&input_data).unwrap();

    let frame_bytes = compress_and_frame(&input_data, &EncoderConfig::bytes()).unwrap();
    let frame = parse_frame(&frame_bytes).unwrap();

    assert_eq!(frame.packed.bytes(), encoded.packed().bytes());
    assert_eq!(frame.packed.bit_len(), encoded.bit_len());
    assert_eq!(decode_frame(&frame).unwrap(), input_data);
}

/// Code length bound is enforced rather than truncated.
#[test]
fn test_code_length_capacity() {
    // Fibonacci weights make a chain 11 levels deep
    let mut input_data = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..12u8 {
        input_data.extend(std::iter::repeat(b'a' + symbol).take(a));
        (a, b) = (b, a + b);
    }

    let tight = Encoder::new(EncoderConfig::ascii().with_max_code_len(10)).unwrap();
    assert!(matches!(
        tight.encode(&input_data),
        Err(Error::Huffman(HuffmanError::CapacityExceeded {
            resource: Resource::CodeLength,
            limit: 10
        }))
    ));

    let roomy = Encoder::new(EncoderConfig::ascii().with_max_code_len(11)).unwrap();
    let encoded = roomy.encode(&input_data).unwrap();
    assert_eq!(encoded.codes().max_len(), 11);
    assert_eq!(encoded.decode().unwrap(), input_data);
}

/// Test CRC detection of corruption.
#[test]
fn test_crc_corruption_detection() {
    let input_data = b"test data for crc validation";

    let mut frame = compress_and_frame(input_data, &EncoderConfig::ascii()).unwrap();
    let len = frame.len();
    frame[len - 1] ^= 0xFF;

    let result = parse_frame(&frame);
    assert!(matches!(result, Err(Error::Crc { .. })));
}
