//! Property-based tests for the coding laws.
//!
//! Uses proptest to check, over arbitrary byte streams:
//! - weighted code length equals packed bit length
//! - the code table is prefix-free
//! - pack then decode reproduces the input
//! - code lengths satisfy Kraft's inequality (with equality when ≥2 symbols)
//! - permuting the input never changes the code table

use huffpack_core::{
    encode,
    framing::{compress_and_frame, decode_frame, parse_frame},
    heap::MinHeap,
    Encoder, EncoderConfig, BYTE_ALPHABET,
};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Byte streams drawn from a small alphabet so symbols repeat.
fn skewed_stream() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            6 => Just(b'e'),
            3 => Just(b't'),
            2 => prop::sample::select(b"aoinshrdlu".to_vec()),
            1 => any::<u8>(),
        ],
        0..2000,
    )
}

proptest! {
    #[test]
    fn prop_weighted_length_matches_bit_len(data in skewed_stream()) {
        let encoded = encode(&data, BYTE_ALPHABET).unwrap();
        prop_assert_eq!(
            encoded.codes().weighted_length(encoded.frequencies()).unwrap(),
            encoded.bit_len() as u64
        );
        prop_assert_eq!(encoded.packed().bytes().len(), encoded.bit_len().div_ceil(8));
    }

    #[test]
    fn prop_codes_are_prefix_free(data in prop::collection::vec(any::<u8>(), 0..1000)) {
        let encoded = encode(&data, BYTE_ALPHABET).unwrap();
        prop_assert!(encoded.codes().is_prefix_free());
        prop_assert_eq!(encoded.codes().len(), encoded.frequencies().distinct_count());
    }

    #[test]
    fn prop_round_trip(data in skewed_stream()) {
        let encoded = encode(&data, BYTE_ALPHABET).unwrap();
        prop_assert_eq!(encoded.decode().unwrap(), data);
    }

    #[test]
    fn prop_sentinel_round_trip(data in prop::collection::vec(1u8..=255, 0..1000)) {
        let encoder = Encoder::new(EncoderConfig::bytes().with_sentinel(0)).unwrap();
        let encoded = encoder.encode(&data).unwrap();
        prop_assert_eq!(encoded.decode().unwrap(), data);
    }

    #[test]
    fn prop_frame_round_trip(data in skewed_stream()) {
        let frame_bytes = compress_and_frame(&data, &EncoderConfig::bytes()).unwrap();
        let frame = parse_frame(&frame_bytes).unwrap();
        prop_assert_eq!(decode_frame(&frame).unwrap(), data);
    }

    #[test]
    fn prop_kraft_equality(data in prop::collection::vec(any::<u8>(), 2..1000)) {
        let encoded = encode(&data, BYTE_ALPHABET).unwrap();
        let codes = encoded.codes();
        let max = codes.max_len();
        prop_assume!(max <= 64 && codes.len() >= 2);

        // Σ 2^-len == 1, scaled by 2^max
        let sum: u128 = codes.iter().map(|(_, c)| 1u128 << (max - c.len())).sum();
        prop_assert_eq!(sum, 1u128 << max);
    }

    #[test]
    fn prop_tie_break_is_order_independent(
        data in skewed_stream(),
        seed in any::<u64>(),
    ) {
        let mut shuffled = data.clone();
        shuffled.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

        let original = encode(&data, BYTE_ALPHABET).unwrap();
        let permuted = encode(&shuffled, BYTE_ALPHABET).unwrap();
        prop_assert_eq!(original.codes(), permuted.codes());
    }

    #[test]
    fn prop_heap_drains_sorted(
        values in prop::collection::vec(any::<u32>(), 0..500),
        extra in prop::collection::vec(any::<u32>(), 0..50),
    ) {
        let mut heap = MinHeap::build(values.clone(), values.len() + extra.len()).unwrap();
        for &value in &extra {
            heap.insert(value).unwrap();
        }
        prop_assert!(heap.is_valid());

        let mut drained = Vec::new();
        while let Ok(value) = heap.extract_min() {
            drained.push(value);
        }

        let mut expected = values;
        expected.extend(extra);
        expected.sort_unstable();
        prop_assert_eq!(drained, expected);
    }
}
