//! Sample inputs for running the encoder without a file.
//!
//! # Design
//!
//! The random sample mixes chunk kinds so the code table is interesting:
//! - Runs of one symbol (a single very short code)
//! - Text-like data (a skewed small alphabet)
//! - Repeating patterns
//! - Uniform random symbols (codes close to `log2(alphabet)` bits)
//!
//! Every generated symbol is below the requested alphabet size.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The classic demonstration input.
pub const ABRACADABRA: &[u8] = b"abracadabra";

const TEXT_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz .!,\n";

/// `a..z` repeated until `len` bytes.
pub fn alphabet_cycle(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'a' + (i % 26) as u8).collect()
}

/// Generate seeded sample data with mixed symbol distributions.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `size_bytes`: exact length of the generated data
/// - `alphabet_size`: exclusive upper bound for every symbol (1..=256)
pub fn generate_sample_data(seed: u64, size_bytes: usize, alphabet_size: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);
    let bound = alphabet_size.clamp(1, 256);

    let mut remaining = size_bytes;
    while remaining > 0 {
        let chunk_size = remaining.min(1024);

        let chunk_type: u8 = rng.gen_range(0..10);
        match chunk_type {
            // 30% runs of the same symbol
            0..=2 => {
                let symbol = random_symbol(&mut rng, bound);
                data.extend(std::iter::repeat(symbol).take(chunk_size));
            }

            // 30% text-like
            3..=5 => {
                for _ in 0..chunk_size {
                    let symbol = TEXT_ALPHABET[rng.gen_range(0..TEXT_ALPHABET.len())];
                    data.push(fit(symbol, bound));
                }
            }

            // 20% repeating patterns
            6..=7 => {
                let pattern_len = rng.gen_range(4..=32);
                let pattern: Vec<u8> = (0..pattern_len)
                    .map(|_| random_symbol(&mut rng, bound))
                    .collect();
                data.extend(pattern.iter().cycle().take(chunk_size));
            }

            // 20% uniform
            _ => {
                for _ in 0..chunk_size {
                    data.push(random_symbol(&mut rng, bound));
                }
            }
        }

        remaining -= chunk_size;
    }

    data
}

fn random_symbol(rng: &mut ChaCha8Rng, bound: usize) -> u8 {
    rng.gen_range(0..bound) as u8
}

fn fit(symbol: u8, bound: usize) -> u8 {
    (symbol as usize % bound) as u8
}
