//! Sample input generation for demo and testing runs.
//!
//! `--gen` fabricates an input file with interesting compression
//! characteristics: runs of one byte, limited-alphabet text, repeating
//! multi-byte words, and a slice of incompressible noise. The repeating
//! words make multi-byte block sizes worthwhile, so the effect of `-s` is
//! visible in the reported ratio.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;

/// Generate sample data of exactly `size_bytes` bytes.
///
/// Deterministic for a given seed.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = (size_bytes - data.len()).min(4096);

        match rng.gen_range(0..10u8) {
            // 20% runs of a single byte
            0..=1 => {
                let value: u8 = rng.gen();
                data.extend(std::iter::repeat(value).take(section));
            }

            // 30% limited-alphabet text
            2..=4 => {
                let alphabet = b"etaoin shrdlu.\n";
                for _ in 0..section {
                    data.push(alphabet[rng.gen_range(0..alphabet.len())]);
                }
            }

            // 30% repeating multi-byte words (2..=8 bytes)
            5..=7 => {
                let word_len = rng.gen_range(2..=8);
                let word: Vec<u8> = (0..word_len).map(|_| rng.gen()).collect();
                for i in 0..section {
                    data.push(word[i % word.len()]);
                }
            }

            // 20% incompressible noise
            _ => {
                for _ in 0..section {
                    data.push(rng.gen());
                }
            }
        }
    }

    data.truncate(size_bytes);
    data
}

/// Generate sample data and write it to a file.
pub fn write_sample_file(
    path: &std::path::Path,
    seed: u64,
    size_bytes: usize,
) -> std::io::Result<()> {
    let data = generate_sample_data(seed, size_bytes);
    let mut file = std::fs::File::create(path)?;
    file.write_all(&data)?;
    Ok(())
}
