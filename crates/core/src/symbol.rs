//! Symbol model and frequency analysis.
//!
//! Input is read as a sequence of fixed-size blocks: every `block_size` bytes
//! form one [`Symbol`]. If the byte count is not a multiple of the block
//! size, the final symbol is shorter. A shorter tail symbol is distinct from
//! every full-size symbol even when their bytes overlap, because symbol
//! equality compares length and content.
//!
//! Frequency analysis walks the blocks once, sequentially, and produces a
//! [`FrequencyTable`] ordered by symbol bytes so that downstream artifacts
//! are reproducible.

use crate::error::{EncodeError, Error, Result};
use std::collections::BTreeMap;

/// The atomic unit of compression: an ordered, immutable byte sequence.
///
/// Ordering is lexicographic over the bytes (with length as the final
/// discriminator, per slice ordering), which gives every frequency table and
/// codeword table a stable iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Vec<u8>);

impl Symbol {
    /// Create a symbol from raw bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The symbol's bytes, in order.
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the symbol.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the symbol carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[u8]> for Symbol {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

// Lets maps keyed by Symbol be queried with a plain byte slice; slice
// ordering matches the derived Symbol ordering.
impl std::borrow::Borrow<[u8]> for Symbol {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

/// Mapping from symbol to occurrence count.
///
/// Keys are unique; counts are always positive. `BTreeMap` keeps the entries
/// sorted by symbol bytes.
pub type FrequencyTable = BTreeMap<Symbol, u64>;

/// Validate the configured block size before any processing begins.
///
/// # Errors
/// Returns `Error::Config` if `block_size` is zero.
pub fn validate_block_size(block_size: usize) -> Result<()> {
    if block_size < 1 {
        return Err(Error::Config(format!(
            "block size must be at least 1, got {block_size}"
        )));
    }
    Ok(())
}

/// Iterate the input as block-size chunks, final chunk possibly shorter.
///
/// Callers must have validated `block_size` already; a zero block size would
/// panic in `chunks`.
pub fn blocks(input: &[u8], block_size: usize) -> impl Iterator<Item = &[u8]> {
    input.chunks(block_size)
}

/// Count symbol occurrences across the whole input.
///
/// # Errors
/// - `Error::Config` if `block_size` is zero
/// - `EncodeError::EmptyInput` if the input contains zero symbols
pub fn analyze(input: &[u8], block_size: usize) -> Result<FrequencyTable> {
    validate_block_size(block_size)?;

    let mut frequencies = FrequencyTable::new();
    for block in blocks(input, block_size) {
        *frequencies.entry(Symbol::from(block)).or_insert(0) += 1;
    }

    if frequencies.is_empty() {
        return Err(EncodeError::EmptyInput.into());
    }

    Ok(frequencies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_single_byte_blocks() {
        let freqs = analyze(b"AAAB", 1).unwrap();
        assert_eq!(freqs.len(), 2);
        assert_eq!(freqs[&Symbol::from(&b"A"[..])], 3);
        assert_eq!(freqs[&Symbol::from(&b"B"[..])], 1);
    }

    #[test]
    fn test_analyze_multi_byte_blocks() {
        let freqs = analyze(b"abcabcabc", 3).unwrap();
        assert_eq!(freqs.len(), 1);
        assert_eq!(freqs[&Symbol::from(&b"abc"[..])], 3);
    }

    #[test]
    fn test_tail_symbol_is_shorter() {
        // 5 bytes, block size 2: two full blocks plus a 1-byte tail
        let freqs = analyze(b"ababa", 2).unwrap();
        assert_eq!(freqs.len(), 2);
        assert_eq!(freqs[&Symbol::from(&b"ab"[..])], 2);
        assert_eq!(freqs[&Symbol::from(&b"a"[..])], 1);
    }

    #[test]
    fn test_tail_symbol_distinct_from_full_symbol() {
        // The tail "a" must not collide with the 2-byte symbol "ab" even
        // though "a" is its first byte
        let a_tail = Symbol::from(&b"a"[..]);
        let ab_full = Symbol::from(&b"ab"[..]);
        assert_ne!(a_tail, ab_full);
        assert!(a_tail < ab_full);
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = analyze(b"", 1);
        assert!(matches!(
            result,
            Err(Error::Encode(EncodeError::EmptyInput))
        ));
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let result = analyze(b"data", 0);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_block_iteration_order() {
        let got: Vec<&[u8]> = blocks(b"abcde", 2).collect();
        assert_eq!(got, vec![&b"ab"[..], &b"cd"[..], &b"e"[..]]);
    }
}
