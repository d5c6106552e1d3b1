//! Bit-sequence buffer and byte packing/unpacking.
//!
//! [`Bits`] is the engine's bit-string representation: codewords, and the
//! logical bit stream formed by concatenating them, are both `Bits`. Bits are
//! stored packed, MSB-first within each storage byte, and only rendered to
//! '0'/'1' text at the table-artifact boundary.
//!
//! # Packing Rules
//!
//! The logical bit sequence is split into 8-bit groups, leftmost bit most
//! significant. All groups are full except possibly the last: a final group
//! of `r` bits (1..=7) is emitted as a byte whose low-order `r` bits are the
//! payload and whose high-order `8 - r` bits are zero padding, with
//! `correction = r` recorded alongside. A bit count that is a multiple of 8
//! yields `correction = 0` and no padding.
//!
//! Unpacking reverses this: every byte expands MSB-first, and when
//! `correction > 0` the final byte contributes only its low `correction`
//! bits.

use crate::error::{BitIoError, Result};
use std::fmt;

/// A growable sequence of bits, packed MSB-first.
///
/// # Invariants
/// - `len <= bytes.len() * 8 < len + 8`
/// - storage bits beyond `len` are zero (so `Eq`/`Hash` over the raw storage
///   are correct)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Bits {
    bytes: Vec<u8>,
    len: usize,
}

impl Bits {
    /// Create an empty bit sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the sequence contains no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a single bit.
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 1 << (7 - offset);
        }
        self.len += 1;
    }

    /// Append every bit of `other`, in order.
    pub fn extend(&mut self, other: &Bits) {
        if self.len % 8 == 0 {
            // Byte-aligned: splice the storage directly
            self.bytes.extend_from_slice(&other.bytes);
            self.len += other.len;
        } else {
            for bit in other.iter() {
                self.push(bit);
            }
        }
    }

    /// The bit at position `index` (0 = first appended).
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range {}", self.len);
        (self.bytes[index / 8] >> (7 - index % 8)) & 1 == 1
    }

    /// Iterate the bits front to back.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bit(i))
    }

    /// Remove all bits, keeping the allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.len = 0;
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Error parsing a bit string from text: carries the offending character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseBitsError(pub char);

impl fmt::Display for ParseBitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid bit character {:?}", self.0)
    }
}

impl std::str::FromStr for Bits {
    type Err = ParseBitsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut bits = Bits::new();
        for c in s.chars() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                other => return Err(ParseBitsError(other)),
            }
        }
        Ok(bits)
    }
}

/// Pack a logical bit sequence into bytes plus its correction value.
///
/// Returns the packed bytes and `correction`: the number of meaningful
/// low-order bits in the final byte, or 0 when every byte is full.
pub fn pack(bits: &Bits) -> (Vec<u8>, u8) {
    let full_bytes = bits.len / 8;
    let correction = (bits.len % 8) as u8;

    let mut packed = bits.bytes[..full_bytes].to_vec();
    if correction > 0 {
        // Storage keeps the partial group in the high bits; the artifact
        // wants it in the low bits with zero padding above
        packed.push(bits.bytes[full_bytes] >> (8 - correction));
    }
    (packed, correction)
}

/// Unpack bytes into the logical bit sequence they encode.
///
/// Every byte expands to 8 bits MSB-first except the final byte when
/// `correction > 0`, which contributes only its low `correction` bits.
///
/// # Errors
/// Returns `BitIoError::TruncatedStream` if `correction > 0` but the payload
/// is empty (there is no final byte to trim).
pub fn unpack(payload: &[u8], correction: u8) -> Result<Bits> {
    debug_assert!(correction <= 7);

    if correction > 0 && payload.is_empty() {
        return Err(BitIoError::TruncatedStream { correction }.into());
    }

    let mut bits = Bits::new();
    let (body, last) = match correction {
        0 => (payload, None),
        _ => {
            let (body, last) = payload.split_at(payload.len() - 1);
            (body, Some(last[0]))
        }
    };

    for &byte in body {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    if let Some(byte) = last {
        for shift in (0..correction).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }

    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_push_and_bit() {
        let mut bits = Bits::new();
        for &b in &[true, false, true, true, false, false, true, false, true] {
            bits.push(b);
        }
        assert_eq!(bits.len(), 9);
        assert!(bits.bit(0));
        assert!(!bits.bit(1));
        assert!(bits.bit(8));
    }

    #[test]
    fn test_display_and_parse() {
        let bits = Bits::from_str("010110").unwrap();
        assert_eq!(bits.to_string(), "010110");
        assert_eq!(bits.len(), 6);
    }

    #[test]
    fn test_parse_rejects_non_bit_characters() {
        assert_eq!(Bits::from_str("01x"), Err(ParseBitsError('x')));
    }

    #[test]
    fn test_extend_unaligned() {
        let mut bits = Bits::from_str("101").unwrap();
        bits.extend(&Bits::from_str("0011").unwrap());
        assert_eq!(bits.to_string(), "1010011");
    }

    #[test]
    fn test_extend_aligned_uses_storage() {
        let mut bits = Bits::from_str("10110010").unwrap();
        bits.extend(&Bits::from_str("111").unwrap());
        assert_eq!(bits.to_string(), "10110010111");
    }

    #[test]
    fn test_equality_ignores_stale_storage() {
        // A cleared-and-refilled buffer must equal a fresh one bit for bit
        let mut recycled = Bits::from_str("1111111").unwrap();
        recycled.clear();
        recycled.push(true);

        let mut fresh = Bits::new();
        fresh.push(true);
        assert_eq!(recycled, fresh);
    }

    #[test]
    fn test_pack_full_bytes() {
        let bits = Bits::from_str("1011001011110000").unwrap();
        let (packed, correction) = pack(&bits);
        assert_eq!(packed, vec![0b1011_0010, 0b1111_0000]);
        assert_eq!(correction, 0);
    }

    #[test]
    fn test_pack_partial_byte_pads_high_bits() {
        // "0001": payload lives in the low 4 bits of the final byte
        let bits = Bits::from_str("0001").unwrap();
        let (packed, correction) = pack(&bits);
        assert_eq!(packed, vec![0b0000_0001]);
        assert_eq!(correction, 4);
    }

    #[test]
    fn test_pack_empty() {
        let (packed, correction) = pack(&Bits::new());
        assert!(packed.is_empty());
        assert_eq!(correction, 0);
    }

    #[test]
    fn test_unpack_trims_final_byte_padding() {
        let bits = unpack(&[0b1010_1010, 0b0000_0101], 3).unwrap();
        assert_eq!(bits.to_string(), "10101010101");
    }

    #[test]
    fn test_unpack_zero_correction_keeps_everything() {
        let bits = unpack(&[0xFF, 0x00], 0).unwrap();
        assert_eq!(bits.to_string(), "1111111100000000");
    }

    #[test]
    fn test_unpack_truncated_stream() {
        let result = unpack(&[], 5);
        assert!(matches!(
            result,
            Err(crate::error::Error::BitIo(BitIoError::TruncatedStream { correction: 5 }))
        ));
    }

    #[test]
    fn test_pack_unpack_round_trip() {
        for text in ["1", "0001", "10110011", "101100111", "000000010010011"] {
            let bits = Bits::from_str(text).unwrap();
            let (packed, correction) = pack(&bits);
            let back = unpack(&packed, correction).unwrap();
            assert_eq!(back, bits, "round trip failed for {text}");
        }
    }

    #[test]
    fn test_correction_zero_iff_multiple_of_eight() {
        for len in 1..=32 {
            let mut bits = Bits::new();
            for i in 0..len {
                bits.push(i % 3 == 0);
            }
            let (_, correction) = pack(&bits);
            assert_eq!(correction == 0, len % 8 == 0);
            assert!(correction <= 7);
        }
    }
}
