//! Encoder and decoder pipelines.
//!
//! Both pipelines are strict: each stage fully consumes its input and
//! produces its output before the next stage starts, and any empty
//! intermediate result aborts before the next stage runs. All state is owned
//! by the call; concurrent invocations for different inputs share nothing.
//!
//! Encoding: analyze -> build tree -> derive table -> concatenate codewords
//! in file order -> pack -> serialize table. The frequency table and the
//! tree are discarded once the codeword table exists.
//!
//! Decoding: parse table -> unpack with the loaded correction -> greedy
//! left-to-right probe decode. The probe accumulates bits and is checked for
//! an exact codeword match after every bit; prefix-freedom guarantees at most
//! one codeword can ever match. Trailing bits that match no codeword are
//! dropped, and the count is reported in [`DecodeStats`] so callers can
//! flag it.

use crate::bitio::{self, Bits};
use crate::error::{DecodeError, EncodeError, Result};
use crate::symbol;
use crate::table::{CodewordTable, EncodingParameters};
use crate::tree;

/// Counters describing one encoding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStats {
    /// Bytes read from the input
    pub input_bytes: usize,
    /// Symbols the input split into (including a shorter tail symbol)
    pub symbol_count: u64,
    /// Distinct symbols, equal to the number of table entries
    pub distinct_symbols: usize,
    /// Logical bits before packing; equals the sum of codeword length times
    /// frequency over all symbols
    pub payload_bits: usize,
    /// Meaningful low bits of the final payload byte (0 = fully used)
    pub correction: u8,
}

/// Result of a successful encode: the two output artifacts plus stats.
#[derive(Debug, Clone)]
pub struct EncodeOutcome {
    /// Bit-packed payload
    pub payload: Vec<u8>,
    /// Serialized codeword-table artifact
    pub table_text: String,
    pub stats: EncodeStats,
}

/// Counters describing one decoding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    /// Logical bits after unpacking and padding trim
    pub payload_bits: usize,
    /// Bytes reconstructed
    pub decoded_bytes: usize,
    /// Bits left in the probe at end of stream that matched no codeword.
    /// Non-zero means the payload ended mid-codeword; the bits are dropped
    /// silently but surfaced here so callers can warn.
    pub trailing_bits_dropped: usize,
}

/// Result of a successful decode.
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    /// Reconstructed bytes
    pub bytes: Vec<u8>,
    pub stats: DecodeStats,
}

/// Compress `input` with the given block size.
///
/// Produces the packed payload and the table artifact; the caller owns
/// persisting both. No partial artifacts exist on failure because the core
/// writes no files.
///
/// # Errors
/// - `Error::Config` for a zero block size
/// - `EncodeError::EmptyInput` for an empty input
/// - `EncodeError::DegenerateAlphabet` when the input has one distinct symbol
/// - `EncodeError::TreeConstructionFailed`, `EncodeError::EmptyCodewordTable`,
///   `EncodeError::EmptyEncodedOutput` for empty intermediates (defensive)
pub fn encode(input: &[u8], block_size: usize) -> Result<EncodeOutcome> {
    let frequencies = symbol::analyze(input, block_size)?;
    let symbol_count: u64 = frequencies.values().sum();
    let distinct_symbols = frequencies.len();

    let root = tree::build(&frequencies)?;
    let table = CodewordTable::from_tree(&root)?;

    let mut stream = Bits::new();
    for block in symbol::blocks(input, block_size) {
        match table.get(block) {
            Some(code) => stream.extend(code),
            None => {
                return Err(EncodeError::MissingCodeword {
                    symbol: block.to_vec(),
                }
                .into())
            }
        }
    }
    if stream.is_empty() {
        return Err(EncodeError::EmptyEncodedOutput.into());
    }

    let payload_bits = stream.len();
    let (payload, correction) = bitio::pack(&stream);
    let params = EncodingParameters {
        block_size,
        correction,
    };
    let table_text = table.serialize(&params);

    Ok(EncodeOutcome {
        payload,
        table_text,
        stats: EncodeStats {
            input_bytes: input.len(),
            symbol_count,
            distinct_symbols,
            payload_bits,
            correction,
        },
    })
}

/// Reconstruct the original bytes from a payload and its table artifact.
///
/// # Errors
/// - `TableError::Corrupt` / `TableError::Empty` for a bad artifact
/// - `BitIoError::TruncatedStream` for a correction with no payload byte
/// - `DecodeError::EmptyDecodedOutput` if nothing decodes
pub fn decode(payload: &[u8], table_text: &str) -> Result<DecodeOutcome> {
    let (table, params) = CodewordTable::parse(table_text)?;
    decode_with_table(payload, &table, &params)
}

/// Decode helper for callers that already hold parsed parameters and a
/// table, e.g. when decoding several payloads against one artifact.
pub fn decode_with_table(
    payload: &[u8],
    table: &CodewordTable,
    params: &EncodingParameters,
) -> Result<DecodeOutcome> {
    let reverse = table.reverse();
    let stream = bitio::unpack(payload, params.correction)?;
    let payload_bits = stream.len();

    let mut bytes: Vec<u8> = Vec::new();
    let mut probe = Bits::new();
    for bit in stream.iter() {
        probe.push(bit);
        if let Some(symbol) = reverse.get(&probe) {
            bytes.extend_from_slice(symbol.bytes());
            probe.clear();
        }
    }
    let trailing_bits_dropped = probe.len();

    if bytes.is_empty() {
        return Err(DecodeError::EmptyDecodedOutput.into());
    }

    let decoded_bytes = bytes.len();
    Ok(DecodeOutcome {
        bytes,
        stats: DecodeStats {
            payload_bits,
            decoded_bytes,
            trailing_bits_dropped,
        },
    })
}
