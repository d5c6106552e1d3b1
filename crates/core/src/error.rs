//! Error types for the blockhuff engine.
//!
//! All operations return structured errors rather than panicking.
//! Each pipeline stage detects its own failures and propagates them upward;
//! no stage retries, and a failure aborts the whole pipeline.

use thiserror::Error;

/// Top-level error type for all operations in the engine.
///
/// Each variant corresponds to a specific failure domain:
/// - Encode: frequency analysis, tree construction, codeword emission
/// - Decode: reconstruction from payload + table
/// - Table: codeword-table artifact serialization/parsing
/// - Bit I/O: packing/unpacking the logical bit stream
/// - I/O: file system operations (surfaced by callers that do file I/O)
#[derive(Debug, Error)]
pub enum Error {
    /// Encoding pipeline error (e.g., empty input, degenerate alphabet)
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Decoding pipeline error (e.g., nothing decoded)
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Codeword-table artifact error (corrupt or empty table)
    #[error("table error: {0}")]
    Table(#[from] TableError),

    /// Bit packing/unpacking error
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (e.g., block size of zero)
    #[error("configuration error: {0}")]
    Config(String),
}

/// Encoding pipeline errors.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The input contained zero symbols
    #[error("empty input: no symbols to encode")]
    EmptyInput,

    /// An empty frequency table reached the tree stage
    #[error("tree construction failed: empty frequency table")]
    TreeConstructionFailed,

    /// Exactly one distinct symbol: its codeword would be empty, making the
    /// input unencodable
    #[error("degenerate alphabet: single distinct symbol {symbol:?} cannot be coded")]
    DegenerateAlphabet { symbol: Vec<u8> },

    /// Tree traversal produced no codewords
    #[error("empty codeword table")]
    EmptyCodewordTable,

    /// Codeword concatenation produced zero bits
    #[error("empty encoded output")]
    EmptyEncodedOutput,

    /// A symbol read from the input has no codeword (table/input mismatch)
    #[error("no codeword for symbol {symbol:?}")]
    MissingCodeword { symbol: Vec<u8> },
}

/// Decoding pipeline errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Decoding produced zero bytes
    #[error("empty decoded output")]
    EmptyDecodedOutput,
}

/// Codeword-table artifact errors.
#[derive(Debug, Error)]
pub enum TableError {
    /// A line of the artifact could not be parsed
    #[error("corrupt table at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    /// The artifact parsed but contained no codeword entries
    #[error("empty codeword table")]
    Empty,

    /// Correction value outside 0..=7
    #[error("invalid correction {0}: must be in 0..=7")]
    InvalidCorrection(i64),

    /// Block size below 1
    #[error("invalid block size {0}: must be at least 1")]
    InvalidBlockSize(i64),
}

/// Bit-level packing/unpacking errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// A non-zero correction implies a final partial byte, but the payload
    /// has no bytes to trim
    #[error("truncated bit stream: correction {correction} with empty payload")]
    TruncatedStream { correction: u8 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
