//! blockhuff-core: Block-based Huffman compression engine
//!
//! This library compresses a byte buffer by grouping it into fixed-size
//! blocks (the final block may be shorter), building an optimal prefix code
//! from block frequencies, and emitting two artifacts: a bit-packed payload
//! and a human-readable codeword table. Given both artifacts it reconstructs
//! the original bytes exactly.
//!
//! # Architecture
//!
//! The engine is a strict pipeline with clear module boundaries:
//! - `symbol`: block symbol model and frequency analysis
//! - `tree`: prefix-code tree construction with deterministic tie-breaking
//! - `table`: codeword derivation and the text table artifact
//! - `bitio`: bit-sequence buffer, byte packing/unpacking with correction
//! - `codec`: the encode and decode pipelines
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and recoverable
//! - **No global state**: every parameter is threaded through calls, so
//!   concurrent invocations for different inputs share nothing
//! - **Deterministic**: identical input and block size always produce
//!   identical payload and table artifacts
//! - **No file I/O**: the engine works on byte slices; callers persist the
//!   artifacts
//!
//! # Example
//! ```
//! use blockhuff_core::{decode, encode};
//!
//! let outcome = encode(b"AAAB", 1).unwrap();
//! assert_eq!(outcome.stats.correction, 4);
//!
//! let decoded = decode(&outcome.payload, &outcome.table_text).unwrap();
//! assert_eq!(decoded.bytes, b"AAAB");
//! ```

pub mod bitio;
pub mod codec;
pub mod error;
pub mod symbol;
pub mod table;
pub mod tree;

// Re-export commonly used types
pub use codec::{decode, decode_with_table, encode, DecodeOutcome, DecodeStats, EncodeOutcome, EncodeStats};
pub use error::{Error, Result};
pub use table::{CodewordTable, EncodingParameters};
