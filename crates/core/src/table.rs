//! Codeword table: derivation, artifact serialization, and parsing.
//!
//! The table is the only state that crosses the encode/decode boundary. It is
//! persisted as a line-oriented text artifact:
//!
//! ```text
//! +--------------------------+
//! | correction    (integer)  |  meaningful low bits of the final payload byte, 0-7
//! +--------------------------+
//! | block_size    (integer)  |  >= 1
//! +--------------------------+
//! | <code>_<byte>_<byte>...  |  one line per symbol, sorted by symbol bytes
//! | ...                      |
//! +--------------------------+
//! ```
//!
//! Codewords are '0'/'1' strings; symbol bytes are decimal 0-255; the field
//! separator is `_`, which never occurs inside a codeword or an integer.
//! Entry order is not semantically significant, but the sort keeps artifacts
//! reproducible.

use crate::bitio::Bits;
use crate::error::{EncodeError, Result, TableError};
use crate::symbol::Symbol;
use crate::tree::Node;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// Field separator in table artifact entry lines.
pub const FIELD_SEPARATOR: char = '_';

/// Parameters persisted alongside the table, threaded through pack/unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingParameters {
    /// Configured symbol block size, >= 1
    pub block_size: usize,
    /// Meaningful low-order bits of the final payload byte (0 = fully used)
    pub correction: u8,
}

/// Bijective mapping between symbols and prefix-free codewords.
///
/// Built once (from a tree or a parsed artifact) and read-only afterward.
/// Prefix-freedom is guaranteed by construction: every symbol is exactly one
/// leaf of a binary tree, so no codeword can be a prefix of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordTable {
    codes: BTreeMap<Symbol, Bits>,
}

impl CodewordTable {
    /// Derive the table from a prefix-code tree.
    ///
    /// Explicit stack-based traversal: '0' accumulates on descent left, '1'
    /// on descent right, and each leaf records one entry. Depth is bounded by
    /// the number of distinct symbols, so no recursion is needed.
    ///
    /// # Errors
    /// Returns `EncodeError::EmptyCodewordTable` if the traversal records no
    /// entries (defensive; the tree builder never yields an empty tree).
    pub fn from_tree(root: &Node) -> Result<Self> {
        let mut codes = BTreeMap::new();
        let mut stack: Vec<(&Node, Bits)> = vec![(root, Bits::new())];

        while let Some((node, code)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes.insert(symbol.clone(), code);
                }
                Node::Internal { left, right, .. } => {
                    let mut left_code = code.clone();
                    left_code.push(false);
                    let mut right_code = code;
                    right_code.push(true);
                    stack.push((left, left_code));
                    stack.push((right, right_code));
                }
            }
        }

        if codes.is_empty() {
            return Err(EncodeError::EmptyCodewordTable.into());
        }
        Ok(Self { codes })
    }

    /// Number of entries (distinct symbols).
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Look up the codeword for a symbol by its bytes.
    pub fn get(&self, symbol: &[u8]) -> Option<&Bits> {
        self.codes.get(symbol)
    }

    /// Iterate entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &Bits)> {
        self.codes.iter()
    }

    /// Build the reverse (codeword -> symbol) view.
    ///
    /// Built once per decode session and queried once per examined bit, so
    /// lookups must be map lookups, not scans.
    pub fn reverse(&self) -> HashMap<&Bits, &Symbol> {
        self.codes.iter().map(|(s, c)| (c, s)).collect()
    }

    /// Render the table and its parameters as the text artifact.
    pub fn serialize(&self, params: &EncodingParameters) -> String {
        let mut lines = Vec::with_capacity(self.codes.len() + 2);
        lines.push(params.correction.to_string());
        lines.push(params.block_size.to_string());

        for (symbol, code) in &self.codes {
            let mut line = code.to_string();
            for &byte in symbol.bytes() {
                line.push(FIELD_SEPARATOR);
                line.push_str(&byte.to_string());
            }
            lines.push(line);
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Parse a text artifact back into a table and its parameters.
    ///
    /// # Errors
    /// - `TableError::Corrupt` for a missing/malformed parameter line, a line
    ///   that does not split into a codeword and at least one byte value, a
    ///   codeword with non-bit characters, a byte outside 0-255, or a
    ///   duplicate symbol
    /// - `TableError::InvalidCorrection` / `TableError::InvalidBlockSize` for
    ///   out-of-range parameters
    /// - `TableError::Empty` if no entry lines follow the parameters
    pub fn parse(text: &str) -> Result<(Self, EncodingParameters)> {
        let mut lines = text.lines().enumerate();

        let correction = parse_parameter(lines.next(), 1, "correction")?;
        if !(0..=7).contains(&correction) {
            return Err(TableError::InvalidCorrection(correction).into());
        }

        let block_size = parse_parameter(lines.next(), 2, "block size")?;
        if block_size < 1 {
            return Err(TableError::InvalidBlockSize(block_size).into());
        }

        let mut codes = BTreeMap::new();
        for (index, line) in lines {
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split(FIELD_SEPARATOR);
            let code_text = fields.next().unwrap_or("");
            if code_text.is_empty() {
                return Err(corrupt(line_no, "entry has an empty codeword"));
            }
            let code = Bits::from_str(code_text)
                .map_err(|e| corrupt(line_no, &format!("bad codeword: {e}")))?;

            let mut bytes = Vec::new();
            for field in fields {
                let value: u8 = field.parse().map_err(|_| {
                    corrupt(line_no, &format!("byte value {field:?} is not in 0..=255"))
                })?;
                bytes.push(value);
            }
            if bytes.is_empty() {
                return Err(corrupt(line_no, "entry has no symbol bytes"));
            }

            if codes.insert(Symbol::new(bytes), code).is_some() {
                return Err(corrupt(line_no, "duplicate symbol entry"));
            }
        }

        if codes.is_empty() {
            return Err(TableError::Empty.into());
        }

        Ok((
            Self { codes },
            EncodingParameters {
                block_size: block_size as usize,
                correction: correction as u8,
            },
        ))
    }
}

fn parse_parameter(
    line: Option<(usize, &str)>,
    line_no: usize,
    name: &str,
) -> Result<i64> {
    let (_, raw) = line.ok_or_else(|| corrupt(line_no, &format!("missing {name} line")))?;
    raw.trim()
        .parse()
        .map_err(|_| corrupt(line_no, &format!("{name} {raw:?} is not an integer")))
}

fn corrupt(line: usize, reason: &str) -> crate::error::Error {
    TableError::Corrupt {
        line,
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::symbol::analyze;
    use crate::tree;

    fn table_for(input: &[u8], block_size: usize) -> CodewordTable {
        let freqs = analyze(input, block_size).unwrap();
        let root = tree::build(&freqs).unwrap();
        CodewordTable::from_tree(&root).unwrap()
    }

    #[test]
    fn test_two_symbol_codewords() {
        let table = table_for(b"AAAB", 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b"A").unwrap().to_string(), "0");
        assert_eq!(table.get(b"B").unwrap().to_string(), "1");
    }

    #[test]
    fn test_prefix_freedom() {
        let table = table_for(b"aaaabbbccd aaabbccdde!", 1);
        let entries: Vec<String> = table.iter().map(|(_, c)| c.to_string()).collect();
        for (i, a) in entries.iter().enumerate() {
            for (j, b) in entries.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a.as_str()), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_frequent_symbols_get_short_codes() {
        let table = table_for(b"aaaaaaaaaaaaaaaabbbbc", 1);
        let a_len = table.get(b"a").unwrap().len();
        let b_len = table.get(b"b").unwrap().len();
        let c_len = table.get(b"c").unwrap().len();
        assert!(a_len <= b_len);
        assert!(b_len <= c_len);
    }

    #[test]
    fn test_serialize_format() {
        let table = table_for(b"AAAB", 1);
        let params = EncodingParameters {
            block_size: 1,
            correction: 4,
        };
        // A=65 gets "0", B=66 gets "1"
        assert_eq!(table.serialize(&params), "4\n1\n0_65\n1_66\n");
    }

    #[test]
    fn test_serialize_multi_byte_symbols() {
        let table = table_for(b"ababcd", 2);
        let text = table.serialize(&EncodingParameters {
            block_size: 2,
            correction: 0,
        });
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "0");
        assert_eq!(lines[1], "2");
        // "ab" = 97,98 repeats twice and sorts before "cd" = 99,100
        assert_eq!(lines[2], "0_97_98");
        assert_eq!(lines[3], "1_99_100");
    }

    #[test]
    fn test_parse_round_trip() {
        let table = table_for(b"the quick brown fox jumps over the lazy dog", 1);
        let params = EncodingParameters {
            block_size: 1,
            correction: 3,
        };
        let (parsed, parsed_params) = CodewordTable::parse(&table.serialize(&params)).unwrap();
        assert_eq!(parsed, table);
        assert_eq!(parsed_params, params);
    }

    #[test]
    fn test_parse_missing_parameters() {
        let result = CodewordTable::parse("3\n");
        assert!(matches!(
            result,
            Err(Error::Table(TableError::Corrupt { line: 2, .. }))
        ));
    }

    #[test]
    fn test_parse_non_integer_correction() {
        let result = CodewordTable::parse("x\n1\n0_65\n1_66\n");
        assert!(matches!(
            result,
            Err(Error::Table(TableError::Corrupt { line: 1, .. }))
        ));
    }

    #[test]
    fn test_parse_correction_out_of_range() {
        let result = CodewordTable::parse("8\n1\n0_65\n1_66\n");
        assert!(matches!(
            result,
            Err(Error::Table(TableError::InvalidCorrection(8)))
        ));
    }

    #[test]
    fn test_parse_block_size_below_one() {
        let result = CodewordTable::parse("0\n0\n0_65\n1_66\n");
        assert!(matches!(
            result,
            Err(Error::Table(TableError::InvalidBlockSize(0)))
        ));
    }

    #[test]
    fn test_parse_bad_codeword_character() {
        let result = CodewordTable::parse("0\n1\n0z_65\n1_66\n");
        assert!(matches!(
            result,
            Err(Error::Table(TableError::Corrupt { line: 3, .. }))
        ));
    }

    #[test]
    fn test_parse_byte_out_of_range() {
        let result = CodewordTable::parse("0\n1\n0_65\n1_256\n");
        assert!(matches!(
            result,
            Err(Error::Table(TableError::Corrupt { line: 4, .. }))
        ));
    }

    #[test]
    fn test_parse_entry_without_bytes() {
        let result = CodewordTable::parse("0\n1\n0_65\n1\n");
        assert!(matches!(
            result,
            Err(Error::Table(TableError::Corrupt { line: 4, .. }))
        ));
    }

    #[test]
    fn test_parse_duplicate_symbol() {
        let result = CodewordTable::parse("0\n1\n0_65\n1_65\n");
        assert!(matches!(
            result,
            Err(Error::Table(TableError::Corrupt { line: 4, .. }))
        ));
    }

    #[test]
    fn test_parse_no_entries() {
        let result = CodewordTable::parse("0\n1\n");
        assert!(matches!(result, Err(Error::Table(TableError::Empty))));
    }

    #[test]
    fn test_reverse_view() {
        let table = table_for(b"AAAB", 1);
        let reverse = table.reverse();
        assert_eq!(reverse.len(), 2);
        let code = table.get(b"A").unwrap();
        assert_eq!(reverse[code].bytes(), b"A");
    }
}
