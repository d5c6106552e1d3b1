//! Prefix-code tree construction.
//!
//! Builds the binary Huffman tree bottom-up from a frequency table: one leaf
//! per distinct symbol goes into a min-priority heap, and the two
//! lowest-priority nodes are repeatedly merged under a fresh internal node
//! until a single root remains. The tree is immutable after construction and
//! exists only long enough for the codeword table to be derived from it.
//!
//! # Tie-Breaking
//!
//! Heap order is `(frequency, lexicographically smallest symbol in the
//! subtree)`, so extraction order is fully deterministic across runs and
//! platforms. Of the two nodes merged, the larger one becomes the left ('0')
//! child and the smaller the right ('1') child; for frequencies `{A:3, B:1}`
//! this assigns A the codeword "0" and B "1".

use crate::error::{EncodeError, Result};
use crate::symbol::{FrequencyTable, Symbol};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A node of the prefix-code tree.
///
/// Leaves carry exactly one symbol; internal nodes carry the sum of their
/// children's frequencies and exclusively own both children.
#[derive(Debug, Clone)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Total frequency of the subtree rooted at this node.
    pub fn frequency(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => *freq,
        }
    }

    /// Number of leaves in the subtree (one per distinct symbol).
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// Heap entry: a subtree plus its priority key.
///
/// `key` is the lexicographically smallest symbol in the subtree; together
/// with the frequency it makes extraction order a total order.
struct HeapEntry {
    freq: u64,
    key: Symbol,
    node: Node,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.key == other.key
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.freq, &self.key).cmp(&(other.freq, &other.key))
    }
}

/// Build the prefix-code tree for a frequency table.
///
/// # Errors
/// - `EncodeError::TreeConstructionFailed` if the table is empty (defensive;
///   the frequency analyzer never produces one)
/// - `EncodeError::DegenerateAlphabet` if the table holds exactly one
///   distinct symbol, whose codeword would be empty and therefore
///   unrecoverable
pub fn build(frequencies: &FrequencyTable) -> Result<Node> {
    if frequencies.is_empty() {
        return Err(EncodeError::TreeConstructionFailed.into());
    }
    if frequencies.len() == 1 {
        if let Some(symbol) = frequencies.keys().next() {
            return Err(EncodeError::DegenerateAlphabet {
                symbol: symbol.bytes().to_vec(),
            }
            .into());
        }
    }

    let mut heap: BinaryHeap<Reverse<HeapEntry>> = frequencies
        .iter()
        .map(|(symbol, &freq)| {
            Reverse(HeapEntry {
                freq,
                key: symbol.clone(),
                node: Node::Leaf {
                    symbol: symbol.clone(),
                    freq,
                },
            })
        })
        .collect();

    while heap.len() >= 2 {
        if let (Some(Reverse(lo)), Some(Reverse(hi))) = (heap.pop(), heap.pop()) {
            let freq = lo.freq + hi.freq;
            let key = lo.key.min(hi.key);
            // Larger node left ('0'), smaller node right ('1')
            let node = Node::Internal {
                freq,
                left: Box::new(hi.node),
                right: Box::new(lo.node),
            };
            heap.push(Reverse(HeapEntry { freq, key, node }));
        }
    }

    match heap.pop() {
        Some(Reverse(entry)) => Ok(entry.node),
        None => Err(EncodeError::TreeConstructionFailed.into()),
    }
}
