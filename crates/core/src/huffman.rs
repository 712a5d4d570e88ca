//! Huffman codec: frequency tables, tree construction, prefix codes, and
//! payload compression/decompression.
//!
//! The decoder never receives the tree itself; it rebuilds one from the
//! frequency table carried in the stego frame. Construction is therefore
//! fully deterministic: nodes are merged lowest-weight first, and ties are
//! broken by creation order (leaves are created in ascending byte-value
//! order before any internal node). Two builds from the same table always
//! produce structurally identical trees.
//!
//! A one-symbol input yields the degenerate [`HuffmanTree::Single`]
//! variant, semantically a root with a single left child, so the sole
//! symbol still gets the non-empty code `0`.

use crate::bitio::{BitReader, BitWriter};
use crate::error::{HuffmanError, Result};
use std::collections::BinaryHeap;

/// Number of distinct byte symbols.
pub const SYMBOL_COUNT: usize = 256;

/// Longest representable prefix code, in bits.
///
/// A depth this large would need a total input weight beyond the 32-bit
/// size field, so the limit is unreachable through the public encode path;
/// it exists to keep [`Code`] honest against hand-built tables.
pub const MAX_CODE_LEN: u8 = 64;

/// Per-byte occurrence counts for a whole input.
///
/// Index is the byte value. Invariant: the sum of all entries equals the
/// input length, which the framing layer checks when it rebuilds a table
/// from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; SYMBOL_COUNT],
}

impl FrequencyTable {
    /// Count byte occurrences in `data`.
    ///
    /// Callers keep inputs below `u32::MAX` bytes (the framing layer
    /// rejects larger secrets before building a table).
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u32; SYMBOL_COUNT];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    /// Wrap counts read back from the wire.
    pub fn from_counts(counts: [u32; SYMBOL_COUNT]) -> Self {
        Self { counts }
    }

    /// Occurrence count for one byte value.
    pub fn count(&self, byte: u8) -> u32 {
        self.counts[byte as usize]
    }

    /// All 256 counts in byte-value order.
    pub fn counts(&self) -> &[u32; SYMBOL_COUNT] {
        &self.counts
    }

    /// Sum of all counts, i.e. the original input length.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Number of byte values with a nonzero count.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

/// A node of a fully populated Huffman tree.
///
/// Every internal node owns exactly two children; the degenerate
/// single-child root is represented by [`HuffmanTree::Single`] instead of
/// a nullable child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        byte: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    /// Sum of the subtree's leaf frequencies.
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }
}

/// A Huffman tree built from a frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanTree {
    /// All frequencies were zero: the empty input.
    Empty,
    /// Exactly one distinct byte. Stands for a synthetic root whose only
    /// (left) child is the leaf, so the symbol's code is the single bit 0.
    Single { byte: u8, weight: u64 },
    /// Two or more distinct bytes; the root is always internal.
    Full(Box<HuffNode>),
}

/// Heap entry wrapping a node with its tie-break key.
///
/// Ordering is inverted so `BinaryHeap` pops the minimum: lowest weight
/// first, and on equal weight the lowest creation sequence number. Leaves
/// are numbered in byte-value order before construction starts; each
/// internal node takes the next number when it is created.
#[derive(Debug)]
struct HeapEntry {
    weight: u64,
    seq: u16,
    node: HuffNode,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        (self.weight, self.seq) == (other.weight, other.seq)
    }
}

impl Eq for HeapEntry {}

impl HuffmanTree {
    /// Build the tree for `freq`.
    ///
    /// Deterministic for a given table; see the module docs for the
    /// tie-break rule. An all-zero table builds [`HuffmanTree::Empty`],
    /// which callers treat as the empty input, not an error.
    pub fn from_frequencies(freq: &FrequencyTable) -> Self {
        let mut heap = BinaryHeap::new();
        let mut next_seq: u16 = 0;

        for (byte, &count) in freq.counts().iter().enumerate() {
            if count > 0 {
                let weight = u64::from(count);
                heap.push(HeapEntry {
                    weight,
                    seq: next_seq,
                    node: HuffNode::Leaf {
                        byte: byte as u8,
                        weight,
                    },
                });
                next_seq += 1;
            }
        }

        if heap.is_empty() {
            return HuffmanTree::Empty;
        }

        if heap.len() == 1 {
            return match heap.pop() {
                Some(HeapEntry {
                    node: HuffNode::Leaf { byte, weight },
                    ..
                }) => HuffmanTree::Single { byte, weight },
                // Only leaves have been inserted at this point.
                _ => HuffmanTree::Empty,
            };
        }

        while heap.len() > 1 {
            let (Some(first), Some(second)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let weight = first.weight + second.weight;
            heap.push(HeapEntry {
                weight,
                seq: next_seq,
                node: HuffNode::Internal {
                    weight,
                    left: Box::new(first.node),
                    right: Box::new(second.node),
                },
            });
            next_seq += 1;
        }

        match heap.pop() {
            Some(HeapEntry { node, .. }) => HuffmanTree::Full(Box::new(node)),
            // The merge loop always leaves exactly one entry.
            None => HuffmanTree::Empty,
        }
    }

    /// Generate the prefix-code table for this tree.
    ///
    /// Walks depth-first, appending 0 for a left descent and 1 for a
    /// right descent. Bytes with zero frequency get no code. The
    /// resulting codes are prefix-free by construction.
    pub fn code_table(&self) -> Result<CodeTable> {
        let mut codes = [None; SYMBOL_COUNT];
        match self {
            HuffmanTree::Empty => {}
            HuffmanTree::Single { byte, .. } => {
                // The sole leaf hangs off the synthetic left edge.
                codes[*byte as usize] = Some(Code { bits: 0, len: 1 });
            }
            HuffmanTree::Full(root) => assign_codes(root, 0, 0, &mut codes)?,
        }
        Ok(CodeTable { codes })
    }

    /// Decode exactly `expected` bytes by walking the tree bit-by-bit.
    ///
    /// Bits are consumed lazily from `reader`; once `expected` bytes have
    /// been emitted no further bits are read. Running dry first fails with
    /// `IncompleteStream`; a bit that leads to no node fails with
    /// `InvalidCode`. On error no partial output is returned.
    pub fn decompress(&self, reader: &mut BitReader<'_>, expected: usize) -> Result<Vec<u8>> {
        if expected == 0 {
            return Ok(Vec::new());
        }

        let mut out = Vec::with_capacity(expected);
        match self {
            // No tree to walk; only reachable if the caller skipped the
            // frequency/size consistency check.
            HuffmanTree::Empty => {
                return Err(HuffmanError::InvalidCode {
                    position: reader.position(),
                }
                .into());
            }
            HuffmanTree::Single { byte, .. } => {
                while out.len() < expected {
                    match reader.read_bit() {
                        None => {
                            return Err(HuffmanError::IncompleteStream {
                                decoded: out.len(),
                                expected,
                            }
                            .into());
                        }
                        // The encoder only ever emits 0 for a one-symbol
                        // tree; a set bit has no node to land on.
                        Some(true) => {
                            return Err(HuffmanError::InvalidCode {
                                position: reader.position() - 1,
                            }
                            .into());
                        }
                        Some(false) => out.push(*byte),
                    }
                }
            }
            HuffmanTree::Full(root) => {
                while out.len() < expected {
                    out.push(walk_symbol(root, reader, out.len(), expected)?);
                }
            }
        }
        Ok(out)
    }
}

/// Walk one codeword from the root to a leaf, returning its byte.
fn walk_symbol(
    root: &HuffNode,
    reader: &mut BitReader<'_>,
    decoded: usize,
    expected: usize,
) -> Result<u8> {
    let mut node = root;
    loop {
        let bit = reader
            .read_bit()
            .ok_or(HuffmanError::IncompleteStream { decoded, expected })?;
        let next = match node {
            HuffNode::Internal { left, right, .. } => {
                if bit {
                    right.as_ref()
                } else {
                    left.as_ref()
                }
            }
            // A walk position is always internal: codewords restart at the
            // root, and a two-symbol tree's root is internal.
            HuffNode::Leaf { .. } => {
                return Err(HuffmanError::InvalidCode {
                    position: reader.position(),
                }
                .into());
            }
        };
        if let HuffNode::Leaf { byte, .. } = next {
            return Ok(*byte);
        }
        node = next;
    }
}

fn assign_codes(
    node: &HuffNode,
    bits: u64,
    len: u8,
    codes: &mut [Option<Code>; SYMBOL_COUNT],
) -> Result<()> {
    match node {
        HuffNode::Leaf { byte, .. } => {
            codes[*byte as usize] = Some(Code { bits, len });
            Ok(())
        }
        HuffNode::Internal { left, right, .. } => {
            if len >= MAX_CODE_LEN {
                return Err(HuffmanError::CodeTooLong {
                    length: len as usize + 1,
                }
                .into());
            }
            assign_codes(left, bits << 1, len + 1, codes)?;
            assign_codes(right, (bits << 1) | 1, len + 1, codes)
        }
    }
}

/// A single prefix code: the low `len` bits of `bits`, written most
/// significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

/// Mapping from byte value to its optional prefix code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; SYMBOL_COUNT],
}

impl CodeTable {
    /// The code assigned to `byte`, if it occurred in the input.
    pub fn code(&self, byte: u8) -> Option<Code> {
        self.codes[byte as usize]
    }

    /// All assigned codes with their byte values.
    pub fn iter_present(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(byte, code)| code.map(|c| (byte as u8, c)))
    }

    /// Total payload size in bits for an input with these frequencies.
    ///
    /// Computed up front so the payload buffer can be sized exactly. A
    /// nonzero count without a code is a fatal `MissingCode`.
    pub fn payload_bit_count(&self, freq: &FrequencyTable) -> Result<u64> {
        let mut total = 0u64;
        for (byte, &count) in freq.counts().iter().enumerate() {
            if count == 0 {
                continue;
            }
            let code = self
                .code(byte as u8)
                .ok_or(HuffmanError::MissingCode { byte: byte as u8 })?;
            total += u64::from(count) * u64::from(code.len);
        }
        Ok(total)
    }

    /// Append the code bits for every input byte, in order, to `out`.
    pub fn compress_into(&self, data: &[u8], out: &mut BitWriter) -> Result<()> {
        for &byte in data {
            let code = self.code(byte).ok_or(HuffmanError::MissingCode { byte })?;
            out.write_bits(code.bits, u32::from(code.len));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn table_for(data: &[u8]) -> (FrequencyTable, HuffmanTree, CodeTable) {
        let freq = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&freq);
        let table = tree.code_table().expect("code table");
        (freq, tree, table)
    }

    fn round_trip(data: &[u8]) -> Vec<u8> {
        let (freq, tree, table) = table_for(data);
        let mut writer = BitWriter::new();
        table.compress_into(data, &mut writer).expect("compress");

        let expected_bits = table.payload_bit_count(&freq).expect("bit count");
        assert_eq!(writer.bit_len(), expected_bits);

        let (bytes, len) = writer.into_parts();
        let mut reader = BitReader::with_bit_len(&bytes, len);
        tree.decompress(&mut reader, data.len()).expect("decompress")
    }

    #[test]
    fn empty_table_builds_empty_tree() {
        let freq = FrequencyTable::from_bytes(b"");
        assert_eq!(freq.total(), 0);
        assert_eq!(HuffmanTree::from_frequencies(&freq), HuffmanTree::Empty);
    }

    #[test]
    fn empty_tree_has_no_codes() {
        let (_, _, table) = table_for(b"");
        assert_eq!(table.iter_present().count(), 0);
    }

    #[test]
    fn single_symbol_gets_one_bit_code() {
        let data = vec![0x41u8; 1000];
        let (freq, tree, table) = table_for(&data);

        assert_eq!(
            tree,
            HuffmanTree::Single {
                byte: 0x41,
                weight: 1000
            }
        );
        assert_eq!(table.code(0x41), Some(Code { bits: 0, len: 1 }));
        assert_eq!(table.iter_present().count(), 1);

        // One bit per input byte.
        assert_eq!(table.payload_bit_count(&freq).unwrap(), 1000);
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn two_symbols_get_one_bit_each() {
        let data = [0x41, 0x41, 0x42];
        let (freq, _, table) = table_for(&data);

        assert_eq!(table.code(0x41).unwrap().len, 1);
        assert_eq!(table.code(0x42).unwrap().len, 1);
        assert_eq!(table.payload_bit_count(&freq).unwrap(), 3);
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn root_weight_equals_total() {
        let data = b"abracadabra, a very compressible banana cabana";
        let (freq, tree, _) = table_for(data);
        match tree {
            HuffmanTree::Full(root) => assert_eq!(root.weight(), freq.total()),
            other => panic!("expected full tree, got {other:?}"),
        }
    }

    #[test]
    fn construction_is_deterministic() {
        // Plenty of equal frequencies to exercise the tie-break.
        let data: Vec<u8> = (0u16..256).map(|b| b as u8).cycle().take(4096).collect();
        let freq = FrequencyTable::from_bytes(&data);

        let tree_a = HuffmanTree::from_frequencies(&freq);
        let tree_b = HuffmanTree::from_frequencies(&freq);
        assert_eq!(tree_a, tree_b);
        assert_eq!(
            tree_a.code_table().unwrap(),
            tree_b.code_table().unwrap()
        );
    }

    #[test]
    fn codes_are_prefix_free() {
        let data = b"the quick brown fox jumps over the lazy dog 0123456789";
        let (_, _, table) = table_for(data);

        let codes: Vec<(u8, Code)> = table.iter_present().collect();
        assert!(codes.len() > 2);

        for (byte_a, a) in &codes {
            for (byte_b, b) in &codes {
                if byte_a == byte_b {
                    continue;
                }
                let is_prefix =
                    a.len <= b.len && (b.bits >> (b.len - a.len)) == a.bits;
                assert!(
                    !is_prefix,
                    "code of {byte_a:#04x} is a prefix of {byte_b:#04x}"
                );
            }
        }
    }

    #[test]
    fn code_length_equals_tree_depth() {
        let data = b"aaaaaaaabbbbccd";
        let (_, tree, table) = table_for(data);

        fn check(node: &HuffNode, depth: u8, table: &CodeTable) {
            match node {
                HuffNode::Leaf { byte, .. } => {
                    assert_eq!(table.code(*byte).unwrap().len, depth);
                }
                HuffNode::Internal { left, right, .. } => {
                    check(left, depth + 1, table);
                    check(right, depth + 1, table);
                }
            }
        }

        match &tree {
            HuffmanTree::Full(root) => check(root, 0, &table),
            other => panic!("expected full tree, got {other:?}"),
        }
    }

    #[test]
    fn all_symbols_round_trip() {
        let data: Vec<u8> = (0u16..256).map(|b| b as u8).collect();
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn skewed_frequencies_round_trip() {
        let mut data = vec![b'x'; 5000];
        data.extend_from_slice(b"rare bytes: \x00\x01\x02\xff");
        assert_eq!(round_trip(&data), data);
    }

    #[test]
    fn single_symbol_rejects_set_bit() {
        let data = vec![0x41u8; 4];
        let (_, tree, _) = table_for(&data);

        // Valid stream would be 0000; flip the third bit.
        let stream = [0b0010_0000u8];
        let mut reader = BitReader::with_bit_len(&stream, 4);
        let err = tree.decompress(&mut reader, 4).unwrap_err();
        assert!(matches!(
            err,
            Error::Huffman(HuffmanError::InvalidCode { position: 2 })
        ));
    }

    #[test]
    fn truncated_stream_is_incomplete() {
        let data = b"hello hello hello";
        let (_, tree, table) = table_for(data);

        let mut writer = BitWriter::new();
        table.compress_into(data, &mut writer).unwrap();
        let (bytes, len) = writer.into_parts();

        // Offer three fewer bits than the payload needs.
        let mut reader = BitReader::with_bit_len(&bytes, len - 3);
        let err = tree.decompress(&mut reader, data.len()).unwrap_err();
        assert!(matches!(
            err,
            Error::Huffman(HuffmanError::IncompleteStream { .. })
        ));
    }

    #[test]
    fn decompress_zero_bytes_reads_nothing() {
        let data = b"anything";
        let (_, tree, _) = table_for(data);

        let stream = [0xFFu8];
        let mut reader = BitReader::new(&stream);
        assert_eq!(tree.decompress(&mut reader, 0).unwrap(), Vec::<u8>::new());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn frequency_table_accessors() {
        let freq = FrequencyTable::from_bytes(b"aab");
        assert_eq!(freq.count(b'a'), 2);
        assert_eq!(freq.count(b'b'), 1);
        assert_eq!(freq.count(b'c'), 0);
        assert_eq!(freq.total(), 3);
        assert_eq!(freq.distinct_symbols(), 2);
    }
}
