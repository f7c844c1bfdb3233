//! Semi-adaptive Huffman coding.
//!
//! The tree is built from the actual byte frequencies of the input and shipped in front of
//! the encoded symbols, so every artifact is two guarded blocks:
//!
//! 1. the tree in pre-order, one `0` per internal node and `1` plus eight value bits per
//!    leaf. The root's own `0` is dropped since the root is always internal.
//! 2. the concatenated codes of every input byte.
//!
//! The decoder finds the end of the first block by walking the tree, there is no length
//! field.

use std::collections::HashMap;

use log::{debug, error, trace};

use crate::bits::{BitReader, BitWriter};
use crate::codec::{Codec, Compressed};
use crate::error::CodecError;
use crate::tree::{Node, PriorityTree, TreeStrategy};

pub type CodeTable = HashMap<u8, Vec<bool>>;
pub type FreqTable = HashMap<u8, u64>;

/// A valid tree over 256 leaves is never deeper than this.
const MAX_TREE_DEPTH: usize = 256;

#[derive(Clone, Copy, Debug, Default)]
pub struct Huffman;

/// Sums weights on merge and records the pre-order serialization on visit.
#[derive(Default)]
struct TreeEncoder {
    bits: Vec<bool>,
}

impl TreeStrategy for TreeEncoder {
    fn create_internal_node(&mut self, left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn on_visit(&mut self, node: &Node) {
        match node {
            Node::Leaf { byte, .. } => {
                self.bits.push(true);
                self.bits.extend((0..8).rev().map(|shift| (byte >> shift) & 1 == 1));
            }
            Node::Internal { .. } => self.bits.push(false),
        }
    }
}

pub fn count_frequencies(data: &[u8]) -> FreqTable {
    let mut freq = FreqTable::new();
    for &byte in data {
        *freq.entry(byte).or_insert(0) += 1;
    }
    freq
}

/// Shannon entropy of the table, in bits per symbol.
pub fn entropy_from_freq(freq: &FreqTable) -> f64 {
    let total: u64 = freq.values().sum();
    if total == 0 {
        return 0.0;
    }
    let total_f = total as f64;

    let entropy: f64 = freq
        .values()
        .map(|&count| {
            let p = count as f64 / total_f;
            -p * p.log2()
        })
        .sum();

    debug!(
        "Calculated entropy: {:.4} bits/symbol (Total samples: {})",
        entropy, total
    );
    entropy
}

pub fn build_huffman_tree(frequencies: &FreqTable) -> Option<PriorityTree> {
    debug!(
        "Building Huffman Tree from {} unique symbols",
        frequencies.len()
    );

    let mut freq_vec: Vec<_> = frequencies.iter().collect();
    freq_vec.sort_by_key(|(byte, _)| **byte);

    let leaves = freq_vec
        .into_iter()
        .map(|(&byte, &freq)| Node::leaf(byte, freq));
    PriorityTree::build(leaves, &mut TreeEncoder::default())
}

pub fn build_code_table(node: &Node, prefix: Vec<bool>, table: &mut CodeTable) {
    match node {
        Node::Leaf { byte, .. } => {
            trace!("Assigning code to byte {:#04x}: {:?}", byte, prefix);
            table.insert(*byte, prefix);
        }
        Node::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push(false);
            build_code_table(left, left_prefix, table);

            let mut right_prefix = prefix;
            right_prefix.push(true);
            build_code_table(right, right_prefix, table);
        }
    }
}

/// Codes for every leaf of `tree`. A lone leaf gets the one-bit code `0`.
pub fn derive_codes(tree: &PriorityTree) -> CodeTable {
    let mut table = CodeTable::new();
    match tree.root() {
        Node::Leaf { byte, .. } => {
            table.insert(*byte, vec![false]);
        }
        root => build_code_table(root, Vec::new(), &mut table),
    }
    table
}

/// Pre-order bits of `tree`, without the root's marker.
///
/// A lone leaf is written as an internal root holding that leaf twice, which matches its
/// one-bit code.
pub fn serialize_tree(tree: &PriorityTree) -> Vec<bool> {
    let mut encoder = TreeEncoder::default();
    tree.traverse_preorder(&mut encoder);

    if tree.root().is_leaf() {
        let mut bits = encoder.bits.clone();
        bits.extend(encoder.bits);
        bits
    } else {
        encoder.bits.split_off(1)
    }
}

/// Reads a tree written by [`serialize_tree`], leaving `reader` on the first bit after it.
pub fn rebuild_tree(reader: &mut BitReader) -> Result<PriorityTree, CodecError> {
    let left = read_subtree(reader, 1)?;
    let right = read_subtree(reader, 1)?;
    Ok(PriorityTree::from_root(Node::Internal {
        weight: 0,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

fn read_subtree(reader: &mut BitReader, depth: usize) -> Result<Node, CodecError> {
    if depth > MAX_TREE_DEPTH {
        return Err(CodecError::Malformed("tree is too deep"));
    }

    if reader.read_bit()? {
        let byte = reader.read_bits(8)? as u8;
        return Ok(Node::leaf(byte, 0));
    }

    let left = read_subtree(reader, depth + 1)?;
    let right = read_subtree(reader, depth + 1)?;
    Ok(Node::Internal {
        weight: 0,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn encode_data(data: &[u8], freq: &FreqTable, code_table: &CodeTable) -> Vec<u8> {
    let payload_bits: usize = freq
        .iter()
        .map(|(byte, &count)| count as usize * code_table.get(byte).map_or(0, Vec::len))
        .sum();
    debug!("Encoded data: {} bits", payload_bits);

    let mut writer = BitWriter::guarded(payload_bits);
    for byte in data {
        if let Some(code) = code_table.get(byte) {
            writer.write_code(code);
        } else {
            error!("CRITICAL: Symbol {:#04x} found in data but not in code table!", byte);
        }
    }
    writer.finish()
}

fn decode_data(tree: &PriorityTree, reader: &mut BitReader) -> Result<Vec<u8>, CodecError> {
    let root = tree.root();
    let mut result = Vec::with_capacity(reader.remaining());
    let mut node = root;

    while reader.remaining() > 0 {
        let bit = reader.read_bit()?;
        let Node::Internal { left, right, .. } = node else {
            return Err(CodecError::Malformed("tree root is a leaf"));
        };
        node = if bit { right.as_ref() } else { left.as_ref() };

        if let Some(byte) = node.byte() {
            result.push(byte);
            node = root;
        }
    }

    if !std::ptr::eq(node, root) {
        return Err(CodecError::Malformed("stream ends inside a code"));
    }
    Ok(result)
}

impl Codec for Huffman {
    fn compress(&self, input: &[u8]) -> Result<Compressed, CodecError> {
        if input.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        debug!("Input size: {} bytes", input.len());

        let freq = count_frequencies(input);
        let tree = build_huffman_tree(&freq).ok_or(CodecError::EmptyInput)?;
        let code_table = derive_codes(&tree);

        let tree_bits = serialize_tree(&tree);
        let mut tree_writer = BitWriter::guarded(tree_bits.len());
        tree_writer.write_code(&tree_bits);
        let mut output = tree_writer.finish();
        debug!("Encoded tree: {} bytes", output.len());

        output.extend(encode_data(input, &freq, &code_table));
        Compressed::check_gain(input.len(), output)
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
        if artifact.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let mut reader = BitReader::new(artifact);
        reader.skip_guard()?;
        let tree = rebuild_tree(&mut reader)?;
        debug!("Tree rebuilt, encoding ends at bit {}", reader.position());

        reader.skip_guard()?;
        let data = decode_data(&tree, &mut reader)?;
        debug!("Final decoded data size: {} bytes", data.len());
        Ok(data)
    }
}
