//! LZ78: a trie-backed dictionary of every phrase seen so far. Each miss
//! emits (node id of the longest matched prefix, the new byte) and grows
//! the trie by one node; a run that matches an existing phrase all the
//! way to EOF emits a final node-only token with no trailing byte.
//!
//! The dictionary is an arena (`Vec<TrieNode>`) addressed by index rather
//! than a pointer-linked tree, so decoding just walks `parent` links
//! backwards to rebuild a phrase.

use super::{read_u32_le, read_u8};
use crate::byte_stream::ByteStream;
use crate::error::{Error, Result};
use std::collections::HashMap;

const ROOT: u32 = 0;
const NO_PARENT: u32 = u32::MAX;

struct TrieNode {
    parent: u32,
    byte: u8,
}

pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut arena = vec![TrieNode { parent: NO_PARENT, byte: 0 }];
    let mut children: HashMap<(u32, u8), u32> = HashMap::new();
    let mut out = ByteStream::with_capacity(data.len());
    out.write_u32_le(data.len() as u32);

    let mut node = ROOT;
    for &b in data {
        if let Some(&next) = children.get(&(node, b)) {
            node = next;
            continue;
        }
        out.write_u32_le(node);
        out.write_u8(1);
        out.write_u8(b);
        let new_id = arena.len() as u32;
        arena.push(TrieNode { parent: node, byte: b });
        children.insert((node, b), new_id);
        node = ROOT;
    }

    if node != ROOT {
        out.write_u32_le(node);
        out.write_u8(0);
        out.write_u8(0);
    }

    out.into_vec()
}

pub fn uncompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut pos = 0;
    let original_len = read_u32_le(data, &mut pos)? as usize;

    let mut arena = vec![TrieNode { parent: NO_PARENT, byte: 0 }];
    let mut out = Vec::with_capacity(original_len);

    while out.len() < original_len {
        let node_id = read_u32_le(data, &mut pos)?;
        let has_char = read_u8(data, &mut pos)? != 0;
        let ch = read_u8(data, &mut pos)?;

        if node_id as usize >= arena.len() {
            return Err(Error::InvalidDictionaryReference { reference: node_id, size: arena.len() as u32 });
        }

        out.extend_from_slice(&phrase_for(&arena, node_id));

        if has_char {
            out.push(ch);
            arena.push(TrieNode { parent: node_id, byte: ch });
        }
    }

    if out.len() != original_len {
        return Err(Error::SizeMismatch { expected: original_len as u32, found: out.len() as u32 });
    }
    Ok(out)
}

fn phrase_for(arena: &[TrieNode], node_id: u32) -> Vec<u8> {
    let mut chain = Vec::new();
    let mut cur = node_id;
    while cur != ROOT {
        let node = &arena[cur as usize];
        chain.push(node.byte);
        cur = node.parent;
    }
    chain.reverse();
    chain
}
