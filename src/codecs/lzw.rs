//! LZW: the same arena-backed trie as LZ78, but pre-seeded with one root
//! node per possible byte value, so the stream carries only dictionary
//! ids (no literal bytes after the header).

use super::read_u32_le;
use crate::byte_stream::ByteStream;
use crate::error::{Error, Result};
use std::collections::HashMap;

const NO_PARENT: u32 = u32::MAX;
const ROOT_COUNT: usize = 256;

struct TrieNode {
    parent: u32,
    byte: u8,
}

fn seeded_arena() -> Vec<TrieNode> {
    (0..ROOT_COUNT).map(|b| TrieNode { parent: NO_PARENT, byte: b as u8 }).collect()
}

fn phrase_for(arena: &[TrieNode], mut cur: u32) -> Vec<u8> {
    let mut chain = Vec::new();
    loop {
        let node = &arena[cur as usize];
        chain.push(node.byte);
        if node.parent == NO_PARENT {
            break;
        }
        cur = node.parent;
    }
    chain.reverse();
    chain
}

pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut arena = seeded_arena();
    let mut children: HashMap<(u32, u8), u32> = HashMap::new();
    let mut out = ByteStream::with_capacity(data.len());
    out.write_u32_le(data.len() as u32);

    if data.is_empty() {
        return out.into_vec();
    }

    let mut w = data[0] as u32;
    for &b in &data[1..] {
        if let Some(&next) = children.get(&(w, b)) {
            w = next;
            continue;
        }
        out.write_u32_le(w);
        let new_id = arena.len() as u32;
        arena.push(TrieNode { parent: w, byte: b });
        children.insert((w, b), new_id);
        w = b as u32;
    }
    out.write_u32_le(w);

    out.into_vec()
}

pub fn uncompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut pos = 0;
    let original_len = read_u32_le(data, &mut pos)? as usize;

    let mut arena = seeded_arena();
    let mut out = Vec::with_capacity(original_len);
    let mut prev_code: Option<u32> = None;

    while out.len() < original_len {
        let code = read_u32_le(data, &mut pos)?;

        let entry = if (code as usize) < arena.len() {
            phrase_for(&arena, code)
        } else if code as usize == arena.len() {
            let prev = prev_code
                .ok_or(Error::InvalidDictionaryReference { reference: code, size: arena.len() as u32 })?;
            let mut prev_entry = phrase_for(&arena, prev);
            let first = prev_entry[0];
            prev_entry.push(first);
            prev_entry
        } else {
            return Err(Error::InvalidDictionaryReference { reference: code, size: arena.len() as u32 });
        };

        out.extend_from_slice(&entry);

        if let Some(prev) = prev_code {
            arena.push(TrieNode { parent: prev, byte: entry[0] });
        }
        prev_code = Some(code);
    }

    if out.len() != original_len {
        return Err(Error::SizeMismatch { expected: original_len as u32, found: out.len() as u32 });
    }
    Ok(out)
}
