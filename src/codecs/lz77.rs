//! Standalone LZ77: the same hash-chain tokenizer DEFLATE uses internally,
//! serialized directly as (tag, payload) records instead of Huffman-coded
//! into a bitstream. A `u32` original-length header precedes the records.

use super::{read_u16_le, read_u32_le, read_u8};
use crate::byte_stream::ByteStream;
use crate::deflate::lz77::tokenize;
use crate::deflate::tokens::LZ77Token;
use crate::error::{Error, Result};

const TAG_LITERAL: u8 = 0;
const TAG_COPY: u8 = 1;

pub fn compress(data: &[u8]) -> Vec<u8> {
    let tokens = tokenize(data);
    let mut out = ByteStream::with_capacity(data.len());
    out.write_u32_le(data.len() as u32);

    for token in &tokens {
        match token {
            LZ77Token::Literal(byte) => {
                out.write_u8(TAG_LITERAL);
                out.write_u8(*byte);
            }
            LZ77Token::Copy { length, distance } => {
                out.write_u8(TAG_COPY);
                out.write_bytes(&length.to_le_bytes());
                out.write_bytes(&distance.to_le_bytes());
            }
            LZ77Token::EndOfBlock => {}
        }
    }

    out.into_vec()
}

pub fn uncompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut pos = 0;
    let original_len = read_u32_le(data, &mut pos)? as usize;

    let mut out = Vec::with_capacity(original_len);
    while out.len() < original_len {
        let tag = read_u8(data, &mut pos)?;
        match tag {
            TAG_LITERAL => {
                let byte = read_u8(data, &mut pos)?;
                out.push(byte);
            }
            TAG_COPY => {
                let length = read_u16_le(data, &mut pos)? as usize;
                let distance = read_u16_le(data, &mut pos)? as usize;
                if distance == 0 || distance > out.len() {
                    return Err(Error::InvalidBackReference {
                        distance: distance as u32,
                        available: out.len(),
                    });
                }
                let start = out.len() - distance;
                for i in 0..length {
                    let byte = out[start + i];
                    out.push(byte);
                }
            }
            other => return Err(Error::Internal(format!("unknown LZ77 record tag {other}"))),
        }
    }

    if out.len() != original_len {
        return Err(Error::SizeMismatch { expected: original_len as u32, found: out.len() as u32 });
    }
    Ok(out)
}
