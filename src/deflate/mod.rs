//! The DEFLATE composite codec: LZ77 match finding, canonical Huffman
//! coding of the resulting token stream, block framing, and a CRC-32 +
//! uncompressed-size trailer.

pub mod block;
pub mod lz77;
pub mod tables;
pub mod tokens;

pub use tokens::{LZ77Block, LZ77Token};

use crate::bits::{BitOrder, BitReader};
use crate::crc32::Crc32;
use crate::error::{Error, Result};

/// Tuning knobs for `compress_with_config`. The only lever exposed is the
/// chunk size tokenized and framed into one block at a time; within a
/// block the encoder always picks whichever of stored/fixed/dynamic comes
/// out smallest, so there's no "fast vs thorough" switch to make.
#[derive(Clone, Debug)]
pub struct DeflateConfig {
    /// Maximum uncompressed bytes per block. Bounded by the stored block's
    /// 16-bit LEN field; values above `u16::MAX` are clamped.
    pub block_size: usize,
}

impl Default for DeflateConfig {
    fn default() -> Self {
        Self { block_size: u16::MAX as usize }
    }
}

/// Compress `data` with the default configuration.
pub fn compress(data: &[u8]) -> Vec<u8> {
    compress_with_config(data, &DeflateConfig::default())
}

/// Compress `data` into a framed DEFLATE stream: one or more blocks
/// followed by a CRC-32 and uncompressed-length trailer.
pub fn compress_with_config(data: &[u8], config: &DeflateConfig) -> Vec<u8> {
    let block_size = config.block_size.clamp(1, u16::MAX as usize);

    let mut out = Vec::with_capacity(data.len() / 2 + 16);
    let chunks: Vec<&[u8]> = if data.is_empty() {
        vec![&data[0..0]]
    } else {
        data.chunks(block_size).collect()
    };

    // Blocks don't each start byte-aligned: the previous block's unflushed
    // tail bits (carry_bits/carry_len) feed straight into the next block's
    // candidate writers, so a block boundary can fall mid-byte.
    let mut carry_bits = 0u32;
    let mut carry_len = 0u8;
    for (i, chunk) in chunks.iter().enumerate() {
        let is_final = i + 1 == chunks.len();
        let tokens = lz77::tokenize(chunk);
        let (bytes, next_bits, next_len) =
            block::encode_block(chunk, &tokens, is_final, carry_bits, carry_len);
        out.extend(bytes);
        carry_bits = next_bits;
        carry_len = next_len;
    }
    if carry_len > 0 {
        out.push(carry_bits as u8);
    }

    let mut crc = Crc32::new();
    crc.update(data);
    out.extend_from_slice(&crc.finish().to_le_bytes());
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());

    out
}

/// Decompress a stream produced by `compress`/`compress_with_config`,
/// verifying the trailing CRC-32 and length.
pub fn uncompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut bits = BitReader::new(data);
    let mut out = Vec::new();

    loop {
        let (block, is_final) = block::parse_block(&mut bits)?;
        apply_tokens(&block.tokens, &mut out)?;
        if is_final {
            break;
        }
    }

    bits.align_to_byte();
    let expected_crc = bits.read_u32_le()?;
    let expected_len = bits.read_u32_le()?;

    let actual_crc = {
        let mut crc = Crc32::new();
        crc.update(&out);
        crc.finish()
    };
    if actual_crc != expected_crc {
        return Err(Error::Crc32Mismatch { expected: expected_crc, found: actual_crc });
    }
    if out.len() as u32 != expected_len {
        return Err(Error::SizeMismatch { expected: expected_len, found: out.len() as u32 });
    }

    Ok(out)
}

fn apply_tokens(tokens: &[LZ77Token], out: &mut Vec<u8>) -> Result<()> {
    for token in tokens {
        match token {
            LZ77Token::Literal(byte) => out.push(*byte),
            LZ77Token::Copy { length, distance } => {
                let distance = *distance as usize;
                if distance == 0 || distance > out.len() {
                    return Err(Error::InvalidBackReference {
                        distance: distance as u32,
                        available: out.len(),
                    });
                }
                let start = out.len() - distance;
                for i in 0..*length as usize {
                    let byte = out[start + i];
                    out.push(byte);
                }
            }
            LZ77Token::EndOfBlock => {}
        }
    }
    Ok(())
}
