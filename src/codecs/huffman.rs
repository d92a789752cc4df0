//! Static Huffman coding with no LZ stage: one canonical code table built
//! from the whole buffer's byte frequencies, written as a 256-entry
//! code-length header followed by the bit-packed symbols.

use crate::bits::{BitOrder, BitReader, BitWriter};
use crate::error::Result;
use crate::huffman::tree::{build_code_lengths, build_codes_from_lengths, MAX_CODE_LENGTH};
use crate::huffman::HuffmanDecoder;

const ALPHABET_SIZE: usize = 256;

pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut freq = [0u32; ALPHABET_SIZE];
    for &b in data {
        freq[b as usize] += 1;
    }
    let lengths = build_code_lengths(&freq, MAX_CODE_LENGTH);
    let codes = build_codes_from_lengths(&lengths);

    let mut writer = BitWriter::new();
    writer.write_u32_le(data.len() as u32);
    for &len in &lengths {
        writer.write_byte(len);
    }
    for &byte in data {
        let (code, len) = codes[byte as usize];
        writer.write_bits(code, len, BitOrder::Msb);
    }

    writer.finish()
}

pub fn uncompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(data);
    let original_len = reader.read_u32_le()? as usize;

    let mut lengths = [0u8; ALPHABET_SIZE];
    for len in lengths.iter_mut() {
        *len = reader.read_byte()?;
    }
    let decoder = HuffmanDecoder::from_code_lengths(&lengths)?;

    let mut out = Vec::with_capacity(original_len);
    for _ in 0..original_len {
        out.push(decoder.decode(&mut reader)? as u8);
    }
    Ok(out)
}
