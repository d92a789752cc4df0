use crate::bits::{BitOrder, BitReader};
use crate::error::{Error, Result};

/// Canonical Huffman decoder built from a set of per-symbol code lengths.
///
/// Codes are consumed one bit at a time, accumulating an MSB-first value and
/// checking it against the range of codes known to exist at each length —
/// the same approach as the encoder's canonical code assignment, run in
/// reverse.
pub struct HuffmanDecoder {
    min_bits: u8,
    max_bits: u8,
    /// For each bit length, (first_code, first_symbol_index).
    bit_info: Vec<(u32, usize)>,
    /// Symbols sorted by (code length, symbol value).
    symbols: Vec<u16>,
}

impl HuffmanDecoder {
    pub fn from_code_lengths(lengths: &[u8]) -> Result<Self> {
        if lengths.is_empty() {
            return Err(Error::HuffmanIncomplete);
        }

        let max_bits = *lengths.iter().max().unwrap_or(&0);
        if max_bits > 15 {
            return Err(Error::InvalidCodeLength(max_bits));
        }

        if max_bits == 0 {
            return Ok(Self { min_bits: 0, max_bits: 0, bit_info: vec![(0, 0); 16], symbols: vec![] });
        }

        let mut bl_count = [0u32; 16];
        for &len in lengths {
            if len > 0 {
                bl_count[len as usize] += 1;
            }
        }

        let min_bits = (1..=15).find(|&i| bl_count[i] > 0).unwrap_or(1) as u8;

        let mut next_code = [0u32; 16];
        let mut code = 0u32;
        for bits in 1..=max_bits {
            code = (code + bl_count[bits as usize - 1]) << 1;
            next_code[bits as usize] = code;
        }

        let mut symbols: Vec<(u16, u8)> = lengths
            .iter()
            .enumerate()
            .filter(|&(_, &len)| len > 0)
            .map(|(sym, &len)| (sym as u16, len))
            .collect();
        symbols.sort_by_key(|&(sym, len)| (len, sym));
        let sorted_symbols: Vec<u16> = symbols.iter().map(|&(sym, _)| sym).collect();

        let mut bit_info = vec![(0u32, 0usize); 16];
        let mut symbol_idx = 0;
        for bits in 1..=15 {
            bit_info[bits] = (next_code[bits], symbol_idx);
            symbol_idx += bl_count[bits] as usize;
        }

        Ok(Self { min_bits, max_bits, bit_info, symbols: sorted_symbols })
    }

    pub fn fixed_literal_length() -> Self {
        let lengths = super::tables::fixed_literal_lengths();
        Self::from_code_lengths(&lengths).unwrap()
    }

    pub fn fixed_distance() -> Self {
        let lengths = super::tables::fixed_distance_lengths();
        Self::from_code_lengths(&lengths).unwrap()
    }

    pub fn decode(&self, bits: &mut BitReader) -> Result<u16> {
        if self.max_bits == 0 {
            return Err(Error::HuffmanIncomplete);
        }

        let mut code = 0u32;
        for len in 1..=self.max_bits {
            code = (code << 1) | bits.read_bits(1, BitOrder::Lsb)?;
            let (first_code, first_idx) = self.bit_info[len as usize];
            let count = if len < 15 {
                self.bit_info[len as usize + 1].1 - first_idx
            } else {
                self.symbols.len() - first_idx
            };

            if count > 0 && code >= first_code && code < first_code + count as u32 {
                let idx = first_idx + (code - first_code) as usize;
                return Ok(self.symbols[idx]);
            }
        }

        Err(Error::InvalidHuffmanSymbol(code as u16))
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn min_bits(&self) -> u8 {
        self.min_bits
    }

    pub fn max_bits(&self) -> u8 {
        self.max_bits
    }
}
