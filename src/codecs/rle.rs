//! Run-length encoding: a `u32` uncompressed-length header followed by
//! (count, byte) pairs, count capped at 255 per run.

use super::{read_u32_le, read_u8};
use crate::byte_stream::ByteStream;
use crate::error::{Error, Result};

const MAX_RUN: usize = u8::MAX as usize;

pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut out = ByteStream::with_capacity(data.len() / 2 + 4);
    out.write_u32_le(data.len() as u32);

    let mut i = 0;
    while i < data.len() {
        let byte = data[i];
        let mut run = 1;
        while run < MAX_RUN && i + run < data.len() && data[i + run] == byte {
            run += 1;
        }
        out.write_u8(run as u8);
        out.write_u8(byte);
        i += run;
    }

    out.into_vec()
}

pub fn uncompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut pos = 0;
    let original_len = read_u32_le(data, &mut pos)? as usize;

    let mut out = Vec::with_capacity(original_len);
    while out.len() < original_len {
        let count = read_u8(data, &mut pos)?;
        let byte = read_u8(data, &mut pos)?;
        out.resize(out.len() + count as usize, byte);
    }

    if out.len() != original_len {
        return Err(Error::SizeMismatch { expected: original_len as u32, found: out.len() as u32 });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_roundtrips() {
        assert_eq!(uncompress(&compress(&[])).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn long_run_is_split_at_255() {
        let data = vec![b'a'; 300];
        let compressed = compress(&data);
        // header (4) + two runs of (count,byte) = 4 + 2*2
        assert_eq!(compressed.len(), 4 + 4);
        assert_eq!(uncompress(&compressed).unwrap(), data);
    }

    #[test]
    fn mixed_runs_roundtrip() {
        let data = b"aaabbbbbccccccccccd".to_vec();
        assert_eq!(uncompress(&compress(&data)).unwrap(), data);
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let mut compressed = compress(b"aaa");
        compressed.truncate(compressed.len() - 1);
        assert!(uncompress(&compressed).is_err());
    }
}
