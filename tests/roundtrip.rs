//! End-to-end round-trip coverage across every codec: the fixed concrete
//! scenarios (empty input, a single byte, a long repetitive run, a
//! full-alphabet stress buffer, a multi-block input, and incompressible
//! data), plus randomized sweeps over a range of buffer lengths.

/// Small deterministic xorshift64* PRNG so the sweep is reproducible
/// without pulling in an external `rand` dependency.
struct Xorshift64(u64);

impl Xorshift64 {
    fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn fill(&mut self, len: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(len);
        while out.len() < len {
            out.extend_from_slice(&self.next_u64().to_le_bytes());
        }
        out.truncate(len);
        out
    }
}

type Compress = fn(&[u8]) -> Vec<u8>;
type Uncompress = fn(&[u8]) -> compresslib::Result<Vec<u8>>;

fn codecs() -> Vec<(&'static str, Compress, Uncompress)> {
    vec![
        ("rle", compresslib::codecs::rle::compress, compresslib::codecs::rle::uncompress),
        ("lz77", compresslib::codecs::lz77::compress, compresslib::codecs::lz77::uncompress),
        ("lz78", compresslib::codecs::lz78::compress, compresslib::codecs::lz78::uncompress),
        ("lzss", compresslib::codecs::lzss::compress, compresslib::codecs::lzss::uncompress),
        ("lzw", compresslib::codecs::lzw::compress, compresslib::codecs::lzw::uncompress),
        ("huffman", compresslib::codecs::huffman::compress, compresslib::codecs::huffman::uncompress),
        ("deflate", compresslib::compress, compresslib::uncompress),
    ]
}

fn assert_roundtrip(name: &str, data: &[u8]) {
    for (codec_name, compress, uncompress) in codecs() {
        let compressed = compress(data);
        let decompressed = uncompress(&compressed)
            .unwrap_or_else(|e| panic!("{codec_name} failed to decode its own output for {name}: {e}"));
        assert_eq!(
            decompressed, data,
            "{codec_name} round-trip mismatch for scenario '{name}' (input len {})",
            data.len()
        );
    }
}

#[test]
fn empty_input() {
    assert_roundtrip("empty", &[]);
}

#[test]
fn single_byte() {
    assert_roundtrip("single byte", b"A");
}

#[test]
fn long_repetitive_run() {
    let data = vec![b'a'; 300];
    assert_roundtrip("300 repeated bytes", &data);
}

#[test]
fn alphabet_stress_buffer() {
    let mut data = Vec::new();
    for i in 0..4000u32 {
        data.push((i % 256) as u8);
    }
    assert_roundtrip("alphabet stress", &data);
}

#[test]
fn two_block_input() {
    let mut data = Vec::new();
    for i in 0..131_070usize {
        data.push(((i * 7 + 3) % 251) as u8);
    }
    assert_roundtrip("131070-byte two-block input", &data);
}

#[test]
fn incompressible_random_data() {
    let mut rng = Xorshift64::new(0xC0FFEE);
    let data = rng.fill(4096);
    assert_roundtrip("incompressible random data", &data);
}

#[test]
fn randomized_length_sweep() {
    let mut rng = Xorshift64::new(0xA5A5_1234);
    for len in (0..=2048usize).step_by(97) {
        let data = rng.fill(len);
        assert_roundtrip(&format!("random length {len}"), &data);
    }
}

#[test]
fn deflate_stream_is_readable_by_an_independent_implementation() {
    use std::io::Read;

    let data = b"the quick brown fox jumps over the lazy dog, repeatedly: \
                 the quick brown fox jumps over the lazy dog"
        .to_vec();

    let compressed = compresslib::compress(&data);
    // Strip our CRC32 + length trailer; flate2 only wants the DEFLATE stream.
    let deflate_only = &compressed[..compressed.len() - 8];

    let mut decoder = flate2::read::DeflateDecoder::new(deflate_only);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out).expect("flate2 failed to decode our DEFLATE stream");
    assert_eq!(out, data);
}
