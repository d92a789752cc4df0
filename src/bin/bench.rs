//! Thin benchmark/smoke-test driver: reads a file, round-trips it through
//! every codec in the crate, and reports timing and compression ratio.
//! Not part of the library's public API surface.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "compresslib-bench", about = "Round-trip every codec against a file and report timing")]
struct Args {
    /// File to compress/decompress
    input: PathBuf,

    /// Suppress per-codec lines, print only the summary
    #[arg(short, long)]
    quiet: bool,

    /// Print extra detail (ratio as percentage, timings in microseconds)
    #[arg(short, long)]
    verbose: bool,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    json: bool,
}

struct CodecResult {
    name: &'static str,
    compressed_len: usize,
    encode_micros: u128,
    decode_micros: u128,
    correct: bool,
}

fn run_codec(
    name: &'static str,
    data: &[u8],
    compress: impl Fn(&[u8]) -> Vec<u8>,
    uncompress: impl Fn(&[u8]) -> compresslib::Result<Vec<u8>>,
) -> CodecResult {
    let start = Instant::now();
    let compressed = compress(data);
    let encode_micros = start.elapsed().as_micros();

    let start = Instant::now();
    let roundtrip = uncompress(&compressed);
    let decode_micros = start.elapsed().as_micros();

    let correct = matches!(&roundtrip, Ok(out) if out == data);

    CodecResult { name, compressed_len: compressed.len(), encode_micros, decode_micros, correct }
}

fn main() {
    let args = Args::parse();

    let data = match fs::read(&args.input) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", args.input.display());
            std::process::exit(1);
        }
    };

    if !args.quiet && !args.json {
        eprintln!("input: {} ({} bytes)", args.input.display(), data.len());
    }

    let results = vec![
        run_codec("rle", &data, compresslib::codecs::rle::compress, compresslib::codecs::rle::uncompress),
        run_codec("lz77", &data, compresslib::codecs::lz77::compress, compresslib::codecs::lz77::uncompress),
        run_codec("lz78", &data, compresslib::codecs::lz78::compress, compresslib::codecs::lz78::uncompress),
        run_codec("lzss", &data, compresslib::codecs::lzss::compress, compresslib::codecs::lzss::uncompress),
        run_codec("lzw", &data, compresslib::codecs::lzw::compress, compresslib::codecs::lzw::uncompress),
        run_codec(
            "huffman",
            &data,
            compresslib::codecs::huffman::compress,
            compresslib::codecs::huffman::uncompress,
        ),
        run_codec("deflate", &data, compresslib::compress, compresslib::uncompress),
    ];

    if args.json {
        print!("[");
        for (i, r) in results.iter().enumerate() {
            if i > 0 {
                print!(",");
            }
            print!(
                "{{\"codec\":\"{}\",\"compressed_bytes\":{},\"encode_us\":{},\"decode_us\":{},\"correct\":{}}}",
                r.name, r.compressed_len, r.encode_micros, r.decode_micros, r.correct
            );
        }
        println!("]");
        return;
    }

    for r in &results {
        if args.quiet {
            continue;
        }
        let ratio = if data.is_empty() { 0.0 } else { r.compressed_len as f64 / data.len() as f64 };
        if args.verbose {
            println!(
                "{:<8} {:>10} bytes  ratio {:>6.2}%  encode {:>8}us  decode {:>8}us  {}",
                r.name,
                r.compressed_len,
                ratio * 100.0,
                r.encode_micros,
                r.decode_micros,
                if r.correct { "ok" } else { "MISMATCH" }
            );
        } else {
            println!(
                "{:<8} {:>10} bytes  ratio {:>5.2}  {}",
                r.name,
                r.compressed_len,
                ratio,
                if r.correct { "ok" } else { "MISMATCH" }
            );
        }
    }

    let failures = results.iter().filter(|r| !r.correct).count();
    if failures > 0 {
        eprintln!("{failures} codec(s) failed round-trip");
        std::process::exit(1);
    }
}
