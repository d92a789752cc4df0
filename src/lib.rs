pub mod bits;
pub mod byte_stream;
pub mod codecs;
pub mod crc32;
pub mod deflate;
pub mod error;
pub mod heap;
pub mod huffman;

pub use deflate::tokens::LZ77Token;
pub use deflate::{compress, compress_with_config, uncompress, DeflateConfig};
pub use error::{Error, Result};
