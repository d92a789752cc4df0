pub mod decoder;
pub mod encoder;
pub mod tables;
pub mod tree;

pub use decoder::HuffmanDecoder;
pub use encoder::HuffmanEncoder;
