//! Byte-stream compression with semi-adaptive Huffman coding and LZW.
//!
//! Both codecs hold the whole input in memory and refuse to produce an artifact that is not
//! smaller than what they were given.
//!
//! ```
//! use tor_compress::{Codec, Huffman};
//!
//! let data = b"abracadabra, abracadabra, abracadabra".to_vec();
//! let compressed = Huffman.compress(&data).unwrap();
//! assert_eq!(Huffman.decompress(&compressed.data).unwrap(), data);
//! ```

pub mod bits;
pub mod codec;
pub mod error;
pub mod huffman;
pub mod lzw;
pub mod tree;

pub use codec::{
    compress_file, decompress_file, default_output_path, Algorithm, Codec, Compressed, SUFFIX,
};
pub use error::CodecError;
pub use huffman::Huffman;
pub use lzw::Lzw;
