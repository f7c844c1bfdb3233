use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::CodecError;
use crate::huffman::Huffman;
use crate::lzw::Lzw;

/// Extension appended to compressed files.
pub const SUFFIX: &str = ".tor";

/// A finished artifact, guaranteed smaller than the input it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Compressed {
    /// `100 * (1 - output / input)`.
    pub ratio: f64,
    pub data: Vec<u8>,
}

impl Compressed {
    /// Accepts `data` only if it is strictly smaller than the input.
    pub(crate) fn check_gain(input_len: usize, data: Vec<u8>) -> Result<Self, CodecError> {
        debug!("Total output size: {} bytes", data.len());
        if data.len() >= input_len {
            return Err(CodecError::NoGain {
                input: input_len,
                output: data.len(),
            });
        }

        let ratio = 100.0 * (1.0 - (data.len() as f64) / (input_len as f64));
        Ok(Compressed { ratio, data })
    }
}

pub trait Codec {
    fn compress(&self, input: &[u8]) -> Result<Compressed, CodecError>;

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Algorithm {
    Huffman,
    #[default]
    Lzw,
}

impl Algorithm {
    pub fn codec(self) -> Box<dyn Codec> {
        match self {
            Algorithm::Huffman => Box::new(Huffman),
            Algorithm::Lzw => Box::new(Lzw),
        }
    }
}

/// Compresses `input` into `output`. Nothing is written if compression fails.
pub fn compress_file(codec: &dyn Codec, input: &Path, output: &Path) -> Result<f64, CodecError> {
    info!("Reading {}", input.display());
    let data = fs::read(input)?;
    debug!("Input size: {} bytes", data.len());

    let compressed = codec.compress(&data)?;

    info!("Writing {}", output.display());
    fs::write(output, &compressed.data)?;
    Ok(compressed.ratio)
}

/// Restores `input` into `output`, returning the number of bytes written.
pub fn decompress_file(codec: &dyn Codec, input: &Path, output: &Path) -> Result<usize, CodecError> {
    info!("Reading {}", input.display());
    let artifact = fs::read(input)?;

    let data = codec.decompress(&artifact)?;

    info!("Writing {}", output.display());
    fs::write(output, &data)?;
    Ok(data.len())
}

/// Output path used when none is given.
///
/// Compression appends [`SUFFIX`]. Decompression cuts the path at the first [`SUFFIX`],
/// or appends `_extracted` when the path has none.
pub fn default_output_path(input: &Path, compress: bool) -> PathBuf {
    let input = input.to_string_lossy();
    if compress {
        return PathBuf::from(format!("{input}{SUFFIX}"));
    }

    match input.find(SUFFIX) {
        Some(idx) => PathBuf::from(&input[..idx]),
        None => PathBuf::from(format!("{input}_extracted")),
    }
}

#[cfg(test)]
mod tests;
