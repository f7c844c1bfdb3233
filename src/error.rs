use std::io;

use crate::lzw::MAX_WIDTH;

#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("input is empty")]
    EmptyInput,
    #[error("aborted, no gain: output would be {output} bytes for {input} bytes of input (+{} bytes)", .output - .input)]
    NoGain { input: usize, output: usize },
    #[error("codeword width of {0} bits exceeds the {max} bit limit", max = MAX_WIDTH)]
    WidthOverflow(u32),
    #[error("malformed input: {0}")]
    Malformed(&'static str),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
