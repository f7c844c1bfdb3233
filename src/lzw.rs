//! LZW coding with a single codeword width per stream.
//!
//! Rather than a fixed 12 bit codeword, the width is the bit length of the largest code
//! actually emitted. It is stored up front in a 5 bit field, so the artifact is one
//! guarded block: `[width: 5][code: width]*`.
//!
//! A width of 32 does not fit the field and is stored as 0.

use std::collections::HashMap;

use log::{debug, trace};

use crate::bits::{BitReader, BitWriter};
use crate::codec::{Codec, Compressed};
use crate::error::CodecError;

pub const WIDTH_FIELD_BITS: u32 = 5;
pub const MAX_WIDTH: u32 = 1 << WIDTH_FIELD_BITS;

/// First code handed out after the single-byte entries.
pub const FIRST_CODE: u64 = 256;

#[derive(Clone, Copy, Debug, Default)]
pub struct Lzw;

/// Bit length of `max_code`, at least 1.
pub fn codeword_width(max_code: u64) -> Result<u32, CodecError> {
    let width = (u64::BITS - max_code.leading_zeros()).max(1);
    if width > MAX_WIDTH {
        return Err(CodecError::WidthOverflow(width));
    }
    Ok(width)
}

/// Sequence to code mapping.
///
/// A sequence is keyed by the code of its prefix and its last byte; single bytes are their
/// own codes and are never stored.
pub struct Encoder {
    table: HashMap<(u64, u8), u64>,
    next_code: u64,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            table: HashMap::new(),
            next_code: FIRST_CODE,
        }
    }

    /// Number of dictionary entries, including the 256 single bytes.
    pub fn entry_count(&self) -> u64 {
        self.next_code
    }

    pub fn code_of(&self, sequence: &[u8]) -> Option<u64> {
        let (&first, rest) = sequence.split_first()?;
        rest.iter()
            .try_fold(u64::from(first), |code, &byte| self.table.get(&(code, byte)).copied())
    }

    pub fn encode(&mut self, input: &[u8]) -> Vec<u64> {
        let mut codes = Vec::new();
        let mut pattern: Option<u64> = None;

        for &byte in input {
            let Some(prefix) = pattern else {
                pattern = Some(u64::from(byte));
                continue;
            };

            match self.table.get(&(prefix, byte)) {
                Some(&code) => pattern = Some(code),
                None => {
                    trace!("New entry {} = {} + {:#04x}", self.next_code, prefix, byte);
                    self.table.insert((prefix, byte), self.next_code);
                    self.next_code += 1;
                    codes.push(prefix);
                    pattern = Some(u64::from(byte));
                }
            }
        }

        if let Some(prefix) = pattern {
            codes.push(prefix);
        }
        codes
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Code to sequence mapping, growing one step behind the [`Encoder`].
pub struct Decoder {
    table: Vec<Vec<u8>>,
}

impl Decoder {
    pub fn new() -> Self {
        Decoder {
            table: (0..=255u8).map(|byte| vec![byte]).collect(),
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.table.len() as u64
    }

    pub fn translation(&self, code: u64) -> Option<&[u8]> {
        let idx = usize::try_from(code).ok()?;
        self.table.get(idx).map(Vec::as_slice)
    }

    pub fn decode(&mut self, codes: &[u64]) -> Result<Vec<u8>, CodecError> {
        let Some((&first, rest)) = codes.split_first() else {
            return Ok(Vec::new());
        };

        let mut previous = self
            .translation(first)
            .ok_or(CodecError::Malformed("undefined code"))?
            .to_vec();
        let mut output = previous.clone();

        for &code in rest {
            let translation = match self.translation(code) {
                Some(translation) => translation.to_vec(),
                // the encoder defined this code on the step that emitted it
                None if code == self.entry_count() => {
                    let mut translation = previous.clone();
                    translation.push(previous[0]);
                    translation
                }
                None => return Err(CodecError::Malformed("undefined code")),
            };
            output.extend_from_slice(&translation);

            let mut entry = previous;
            entry.push(translation[0]);
            trace!("New entry {} = {:?}", self.table.len(), entry);
            self.table.push(entry);

            previous = translation;
        }

        Ok(output)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for Lzw {
    fn compress(&self, input: &[u8]) -> Result<Compressed, CodecError> {
        if input.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        debug!("Input size: {} bytes", input.len());

        let mut encoder = Encoder::new();
        let codes = encoder.encode(input);
        let max_code = codes.iter().copied().max().unwrap_or(0);
        let width = codeword_width(max_code)?;
        debug!(
            "The biggest code is {} so codes will be written on {} bits ({} codes, {} entries)",
            max_code,
            width,
            codes.len(),
            encoder.entry_count()
        );

        let payload_bits = WIDTH_FIELD_BITS as usize + codes.len() * width as usize;
        let mut writer = BitWriter::guarded(payload_bits);
        writer.write_bits(u64::from(width % MAX_WIDTH), WIDTH_FIELD_BITS);
        for code in codes {
            writer.write_bits(code, width);
        }

        Compressed::check_gain(input.len(), writer.finish())
    }

    fn decompress(&self, artifact: &[u8]) -> Result<Vec<u8>, CodecError> {
        if artifact.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let mut reader = BitReader::new(artifact);
        reader.skip_guard()?;
        let width = match reader.read_bits(WIDTH_FIELD_BITS)? as u32 {
            0 => MAX_WIDTH,
            width => width,
        };
        debug!("Codes are {} bits long", width);

        let remaining = reader.remaining();
        if remaining % width as usize != 0 {
            return Err(CodecError::Malformed("stream ends inside a codeword"));
        }

        let codes = (0..remaining / width as usize)
            .map(|_| reader.read_bits(width))
            .collect::<Result<Vec<_>, _>>()?;

        let data = Decoder::new().decode(&codes)?;
        debug!("Final decoded data size: {} bytes", data.len());
        Ok(data)
    }
}
