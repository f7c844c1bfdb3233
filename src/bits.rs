//! MSB-first bit packing with a leading guard bit.
//!
//! A guarded block is `[zero padding][1][payload]`, with the padding in front so that the
//! block fills a whole number of bytes. Reading skips the zeros and the guard, which keeps
//! any leading zero bits of the payload intact.

use crate::error::CodecError;

/// Writes a guarded block of a known payload size.
pub struct BitWriter {
    output: Vec<u8>,
    /// Index of the next bit to write.
    bit_idx: usize,
}

impl BitWriter {
    /// Allocates room for the padding, the guard bit and `payload_bits` bits, and writes
    /// the guard.
    pub fn guarded(payload_bits: usize) -> Self {
        let total_bits = payload_bits + 1;
        let len = total_bits.div_ceil(8);
        let mut writer = BitWriter {
            output: vec![0; len],
            bit_idx: len * 8 - total_bits,
        };
        writer.write_bit(true);
        writer
    }

    pub fn write_bit(&mut self, bit: bool) {
        debug_assert!(self.bit_idx < self.output.len() * 8, "bit writer overrun");
        if bit {
            self.output[self.bit_idx / 8] |= 0x80 >> (self.bit_idx % 8);
        }
        self.bit_idx += 1;
    }

    /// Writes the lowest `num_bits` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u64, num_bits: u32) {
        for shift in (0..num_bits).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    pub fn write_code(&mut self, code: &[bool]) {
        for &bit in code {
            self.write_bit(bit);
        }
    }

    pub fn finish(self) -> Vec<u8> {
        debug_assert_eq!(self.bit_idx, self.output.len() * 8, "bit writer underrun");
        self.output
    }
}

/// Cursor over the bits of a byte slice, most significant bit first.
pub struct BitReader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        BitReader { input, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.input.len() * 8 - self.pos
    }

    pub fn read_bit(&mut self) -> Result<bool, CodecError> {
        let byte = self
            .input
            .get(self.pos / 8)
            .ok_or(CodecError::Malformed("unexpected end of bit stream"))?;
        let bit = (byte >> (7 - self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Ok(bit)
    }

    pub fn read_bits(&mut self, num_bits: u32) -> Result<u64, CodecError> {
        let mut value = 0u64;
        for _ in 0..num_bits {
            value = (value << 1) | u64::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Skips the zero padding and the guard bit in front of a block.
    pub fn skip_guard(&mut self) -> Result<(), CodecError> {
        while !self.read_bit().map_err(|_| CodecError::Malformed("missing guard bit"))? {}
        Ok(())
    }
}
