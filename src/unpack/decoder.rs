//! Token stream decoding
//!
//! Each token is a control byte whose high nibble counts literal bytes and
//! whose low nibble encodes the back-reference length minus four. Both
//! nibbles can be extended: the literal count by exactly one byte, the
//! length by a chain of bytes that continues while a byte equals 0xFF.

use super::output::OutputBuffer;
use crate::common::{LENGTH_CHAIN_CONTINUE, MIN_MATCH_LENGTH, NIBBLE_EXTENDED};
use crate::{LoxCcError, Result, UnpackStats};

/// Cursor over a token payload, decoding into an [`OutputBuffer`]
#[derive(Debug)]
pub struct TokenDecoder<'a> {
    payload: &'a [u8],
    pos: usize,
    stats: UnpackStats,
}

impl<'a> TokenDecoder<'a> {
    /// Create a decoder positioned at the start of `payload`
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            pos: 0,
            stats: UnpackStats::default(),
        }
    }

    /// Whether every payload byte has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.payload.len()
    }

    /// Bytes of payload consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Statistics for the tokens decoded so far
    pub fn stats(&self) -> &UnpackStats {
        &self.stats
    }

    /// Decode every remaining token into `output`
    pub fn decode_all(&mut self, output: &mut OutputBuffer) -> Result<()> {
        while !self.is_exhausted() {
            self.decode_token(output)?;
        }
        Ok(())
    }

    /// Decode one literal run and, unless the payload ends after it, one back-reference
    pub fn decode_token(&mut self, output: &mut OutputBuffer) -> Result<()> {
        let control = self.read_u8("control byte")?;
        let mut literal_count = (control >> 4) as usize;
        let length_base = control & 0x0F;

        if literal_count == NIBBLE_EXTENDED as usize {
            literal_count += self.read_u8("literal extension")? as usize;
        }

        let literals = self.take(literal_count, "literal run")?;
        output.push_literals(literals)?;
        self.stats.token_count += 1;
        self.stats.literal_bytes += literal_count;

        if self.is_exhausted() {
            log::trace!("final token: {} literal bytes", literal_count);
            return Ok(());
        }

        let distance = self.read_u16_le("distance")?;
        output.check_distance(distance)?;
        let length = self.read_match_length(length_base)?;

        log::trace!(
            "token: {} literal bytes, back-reference distance {} length {}",
            literal_count,
            distance,
            length
        );

        output.copy_back_reference(distance, length)?;
        self.stats.match_count += 1;
        self.stats.match_bytes += length;
        self.stats.longest_match = self.stats.longest_match.max(length);

        Ok(())
    }

    /// Back-reference length for a control byte's low nibble, consuming any extension chain
    fn read_match_length(&mut self, length_base: u8) -> Result<usize> {
        let mut length = MIN_MATCH_LENGTH + length_base as usize;
        if length_base != NIBBLE_EXTENDED {
            return Ok(length);
        }

        loop {
            let ext = self.read_u8("length extension")?;
            length = length.saturating_add(ext as usize);
            if ext != LENGTH_CHAIN_CONTINUE {
                return Ok(length);
            }
        }
    }

    fn read_u8(&mut self, context: &'static str) -> Result<u8> {
        let byte = self.take(1, context)?[0];
        Ok(byte)
    }

    fn read_u16_le(&mut self, context: &'static str) -> Result<u16> {
        let bytes = self.take(2, context)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn take(&mut self, count: usize, context: &'static str) -> Result<&'a [u8]> {
        let available = self.payload.len() - self.pos;
        if count > available {
            return Err(LoxCcError::TruncatedInput {
                context,
                needed: count,
                available,
            });
        }

        let payload: &'a [u8] = self.payload;
        let bytes = &payload[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }
}
