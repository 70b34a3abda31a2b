//! Test helpers for building containers by hand
//!
//! The crate has no encoder, so tests write token streams directly and keep
//! track of the bytes each token should produce.

#![allow(dead_code)]

use loxcc::MAGIC;

/// Builds a token payload and the output it is expected to decode to
#[derive(Debug, Default)]
pub struct TokenWriter {
    pub payload: Vec<u8>,
    pub expected: Vec<u8>,
}

impl TokenWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Literal run of at most 270 bytes followed by a back-reference
    pub fn token(&mut self, literals: &[u8], distance: u16, length: usize) -> &mut Self {
        assert!(length >= 4, "back-references are at least 4 bytes");
        let (lit_nibble, lit_ext) = literal_fields(literals.len());
        let len_nibble = (length - 4).min(15) as u8;

        self.payload.push((lit_nibble << 4) | len_nibble);
        if let Some(ext) = lit_ext {
            self.payload.push(ext);
        }
        self.payload.extend_from_slice(literals);
        self.payload.extend_from_slice(&distance.to_le_bytes());

        if len_nibble == 15 {
            let mut rest = length - 19;
            while rest >= 0xFF {
                self.payload.push(0xFF);
                rest -= 0xFF;
            }
            self.payload.push(rest as u8);
        }

        self.expected.extend_from_slice(literals);
        // Periodic model of an overlapping copy
        let start = self.expected.len() - distance as usize;
        for i in 0..length {
            let byte = self.expected[start + i % distance as usize];
            self.expected.push(byte);
        }
        self
    }

    /// Final literal-only token
    pub fn finish(&mut self, literals: &[u8]) -> &mut Self {
        let (lit_nibble, lit_ext) = literal_fields(literals.len());
        self.payload.push(lit_nibble << 4);
        if let Some(ext) = lit_ext {
            self.payload.push(ext);
        }
        self.payload.extend_from_slice(literals);
        self.expected.extend_from_slice(literals);
        self
    }

    pub fn container(&self) -> Vec<u8> {
        container(&self.payload, self.expected.len() as u32 + 16)
    }
}

fn literal_fields(count: usize) -> (u8, Option<u8>) {
    assert!(count <= 270, "literal runs hold at most 270 bytes");
    if count < 15 {
        (count as u8, None)
    } else {
        (15, Some((count - 15) as u8))
    }
}

/// Wrap `payload` in a container header
pub fn container(payload: &[u8], size_hint: u32) -> Vec<u8> {
    container_with_magic(MAGIC, payload, size_hint)
}

pub fn container_with_magic(magic: u32, payload: &[u8], size_hint: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(16 + payload.len());
    data.extend_from_slice(&magic.to_le_bytes());
    data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    data.extend_from_slice(&size_hint.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(payload);
    data
}
