//! Container header parsing
//!
//! A container starts with four little-endian `u32` fields (magic,
//! compressed size, size hint, reserved) followed by the token payload.

use crate::common::{HEADER_SIZE, MAGIC};
use crate::{LoxCcError, Result};

/// Fixed 16-byte header of a compressed container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Magic word, always [`MAGIC`] once parsed
    pub magic: u32,
    /// Length of the token payload following the header
    pub compressed_size: u32,
    /// Approximate uncompressed length, usually a bit high; advisory only
    pub size_hint: u32,
    /// Unknown field, possibly a checksum; never interpreted
    pub reserved: u32,
}

impl ContainerHeader {
    /// Parse and validate the header at the start of `data`
    ///
    /// The magic word is checked before anything else, so a short input
    /// with the wrong signature reports `InvalidMagic` rather than truncation.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let magic = read_u32_le(data, 0, "header magic")?;
        if magic != MAGIC {
            return Err(LoxCcError::InvalidMagic { found: magic });
        }

        if data.len() < HEADER_SIZE {
            return Err(LoxCcError::TruncatedInput {
                context: "header",
                needed: HEADER_SIZE,
                available: data.len(),
            });
        }

        Ok(Self {
            magic,
            compressed_size: read_u32_le(data, 4, "header")?,
            size_hint: read_u32_le(data, 8, "header")?,
            reserved: read_u32_le(data, 12, "header")?,
        })
    }

    /// Total container length implied by the header
    pub fn container_len(&self) -> usize {
        HEADER_SIZE + self.compressed_size as usize
    }
}

/// Read-only view of a validated container
#[derive(Debug, Clone, Copy)]
pub struct Container<'a> {
    header: ContainerHeader,
    payload: &'a [u8],
    trailing: usize,
}

impl<'a> Container<'a> {
    /// Validate the header and slice out exactly `compressed_size` payload bytes
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let header = ContainerHeader::parse(data)?;
        let body = &data[HEADER_SIZE..];
        let size = header.compressed_size as usize;

        if body.len() < size {
            return Err(LoxCcError::TruncatedInput {
                context: "payload",
                needed: size,
                available: body.len(),
            });
        }

        let trailing = body.len() - size;
        if trailing > 0 {
            log::debug!("ignoring {} trailing bytes after payload", trailing);
        }

        Ok(Self {
            header,
            payload: &body[..size],
            trailing,
        })
    }

    /// The parsed header
    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    /// The token payload
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Number of bytes after the payload that were ignored
    pub fn trailing_bytes(&self) -> usize {
        self.trailing
    }
}

fn read_u32_le(data: &[u8], offset: usize, context: &'static str) -> Result<u32> {
    match data.get(offset..offset + 4) {
        Some(bytes) => Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
        None => Err(LoxCcError::TruncatedInput {
            context,
            needed: 4,
            available: data.len().saturating_sub(offset),
        }),
    }
}
