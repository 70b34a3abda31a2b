//! loxcc - decoder for Loxone compressed containers
//!
//! Loxone Miniserver export tooling stores files in a small container: a
//! 16-byte little-endian header starting with the magic word `0xAABBCCEE`,
//! followed by an LZ77-style token stream. Each token is a literal run,
//! optionally followed by a back-reference into the bytes decoded so far.
//! Back-references may overlap their own output, which is how runs and
//! repeating patterns are expressed.
//!
//! # Features
//!
//! - Strict header validation (magic word, declared payload length)
//! - Byte-exact decoding of overlapping back-references
//! - Typed errors for invalid magic, truncated input and bad distances
//! - Optional output size limit against decompression bombs
//! - Decode statistics
//!
//! # Example
//!
//! ```
//! use loxcc::unpack_bytes;
//!
//! let mut container = Vec::new();
//! container.extend_from_slice(&0xAABB_CCEEu32.to_le_bytes()); // magic
//! container.extend_from_slice(&5u32.to_le_bytes()); // compressed size
//! container.extend_from_slice(&6u32.to_le_bytes()); // size hint
//! container.extend_from_slice(&0u32.to_le_bytes()); // reserved
//! container.extend_from_slice(&[0x20, b'A', b'B', 0x01, 0x00]);
//!
//! assert_eq!(unpack_bytes(&container)?, b"ABBBBB");
//! # Ok::<(), loxcc::LoxCcError>(())
//! ```
//!
//! # Example - Bounded decoding
//!
//! ```no_run
//! use loxcc::{unpack_bytes_with_options, UnpackOptions};
//!
//! let data = std::fs::read("sps0.LoxCC")?;
//! let options = UnpackOptions::default().with_max_output_size(16 * 1024 * 1024);
//! let (output, stats) = unpack_bytes_with_options(&data, &options)?;
//! println!("{} tokens, {} bytes", stats.token_count, output.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![forbid(unsafe_code)]

// Public modules
pub mod common;
pub mod error;
pub mod unpack;

// Re-export commonly used types
pub use common::{
    LoxCcError, Result, UnpackOptions, UnpackStats, HEADER_SIZE, MAGIC, MAX_LITERAL_RUN,
    MIN_MATCH_LENGTH,
};
pub use unpack::{unpack_reader, Container, ContainerHeader};

// Convenience functions

/// Decompress a container held in memory
///
/// # Arguments
/// * `data` - The complete container, header included
///
/// # Returns
/// The decompressed bytes
pub fn unpack_bytes(data: &[u8]) -> Result<Vec<u8>> {
    unpack::unpack_bytes(data)
}

/// Decompress a container with explicit options
///
/// # Arguments
/// * `data` - The complete container, header included
/// * `options` - Output limit and size hint handling
///
/// # Returns
/// The decompressed bytes and statistics about the decoded tokens
pub fn unpack_bytes_with_options(
    data: &[u8],
    options: &UnpackOptions,
) -> Result<(Vec<u8>, UnpackStats)> {
    unpack::unpack_with_options(data, options)
}

/// Parse and validate the container header without decoding the payload
pub fn read_header(data: &[u8]) -> Result<ContainerHeader> {
    ContainerHeader::parse(data)
}
