//! Container decompression
//!
//! Decoding is a single linear pipeline: the header is validated and the
//! payload sliced out, then tokens are decoded into an in-memory buffer
//! that is only handed back once the whole payload decoded cleanly.

mod decoder;
mod header;
mod output;

pub use decoder::TokenDecoder;
pub use header::{Container, ContainerHeader};
pub use output::OutputBuffer;

use crate::{Result, UnpackOptions, UnpackStats};
use std::io::Read;

/// Decompress a whole container held in memory
pub fn unpack_bytes(data: &[u8]) -> Result<Vec<u8>> {
    unpack_with_options(data, &UnpackOptions::default()).map(|(output, _)| output)
}

/// Decompress a container with explicit options, returning decode statistics
pub fn unpack_with_options(data: &[u8], options: &UnpackOptions) -> Result<(Vec<u8>, UnpackStats)> {
    let container = Container::parse(data)?;
    let header = container.header();

    log::debug!(
        "container: compressed size {}, size hint {}, reserved 0x{:08X}",
        header.compressed_size,
        header.size_hint,
        header.reserved
    );

    let mut output = OutputBuffer::with_capacity(
        options.initial_capacity(header.size_hint),
        options.max_output_size,
    );
    let mut decoder = TokenDecoder::new(container.payload());
    decoder.decode_all(&mut output)?;

    let mut stats = decoder.stats().clone();
    stats.input_bytes = data.len() as u64;
    stats.output_bytes = output.len() as u64;

    log::debug!(
        "decoded {} tokens: {} -> {} bytes ({} literal, {} copied)",
        stats.token_count,
        container.payload().len(),
        stats.output_bytes,
        stats.literal_bytes,
        stats.match_bytes
    );

    Ok((output.into_inner(), stats))
}

/// Read an entire container from `reader` and decompress it
///
/// The source is read to the end before decoding starts.
pub fn unpack_reader<R: Read>(mut reader: R, options: &UnpackOptions) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    unpack_with_options(&data, options).map(|(output, _)| output)
}
