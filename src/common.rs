//! Common types and constants for Loxone compressed containers
//!
//! This module defines the container constants, the error type, decode
//! options and statistics shared by the header parser, the token decoder
//! and the command-line tool.

use thiserror::Error;

/// Magic word identifying a compressed container (stored little-endian)
pub const MAGIC: u32 = 0xAABB_CCEE;

/// Size of the fixed container header in bytes
pub const HEADER_SIZE: usize = 16;

/// Shortest back-reference the format can express
pub const MIN_MATCH_LENGTH: usize = 4;

/// Nibble value signalling that an extension byte follows
pub const NIBBLE_EXTENDED: u8 = 0x0F;

/// Extension byte value that continues a back-reference length chain
pub const LENGTH_CHAIN_CONTINUE: u8 = 0xFF;

/// Longest literal run a single token can carry (15 + 255)
pub const MAX_LITERAL_RUN: usize = 15 + 0xFF;

/// Upper bound on the capacity pre-allocated from the header size hint (64MB)
pub const SIZE_HINT_CAP: usize = 64 * 1024 * 1024;

/// Error type for container decoding
#[derive(Debug, Error)]
pub enum LoxCcError {
    /// The first four bytes are not the container magic word
    #[error("Invalid magic: expected 0x{expected:08X}, found 0x{found:08X}", expected = MAGIC)]
    InvalidMagic {
        /// Little-endian value found at the start of the input
        found: u32,
    },

    /// A declared or implied length runs past the available bytes
    #[error("Truncated input while reading {context}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        /// What was being read when the input ran out
        context: &'static str,
        /// Bytes required to complete the read
        needed: usize,
        /// Bytes actually remaining
        available: usize,
    },

    /// A back-reference points before the start of the output or is zero
    #[error("Invalid distance {distance}: only {available} bytes decoded so far")]
    InvalidDistance {
        /// Distance read from the token
        distance: u16,
        /// Output length at the time of the back-reference
        available: usize,
    },

    /// Decoding would produce more bytes than the configured limit
    #[error("Output limit of {limit} bytes exceeded")]
    OutputLimitExceeded {
        /// Configured maximum output size
        limit: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoxCcError {
    /// Distinct process exit status for each error class
    ///
    /// Status 2 is left to the argument parser for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoxCcError::Io(_) => 1,
            LoxCcError::InvalidMagic { .. } => 3,
            LoxCcError::TruncatedInput { .. } => 4,
            LoxCcError::InvalidDistance { .. } => 5,
            LoxCcError::OutputLimitExceeded { .. } => 6,
        }
    }

    /// Whether the error was caused by the content of the input rather than I/O
    pub fn is_corruption(&self) -> bool {
        !matches!(self, LoxCcError::Io(_))
    }
}

/// Result type alias for container operations
pub type Result<T> = std::result::Result<T, LoxCcError>;

/// Options controlling a single decode call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnpackOptions {
    /// Maximum number of output bytes, `None` for unbounded
    pub max_output_size: Option<usize>,
    /// Pre-allocate the output from the header size hint
    pub trust_size_hint: bool,
}

impl Default for UnpackOptions {
    fn default() -> Self {
        Self {
            max_output_size: None,
            trust_size_hint: true,
        }
    }
}

impl UnpackOptions {
    /// Limit the decoded output to `limit` bytes
    pub fn with_max_output_size(mut self, limit: usize) -> Self {
        self.max_output_size = Some(limit);
        self
    }

    /// Enable or disable pre-allocation from the header size hint
    pub fn with_size_hint(mut self, trust: bool) -> Self {
        self.trust_size_hint = trust;
        self
    }

    /// Initial output capacity for a container advertising `size_hint`
    pub fn initial_capacity(&self, size_hint: u32) -> usize {
        if !self.trust_size_hint {
            return 0;
        }
        let hinted = (size_hint as usize).min(SIZE_HINT_CAP);
        match self.max_output_size {
            Some(limit) => hinted.min(limit),
            None => hinted,
        }
    }
}

/// Statistics collected while decoding one container
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnpackStats {
    /// Number of tokens decoded
    pub token_count: usize,
    /// Bytes copied verbatim from literal runs
    pub literal_bytes: usize,
    /// Number of back-references applied
    pub match_count: usize,
    /// Bytes produced by back-references
    pub match_bytes: usize,
    /// Longest back-reference seen
    pub longest_match: usize,
    /// Size of the whole input, header included
    pub input_bytes: u64,
    /// Size of the decoded output
    pub output_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(MAGIC.to_le_bytes(), [0xEE, 0xCC, 0xBB, 0xAA]);
        assert_eq!(HEADER_SIZE, 16);
        assert_eq!(MAX_LITERAL_RUN, 270);
        assert_eq!(MIN_MATCH_LENGTH, 4);
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            LoxCcError::Io(std::io::Error::other("boom")),
            LoxCcError::InvalidMagic { found: 0 },
            LoxCcError::TruncatedInput {
                context: "payload",
                needed: 4,
                available: 1,
            },
            LoxCcError::InvalidDistance {
                distance: 0,
                available: 0,
            },
            LoxCcError::OutputLimitExceeded { limit: 1 },
        ];

        let mut codes: Vec<i32> = errors.iter().map(LoxCcError::exit_code).collect();
        assert!(codes.iter().all(|&c| c != 0 && c != 2));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_error_messages() {
        let err = LoxCcError::InvalidMagic { found: 0x1234_5678 };
        assert_eq!(
            err.to_string(),
            "Invalid magic: expected 0xAABBCCEE, found 0x12345678"
        );
        assert!(err.is_corruption());

        let err = LoxCcError::InvalidDistance {
            distance: 9,
            available: 3,
        };
        assert_eq!(err.to_string(), "Invalid distance 9: only 3 bytes decoded so far");
    }

    #[test]
    fn test_initial_capacity() {
        let options = UnpackOptions::default();
        assert_eq!(options.initial_capacity(1000), 1000);
        assert_eq!(options.initial_capacity(u32::MAX), SIZE_HINT_CAP);

        let limited = options.with_max_output_size(10);
        assert_eq!(limited.initial_capacity(1000), 10);

        let ignored = options.with_size_hint(false);
        assert_eq!(ignored.initial_capacity(1000), 0);
    }
}
