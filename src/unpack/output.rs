//! Growable output buffer
//!
//! The buffer only ever grows. Back-references read from its tail while
//! they append to it, so the copy is done one byte at a time.

use crate::{LoxCcError, Result};

/// Append-only decode output with an optional size limit
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
    limit: Option<usize>,
}

impl OutputBuffer {
    /// Create an empty buffer with `capacity` bytes reserved
    pub fn with_capacity(capacity: usize, limit: Option<usize>) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            limit,
        }
    }

    /// Number of bytes produced so far
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been produced yet
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Decoded bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Append a literal run verbatim
    pub fn push_literals(&mut self, literals: &[u8]) -> Result<()> {
        self.reserve_checked(literals.len())?;
        self.data.extend_from_slice(literals);
        Ok(())
    }

    /// Append `length` bytes copied from `distance` bytes behind the end
    ///
    /// Each byte is read from `len - distance` at the moment it is copied,
    /// so `distance < length` repeats the last `distance` bytes and
    /// `distance == 1` expands the final byte into a run.
    pub fn copy_back_reference(&mut self, distance: u16, length: usize) -> Result<()> {
        self.check_distance(distance)?;
        let back = distance as usize;

        self.reserve_checked(length)?;
        for _ in 0..length {
            let byte = self.data[self.data.len() - back];
            self.data.push(byte);
        }
        Ok(())
    }

    /// Reject a distance of zero or one reaching before the start of the output
    pub fn check_distance(&self, distance: u16) -> Result<()> {
        let back = distance as usize;
        if back == 0 || back > self.data.len() {
            return Err(LoxCcError::InvalidDistance {
                distance,
                available: self.data.len(),
            });
        }
        Ok(())
    }

    /// Hand the decoded bytes to the caller
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    fn reserve_checked(&mut self, additional: usize) -> Result<()> {
        let limit = self.limit.unwrap_or(isize::MAX as usize);
        match self.data.len().checked_add(additional) {
            Some(total) if total <= limit => {}
            _ => return Err(LoxCcError::OutputLimitExceeded { limit }),
        }
        // Allocation failure on a hostile length is reported, not aborted on
        self.data
            .try_reserve(additional)
            .map_err(|_| LoxCcError::OutputLimitExceeded { limit })
    }
}
