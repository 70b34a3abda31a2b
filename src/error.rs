//! Error handling for container decoding
//!
//! This module re-exports the error types used throughout the crate.
//! They are built with thiserror and carry the offending values so callers
//! can report exactly where a container went wrong.

pub use crate::common::LoxCcError;
pub use crate::common::Result;
