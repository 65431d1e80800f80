//! Error types for the byteveil transform pipeline.
//!
//! Two kinds exist; the byte transform itself cannot fail:
//!
//! - [`KeyError`]: configuration. The key violates its length constraint
//!   and is rejected before any data is touched.
//! - [`StreamError`]: transport. The input or output stream failed during
//!   the chunk pump. The pump is one-shot batch work and never retries; a
//!   failed run leaves partial output that callers must treat as invalid.

use std::io;

use thiserror::Error;

use crate::key::Key;

/// Errors from key construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Key shorter than [`Key::MIN_LEN`] bytes.
    #[error("key too short: {actual} bytes, need at least {}", Key::MIN_LEN)]
    TooShort {
        /// Length of the rejected key
        actual: usize,
    },

    /// Key longer than [`Key::MAX_LEN`] bytes.
    #[error("key too long: {actual} bytes, limit is {}", Key::MAX_LEN)]
    TooLong {
        /// Length of the rejected key
        actual: usize,
    },
}

/// Errors from the chunked stream pump.
///
/// Both variants carry the number of input bytes that were fully processed
/// (read, transformed and written) before the failure. Output beyond that
/// count is partial and must be discarded.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Reading the input stream failed.
    #[error("read failed after {bytes_processed} bytes: {source}")]
    Read {
        /// Bytes fully processed before the failure
        bytes_processed: u64,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing the output stream failed.
    #[error("write failed after {bytes_processed} bytes: {source}")]
    Write {
        /// Bytes fully processed before the failure
        bytes_processed: u64,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl StreamError {
    /// Bytes fully read, transformed and written before the failure.
    ///
    /// Tells a caller that keeps the partial output how much of it is
    /// valid; everything past this count is truncated mid-transform.
    pub fn bytes_processed(&self) -> u64 {
        match self {
            Self::Read { bytes_processed, .. } | Self::Write { bytes_processed, .. } => {
                *bytes_processed
            },
        }
    }
}
