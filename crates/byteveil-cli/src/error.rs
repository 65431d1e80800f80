//! CLI error type.

use std::{io, path::PathBuf};

use byteveil_core::StreamError;
use thiserror::Error;

/// Errors from running a transform job.
///
/// Everything here is fatal. The tool is a one-shot batch transform: it
/// never retries, and a failed run leaves the output file invalid. Exit
/// code mapping happens in the binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be opened for reading.
    #[error("cannot read input '{}': {source}", .path.display())]
    Input {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The output file could not be created.
    #[error("cannot create output '{}': {source}", .path.display())]
    Output {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Input and output name the same file.
    ///
    /// Creating the output would truncate the input before a single byte
    /// is read, destroying it.
    #[error("input and output are the same file: '{}'", .path.display())]
    SamePath {
        /// The shared path
        path: PathBuf,
    },

    /// The chunk pump failed mid-transform.
    #[error(transparent)]
    Stream(#[from] StreamError),
}
