//! Byteveil CLI plumbing.
//!
//! Everything the binary does after argument parsing lives here so the
//! integration tests can drive the real pipeline in-process: refuse a
//! same-path overwrite, open the files, run the chunk pump, map failures
//! to [`CliError`].
//!
//! The core crate never sees paths or flags; it gets open handles and a
//! validated [`Key`](byteveil_core::Key).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use byteveil_core::{Direction, Key, TransformSummary, transform_stream};

pub use error::CliError;

/// One transform job: direction, file paths and the key.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Transform direction.
    pub direction: Direction,
    /// Path of the file to read.
    pub input: PathBuf,
    /// Path of the file to write, created or truncated.
    pub output: PathBuf,
    /// Validated transform key.
    pub key: Key,
}

/// Execute a transform job end to end.
///
/// Opens the input for reading, creates the output (truncating an existing
/// file), and pumps one into the other in
/// [`CHUNK_SIZE`](byteveil_core::CHUNK_SIZE) chunks. The output file ends
/// up exactly as long as the input file.
///
/// # Errors
///
/// - [`CliError::SamePath`] when input and output name the same file
/// - [`CliError::Input`] / [`CliError::Output`] when a file cannot be
///   opened or created
/// - [`CliError::Stream`] when I/O fails mid-pump; the partial output is
///   invalid
pub fn run(config: &RunConfig) -> Result<TransformSummary, CliError> {
    if same_path(&config.input, &config.output) {
        return Err(CliError::SamePath { path: config.output.clone() });
    }

    let reader = File::open(&config.input)
        .map_err(|source| CliError::Input { path: config.input.clone(), source })?;
    let writer = File::create(&config.output)
        .map_err(|source| CliError::Output { path: config.output.clone(), source })?;

    Ok(transform_stream(reader, writer, &config.key, config.direction)?)
}

/// Best-effort check that two paths name the same file.
///
/// Canonicalizes both sides where possible; for a not-yet-created output
/// the parent directory is resolved and the file name re-appended. A false
/// negative merely restores the original tool's clobbering behavior; a
/// false positive cannot occur for distinct files.
fn same_path(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    match (resolve(input), resolve(output)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Resolve a path that may not exist yet: canonicalize the path itself, or
/// fall back to canonicalizing its parent and re-appending the file name.
fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Some(canonical);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|p| p.join(name))
}
