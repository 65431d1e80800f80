//! Byteveil command-line binary.
//!
//! Obfuscates or restores a single file with a repeating-key offset-XOR
//! transform. Not encryption: the transform is byte-exact reversible and
//! trivially breakable, useful for keyed obfuscation only.
//!
//! ```text
//! byteveil --encrypt -i notes.txt -o notes.veil -k 'correct horse'
//! byteveil --decrypt -i notes.veil -o notes.txt -k 'correct horse'
//! ```
//!
//! Exit codes: 0 on success, 1 on a runtime failure, 2 on a usage error.
//! Diagnostics go to stderr; stdout stays clean.

use std::{io, path::PathBuf, process::ExitCode, time::Instant};

use byteveil_cli::{RunConfig, run};
use byteveil_core::{Direction, Key, KeyError};
use clap::{ArgGroup, Parser};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "byteveil")]
#[command(version)]
#[command(about = "Obfuscate or restore a file with a repeating-key offset-XOR transform")]
#[command(group(ArgGroup::new("action").required(true).args(["encrypt", "decrypt"])))]
struct Args {
    /// Obfuscate the input file
    #[arg(short, long)]
    encrypt: bool,

    /// Restore an obfuscated file
    #[arg(short, long)]
    decrypt: bool,

    /// File to read
    #[arg(short, long)]
    input: PathBuf,

    /// File to write (created, or truncated if it exists)
    #[arg(short, long)]
    output: PathBuf,

    /// Transform key, 8 to 64 bytes
    #[arg(short, long, value_parser = parse_key)]
    key: Key,
}

/// Typed key parser; the length constraint is enforced before any file is
/// touched.
fn parse_key(raw: &str) -> Result<Key, KeyError> {
    Key::new(raw.as_bytes())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // INVARIANT: the "action" ArgGroup admits exactly one of the two flags.
    debug_assert!(args.encrypt ^ args.decrypt);
    let config = RunConfig {
        direction: if args.encrypt { Direction::Encrypt } else { Direction::Decrypt },
        input: args.input,
        output: args.output,
        key: args.key,
    };

    let started = Instant::now();
    match run(&config) {
        Ok(summary) => {
            info!(
                bytes = summary.bytes,
                chunks = summary.chunks,
                elapsed = ?started.elapsed(),
                "transform complete"
            );
            ExitCode::SUCCESS
        },
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        },
    }
}
