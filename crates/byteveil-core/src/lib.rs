//! Byteveil transform primitives.
//!
//! Pure building blocks for the byteveil file obfuscation tool: a
//! length-validated [`Key`], the keyed offset-XOR transform engine, and a
//! chunked stream driver that pumps any [`Read`](std::io::Read) into any
//! [`Write`](std::io::Write).
//!
//! # Pipeline
//!
//! ```text
//! reader --fill--> input buffer (up to CHUNK_SIZE bytes)
//!                        |
//!                        v
//!          encrypt_chunk / decrypt_chunk
//!          (key cursor restarts every chunk)
//!                        |
//!                        v
//! writer <--write_all-- output buffer
//! ```
//!
//! # Transform
//!
//! For the byte at offset `i` within a chunk, with `cursor = i % key_len`:
//!
//! - encrypt: `(byte XOR key[cursor]) + cursor`
//! - decrypt: `(byte - cursor) XOR key[cursor]`
//!
//! Addition and subtraction wrap modulo 256, and the subtraction happens
//! strictly before the XOR when decrypting. The cursor restarts at zero at
//! the start of every chunk, so a chunk transforms the same way wherever it
//! sits in a stream; where the chunk boundaries fall is therefore part of
//! the output format (see [`CHUNK_SIZE`]).
//!
//! # Security
//!
//! None. A short repeating key combined with a positional offset is
//! trivially breakable. This crate implements reversible obfuscation with
//! byte-exact round trips, not encryption; do not protect sensitive data
//! with it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cipher;
mod error;
mod key;
mod stream;

pub use cipher::{decrypt_chunk, encrypt_chunk};
pub use error::{KeyError, StreamError};
pub use key::Key;
pub use stream::{
    CHUNK_SIZE, Direction, TransformSummary, decrypt_bytes, encrypt_bytes, transform_stream,
};
