//! Stream driver: chunked pump between a reader and a writer.
//!
//! The driver owns two buffers, one input and one output, always distinct,
//! and moves data in chunks of up to [`CHUNK_SIZE`] bytes: fill the input
//! buffer, transform the filled prefix with a fresh key cursor, write the
//! whole output buffer, repeat until the reader is exhausted. Nothing else
//! carries state between chunks, and memory stays `O(CHUNK_SIZE)` no matter
//! how large the input is.
//!
//! # Chunk boundaries are part of the format
//!
//! The key cursor restarts at every chunk boundary, so where the boundaries
//! fall is observable in any output longer than one chunk. Two rules keep
//! the output a pure function of the input bytes and the key:
//!
//! - boundaries sit at fixed multiples of [`CHUNK_SIZE`]: short reads are
//!   retried until the buffer is full or the stream ends, so transport read
//!   sizing (pipes, sockets, disk) never shifts them;
//! - [`CHUNK_SIZE`] stays at 100 000 bytes. Artifacts produced at one chunk
//!   size do not decrypt at another, so the size is not tunable.

use std::io::{self, Read, Write};

use crate::{
    cipher::{decrypt_chunk, encrypt_chunk},
    error::StreamError,
    key::Key,
};

/// Chunk capacity in bytes for the stream driver and the whole-buffer
/// helpers.
///
/// The key cursor resets at each multiple of this size, which makes the
/// value part of format compatibility: changing it would change every
/// output longer than one chunk.
pub const CHUNK_SIZE: usize = 100_000;

/// Which way to run the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Obfuscate: `(byte XOR key[cursor]) + cursor`.
    Encrypt,
    /// Restore: `(byte - cursor) XOR key[cursor]`.
    Decrypt,
}

/// Work accounting returned by a completed pump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformSummary {
    /// Total bytes read, transformed and written.
    pub bytes: u64,
    /// Chunks pumped; zero for an empty input.
    pub chunks: u64,
}

/// Pump `reader` into `writer` through the transform.
///
/// Reads chunks of up to [`CHUNK_SIZE`] bytes, transforms each with a fresh
/// key cursor and writes it out. Output length equals input length exactly:
/// no header, no padding, no framing. The writer is flushed before
/// returning.
///
/// # Errors
///
/// [`StreamError::Read`] or [`StreamError::Write`] when the underlying
/// stream fails. The error carries how many bytes were fully processed;
/// partial output past that count must be treated as invalid. A chunk whose
/// fill failed partway is not transformed at all, so valid output always
/// ends on a chunk boundary or at end of input.
pub fn transform_stream<R, W>(
    mut reader: R,
    mut writer: W,
    key: &Key,
    direction: Direction,
) -> Result<TransformSummary, StreamError>
where
    R: Read,
    W: Write,
{
    let mut input = vec![0u8; CHUNK_SIZE];
    let mut output = Vec::with_capacity(CHUNK_SIZE);
    let mut summary = TransformSummary::default();

    loop {
        let filled = fill_chunk(&mut reader, &mut input)
            .map_err(|source| StreamError::Read { bytes_processed: summary.bytes, source })?;
        if filled == 0 {
            break;
        }

        match direction {
            Direction::Encrypt => encrypt_chunk(&input[..filled], &mut output, key),
            Direction::Decrypt => decrypt_chunk(&input[..filled], &mut output, key),
        }

        writer
            .write_all(&output)
            .map_err(|source| StreamError::Write { bytes_processed: summary.bytes, source })?;

        summary.bytes += filled as u64;
        summary.chunks += 1;
    }

    writer
        .flush()
        .map_err(|source| StreamError::Write { bytes_processed: summary.bytes, source })?;

    Ok(summary)
}

/// Encrypt a whole buffer with the production chunking policy.
///
/// Equivalent to pumping `input` through [`transform_stream`] with
/// [`Direction::Encrypt`]: the key cursor restarts every [`CHUNK_SIZE`]
/// bytes, so the result is byte-identical to the file pipeline's.
pub fn encrypt_bytes(input: &[u8], key: &Key) -> Vec<u8> {
    transform_bytes(input, key, Direction::Encrypt)
}

/// Decrypt a whole buffer with the production chunking policy.
///
/// Inverse of [`encrypt_bytes`]; see there for the chunking rule.
pub fn decrypt_bytes(input: &[u8], key: &Key) -> Vec<u8> {
    transform_bytes(input, key, Direction::Decrypt)
}

fn transform_bytes(input: &[u8], key: &Key, direction: Direction) -> Vec<u8> {
    let mut result = Vec::with_capacity(input.len());
    let mut output = Vec::new();
    for chunk in input.chunks(CHUNK_SIZE) {
        match direction {
            Direction::Encrypt => encrypt_chunk(chunk, &mut output, key),
            Direction::Decrypt => decrypt_chunk(chunk, &mut output, key),
        }
        result.extend_from_slice(&output);
    }
    result
}

/// Fill `buf` from `reader`, continuing through short reads until the
/// buffer is full or the stream ends. Returns the number of bytes filled.
///
/// Interrupted reads are retried. Keeping every chunk full except the last
/// pins the chunk boundaries to multiples of the buffer length regardless
/// of how the transport slices its reads.
fn fill_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {},
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn test_key(bytes: &[u8]) -> Key {
        Key::new(bytes).expect("test key length in range")
    }

    fn max_len_key() -> Key {
        let bytes: Vec<u8> = (0x20..0x60).collect();
        Key::new(bytes).expect("64 bytes")
    }

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    /// Reader that hands out at most `max` bytes per call and reports a
    /// spurious interruption every third call.
    struct Dribble<'a> {
        data: &'a [u8],
        pos: usize,
        max: usize,
        calls: usize,
    }

    impl<'a> Dribble<'a> {
        fn new(data: &'a [u8], max: usize) -> Self {
            Self { data, pos: 0, max, calls: 0 }
        }
    }

    impl Read for Dribble<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.calls % 3 == 0 {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "try again"));
            }
            let n = (self.data.len() - self.pos).min(self.max).min(buf.len());
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// Reader that serves its data and then fails instead of reporting EOF.
    struct ErrorAfter<'a> {
        data: &'a [u8],
        pos: usize,
    }

    impl Read for ErrorAfter<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.data.len() {
                return Err(io::Error::other("device gone"));
            }
            let n = (self.data.len() - self.pos).min(buf.len());
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// Writer that fails once `limit` bytes have been accepted.
    struct FailAfter {
        accepted: usize,
        limit: usize,
    }

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.accepted >= self.limit {
                return Err(io::Error::other("disk full"));
            }
            let n = buf.len().min(self.limit - self.accepted);
            self.accepted += n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn empty_input_writes_nothing() {
        let key = test_key(b"password");
        let mut out = Vec::new();

        let summary =
            transform_stream(Cursor::new(&[]), &mut out, &key, Direction::Encrypt).unwrap();

        assert!(out.is_empty());
        assert_eq!(summary, TransformSummary { bytes: 0, chunks: 0 });
    }

    #[test]
    fn stream_matches_whole_buffer_helper() {
        let key = max_len_key();
        let data = patterned(250_000);
        let mut out = Vec::new();

        let summary =
            transform_stream(Cursor::new(&data), &mut out, &key, Direction::Encrypt).unwrap();

        assert_eq!(out, encrypt_bytes(&data, &key));
        assert_eq!(summary, TransformSummary { bytes: 250_000, chunks: 3 });

        let mut restored = Vec::new();
        transform_stream(Cursor::new(&out), &mut restored, &key, Direction::Decrypt).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn chunk_boundary_restarts_the_cursor() {
        // 100_000 % 9 == 1, so a cursor carried across the boundary would
        // sit at 1, not 0. Byte CHUNK_SIZE must be transformed with a
        // restarted cursor.
        let key = test_key(b"abcdefghi");
        let data = vec![0xaa; CHUNK_SIZE + 1];

        let masked = encrypt_bytes(&data, &key);
        assert_eq!(masked[CHUNK_SIZE], 0xaa ^ b'a');
        assert_ne!(masked[CHUNK_SIZE], (0xaa ^ b'b').wrapping_add(1));

        assert_eq!(decrypt_bytes(&masked, &key), data);
    }

    #[test]
    fn exact_chunk_multiple_is_one_chunk_each() {
        let key = test_key(b"password");
        let data = patterned(CHUNK_SIZE);
        let mut out = Vec::new();

        let summary =
            transform_stream(Cursor::new(&data), &mut out, &key, Direction::Encrypt).unwrap();
        assert_eq!(summary.chunks, 1);

        let data = patterned(CHUNK_SIZE + 1);
        let mut out = Vec::new();
        let summary =
            transform_stream(Cursor::new(&data), &mut out, &key, Direction::Encrypt).unwrap();
        assert_eq!(summary.chunks, 2);
        assert_eq!(summary.bytes, (CHUNK_SIZE + 1) as u64);
    }

    #[test]
    fn dribbled_reads_do_not_move_boundaries() {
        // 150_000 bytes served at most 7 at a time, with interruptions:
        // output must still match the full-slice pipeline byte for byte.
        let key = test_key(b"abcdefghi");
        let data = patterned(150_000);
        let mut out = Vec::new();

        let summary =
            transform_stream(Dribble::new(&data, 7), &mut out, &key, Direction::Encrypt).unwrap();

        assert_eq!(out, encrypt_bytes(&data, &key));
        assert_eq!(summary, TransformSummary { bytes: 150_000, chunks: 2 });
    }

    #[test]
    fn write_failure_reports_processed_bytes() {
        let key = test_key(b"password");
        let data = patterned(150_000);
        let writer = FailAfter { accepted: 0, limit: CHUNK_SIZE };

        let err = transform_stream(Cursor::new(&data), writer, &key, Direction::Encrypt)
            .unwrap_err();

        assert!(matches!(err, StreamError::Write { .. }));
        assert_eq!(err.bytes_processed(), CHUNK_SIZE as u64);
    }

    #[test]
    fn read_failure_reports_processed_bytes() {
        let key = test_key(b"password");
        let data = patterned(CHUNK_SIZE);
        let reader = ErrorAfter { data: &data, pos: 0 };
        let mut out = Vec::new();

        let err =
            transform_stream(reader, &mut out, &key, Direction::Encrypt).unwrap_err();

        assert!(matches!(err, StreamError::Read { .. }));
        assert_eq!(err.bytes_processed(), CHUNK_SIZE as u64);
        // The completed chunk was written before the failure.
        assert_eq!(out.len(), CHUNK_SIZE);
    }

    #[test]
    fn whole_buffer_helpers_round_trip() {
        let key = test_key(b"password");
        let data = patterned(1_000);

        let masked = encrypt_bytes(&data, &key);
        assert_eq!(masked.len(), data.len());
        assert_ne!(masked, data);
        assert_eq!(decrypt_bytes(&masked, &key), data);

        assert!(encrypt_bytes(&[], &key).is_empty());
    }
}
