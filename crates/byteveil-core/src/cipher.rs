//! Transform engine: the keyed offset-XOR byte transform.
//!
//! Each byte is combined with a cyclically-indexed key byte and with the
//! cursor position itself:
//!
//! - encrypt: `out = (in XOR key[cursor]) + cursor`
//! - decrypt: `out = (in - cursor) XOR key[cursor]`
//!
//! with wrapping byte arithmetic and `cursor = i % key_len` for the input
//! offset `i`. On decrypt the subtraction happens strictly before the XOR;
//! the two operations do not commute.
//!
//! Every call starts the cursor at zero, so a chunk transforms identically
//! wherever it sits in a file. The stream driver relies on this to pump
//! files chunk by chunk with no state carried between chunks.
//!
//! Both functions are pure: deterministic, no I/O, no failure modes, no
//! allocation beyond the caller's output buffer.

use crate::key::Key;

/// Encrypt `input` into `output` with a fresh key cursor.
///
/// `output` is cleared and refilled; on return its length equals the input
/// length. Reusing one output buffer across calls amortizes its allocation.
pub fn encrypt_chunk(input: &[u8], output: &mut Vec<u8>, key: &Key) {
    output.clear();
    output.extend(
        input.iter().zip(key.cycle()).map(|(&b, (cursor, k))| (b ^ k).wrapping_add(cursor)),
    );
}

/// Decrypt `input` into `output` with a fresh key cursor.
///
/// Exact inverse of [`encrypt_chunk`] under the same key: the positional
/// offset is subtracted (wrapping) before the XOR is undone.
pub fn decrypt_chunk(input: &[u8], output: &mut Vec<u8>, key: &Key) {
    output.clear();
    output.extend(
        input.iter().zip(key.cycle()).map(|(&b, (cursor, k))| b.wrapping_sub(cursor) ^ k),
    );
}
