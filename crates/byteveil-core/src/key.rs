//! Key representation for the byteveil transform.
//!
//! A [`Key`] is an explicit, length-carrying byte sequence. The transform
//! cycles its cursor over the declared length, so the cycle boundary is a
//! property of the length alone, never of a sentinel byte value: zero-valued
//! key bytes are legal and cycle like any other byte.

use std::{fmt, str::FromStr};

use zeroize::Zeroize;

use crate::error::KeyError;

/// Transform key: an immutable byte sequence of 8 to 64 bytes.
///
/// The key is borrowed read-only by the transform engine and never changes
/// for the duration of a run. Key material is zeroized on drop and redacted
/// from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Key {
    bytes: Vec<u8>,
}

impl Key {
    /// Minimum accepted key length in bytes.
    pub const MIN_LEN: usize = 8;

    /// Maximum accepted key length in bytes.
    pub const MAX_LEN: usize = 64;

    /// Create a key from raw bytes.
    ///
    /// Rejected input is zeroized before the error returns.
    ///
    /// # Errors
    ///
    /// - [`KeyError::TooShort`] for fewer than [`Key::MIN_LEN`] bytes
    /// - [`KeyError::TooLong`] for more than [`Key::MAX_LEN`] bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let mut bytes = bytes.into();
        let actual = bytes.len();
        if actual < Self::MIN_LEN {
            bytes.zeroize();
            return Err(KeyError::TooShort { actual });
        }
        if actual > Self::MAX_LEN {
            bytes.zeroize();
            return Err(KeyError::TooLong { actual });
        }
        Ok(Self { bytes })
    }

    /// Key bytes, in order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Endless `(cursor, key_byte)` pairs, restarting from the front of the
    /// key each time the cursor reaches the declared length.
    ///
    /// The cursor fits in `u8`: it never exceeds `MAX_LEN - 1`.
    pub(crate) fn cycle(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.bytes.iter().enumerate().map(|(i, &k)| (i as u8, k)).cycle()
    }
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key").field("len", &self.bytes.len()).finish_non_exhaustive()
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}
