//! Fuzz target for the offset-XOR transform round trip
//!
//! # Strategy
//!
//! - Arbitrary payloads: empty, tiny, and large enough to cross splits
//! - Arbitrary key material clamped into the accepted 8..=64 range,
//!   zero bytes included
//! - Arbitrary piecewise splits to stress the per-chunk cursor reset
//!
//! # Invariants
//!
//! - decrypt(encrypt(payload)) == payload
//! - output length always equals input length
//! - decrypting arbitrary (never-encrypted) bytes never panics
//! - matching piecewise splits agree with the whole-buffer transform

#![no_main]

use arbitrary::Arbitrary;
use byteveil_core::{Key, decrypt_bytes, decrypt_chunk, encrypt_bytes, encrypt_chunk};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct TransformScenario {
    payload: Vec<u8>,
    key_material: Vec<u8>,
    split: u16,
}

fuzz_target!(|scenario: TransformScenario| {
    let key = clamp_key(scenario.key_material);

    let masked = encrypt_bytes(&scenario.payload, &key);
    assert_eq!(masked.len(), scenario.payload.len());
    assert_eq!(decrypt_bytes(&masked, &key), scenario.payload);

    // Piecewise with matching splits must round-trip as well.
    let split = usize::from(scenario.split).max(1);
    let mut buf = Vec::new();
    let mut piecewise = Vec::new();
    for piece in scenario.payload.chunks(split) {
        encrypt_chunk(piece, &mut buf, &key);
        piecewise.extend_from_slice(&buf);
    }
    let mut restored = Vec::new();
    for piece in piecewise.chunks(split) {
        decrypt_chunk(piece, &mut buf, &key);
        restored.extend_from_slice(&buf);
    }
    assert_eq!(restored, scenario.payload);

    // Arbitrary bytes fed straight into decrypt must never panic.
    decrypt_chunk(&scenario.payload, &mut buf, &key);
    assert_eq!(buf.len(), scenario.payload.len());
});

fn clamp_key(mut material: Vec<u8>) -> Key {
    let len = material.len().clamp(Key::MIN_LEN, Key::MAX_LEN);
    material.resize(len, 0x5a);
    match Key::new(material) {
        Ok(key) => key,
        Err(err) => panic!("clamped key length must be accepted: {err}"),
    }
}
