//! Fuzz target for key construction
//!
//! # Strategy
//!
//! - Raw fuzzer bytes straight into `Key::new`, any length
//!
//! # Invariants
//!
//! - Exactly the 8..=64 byte range is accepted, nothing else
//! - Accepted keys preserve their bytes, zero bytes included
//! - Construction never panics

#![no_main]

use byteveil_core::Key;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match Key::new(data) {
        Ok(key) => {
            assert!((Key::MIN_LEN..=Key::MAX_LEN).contains(&data.len()));
            assert_eq!(key.as_bytes(), data);
        },
        Err(_) => {
            assert!(data.len() < Key::MIN_LEN || data.len() > Key::MAX_LEN);
        },
    }
});
