//! Fixed keys and ciphertext for tests.
//!
//! The `HUNTER2_*` values were produced with a separate AES-GCM
//! implementation using nonce `00 01 .. 0b`, so they check interoperability
//! rather than round-tripping through our own encryptor.

use recon_cipher::{KeyMaterial, KeySource, encrypt_string};

pub const KEY_128_HEX: &str = "000102030405060708090a0b0c0d0e0f";

pub const KEY_256_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

/// `"hunter2"` encrypted under [`KEY_128_HEX`]
pub const HUNTER2_128: &str = "abc123.aesgcm128.AAECAwQFBgcICQoL-xnJugNpxVGeSBGVdOTdcfq-fFDBgSs";

/// `"hunter2"` encrypted under [`KEY_256_HEX`]
pub const HUNTER2_256: &str = "0f1e2d.aesgcm256.AAECAwQFBgcICQoLL3e4b6CX8NkNHQ_Bscr2Jq9vK5EOgZk";

pub fn key_128() -> KeyMaterial {
    KeyMaterial::from_hex(KEY_128_HEX).expect("fixture key is valid")
}

pub fn key_256() -> KeyMaterial {
    KeyMaterial::from_hex(KEY_256_HEX).expect("fixture key is valid")
}

pub fn inline_source(hex: &str) -> KeySource {
    KeySource::parse(hex).expect("fixture key is valid")
}

/// Encrypt `plaintext` with a fresh nonce under the fixture label `abc123`.
pub fn encrypted(plaintext: &str, key: &KeyMaterial) -> String {
    encrypt_string(plaintext, key, "abc123").expect("encryption with fixture key")
}
