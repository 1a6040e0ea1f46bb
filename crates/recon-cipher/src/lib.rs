//! Selective decryption of ciphertext-tagged values
//!
//! Secrets files keep most values in plaintext and a few encrypted inline as
//! `<label>.aesgcm128.<payload>` or `<label>.aesgcm256.<payload>`. This crate
//! decrypts exactly those values, in place, anywhere inside a document, so the
//! result can be compared with the desired plaintext.
//!
//! Decryption never fails the caller: a value that cannot be decrypted is kept
//! as ciphertext and a warning is logged.

pub mod codec;
pub mod error;
pub mod key;
pub mod tagged;

pub use codec::{DecryptError, Decryption, decrypt_string, decrypt_tree, encrypt_string};
pub use error::{Error, Result};
pub use key::{KeyMaterial, KeySource};
pub use tagged::{CipherTaggedString, CipherVariant, is_cipher_tagged};
