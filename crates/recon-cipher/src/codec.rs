//! Decryption of ciphertext-tagged values inside documents
//!
//! A tagged payload decodes (urlsafe base64, unpadded) to
//! `[12-byte nonce][ciphertext][16-byte tag]`.

use aes_gcm::aead::{Aead, KeyInit, Nonce};
use aes_gcm::{Aes128Gcm, Aes256Gcm};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_yaml::Value;
use serde_yaml::value::TaggedValue;

use crate::error::{Error, Result};
use crate::key::KeyMaterial;
use crate::tagged::{CipherTaggedString, CipherVariant};

/// Nonce length shared by both GCM variants.
pub const NONCE_LEN: usize = 12;

/// Authentication tag length shared by both GCM variants.
pub const TAG_LEN: usize = 16;

/// Why a tagged value was left encrypted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecryptError {
    #[error("value is not a ciphertext-tagged string")]
    NotCipherTagged,

    #[error("master key size did not match size used to encrypt data (expected {expected} bytes, got {actual})")]
    KeyLengthMismatch { expected: usize, actual: usize },

    #[error("payload is not valid urlsafe base64: {0}")]
    InvalidBase64(String),

    #[error("payload is {len} bytes, shorter than nonce and tag")]
    PayloadTooShort { len: usize },

    #[error("authentication failed")]
    Authentication,

    #[error("plaintext is not valid UTF-8")]
    InvalidUtf8,
}

/// Outcome of decrypting one tagged string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decryption {
    Plaintext(String),
    /// The original string, unchanged, and why it could not be decrypted.
    Failed { original: String, error: DecryptError },
}

impl Decryption {
    /// The plaintext, or the original ciphertext if decryption failed.
    pub fn into_string(self) -> String {
        match self {
            Self::Plaintext(plaintext) => plaintext,
            Self::Failed { original, .. } => original,
        }
    }

    pub fn is_plaintext(&self) -> bool {
        matches!(self, Self::Plaintext(_))
    }
}

/// Decrypt a single tagged string.
///
/// Never panics or errors: failures are reported as [`Decryption::Failed`]
/// and logged as warnings.
pub fn decrypt_string(value: &str, key: &KeyMaterial) -> Decryption {
    let Some(tagged) = CipherTaggedString::parse(value) else {
        return Decryption::Failed {
            original: value.to_string(),
            error: DecryptError::NotCipherTagged,
        };
    };

    match open_tagged(&tagged, key) {
        Ok(plaintext) => Decryption::Plaintext(plaintext),
        Err(error) => {
            tracing::warn!(
                label = tagged.label,
                "Error decrypting string in YAML document: {}",
                error
            );
            Decryption::Failed {
                original: value.to_string(),
                error,
            }
        }
    }
}

/// Decrypt every ciphertext-tagged string in `tree`.
///
/// Mappings and sequences are rebuilt with each element transformed; all
/// other values, and tagged strings that fail to decrypt, pass through
/// unchanged.
pub fn decrypt_tree(tree: Value, key: &KeyMaterial) -> Value {
    match tree {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| (k, decrypt_tree(v, key)))
                .collect(),
        ),
        Value::Sequence(seq) => {
            Value::Sequence(seq.into_iter().map(|v| decrypt_tree(v, key)).collect())
        }
        Value::String(s) if CipherTaggedString::parse(&s).is_some() => {
            Value::String(decrypt_string(&s, key).into_string())
        }
        Value::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            Value::Tagged(Box::new(TaggedValue {
                tag,
                value: decrypt_tree(value, key),
            }))
        }
        other => other,
    }
}

/// Encrypt `plaintext` into a tagged string with a fresh random nonce.
///
/// The variant follows the key length. `label` must be 6 hex digits.
pub fn encrypt_string(plaintext: &str, key: &KeyMaterial, label: &str) -> Result<String> {
    if label.len() != 6 || !label.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidLabel {
            label: label.to_string(),
        });
    }

    let mut nonce = [0u8; NONCE_LEN];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut nonce);

    let variant = key.variant();
    let sealed = match variant {
        CipherVariant::Aes128Gcm => seal::<Aes128Gcm>(key, &nonce, plaintext.as_bytes()),
        CipherVariant::Aes256Gcm => seal::<Aes256Gcm>(key, &nonce, plaintext.as_bytes()),
    }?;

    let mut payload = Vec::with_capacity(NONCE_LEN + sealed.len());
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&sealed);

    Ok(format!(
        "{}.{}.{}",
        label,
        variant.tag(),
        URL_SAFE_NO_PAD.encode(payload)
    ))
}

fn open_tagged(
    tagged: &CipherTaggedString<'_>,
    key: &KeyMaterial,
) -> std::result::Result<String, DecryptError> {
    let expected = tagged.variant.key_len();
    if key.len() != expected {
        return Err(DecryptError::KeyLengthMismatch {
            expected,
            actual: key.len(),
        });
    }

    let buf = URL_SAFE_NO_PAD
        .decode(tagged.payload)
        .map_err(|e| DecryptError::InvalidBase64(e.to_string()))?;
    if buf.len() < NONCE_LEN + TAG_LEN {
        return Err(DecryptError::PayloadTooShort { len: buf.len() });
    }

    // The AEAD API expects the tag appended to the ciphertext, which is
    // exactly the remainder after the nonce.
    let (nonce, sealed) = buf.split_at(NONCE_LEN);
    let plaintext = match tagged.variant {
        CipherVariant::Aes128Gcm => open::<Aes128Gcm>(key, expected, nonce, sealed),
        CipherVariant::Aes256Gcm => open::<Aes256Gcm>(key, expected, nonce, sealed),
    }?;

    String::from_utf8(plaintext).map_err(|_| DecryptError::InvalidUtf8)
}

fn open<C: Aead + KeyInit>(
    key: &KeyMaterial,
    expected: usize,
    nonce: &[u8],
    sealed: &[u8],
) -> std::result::Result<Vec<u8>, DecryptError> {
    let cipher = C::new_from_slice(key.as_bytes()).map_err(|_| DecryptError::KeyLengthMismatch {
        expected,
        actual: key.len(),
    })?;

    cipher
        .decrypt(Nonce::<C>::from_slice(nonce), sealed)
        .map_err(|_| DecryptError::Authentication)
}

fn seal<C: Aead + KeyInit>(key: &KeyMaterial, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = C::new_from_slice(key.as_bytes()).map_err(|_| Error::InvalidKeyLength {
        len: key.len(),
    })?;

    cipher
        .encrypt(Nonce::<C>::from_slice(nonce), plaintext)
        .map_err(|_| Error::EncryptionFailed)
}
