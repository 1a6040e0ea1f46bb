//! Recognition of ciphertext-tagged strings

use regex::Regex;
use std::sync::LazyLock;

/// Shape of an inline encrypted value: `<6 hex>.aesgcm(128|256).<urlsafe base64>`
pub static CIPHER_TAGGED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A([0-9a-fA-F]{6})\.(aesgcm128|aesgcm256)\.([A-Za-z0-9_-]+)\z").unwrap()
});

/// Authenticated cipher selected by the algorithm tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherVariant {
    /// AES-128-GCM, 16-byte key
    Aes128Gcm,
    /// AES-256-GCM, 32-byte key
    Aes256Gcm,
}

impl CipherVariant {
    /// Parse the middle segment of a tagged string.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "aesgcm128" => Some(Self::Aes128Gcm),
            "aesgcm256" => Some(Self::Aes256Gcm),
            _ => None,
        }
    }

    /// The variant that uses keys of `len` bytes.
    pub fn for_key_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(Self::Aes128Gcm),
            32 => Some(Self::Aes256Gcm),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Aes128Gcm => "aesgcm128",
            Self::Aes256Gcm => "aesgcm256",
        }
    }

    /// Required raw key length in bytes.
    pub fn key_len(&self) -> usize {
        match self {
            Self::Aes128Gcm => 16,
            Self::Aes256Gcm => 32,
        }
    }
}

/// A string recognised as inline ciphertext, borrowed from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherTaggedString<'a> {
    /// Opaque 6-hex-digit label, kept for operator traceability
    pub label: &'a str,
    pub variant: CipherVariant,
    /// Unpadded urlsafe base64 of `nonce || ciphertext || tag`
    pub payload: &'a str,
}

impl<'a> CipherTaggedString<'a> {
    /// Returns `None` for any string that does not have the tagged shape.
    pub fn parse(value: &'a str) -> Option<Self> {
        let captures = CIPHER_TAGGED_PATTERN.captures(value)?;
        let label = captures.get(1)?.as_str();
        let variant = CipherVariant::from_tag(captures.get(2)?.as_str())?;
        let payload = captures.get(3)?.as_str();

        Some(Self {
            label,
            variant,
            payload,
        })
    }
}

/// Does `value` look like inline ciphertext?
pub fn is_cipher_tagged(value: &str) -> bool {
    CIPHER_TAGGED_PATTERN.is_match(value)
}
